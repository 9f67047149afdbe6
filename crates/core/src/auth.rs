use serde::{Deserialize, Serialize};

/// Verified content of a bearer credential.
///
/// Role labels are kept exactly as the issuer wrote them; they may be
/// display labels or canonical identifiers depending on token age.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    subject: String,
    role_labels: Vec<String>,
    employee_id: Option<String>,
    username: Option<String>,
    email: Option<String>,
}

impl TokenClaims {
    /// Creates claims from verified token data.
    #[must_use]
    pub fn new(subject: impl Into<String>, role_labels: Vec<String>) -> Self {
        Self {
            subject: subject.into(),
            role_labels,
            employee_id: None,
            username: None,
            email: None,
        }
    }

    /// Attaches the employee record the subject is linked to.
    #[must_use]
    pub fn with_employee_id(mut self, employee_id: Option<String>) -> Self {
        self.employee_id = employee_id;
        self
    }

    /// Attaches the optional username and email claims.
    #[must_use]
    pub fn with_contact(mut self, username: Option<String>, email: Option<String>) -> Self {
        self.username = username;
        self.email = email;
        self
    }

    /// Returns the subject claim.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns role labels in issuer order.
    #[must_use]
    pub fn role_labels(&self) -> &[String] {
        self.role_labels.as_slice()
    }

    /// Returns the linked employee identifier, if any.
    #[must_use]
    pub fn employee_id(&self) -> Option<&str> {
        self.employee_id.as_deref()
    }

    /// Returns the username claim, if any.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Returns the email claim, if any.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

/// Caller context handed to handlers once the gate has allowed a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessContext {
    subject: String,
    employee_id: Option<String>,
    roles: Vec<String>,
}

impl AccessContext {
    /// Creates a context from a subject and its normalized role identifiers.
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        employee_id: Option<String>,
        roles: Vec<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            employee_id,
            roles,
        }
    }

    /// Returns the caller subject.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the employee record linked to the caller, if any.
    #[must_use]
    pub fn employee_id(&self) -> Option<&str> {
        self.employee_id.as_deref()
    }

    /// Returns normalized role identifiers in token order.
    #[must_use]
    pub fn roles(&self) -> &[String] {
        self.roles.as_slice()
    }
}
