use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use hrdesk_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

const ROLE_KEY_MAX_LENGTH: usize = 64;
const ROLE_NAME_MAX_LENGTH: usize = 100;

/// Stable role identifier used in comparisons and foreign keys.
///
/// Keys are lowercase slugs: an ASCII letter followed by letters, digits or
/// underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoleKey(String);

impl RoleKey {
    /// Creates a validated role key.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "role identifier must not be empty".to_owned(),
            ));
        }

        if trimmed.len() > ROLE_KEY_MAX_LENGTH {
            return Err(AppError::Validation(format!(
                "role identifier must not exceed {ROLE_KEY_MAX_LENGTH} characters"
            )));
        }

        let mut characters = trimmed.chars();
        let starts_with_letter = characters
            .next()
            .is_some_and(|character| character.is_ascii_lowercase());
        let rest_is_slug = characters.all(|character| {
            character.is_ascii_lowercase() || character.is_ascii_digit() || character == '_'
        });

        if !starts_with_letter || !rest_is_slug {
            return Err(AppError::Validation(format!(
                "role identifier '{trimmed}' must be a lowercase slug"
            )));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for RoleKey {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

impl TryFrom<String> for RoleKey {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RoleKey> for String {
    fn from(value: RoleKey) -> Self {
        value.0
    }
}

impl From<CanonicalRole> for RoleKey {
    fn from(value: CanonicalRole) -> Self {
        Self(value.key().to_owned())
    }
}

/// The fixed roles referenced by route allow-lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalRole {
    /// Full administrative access.
    Admin,
    /// Human-resources staff.
    Hr,
    /// Line managers.
    Manager,
    /// Regular employees.
    Employee,
}

impl CanonicalRole {
    /// Returns the stable role identifier.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::Admin => "role_admin",
            Self::Hr => "role_hr",
            Self::Manager => "role_manager",
            Self::Employee => "role_employee",
        }
    }

    /// Returns the human-facing label legacy tokens carry.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Hr => "HR",
            Self::Manager => "Manager",
            Self::Employee => "Employee",
        }
    }

    /// Returns all canonical roles.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[CanonicalRole] = &[
            CanonicalRole::Admin,
            CanonicalRole::Hr,
            CanonicalRole::Manager,
            CanonicalRole::Employee,
        ];

        ALL
    }
}

impl FromStr for CanonicalRole {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "role_admin" => Ok(Self::Admin),
            "role_hr" => Ok(Self::Hr),
            "role_manager" => Ok(Self::Manager),
            "role_employee" => Ok(Self::Employee),
            _ => Err(AppError::Validation(format!(
                "unknown canonical role '{value}'"
            ))),
        }
    }
}

/// Named bundle of capabilities assignable to employees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    role_id: RoleKey,
    name: NonEmptyString,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Role {
    /// Creates a role after validating its display name and description.
    pub fn new(
        role_id: RoleKey,
        name: impl Into<String>,
        description: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        Ok(Self {
            role_id,
            name: validate_role_name(name.into())?,
            description: normalize_description(description),
            created_at,
            updated_at,
        })
    }

    /// Returns a copy with a new name and description; the identifier is kept.
    pub fn renamed(
        &self,
        name: impl Into<String>,
        description: Option<String>,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        Self::new(
            self.role_id.clone(),
            name,
            description,
            self.created_at,
            updated_at,
        )
    }

    /// Returns the stable identifier.
    #[must_use]
    pub fn role_id(&self) -> &RoleKey {
        &self.role_id
    }

    /// Returns the unique display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

fn validate_role_name(name: String) -> AppResult<NonEmptyString> {
    let trimmed = name.trim();
    if trimmed.chars().count() > ROLE_NAME_MAX_LENGTH {
        return Err(AppError::Validation(format!(
            "role name must not exceed {ROLE_NAME_MAX_LENGTH} characters"
        )));
    }

    NonEmptyString::new(trimmed)
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::Utc;

    use super::{CanonicalRole, Role, RoleKey};

    #[test]
    fn role_key_accepts_slugs() {
        assert!(RoleKey::new("role_admin").is_ok());
        assert!(RoleKey::new("payroll_2024").is_ok());
    }

    #[test]
    fn role_key_rejects_display_labels() {
        assert!(RoleKey::new("Admin").is_err());
        assert!(RoleKey::new("role admin").is_err());
        assert!(RoleKey::new("1role").is_err());
        assert!(RoleKey::new("  ").is_err());
    }

    #[test]
    fn canonical_role_keys_roundtrip() {
        for role in CanonicalRole::all() {
            let parsed = CanonicalRole::from_str(role.key());
            assert!(matches!(parsed, Ok(value) if value == *role));
            assert!(RoleKey::new(role.key()).is_ok());
        }
    }

    #[test]
    fn renaming_keeps_identifier_and_creation_time() {
        let created_at = Utc::now();
        let role = Role::new(
            RoleKey::from(CanonicalRole::Manager),
            "Manager",
            None,
            created_at,
            created_at,
        );
        let Ok(role) = role else {
            panic!("role should be valid");
        };

        let renamed = role.renamed("Team Lead", Some("  leads a team ".to_owned()), Utc::now());
        let Ok(renamed) = renamed else {
            panic!("rename should be valid");
        };

        assert_eq!(renamed.role_id().as_str(), "role_manager");
        assert_eq!(renamed.name(), "Team Lead");
        assert_eq!(renamed.description(), Some("leads a team"));
        assert_eq!(renamed.created_at(), created_at);
    }

    #[test]
    fn blank_description_is_dropped() {
        let now = Utc::now();
        let role = Role::new(
            RoleKey::from(CanonicalRole::Hr),
            "HR",
            Some("   ".to_owned()),
            now,
            now,
        );
        assert!(matches!(role, Ok(role) if role.description().is_none()));
    }
}
