use thiserror::Error;

/// Failure to turn a raw credential into verified claims.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// No credential, an unrecognized scheme, or an empty token.
    #[error("authentication credential is missing")]
    MissingCredential,

    /// Signature, expiry or payload verification failed.
    #[error("authentication credential is invalid: {0}")]
    InvalidCredential(String),
}

/// Structured rejection produced by the permission gate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// Credential was absent or failed verification.
    #[error("unauthenticated: {0}")]
    Unauthenticated(CredentialError),

    /// Credential was valid but none of its roles is on the route allow-list.
    #[error("forbidden: subject '{subject}' requires one of [{}]", .allowed.join(", "))]
    Forbidden {
        /// Subject of the rejected caller.
        subject: String,
        /// Role identifiers the endpoint accepts.
        allowed: Vec<String>,
    },
}

/// Invariant violations raised by the role, permission and assignment stores.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RbacError {
    /// Role still has assignments and cannot be deleted.
    #[error("role '{role_id}' is assigned to {assignment_count} employee(s) and cannot be deleted")]
    RoleInUse {
        /// Role that was targeted.
        role_id: String,
        /// Assignments referencing the role at the time of the call.
        assignment_count: u64,
    },

    /// The (employee, role) pair is already assigned.
    #[error("employee '{employee_id}' is already assigned role '{role_id}'")]
    DuplicateAssignment {
        /// Employee side of the pair.
        employee_id: String,
        /// Role side of the pair.
        role_id: String,
    },

    /// Referenced role does not exist.
    #[error("role '{0}' does not exist")]
    UnknownRole(String),

    /// Referenced employee does not exist.
    #[error("employee '{0}' does not exist")]
    UnknownEmployee(String),
}
