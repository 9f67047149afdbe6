use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use hrdesk_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::RoleKey;

/// Identifier of an employee record owned by the employee directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EmployeeId(String);

impl EmployeeId {
    /// Creates a validated employee identifier.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "employee identifier must not be empty".to_owned(),
            ));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for EmployeeId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Read-only slice of an employee record used for assignment listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    /// Employee identifier.
    pub employee_id: EmployeeId,
    /// Full display name.
    pub full_name: String,
    /// Work email.
    pub email: String,
    /// Department name, if recorded.
    pub department: Option<String>,
    /// Position title, if recorded.
    pub position: Option<String>,
}

impl EmployeeSummary {
    /// Returns whether the name or email contains `needle`, ignoring case.
    #[must_use]
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.full_name.to_lowercase().contains(&needle)
            || self.email.to_lowercase().contains(&needle)
    }
}

/// Link recording that one employee holds one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    assignment_id: Uuid,
    employee_id: EmployeeId,
    role_id: RoleKey,
    assigned_at: DateTime<Utc>,
}

impl Assignment {
    /// Creates an assignment record.
    #[must_use]
    pub fn new(
        assignment_id: Uuid,
        employee_id: EmployeeId,
        role_id: RoleKey,
        assigned_at: DateTime<Utc>,
    ) -> Self {
        Self {
            assignment_id,
            employee_id,
            role_id,
            assigned_at,
        }
    }

    /// Returns the assignment identifier.
    #[must_use]
    pub fn assignment_id(&self) -> Uuid {
        self.assignment_id
    }

    /// Returns the assigned employee.
    #[must_use]
    pub fn employee_id(&self) -> &EmployeeId {
        &self.employee_id
    }

    /// Returns the assigned role.
    #[must_use]
    pub fn role_id(&self) -> &RoleKey {
        &self.role_id
    }

    /// Returns when the role was granted.
    #[must_use]
    pub fn assigned_at(&self) -> DateTime<Utc> {
        self.assigned_at
    }

    /// Returns whether this assignment binds the given pair.
    #[must_use]
    pub fn binds(&self, employee_id: &EmployeeId, role_id: &RoleKey) -> bool {
        &self.employee_id == employee_id && &self.role_id == role_id
    }
}
