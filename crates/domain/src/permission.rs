use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use hrdesk_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::RoleKey;

const RESOURCE_NAME_MAX_LENGTH: usize = 64;

/// Coarse-grained verb a permission grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionAction {
    /// View records.
    Read,
    /// Create or modify records.
    Write,
    /// Remove records.
    Delete,
    /// Administer roles and their assignments.
    ManageRoles,
}

impl PermissionAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Delete => "delete",
            Self::ManageRoles => "manage_roles",
        }
    }

    /// Parses a transport value into an action.
    pub fn from_transport(value: &str) -> Result<Self, AppError> {
        Self::from_str(value)
    }
}

impl FromStr for PermissionAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "read" => Ok(Self::Read),
            "write" => Ok(Self::Write),
            "delete" => Ok(Self::Delete),
            "manage_roles" => Ok(Self::ManageRoles),
            _ => Err(AppError::Validation(format!(
                "unknown permission action '{value}'"
            ))),
        }
    }
}

/// Resource noun a permission applies to, or the `all` wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceName(String);

impl ResourceName {
    /// Wildcard resource matching every resource.
    pub const WILDCARD: &'static str = "all";

    /// Creates a validated resource name.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let normalized = value.trim().to_lowercase();

        if normalized.is_empty() {
            return Err(AppError::Validation(
                "permission resource must not be empty".to_owned(),
            ));
        }

        if normalized.len() > RESOURCE_NAME_MAX_LENGTH {
            return Err(AppError::Validation(format!(
                "permission resource must not exceed {RESOURCE_NAME_MAX_LENGTH} characters"
            )));
        }

        if !normalized
            .chars()
            .all(|character| character.is_ascii_lowercase() || character == '_')
        {
            return Err(AppError::Validation(format!(
                "permission resource '{normalized}' may only contain letters and underscores"
            )));
        }

        Ok(Self(normalized))
    }

    /// Returns the resource as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns whether this is the `all` wildcard.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.0 == Self::WILDCARD
    }
}

impl Display for ResourceName {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// A single (resource, action) grant bound to a role.
///
/// Duplicate triples are allowed; the store does not deduplicate them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionGrant {
    permission_id: Uuid,
    role_id: RoleKey,
    resource: ResourceName,
    action: PermissionAction,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PermissionGrant {
    /// Creates a permission grant.
    #[must_use]
    pub fn new(
        permission_id: Uuid,
        role_id: RoleKey,
        resource: ResourceName,
        action: PermissionAction,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            permission_id,
            role_id,
            resource,
            action,
            created_at,
            updated_at,
        }
    }

    /// Returns the permission identifier.
    #[must_use]
    pub fn permission_id(&self) -> Uuid {
        self.permission_id
    }

    /// Returns the owning role.
    #[must_use]
    pub fn role_id(&self) -> &RoleKey {
        &self.role_id
    }

    /// Returns the resource noun.
    #[must_use]
    pub fn resource(&self) -> &ResourceName {
        &self.resource
    }

    /// Returns the granted action.
    #[must_use]
    pub fn action(&self) -> PermissionAction {
        self.action
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

    /// Returns whether this grant allows `action` on `resource`.
    #[must_use]
    pub fn covers(&self, resource: &str, action: PermissionAction) -> bool {
        self.action == action && (self.resource.is_wildcard() || self.resource.as_str() == resource)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::Utc;
    use uuid::Uuid;

    use super::{PermissionAction, PermissionGrant, ResourceName};
    use crate::{CanonicalRole, RoleKey};

    fn grant(resource: &str, action: PermissionAction) -> PermissionGrant {
        let Ok(resource) = ResourceName::new(resource) else {
            panic!("resource should be valid");
        };
        let now = Utc::now();
        PermissionGrant::new(
            Uuid::new_v4(),
            RoleKey::from(CanonicalRole::Hr),
            resource,
            action,
            now,
            now,
        )
    }

    #[test]
    fn action_roundtrip_storage_value() {
        let action = PermissionAction::ManageRoles;
        let restored = PermissionAction::from_str(action.as_str());
        assert!(matches!(restored, Ok(value) if value == action));
    }

    #[test]
    fn unknown_action_is_rejected() {
        assert!(PermissionAction::from_str("approve").is_err());
    }

    #[test]
    fn resource_name_is_lowercased_and_validated() {
        let resource = ResourceName::new(" Employee ");
        assert!(matches!(resource, Ok(value) if value.as_str() == "employee"));
        assert!(ResourceName::new("payroll-run").is_err());
        assert!(ResourceName::new("").is_err());
    }

    #[test]
    fn wildcard_grant_covers_every_resource_for_its_action() {
        let wildcard = grant("all", PermissionAction::Read);
        assert!(wildcard.covers("employee", PermissionAction::Read));
        assert!(wildcard.covers("department", PermissionAction::Read));
        assert!(!wildcard.covers("employee", PermissionAction::Write));
    }

    #[test]
    fn specific_grant_covers_only_its_resource() {
        let specific = grant("employee", PermissionAction::Delete);
        assert!(specific.covers("employee", PermissionAction::Delete));
        assert!(!specific.covers("department", PermissionAction::Delete));
    }
}
