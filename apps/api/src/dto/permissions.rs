use hrdesk_domain::PermissionGrant;
use serde::{Deserialize, Serialize};

/// Incoming payload for granting a permission.
#[derive(Debug, Deserialize)]
pub struct CreatePermissionRequest {
    pub role_id: String,
    pub resource: String,
    pub action: String,
}

/// Incoming payload for changing a permission.
#[derive(Debug, Deserialize)]
pub struct UpdatePermissionRequest {
    pub resource: String,
    pub action: String,
}

/// Query parameters for permission listing.
#[derive(Debug, Default, Deserialize)]
pub struct PermissionListQuery {
    pub role_id: Option<String>,
}

/// Query parameters narrowing an employee's effective grants.
#[derive(Debug, Default, Deserialize)]
pub struct EffectivePermissionQuery {
    pub resource: Option<String>,
    pub action: Option<String>,
}

/// API representation of a permission grant.
#[derive(Debug, Serialize)]
pub struct PermissionResponse {
    pub permission_id: String,
    pub role_id: String,
    pub resource: String,
    pub action: &'static str,
    pub created_at: String,
    pub updated_at: String,
}

impl From<PermissionGrant> for PermissionResponse {
    fn from(permission: PermissionGrant) -> Self {
        Self {
            permission_id: permission.permission_id().to_string(),
            role_id: permission.role_id().to_string(),
            resource: permission.resource().to_string(),
            action: permission.action().as_str(),
            created_at: permission.created_at().to_rfc3339(),
            updated_at: permission.updated_at().to_rfc3339(),
        }
    }
}
