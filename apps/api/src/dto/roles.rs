use hrdesk_domain::Role;
use serde::{Deserialize, Serialize};

/// Incoming payload for role creation.
#[derive(Debug, Deserialize)]
pub struct CreateRoleRequest {
    pub role_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Incoming payload for role rename.
#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// API representation of a role.
#[derive(Debug, Serialize)]
pub struct RoleResponse {
    pub role_id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        Self {
            role_id: role.role_id().to_string(),
            name: role.name().to_owned(),
            description: role.description().map(str::to_owned),
            created_at: role.created_at().to_rfc3339(),
            updated_at: role.updated_at().to_rfc3339(),
        }
    }
}
