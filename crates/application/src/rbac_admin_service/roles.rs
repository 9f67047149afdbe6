use super::*;

use hrdesk_core::AppError;
use hrdesk_domain::{Role, RoleKey};
use tracing::info;

use crate::{AccessPolicy, CreateRoleInput, UpdateRoleInput};

impl RbacAdminService {
    /// Returns all roles.
    pub async fn list_roles(&self, actor: &AccessContext) -> AppResult<Vec<Role>> {
        Self::require(actor, AccessPolicy::rbac_read())?;
        self.roles.list_roles().await
    }

    /// Returns one role by identifier.
    pub async fn get_role(&self, actor: &AccessContext, role_id: &RoleKey) -> AppResult<Role> {
        Self::require(actor, AccessPolicy::rbac_read())?;
        self.roles
            .find_role(role_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' was not found")))
    }

    /// Creates a role.
    pub async fn create_role(
        &self,
        actor: &AccessContext,
        input: CreateRoleInput,
    ) -> AppResult<Role> {
        Self::require(actor, AccessPolicy::rbac_write())?;

        let role = self.roles.create_role(input).await?;
        info!(
            actor = actor.subject(),
            role_id = %role.role_id(),
            role_name = role.name(),
            "role created"
        );

        Ok(role)
    }

    /// Updates a role's name and description.
    pub async fn update_role(
        &self,
        actor: &AccessContext,
        role_id: &RoleKey,
        input: UpdateRoleInput,
    ) -> AppResult<Role> {
        Self::require(actor, AccessPolicy::rbac_write())?;

        let role = self.roles.update_role(role_id, input).await?;
        info!(
            actor = actor.subject(),
            role_id = %role.role_id(),
            role_name = role.name(),
            "role updated"
        );

        Ok(role)
    }

    /// Deletes an unassigned role together with its permissions.
    pub async fn delete_role(&self, actor: &AccessContext, role_id: &RoleKey) -> AppResult<()> {
        Self::require(actor, AccessPolicy::rbac_write())?;

        self.roles.delete_role(role_id).await?;
        info!(actor = actor.subject(), role_id = %role_id, "role deleted");

        Ok(())
    }
}
