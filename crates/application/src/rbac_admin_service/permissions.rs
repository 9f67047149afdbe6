use super::*;

use hrdesk_core::AppError;
use hrdesk_domain::{EmployeeId, PermissionGrant, RoleKey};
use tracing::info;
use uuid::Uuid;

use crate::{AccessPolicy, CreatePermissionInput, UpdatePermissionInput};

impl RbacAdminService {
    /// Returns permission grants, optionally for one role.
    pub async fn list_permissions(
        &self,
        actor: &AccessContext,
        role_id: Option<&RoleKey>,
    ) -> AppResult<Vec<PermissionGrant>> {
        Self::require(actor, AccessPolicy::rbac_read())?;
        self.permissions.list_permissions(role_id).await
    }

    /// Returns one permission grant.
    pub async fn get_permission(
        &self,
        actor: &AccessContext,
        permission_id: Uuid,
    ) -> AppResult<PermissionGrant> {
        Self::require(actor, AccessPolicy::rbac_read())?;
        self.permissions
            .find_permission(permission_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("permission '{permission_id}' was not found"))
            })
    }

    /// Grants a (resource, action) pair to an existing role.
    pub async fn create_permission(
        &self,
        actor: &AccessContext,
        input: CreatePermissionInput,
    ) -> AppResult<PermissionGrant> {
        Self::require(actor, AccessPolicy::rbac_write())?;

        let permission = self.permissions.create_permission(input).await?;
        info!(
            actor = actor.subject(),
            permission_id = %permission.permission_id(),
            role_id = %permission.role_id(),
            resource = %permission.resource(),
            action = permission.action().as_str(),
            "permission granted"
        );

        Ok(permission)
    }

    /// Replaces a grant's resource and action.
    pub async fn update_permission(
        &self,
        actor: &AccessContext,
        permission_id: Uuid,
        input: UpdatePermissionInput,
    ) -> AppResult<PermissionGrant> {
        Self::require(actor, AccessPolicy::rbac_write())?;

        let permission = self
            .permissions
            .update_permission(permission_id, input)
            .await?;
        info!(
            actor = actor.subject(),
            permission_id = %permission_id,
            "permission updated"
        );

        Ok(permission)
    }

    /// Revokes a grant.
    pub async fn delete_permission(
        &self,
        actor: &AccessContext,
        permission_id: Uuid,
    ) -> AppResult<()> {
        Self::require(actor, AccessPolicy::rbac_write())?;

        self.permissions.delete_permission(permission_id).await?;
        info!(
            actor = actor.subject(),
            permission_id = %permission_id,
            "permission revoked"
        );

        Ok(())
    }

    /// Returns grants reachable through an employee's role assignments.
    ///
    /// Informational: route decisions are made by allow-lists, not by these grants.
    pub async fn effective_permissions(
        &self,
        actor: &AccessContext,
        employee_id: &EmployeeId,
    ) -> AppResult<Vec<PermissionGrant>> {
        Self::require(actor, AccessPolicy::rbac_read())?;
        self.permissions
            .list_permissions_for_employee(employee_id)
            .await
    }
}
