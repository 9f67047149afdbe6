use super::*;

use std::collections::HashSet;

use async_trait::async_trait;
use hrdesk_application::{CreatePermissionInput, PermissionRepository, UpdatePermissionInput};
use hrdesk_core::{AppError, RbacError};
use uuid::Uuid;

#[async_trait]
impl PermissionRepository for InMemoryAccessRepository {
    async fn list_permissions(&self, role_id: Option<&RoleKey>) -> AppResult<Vec<PermissionGrant>> {
        let state = self.state.read().await;
        let mut permissions: Vec<PermissionGrant> = state
            .permissions
            .iter()
            .filter(|permission| role_id.is_none_or(|role_id| permission.role_id() == role_id))
            .cloned()
            .collect();
        sort_permissions(&mut permissions);

        Ok(permissions)
    }

    async fn find_permission(&self, permission_id: Uuid) -> AppResult<Option<PermissionGrant>> {
        Ok(self
            .state
            .read()
            .await
            .permissions
            .iter()
            .find(|permission| permission.permission_id() == permission_id)
            .cloned())
    }

    async fn create_permission(&self, input: CreatePermissionInput) -> AppResult<PermissionGrant> {
        let mut state = self.state.write().await;
        if !state.roles.contains_key(&input.role_id) {
            return Err(RbacError::UnknownRole(input.role_id.to_string()).into());
        }

        let now = Utc::now();
        let permission = PermissionGrant::new(
            Uuid::new_v4(),
            input.role_id,
            input.resource,
            input.action,
            now,
            now,
        );
        state.permissions.push(permission.clone());

        Ok(permission)
    }

    async fn update_permission(
        &self,
        permission_id: Uuid,
        input: UpdatePermissionInput,
    ) -> AppResult<PermissionGrant> {
        let mut state = self.state.write().await;
        let slot = state
            .permissions
            .iter_mut()
            .find(|permission| permission.permission_id() == permission_id)
            .ok_or_else(|| {
                AppError::NotFound(format!("permission '{permission_id}' was not found"))
            })?;

        *slot = PermissionGrant::new(
            permission_id,
            slot.role_id().clone(),
            input.resource,
            input.action,
            slot.created_at(),
            Utc::now(),
        );

        Ok(slot.clone())
    }

    async fn delete_permission(&self, permission_id: Uuid) -> AppResult<()> {
        let mut state = self.state.write().await;
        let before = state.permissions.len();
        state
            .permissions
            .retain(|permission| permission.permission_id() != permission_id);

        if state.permissions.len() == before {
            return Err(AppError::NotFound(format!(
                "permission '{permission_id}' was not found"
            )));
        }

        Ok(())
    }

    async fn list_permissions_for_employee(
        &self,
        employee_id: &EmployeeId,
    ) -> AppResult<Vec<PermissionGrant>> {
        let state = self.state.read().await;
        let role_ids: HashSet<&RoleKey> = state
            .assignments
            .iter()
            .filter(|assignment| assignment.employee_id() == employee_id)
            .map(Assignment::role_id)
            .collect();

        let mut permissions: Vec<PermissionGrant> = state
            .permissions
            .iter()
            .filter(|permission| role_ids.contains(permission.role_id()))
            .cloned()
            .collect();
        sort_permissions(&mut permissions);

        Ok(permissions)
    }
}

fn sort_permissions(permissions: &mut [PermissionGrant]) {
    permissions.sort_by(|left, right| {
        left.role_id()
            .cmp(right.role_id())
            .then_with(|| left.resource().as_str().cmp(right.resource().as_str()))
            .then_with(|| left.action().as_str().cmp(right.action().as_str()))
            .then_with(|| left.created_at().cmp(&right.created_at()))
    });
}
