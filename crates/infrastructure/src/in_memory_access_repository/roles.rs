use super::*;

use async_trait::async_trait;
use hrdesk_application::{CreateRoleInput, RoleRepository, UpdateRoleInput};
use hrdesk_core::{AppError, RbacError};

#[async_trait]
impl RoleRepository for InMemoryAccessRepository {
    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        let state = self.state.read().await;
        let mut roles: Vec<Role> = state.roles.values().cloned().collect();
        roles.sort_by(|left, right| left.name().cmp(right.name()));

        Ok(roles)
    }

    async fn find_role(&self, role_id: &RoleKey) -> AppResult<Option<Role>> {
        Ok(self.state.read().await.roles.get(role_id).cloned())
    }

    async fn create_role(&self, input: CreateRoleInput) -> AppResult<Role> {
        let now = Utc::now();
        let role = Role::new(input.role_id, input.name, input.description, now, now)?;
        let mut state = self.state.write().await;

        if state.roles.contains_key(role.role_id()) {
            return Err(AppError::Conflict(format!(
                "role '{}' already exists",
                role.role_id()
            )));
        }
        if state.role_name_taken(role.name(), None) {
            return Err(AppError::Conflict(format!(
                "role name '{}' is already in use",
                role.name()
            )));
        }

        state.roles.insert(role.role_id().clone(), role.clone());
        Ok(role)
    }

    async fn update_role(&self, role_id: &RoleKey, input: UpdateRoleInput) -> AppResult<Role> {
        let mut state = self.state.write().await;
        let existing = state
            .roles
            .get(role_id)
            .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' was not found")))?;

        let updated = existing.renamed(input.name, input.description, Utc::now())?;
        if state.role_name_taken(updated.name(), Some(role_id)) {
            return Err(AppError::Conflict(format!(
                "role name '{}' is already in use",
                updated.name()
            )));
        }

        state.roles.insert(role_id.clone(), updated.clone());
        Ok(updated)
    }

    async fn delete_role(&self, role_id: &RoleKey) -> AppResult<()> {
        let mut state = self.state.write().await;
        if !state.roles.contains_key(role_id) {
            return Err(AppError::NotFound(format!("role '{role_id}' was not found")));
        }

        let assignment_count = state.assignment_count(role_id);
        if assignment_count > 0 {
            return Err(RbacError::RoleInUse {
                role_id: role_id.to_string(),
                assignment_count,
            }
            .into());
        }

        state
            .permissions
            .retain(|permission| permission.role_id() != role_id);
        state.roles.remove(role_id);
        Ok(())
    }
}
