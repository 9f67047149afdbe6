use super::*;

use async_trait::async_trait;
use hrdesk_application::{CreatePermissionInput, PermissionRepository, UpdatePermissionInput};
use hrdesk_core::RbacError;
use hrdesk_domain::EmployeeId;

#[async_trait]
impl PermissionRepository for PostgresRbacRepository {
    async fn list_permissions(&self, role_id: Option<&RoleKey>) -> AppResult<Vec<PermissionGrant>> {
        let rows = sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT id, role_id, resource, action, created_at, updated_at
            FROM rbac_permissions
            WHERE ($1::TEXT IS NULL OR role_id = $1)
            ORDER BY role_id, resource, action, created_at
            "#,
        )
        .bind(role_id.map(RoleKey::as_str))
        .fetch_all(&self.pool)
        .await
        .map_err(internal("list permissions"))?;

        rows.into_iter().map(PermissionGrant::try_from).collect()
    }

    async fn find_permission(&self, permission_id: Uuid) -> AppResult<Option<PermissionGrant>> {
        sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT id, role_id, resource, action, created_at, updated_at
            FROM rbac_permissions
            WHERE id = $1
            "#,
        )
        .bind(permission_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(internal("find permission"))?
        .map(PermissionGrant::try_from)
        .transpose()
    }

    async fn create_permission(&self, input: CreatePermissionInput) -> AppResult<PermissionGrant> {
        let row = sqlx::query_as::<_, PermissionRow>(
            r#"
            INSERT INTO rbac_permissions (id, role_id, resource, action)
            VALUES ($1, $2, $3, $4)
            RETURNING id, role_id, resource, action, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.role_id.as_str())
        .bind(input.resource.as_str())
        .bind(input.action.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            if violated_constraint(&error, FOREIGN_KEY_VIOLATION).is_some() {
                return AppError::from(RbacError::UnknownRole(input.role_id.to_string()));
            }
            AppError::Internal(format!("failed to create permission: {error}"))
        })?;

        PermissionGrant::try_from(row)
    }

    async fn update_permission(
        &self,
        permission_id: Uuid,
        input: UpdatePermissionInput,
    ) -> AppResult<PermissionGrant> {
        let row = sqlx::query_as::<_, PermissionRow>(
            r#"
            UPDATE rbac_permissions
            SET resource = $2, action = $3, updated_at = now()
            WHERE id = $1
            RETURNING id, role_id, resource, action, created_at, updated_at
            "#,
        )
        .bind(permission_id)
        .bind(input.resource.as_str())
        .bind(input.action.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(internal("update permission"))?
        .ok_or_else(|| AppError::NotFound(format!("permission '{permission_id}' was not found")))?;

        PermissionGrant::try_from(row)
    }

    async fn delete_permission(&self, permission_id: Uuid) -> AppResult<()> {
        let done = sqlx::query("DELETE FROM rbac_permissions WHERE id = $1")
            .bind(permission_id)
            .execute(&self.pool)
            .await
            .map_err(internal("delete permission"))?;

        if done.rows_affected() == 0 {
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
        let rows = sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT
                permissions.id,
                permissions.role_id,
                permissions.resource,
                permissions.action,
                permissions.created_at,
                permissions.updated_at
            FROM rbac_permissions AS permissions
            INNER JOIN rbac_assignments AS assignments
                ON assignments.role_id = permissions.role_id
            WHERE assignments.employee_id = $1
            ORDER BY permissions.role_id, permissions.resource,
                permissions.action, permissions.created_at
            "#,
        )
        .bind(employee_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(internal("list employee permissions"))?;

        rows.into_iter().map(PermissionGrant::try_from).collect()
    }
}
