use super::*;

use async_trait::async_trait;
use hrdesk_application::{CreateRoleInput, RoleRepository, UpdateRoleInput};
use hrdesk_core::RbacError;

#[async_trait]
impl RoleRepository for PostgresRbacRepository {
    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        let rows = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM rbac_roles
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(internal("list roles"))?;

        rows.into_iter().map(Role::try_from).collect()
    }

    async fn find_role(&self, role_id: &RoleKey) -> AppResult<Option<Role>> {
        sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM rbac_roles
            WHERE id = $1
            "#,
        )
        .bind(role_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(internal("find role"))?
        .map(Role::try_from)
        .transpose()
    }

    async fn create_role(&self, input: CreateRoleInput) -> AppResult<Role> {
        let now = Utc::now();
        let role = Role::new(input.role_id, input.name, input.description, now, now)?;

        let row = sqlx::query_as::<_, RoleRow>(
            r#"
            INSERT INTO rbac_roles (id, name, description)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(role.role_id().as_str())
        .bind(role.name())
        .bind(role.description())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| map_role_conflict(error, &role))?;

        Role::try_from(row)
    }

    async fn update_role(&self, role_id: &RoleKey, input: UpdateRoleInput) -> AppResult<Role> {
        let existing = self
            .find_role(role_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' was not found")))?;
        let updated = existing.renamed(input.name, input.description, Utc::now())?;

        let row = sqlx::query_as::<_, RoleRow>(
            r#"
            UPDATE rbac_roles
            SET name = $2, description = $3, updated_at = now()
            WHERE id = $1
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(role_id.as_str())
        .bind(updated.name())
        .bind(updated.description())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| map_role_conflict(error, &updated))?
        .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' was not found")))?;

        Role::try_from(row)
    }

    async fn delete_role(&self, role_id: &RoleKey) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM rbac_roles WHERE id = $1")
            .bind(role_id.as_str())
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => {
                Err(AppError::NotFound(format!("role '{role_id}' was not found")))
            }
            Ok(_) => Ok(()),
            Err(error) if violated_constraint(&error, FOREIGN_KEY_VIOLATION).is_some() => {
                let assignment_count = sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM rbac_assignments WHERE role_id = $1",
                )
                .bind(role_id.as_str())
                .fetch_one(&self.pool)
                .await
                .map_err(internal("count role assignments"))?;

                Err(RbacError::RoleInUse {
                    role_id: role_id.to_string(),
                    assignment_count: u64::try_from(assignment_count).unwrap_or_default(),
                }
                .into())
            }
            Err(error) => Err(internal("delete role")(error)),
        }
    }
}

fn map_role_conflict(error: sqlx::Error, role: &Role) -> AppError {
    match violated_constraint(&error, UNIQUE_VIOLATION).as_deref() {
        Some("rbac_roles_pkey") => {
            AppError::Conflict(format!("role '{}' already exists", role.role_id()))
        }
        Some(_) => AppError::Conflict(format!("role name '{}' is already in use", role.name())),
        None => AppError::Internal(format!("failed to save role: {error}")),
    }
}
