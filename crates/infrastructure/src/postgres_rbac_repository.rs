use std::str::FromStr;

use chrono::{DateTime, Utc};
use hrdesk_core::{AppError, AppResult};
use hrdesk_domain::{PermissionAction, PermissionGrant, ResourceName, Role, RoleKey};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

mod assignments;
mod permissions;
mod roles;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// PostgreSQL-backed repository for roles, permissions and assignments.
///
/// Uniqueness and referential rules are enforced by table constraints, so
/// concurrent writers cannot bypass them.
#[derive(Clone)]
pub struct PostgresRbacRepository {
    pool: PgPool,
}

impl PostgresRbacRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RoleRow {
    id: String,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<RoleRow> for Role {
    type Error = AppError;

    fn try_from(row: RoleRow) -> AppResult<Self> {
        Role::new(
            RoleKey::new(row.id)?,
            row.name,
            row.description,
            row.created_at,
            row.updated_at,
        )
    }
}

#[derive(Debug, FromRow)]
struct PermissionRow {
    id: Uuid,
    role_id: String,
    resource: String,
    action: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PermissionRow> for PermissionGrant {
    type Error = AppError;

    fn try_from(row: PermissionRow) -> AppResult<Self> {
        let action = PermissionAction::from_str(row.action.as_str()).map_err(|error| {
            AppError::Internal(format!(
                "stored permission '{}' has invalid action: {error}",
                row.id
            ))
        })?;

        Ok(PermissionGrant::new(
            row.id,
            RoleKey::new(row.role_id)?,
            ResourceName::new(row.resource)?,
            action,
            row.created_at,
            row.updated_at,
        ))
    }
}

/// Returns the violated constraint name when `error` carries SQLSTATE `code`.
fn violated_constraint(error: &sqlx::Error, code: &str) -> Option<String> {
    if let sqlx::Error::Database(database_error) = error
        && database_error.code().as_deref() == Some(code)
    {
        return Some(database_error.constraint().unwrap_or_default().to_owned());
    }

    None
}

fn internal(context: &str) -> impl FnOnce(sqlx::Error) -> AppError + '_ {
    move |error| AppError::Internal(format!("failed to {context}: {error}"))
}

#[cfg(test)]
mod tests;
