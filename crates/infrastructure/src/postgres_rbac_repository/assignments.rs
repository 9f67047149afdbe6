use super::*;

use async_trait::async_trait;
use hrdesk_application::{
    AssignmentEntry, AssignmentQuery, AssignmentRepository, CreateAssignmentInput,
};
use hrdesk_core::RbacError;
use hrdesk_domain::{Assignment, EmployeeId, EmployeeSummary, Page};

#[derive(Debug, FromRow)]
struct AssignmentRow {
    id: Uuid,
    employee_id: String,
    role_id: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AssignmentRow> for Assignment {
    type Error = AppError;

    fn try_from(row: AssignmentRow) -> AppResult<Self> {
        Ok(Assignment::new(
            row.id,
            EmployeeId::new(row.employee_id)?,
            RoleKey::new(row.role_id)?,
            row.created_at,
        ))
    }
}

#[derive(Debug, FromRow)]
struct AssignmentEntryRow {
    id: Uuid,
    employee_id: String,
    role_id: String,
    created_at: DateTime<Utc>,
    full_name: String,
    email: String,
    department: Option<String>,
    position: Option<String>,
    role_name: String,
}

impl TryFrom<AssignmentEntryRow> for AssignmentEntry {
    type Error = AppError;

    fn try_from(row: AssignmentEntryRow) -> AppResult<Self> {
        let employee_id = EmployeeId::new(row.employee_id)?;

        Ok(AssignmentEntry {
            assignment: Assignment::new(
                row.id,
                employee_id.clone(),
                RoleKey::new(row.role_id)?,
                row.created_at,
            ),
            employee: EmployeeSummary {
                employee_id,
                full_name: row.full_name,
                email: row.email,
                department: row.department,
                position: row.position,
            },
            role_name: row.role_name,
        })
    }
}

const ENTRY_SELECT: &str = r#"
    SELECT
        assignments.id,
        assignments.employee_id,
        assignments.role_id,
        assignments.created_at,
        employees.full_name,
        employees.email,
        employees.department,
        employees.position,
        roles.name AS role_name
    FROM rbac_assignments AS assignments
    INNER JOIN employees ON employees.id = assignments.employee_id
    INNER JOIN rbac_roles AS roles ON roles.id = assignments.role_id
"#;

const ENTRY_FILTER: &str = r#"
    WHERE ($1::TEXT IS NULL
            OR employees.full_name ILIKE $1
            OR employees.email ILIKE $1)
        AND ($2::TEXT IS NULL OR lower(employees.department) = lower($2))
        AND ($3::TEXT IS NULL OR lower(employees.position) = lower($3))
        AND ($4::TEXT IS NULL OR lower(roles.name) = lower($4))
"#;

fn like_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn map_assignment_violation(error: sqlx::Error, employee_id: &str, role_id: &str) -> AppError {
    if violated_constraint(&error, UNIQUE_VIOLATION).is_some() {
        return RbacError::DuplicateAssignment {
            employee_id: employee_id.to_owned(),
            role_id: role_id.to_owned(),
        }
        .into();
    }

    match violated_constraint(&error, FOREIGN_KEY_VIOLATION).as_deref() {
        Some("fk_rbac_assignments_employee") => {
            RbacError::UnknownEmployee(employee_id.to_owned()).into()
        }
        Some(_) => RbacError::UnknownRole(role_id.to_owned()).into(),
        None => AppError::Internal(format!("failed to save assignment: {error}")),
    }
}

#[async_trait]
impl AssignmentRepository for PostgresRbacRepository {
    async fn list_assignments(&self, query: AssignmentQuery) -> AppResult<Page<AssignmentEntry>> {
        let search = query.search.as_deref().map(like_pattern);
        let limit = i64::from(query.page.limit());
        let offset = i64::try_from(query.page.offset()).unwrap_or(i64::MAX);

        let total = sqlx::query_scalar::<_, i64>(&format!(
            r#"
            SELECT COUNT(*)
            FROM rbac_assignments AS assignments
            INNER JOIN employees ON employees.id = assignments.employee_id
            INNER JOIN rbac_roles AS roles ON roles.id = assignments.role_id
            {ENTRY_FILTER}
            "#
        ))
        .bind(search.as_deref())
        .bind(query.department.as_deref())
        .bind(query.position.as_deref())
        .bind(query.role_name.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(internal("count assignments"))?;

        let rows = sqlx::query_as::<_, AssignmentEntryRow>(&format!(
            r#"
            {ENTRY_SELECT}
            {ENTRY_FILTER}
            ORDER BY employees.full_name, roles.name, assignments.id
            LIMIT $5 OFFSET $6
            "#
        ))
        .bind(search.as_deref())
        .bind(query.department.as_deref())
        .bind(query.position.as_deref())
        .bind(query.role_name.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(internal("list assignments"))?;

        Ok(Page {
            items: rows
                .into_iter()
                .map(AssignmentEntry::try_from)
                .collect::<AppResult<Vec<_>>>()?,
            total: u64::try_from(total).unwrap_or_default(),
            request: query.page,
        })
    }

    async fn find_assignment(&self, assignment_id: Uuid) -> AppResult<Option<AssignmentEntry>> {
        sqlx::query_as::<_, AssignmentEntryRow>(&format!(
            "{ENTRY_SELECT} WHERE assignments.id = $1"
        ))
        .bind(assignment_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(internal("find assignment"))?
        .map(AssignmentEntry::try_from)
        .transpose()
    }

    async fn create_assignment(&self, input: CreateAssignmentInput) -> AppResult<Assignment> {
        let row = sqlx::query_as::<_, AssignmentRow>(
            r#"
            INSERT INTO rbac_assignments (id, employee_id, role_id)
            VALUES ($1, $2, $3)
            RETURNING id, employee_id, role_id, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.employee_id.as_str())
        .bind(input.role_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            map_assignment_violation(error, input.employee_id.as_str(), input.role_id.as_str())
        })?;

        Assignment::try_from(row)
    }

    async fn update_assignment(
        &self,
        assignment_id: Uuid,
        role_id: &RoleKey,
    ) -> AppResult<Assignment> {
        let not_found =
            || AppError::NotFound(format!("assignment '{assignment_id}' was not found"));

        let employee_id = sqlx::query_scalar::<_, String>(
            "SELECT employee_id FROM rbac_assignments WHERE id = $1",
        )
        .bind(assignment_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(internal("find assignment"))?
        .ok_or_else(not_found)?;

        let row = sqlx::query_as::<_, AssignmentRow>(
            r#"
            UPDATE rbac_assignments
            SET role_id = $2
            WHERE id = $1
            RETURNING id, employee_id, role_id, created_at
            "#,
        )
        .bind(assignment_id)
        .bind(role_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| map_assignment_violation(error, employee_id.as_str(), role_id.as_str()))?
        .ok_or_else(not_found)?;

        Assignment::try_from(row)
    }

    async fn delete_assignment(&self, assignment_id: Uuid) -> AppResult<()> {
        let done = sqlx::query("DELETE FROM rbac_assignments WHERE id = $1")
            .bind(assignment_id)
            .execute(&self.pool)
            .await
            .map_err(internal("delete assignment"))?;

        if done.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "assignment '{assignment_id}' was not found"
            )));
        }

        Ok(())
    }
}
