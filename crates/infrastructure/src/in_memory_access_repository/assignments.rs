use super::*;

use async_trait::async_trait;
use hrdesk_application::{
    AssignmentEntry, AssignmentQuery, AssignmentRepository, CreateAssignmentInput,
};
use hrdesk_core::{AppError, RbacError};
use hrdesk_domain::Page;
use uuid::Uuid;

impl AccessState {
    fn entry(&self, assignment: &Assignment) -> AppResult<AssignmentEntry> {
        let employee = self
            .employees
            .get(assignment.employee_id())
            .cloned()
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "assignment '{}' references missing employee",
                    assignment.assignment_id()
                ))
            })?;
        let role_name = self
            .roles
            .get(assignment.role_id())
            .map(|role| role.name().to_owned())
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "assignment '{}' references missing role",
                    assignment.assignment_id()
                ))
            })?;

        Ok(AssignmentEntry {
            assignment: assignment.clone(),
            employee,
            role_name,
        })
    }

    fn ensure_assignable(&self, employee_id: &EmployeeId, role_id: &RoleKey) -> AppResult<()> {
        if !self.employees.contains_key(employee_id) {
            return Err(RbacError::UnknownEmployee(employee_id.to_string()).into());
        }
        if !self.roles.contains_key(role_id) {
            return Err(RbacError::UnknownRole(role_id.to_string()).into());
        }
        if self
            .assignments
            .iter()
            .any(|assignment| assignment.binds(employee_id, role_id))
        {
            return Err(RbacError::DuplicateAssignment {
                employee_id: employee_id.to_string(),
                role_id: role_id.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

fn matches_query(entry: &AssignmentEntry, query: &AssignmentQuery) -> bool {
    let equals = |filter: &Option<String>, value: Option<&str>| {
        filter.as_deref().is_none_or(|filter| {
            value.is_some_and(|value| value.eq_ignore_ascii_case(filter))
        })
    };

    query
        .search
        .as_deref()
        .is_none_or(|search| entry.employee.matches_search(search))
        && equals(&query.department, entry.employee.department.as_deref())
        && equals(&query.position, entry.employee.position.as_deref())
        && equals(&query.role_name, Some(entry.role_name.as_str()))
}

#[async_trait]
impl AssignmentRepository for InMemoryAccessRepository {
    async fn list_assignments(&self, query: AssignmentQuery) -> AppResult<Page<AssignmentEntry>> {
        let state = self.state.read().await;
        let mut entries = state
            .assignments
            .iter()
            .map(|assignment| state.entry(assignment))
            .collect::<AppResult<Vec<_>>>()?;
        entries.retain(|entry| matches_query(entry, &query));
        entries.sort_by(|left, right| {
            left.employee
                .full_name
                .cmp(&right.employee.full_name)
                .then_with(|| left.role_name.cmp(&right.role_name))
        });

        let total = entries.len() as u64;
        let items = entries
            .into_iter()
            .skip(usize::try_from(query.page.offset()).unwrap_or(usize::MAX))
            .take(query.page.limit() as usize)
            .collect();

        Ok(Page {
            items,
            total,
            request: query.page,
        })
    }

    async fn find_assignment(&self, assignment_id: Uuid) -> AppResult<Option<AssignmentEntry>> {
        let state = self.state.read().await;
        state
            .assignments
            .iter()
            .find(|assignment| assignment.assignment_id() == assignment_id)
            .map(|assignment| state.entry(assignment))
            .transpose()
    }

    async fn create_assignment(&self, input: CreateAssignmentInput) -> AppResult<Assignment> {
        let mut state = self.state.write().await;
        state.ensure_assignable(&input.employee_id, &input.role_id)?;

        let assignment = Assignment::new(
            Uuid::new_v4(),
            input.employee_id,
            input.role_id,
            Utc::now(),
        );
        state.assignments.push(assignment.clone());

        Ok(assignment)
    }

    async fn update_assignment(
        &self,
        assignment_id: Uuid,
        role_id: &RoleKey,
    ) -> AppResult<Assignment> {
        let mut state = self.state.write().await;
        let position = state
            .assignments
            .iter()
            .position(|assignment| assignment.assignment_id() == assignment_id)
            .ok_or_else(|| {
                AppError::NotFound(format!("assignment '{assignment_id}' was not found"))
            })?;

        let current = state.assignments[position].clone();
        if current.role_id() == role_id {
            return Ok(current);
        }
        state.ensure_assignable(current.employee_id(), role_id)?;

        let updated = Assignment::new(
            assignment_id,
            current.employee_id().clone(),
            role_id.clone(),
            current.assigned_at(),
        );
        state.assignments[position] = updated.clone();

        Ok(updated)
    }

    async fn delete_assignment(&self, assignment_id: Uuid) -> AppResult<()> {
        let mut state = self.state.write().await;
        let before = state.assignments.len();
        state
            .assignments
            .retain(|assignment| assignment.assignment_id() != assignment_id);

        if state.assignments.len() == before {
            return Err(AppError::NotFound(format!(
                "assignment '{assignment_id}' was not found"
            )));
        }

        Ok(())
    }
}
