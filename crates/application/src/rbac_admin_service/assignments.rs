use super::*;

use hrdesk_core::AppError;
use hrdesk_domain::{Assignment, Page, RoleKey};
use tracing::info;
use uuid::Uuid;

use crate::{AccessPolicy, AssignmentEntry, AssignmentQuery, CreateAssignmentInput};

impl RbacAdminService {
    /// Returns one page of assignments matching the filters.
    pub async fn list_assignments(
        &self,
        actor: &AccessContext,
        query: AssignmentQuery,
    ) -> AppResult<Page<AssignmentEntry>> {
        Self::require(actor, AccessPolicy::rbac_read())?;
        self.assignments.list_assignments(query.normalized()).await
    }

    /// Returns one assignment.
    pub async fn get_assignment(
        &self,
        actor: &AccessContext,
        assignment_id: Uuid,
    ) -> AppResult<AssignmentEntry> {
        Self::require(actor, AccessPolicy::rbac_read())?;
        self.assignments
            .find_assignment(assignment_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("assignment '{assignment_id}' was not found"))
            })
    }

    /// Assigns a role to an employee.
    pub async fn create_assignment(
        &self,
        actor: &AccessContext,
        input: CreateAssignmentInput,
    ) -> AppResult<Assignment> {
        Self::require(actor, AccessPolicy::assignment_write())?;

        let assignment = self.assignments.create_assignment(input).await?;
        info!(
            actor = actor.subject(),
            assignment_id = %assignment.assignment_id(),
            employee_id = %assignment.employee_id(),
            role_id = %assignment.role_id(),
            "role assigned"
        );

        Ok(assignment)
    }

    /// Moves an assignment to another role.
    pub async fn update_assignment(
        &self,
        actor: &AccessContext,
        assignment_id: Uuid,
        role_id: &RoleKey,
    ) -> AppResult<Assignment> {
        Self::require(actor, AccessPolicy::assignment_write())?;

        let assignment = self
            .assignments
            .update_assignment(assignment_id, role_id)
            .await?;
        info!(
            actor = actor.subject(),
            assignment_id = %assignment_id,
            role_id = %role_id,
            "assignment updated"
        );

        Ok(assignment)
    }

    /// Revokes an assignment.
    pub async fn delete_assignment(
        &self,
        actor: &AccessContext,
        assignment_id: Uuid,
    ) -> AppResult<()> {
        Self::require(actor, AccessPolicy::assignment_write())?;

        self.assignments.delete_assignment(assignment_id).await?;
        info!(
            actor = actor.subject(),
            assignment_id = %assignment_id,
            "role unassigned"
        );

        Ok(())
    }
}
