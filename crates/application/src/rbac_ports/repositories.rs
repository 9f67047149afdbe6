use async_trait::async_trait;
use uuid::Uuid;

use hrdesk_core::AppResult;
use hrdesk_domain::{Assignment, EmployeeId, Page, PermissionGrant, Role, RoleKey};

use super::inputs::{
    AssignmentEntry, AssignmentQuery, CreateAssignmentInput, CreatePermissionInput,
    CreateRoleInput, UpdatePermissionInput, UpdateRoleInput,
};

/// Repository port for role definitions.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Lists all roles ordered by display name.
    async fn list_roles(&self) -> AppResult<Vec<Role>>;

    /// Finds a role by identifier.
    async fn find_role(&self, role_id: &RoleKey) -> AppResult<Option<Role>>;

    /// Creates a role; identifier and display name must both be unused.
    async fn create_role(&self, input: CreateRoleInput) -> AppResult<Role>;

    /// Updates name and description; the identifier never changes.
    async fn update_role(&self, role_id: &RoleKey, input: UpdateRoleInput) -> AppResult<Role>;

    /// Deletes a role and its permissions.
    ///
    /// Fails with `RbacError::RoleInUse` while any assignment references it.
    async fn delete_role(&self, role_id: &RoleKey) -> AppResult<()>;
}

/// Repository port for (role, resource, action) grants.
#[async_trait]
pub trait PermissionRepository: Send + Sync {
    /// Lists grants, optionally restricted to one role.
    async fn list_permissions(&self, role_id: Option<&RoleKey>) -> AppResult<Vec<PermissionGrant>>;

    /// Finds a grant by identifier.
    async fn find_permission(&self, permission_id: Uuid) -> AppResult<Option<PermissionGrant>>;

    /// Creates a grant; fails with `RbacError::UnknownRole` for a missing role.
    async fn create_permission(&self, input: CreatePermissionInput) -> AppResult<PermissionGrant>;

    /// Replaces resource and action of an existing grant.
    async fn update_permission(
        &self,
        permission_id: Uuid,
        input: UpdatePermissionInput,
    ) -> AppResult<PermissionGrant>;

    /// Deletes a grant.
    async fn delete_permission(&self, permission_id: Uuid) -> AppResult<()>;

    /// Lists grants reachable through an employee's assignments.
    async fn list_permissions_for_employee(
        &self,
        employee_id: &EmployeeId,
    ) -> AppResult<Vec<PermissionGrant>>;
}

/// Repository port for employee-role assignments.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Lists assignments matching the query, one page at a time.
    async fn list_assignments(&self, query: AssignmentQuery) -> AppResult<Page<AssignmentEntry>>;

    /// Finds an assignment by identifier.
    async fn find_assignment(&self, assignment_id: Uuid) -> AppResult<Option<AssignmentEntry>>;

    /// Creates an assignment atomically.
    ///
    /// Fails with `RbacError::DuplicateAssignment` when the pair exists and
    /// with `RbacError::UnknownEmployee` / `RbacError::UnknownRole` when a
    /// referenced record is missing.
    async fn create_assignment(&self, input: CreateAssignmentInput) -> AppResult<Assignment>;

    /// Moves an assignment to another role under the same invariants as create.
    async fn update_assignment(&self, assignment_id: Uuid, role_id: &RoleKey)
    -> AppResult<Assignment>;

    /// Deletes an assignment.
    async fn delete_assignment(&self, assignment_id: Uuid) -> AppResult<()>;
}
