use hrdesk_domain::{
    Assignment, EmployeeId, EmployeeSummary, PageRequest, PermissionAction, ResourceName, RoleKey,
};

/// Input payload for creating a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRoleInput {
    /// Stable identifier; never changes after creation.
    pub role_id: RoleKey,
    /// Unique display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Input payload for updating a role's human-facing fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRoleInput {
    /// New unique display name.
    pub name: String,
    /// New description; `None` clears it.
    pub description: Option<String>,
}

/// Input payload for granting a permission to a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePermissionInput {
    /// Owning role; must exist at creation time.
    pub role_id: RoleKey,
    /// Resource noun or `all`.
    pub resource: ResourceName,
    /// Granted action.
    pub action: PermissionAction,
}

/// Input payload for changing a permission's resource or action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePermissionInput {
    /// New resource noun.
    pub resource: ResourceName,
    /// New action.
    pub action: PermissionAction,
}

/// Input payload for assigning a role to an employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAssignmentInput {
    /// Employee receiving the role.
    pub employee_id: EmployeeId,
    /// Role being granted.
    pub role_id: RoleKey,
}

/// Query parameters for assignment listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssignmentQuery {
    /// Free-text match over employee name or email.
    pub search: Option<String>,
    /// Exact department filter.
    pub department: Option<String>,
    /// Exact position filter.
    pub position: Option<String>,
    /// Exact role display-name filter.
    pub role_name: Option<String>,
    /// Page selection.
    pub page: PageRequest,
}

impl AssignmentQuery {
    /// Returns a copy with blank filters removed.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            search: non_blank(self.search),
            department: non_blank(self.department),
            position: non_blank(self.position),
            role_name: non_blank(self.role_name),
            page: self.page,
        }
    }
}

/// Assignment projection joined with employee and role details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentEntry {
    /// Stored assignment.
    pub assignment: Assignment,
    /// Assigned employee.
    pub employee: EmployeeSummary,
    /// Display name of the assigned role.
    pub role_name: String,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
