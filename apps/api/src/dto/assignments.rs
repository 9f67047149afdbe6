use hrdesk_application::{AssignmentEntry, AssignmentQuery};
use hrdesk_domain::{Assignment, PageRequest};
use serde::{Deserialize, Serialize};

use super::common::lenient_number;

/// Incoming payload for assigning a role.
#[derive(Debug, Deserialize)]
pub struct CreateAssignmentRequest {
    pub employee_id: String,
    pub role_id: String,
}

/// Incoming payload for moving an assignment to another role.
#[derive(Debug, Deserialize)]
pub struct UpdateAssignmentRequest {
    pub role_id: String,
}

/// Query parameters for assignment listing.
#[derive(Debug, Default, Deserialize)]
pub struct AssignmentListQuery {
    pub search: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub role: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl From<AssignmentListQuery> for AssignmentQuery {
    fn from(query: AssignmentListQuery) -> Self {
        Self {
            page: PageRequest::new(
                lenient_number(query.page.as_deref()),
                lenient_number(query.limit.as_deref()),
            ),
            search: query.search,
            department: query.department,
            position: query.position,
            role_name: query.role,
        }
    }
}

/// API representation of a stored assignment.
#[derive(Debug, Serialize)]
pub struct AssignmentResponse {
    pub assignment_id: String,
    pub employee_id: String,
    pub role_id: String,
    pub assigned_at: String,
}

impl From<Assignment> for AssignmentResponse {
    fn from(assignment: Assignment) -> Self {
        Self {
            assignment_id: assignment.assignment_id().to_string(),
            employee_id: assignment.employee_id().to_string(),
            role_id: assignment.role_id().to_string(),
            assigned_at: assignment.assigned_at().to_rfc3339(),
        }
    }
}

/// Assignment joined with employee and role details.
#[derive(Debug, Serialize)]
pub struct AssignmentEntryResponse {
    pub assignment_id: String,
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: Option<String>,
    pub position: Option<String>,
    pub role_id: String,
    pub role_name: String,
    pub assigned_at: String,
}

impl From<AssignmentEntry> for AssignmentEntryResponse {
    fn from(entry: AssignmentEntry) -> Self {
        Self {
            assignment_id: entry.assignment.assignment_id().to_string(),
            employee_id: entry.employee.employee_id.to_string(),
            full_name: entry.employee.full_name,
            email: entry.employee.email,
            department: entry.employee.department,
            position: entry.employee.position,
            role_id: entry.assignment.role_id().to_string(),
            role_name: entry.role_name,
            assigned_at: entry.assignment.assigned_at().to_rfc3339(),
        }
    }
}
