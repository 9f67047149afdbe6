use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use hrdesk_core::{AccessContext, AppError};
use hrdesk_domain::{EmployeeId, PermissionAction, ResourceName, RoleKey};
use uuid::Uuid;

use crate::dto::{
    AssignmentEntryResponse, AssignmentListQuery, AssignmentResponse, CreateAssignmentRequest,
    CreatePermissionRequest, CreateRoleRequest, EffectivePermissionQuery, PageResponse,
    PermissionListQuery, PermissionResponse, RoleResponse, UpdateAssignmentRequest,
    UpdatePermissionRequest, UpdateRoleRequest,
};
use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::state::AppState;

mod assignments;
mod permissions;
mod roles;

pub use assignments::{
    create_assignment_handler, delete_assignment_handler, get_assignment_handler,
    list_assignments_handler, update_assignment_handler,
};
pub use permissions::{
    create_permission_handler, delete_permission_handler, employee_permissions_handler,
    get_permission_handler, list_permissions_handler, update_permission_handler,
};
pub use roles::{
    create_role_handler, delete_role_handler, get_role_handler, list_roles_handler,
    update_role_handler,
};

fn parse_uuid(value: &str, kind: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(value)
        .map_err(|_| AppError::Validation(format!("invalid {kind} id '{value}'")))
}
