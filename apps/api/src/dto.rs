mod access;
mod assignments;
mod common;
mod permissions;
mod roles;

pub use access::AccessContextResponse;
pub use assignments::{
    AssignmentEntryResponse, AssignmentListQuery, AssignmentResponse, CreateAssignmentRequest,
    UpdateAssignmentRequest,
};
pub use common::{HealthResponse, PageResponse};
pub use permissions::{
    CreatePermissionRequest, EffectivePermissionQuery, PermissionListQuery, PermissionResponse,
    UpdatePermissionRequest,
};
pub use roles::{CreateRoleRequest, RoleResponse, UpdateRoleRequest};
