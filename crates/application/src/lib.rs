//! Application services and ports.

#![forbid(unsafe_code)]

mod access_gate;
mod access_policy;
mod rbac_admin_service;
mod rbac_ports;

pub use access_gate::{AccessGate, ensure_allowed};
pub use access_policy::AccessPolicy;
pub use rbac_admin_service::RbacAdminService;
pub use rbac_ports::{
    AssignmentEntry, AssignmentQuery, AssignmentRepository, CreateAssignmentInput,
    CreatePermissionInput, CreateRoleInput, PermissionRepository, RoleRepository, TokenVerifier,
    UpdatePermissionInput, UpdateRoleInput,
};
