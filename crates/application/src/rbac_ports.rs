mod inputs;
mod repositories;
mod token;

pub use inputs::{
    AssignmentEntry, AssignmentQuery, CreateAssignmentInput, CreatePermissionInput,
    CreateRoleInput, UpdatePermissionInput, UpdateRoleInput,
};
pub use repositories::{AssignmentRepository, PermissionRepository, RoleRepository};
pub use token::TokenVerifier;
