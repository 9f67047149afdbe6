//! Domain entities and invariants for the access-control core.

#![forbid(unsafe_code)]

mod allow_list;
mod assignment;
mod page;
mod permission;
mod role;
mod role_label;

pub use allow_list::AllowList;
pub use assignment::{Assignment, EmployeeId, EmployeeSummary};
pub use page::{MAX_PAGE_LIMIT, Page, PageRequest};
pub use permission::{PermissionAction, PermissionGrant, ResourceName};
pub use role::{CanonicalRole, Role, RoleKey};
pub use role_label::RoleLabelMap;
