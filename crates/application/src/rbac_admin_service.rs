use std::sync::Arc;

use hrdesk_core::{AccessContext, AppResult};
use hrdesk_domain::AllowList;

use crate::access_gate::ensure_allowed;
use crate::{AssignmentRepository, PermissionRepository, RoleRepository};

mod assignments;
mod permissions;
mod roles;

/// Application service for role, permission and assignment administration.
///
/// Every operation re-checks the caller against the same allow-list the
/// HTTP route declares.
#[derive(Clone)]
pub struct RbacAdminService {
    roles: Arc<dyn RoleRepository>,
    permissions: Arc<dyn PermissionRepository>,
    assignments: Arc<dyn AssignmentRepository>,
}

impl RbacAdminService {
    /// Creates a new service from required repositories.
    #[must_use]
    pub fn new(
        roles: Arc<dyn RoleRepository>,
        permissions: Arc<dyn PermissionRepository>,
        assignments: Arc<dyn AssignmentRepository>,
    ) -> Self {
        Self {
            roles,
            permissions,
            assignments,
        }
    }

    fn require(actor: &AccessContext, allow_list: AllowList) -> AppResult<()> {
        ensure_allowed(actor, &allow_list)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
