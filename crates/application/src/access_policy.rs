use hrdesk_domain::{AllowList, CanonicalRole};

/// Route-level allow-lists for the role administration surface.
pub struct AccessPolicy;

impl AccessPolicy {
    /// Reading roles, permissions and assignments.
    #[must_use]
    pub fn rbac_read() -> AllowList {
        AllowList::new(&[CanonicalRole::Admin, CanonicalRole::Hr])
    }

    /// Mutating roles and permissions.
    #[must_use]
    pub fn rbac_write() -> AllowList {
        AllowList::new(&[CanonicalRole::Admin])
    }

    /// Mutating assignments.
    #[must_use]
    pub fn assignment_write() -> AllowList {
        AllowList::new(&[CanonicalRole::Admin, CanonicalRole::Hr])
    }

    /// Endpoints open to every canonical role.
    #[must_use]
    pub fn self_service() -> AllowList {
        AllowList::new(CanonicalRole::all())
    }
}
