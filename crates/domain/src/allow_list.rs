use serde::{Deserialize, Serialize};

use crate::{CanonicalRole, RoleKey};

/// Role identifiers an endpoint admits.
///
/// Declared statically per route; a caller passes when at least one of its
/// normalized roles appears in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowList {
    role_ids: Vec<RoleKey>,
}

impl AllowList {
    /// Creates an allow-list from canonical roles.
    #[must_use]
    pub fn new(roles: &[CanonicalRole]) -> Self {
        Self {
            role_ids: roles.iter().copied().map(RoleKey::from).collect(),
        }
    }

    /// Returns whether any caller role intersects the allow-list.
    #[must_use]
    pub fn permits<S: AsRef<str>>(&self, caller_roles: &[S]) -> bool {
        caller_roles.iter().any(|caller_role| {
            self.role_ids
                .iter()
                .any(|allowed| allowed.as_str() == caller_role.as_ref())
        })
    }

    /// Returns the admitted role identifiers as owned strings.
    #[must_use]
    pub fn to_strings(&self) -> Vec<String> {
        self.role_ids
            .iter()
            .map(|role_id| role_id.as_str().to_owned())
            .collect()
    }
}
