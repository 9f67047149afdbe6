use hrdesk_application::{AccessGate, RbacAdminService};
use hrdesk_domain::AllowList;

use crate::api_config::LegacyAuthScheme;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub access_gate: AccessGate,
    pub rbac_admin_service: RbacAdminService,
    pub legacy_auth_scheme: LegacyAuthScheme,
}

/// Middleware state for one route group: the shared pipeline plus the
/// group's allow-list.
#[derive(Clone)]
pub struct RouteGate {
    pub access_gate: AccessGate,
    pub allow_list: AllowList,
    pub legacy_auth_scheme: LegacyAuthScheme,
}

impl AppState {
    pub fn gate(&self, allow_list: AllowList) -> RouteGate {
        RouteGate {
            access_gate: self.access_gate.clone(),
            allow_list,
            legacy_auth_scheme: self.legacy_auth_scheme,
        }
    }
}
