use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use hrdesk_application::AccessPolicy;
use hrdesk_core::AppError;
use tower_http::trace::TraceLayer;

use crate::handlers::{access, health, rbac};
use crate::middleware;
use crate::state::AppState;

mod cors;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let rbac_read_routes = Router::new()
        .route("/api/rbac/roles", get(rbac::list_roles_handler))
        .route("/api/rbac/roles/{role_id}", get(rbac::get_role_handler))
        .route("/api/rbac/permissions", get(rbac::list_permissions_handler))
        .route(
            "/api/rbac/permissions/{permission_id}",
            get(rbac::get_permission_handler),
        )
        .route("/api/rbac/assignments", get(rbac::list_assignments_handler))
        .route(
            "/api/rbac/assignments/{assignment_id}",
            get(rbac::get_assignment_handler),
        )
        .route(
            "/api/rbac/employees/{employee_id}/permissions",
            get(rbac::employee_permissions_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.gate(AccessPolicy::rbac_read()),
            middleware::require_roles,
        ));

    let rbac_write_routes = Router::new()
        .route("/api/rbac/roles", post(rbac::create_role_handler))
        .route(
            "/api/rbac/roles/{role_id}",
            put(rbac::update_role_handler).delete(rbac::delete_role_handler),
        )
        .route("/api/rbac/permissions", post(rbac::create_permission_handler))
        .route(
            "/api/rbac/permissions/{permission_id}",
            put(rbac::update_permission_handler)
                .delete(rbac::delete_permission_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.gate(AccessPolicy::rbac_write()),
            middleware::require_roles,
        ));

    let assignment_write_routes = Router::new()
        .route("/api/rbac/assignments", post(rbac::create_assignment_handler))
        .route(
            "/api/rbac/assignments/{assignment_id}",
            put(rbac::update_assignment_handler)
                .delete(rbac::delete_assignment_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.gate(AccessPolicy::assignment_write()),
            middleware::require_roles,
        ));

    let self_service_routes = Router::new()
        .route("/api/me/access", get(access::my_access_handler))
        .route_layer(from_fn_with_state(
            app_state.gate(AccessPolicy::self_service()),
            middleware::require_roles,
        ));

    Ok(Router::new()
        .route("/health", get(health::health_handler))
        .merge(rbac_read_routes)
        .merge(rbac_write_routes)
        .merge(assignment_write_routes)
        .merge(self_service_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(frontend_url)?)
        .with_state(app_state))
}
