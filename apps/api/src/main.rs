//! hrdesk API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod dto;
mod error;
mod extract;
mod handlers;
mod middleware;
mod state;

use std::sync::Arc;

use hrdesk_application::{
    AccessGate, AssignmentRepository, PermissionRepository, RbacAdminService, RoleRepository,
};
use hrdesk_core::AppError;
use hrdesk_domain::RoleLabelMap;
use hrdesk_infrastructure::{InMemoryAccessRepository, JwtTokenVerifier, PostgresRbacRepository};
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

use crate::api_config::{ApiConfig, init_tracing};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;
    info!(development = config.development, "configuration loaded");

    let rbac_admin_service = match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .connect(database_url)
                .await
                .map_err(|error| {
                    AppError::Internal(format!("failed to connect to database: {error}"))
                })?;

            sqlx::migrate!("../../crates/infrastructure/migrations")
                .run(&pool)
                .await
                .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;

            if config.migrate_only {
                info!("database migrations applied successfully");
                return Ok(());
            }

            let repository = Arc::new(PostgresRbacRepository::new(pool));
            rbac_admin_service_from(repository)
        }
        None => {
            warn!("DATABASE_URL is not set; using the in-memory access repository");
            rbac_admin_service_from(Arc::new(InMemoryAccessRepository::with_canonical_roles()?))
        }
    };

    let role_labels = RoleLabelMap::with_aliases(config.role_label_aliases.clone())?;
    info!(
        role_label_aliases = role_labels.len(),
        legacy_auth_scheme = ?config.legacy_auth_scheme,
        "access gate configured"
    );

    let verifier = Arc::new(JwtTokenVerifier::new(
        config.jwt_secret.as_bytes(),
        config.jwt_leeway_seconds,
    ));
    let app_state = AppState {
        access_gate: AccessGate::new(verifier, role_labels),
        rbac_admin_service,
        legacy_auth_scheme: config.legacy_auth_scheme,
    };

    let app = api_router::build_router(app_state, &config.frontend_url)?;

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind API listener: {error}")))?;

    info!(%address, "hrdesk api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server failed: {error}")))
}

fn rbac_admin_service_from<R>(repository: Arc<R>) -> RbacAdminService
where
    R: RoleRepository + PermissionRepository + AssignmentRepository + 'static,
{
    RbacAdminService::new(repository.clone(), repository.clone(), repository)
}
