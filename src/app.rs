// SPDX-License-Identifier: BSD-3-Clause

//! Application state, router construction, and the handlers that sit outside
//! the auth/client/admin route groups.
//!
//! This module is `pub` so that integration tests can build a test router
//! directly without starting the full binary.

use crate::config::Config;
use crate::messages;
use crate::models::auth::MessageResponse;
use crate::models::catalog::{DbCheckResponse, ListServicesResponse};
use crate::models::version::VersionResponse;
use crate::routes::{admin_auth_router, admin_router, client_router, internal_error, ApiDoc};
use crate::services::auth::AuthService;
use crate::services::salon_db::SalonDbClient;
use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower_cookies::CookieManagerLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application version extracted from `Cargo.toml` at compile time.
/// The patch segment can be overridden via `LAMSA_PATCH_VERSION` (see `build.rs`).
pub const VERSION: &str = env!("LAMSA_VERSION");

/// Row cap for the connectivity probe.
const DB_PROBE_LIMIT: i64 = 5;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Shared application state injected into every route handler via
/// `State<AppState>`. Built once in `main` from an explicit `Config`;
/// nothing here is a global.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub salon_db: SalonDbClient,
    pub config: Arc<Config>,
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

pub async fn version_handler(State(state): State<AppState>) -> Json<VersionResponse> {
    Json(VersionResponse {
        service: "lamsa-server".to_string(),
        version: VERSION.to_string(),
        environment: state.config.environment.as_str().to_string(),
    })
}

/// GET /api/services - The public treatment catalog.
pub async fn list_services_handler(
    State(state): State<AppState>,
) -> Result<Json<ListServicesResponse>, (StatusCode, Json<MessageResponse>)> {
    let services = state
        .salon_db
        .list_active_services()
        .await
        .map_err(internal_error)?;

    let count = services.len();
    Ok(Json(ListServicesResponse { services, count }))
}

/// GET /api/test-db - Operational connectivity probe.
///
/// Performs one bounded read against the catalog table. Unlike every other
/// endpoint, a failure response here carries the stringified upstream error;
/// the probe exists for operators, not end users.
pub async fn test_db_handler(State(state): State<AppState>) -> (StatusCode, Json<DbCheckResponse>) {
    match state.salon_db.probe_services(DB_PROBE_LIMIT).await {
        Ok(rows) => (
            StatusCode::OK,
            Json(DbCheckResponse {
                success: true,
                message: messages::DB_CHECK_OK.to_string(),
                data: Some(rows),
                error: None,
            }),
        ),
        Err(e) => {
            tracing::error!(detail = %e, "Database connectivity probe failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DbCheckResponse {
                    success: false,
                    message: messages::DB_CHECK_FAILED.to_string(),
                    data: None,
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the Axum application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/version", get(version_handler))
        .route("/api/test-db", get(test_db_handler))
        .route("/api/services", get(list_services_handler))
        .nest("/api/auth", admin_auth_router())
        .nest("/api/client", client_router())
        .nest("/api/admin", admin_router())
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CookieManagerLayer::new())
}
