// SPDX-License-Identifier: BSD-3-Clause

//! Router-level tests driven with `tower::ServiceExt::oneshot`.
//!
//! The cookie-lifecycle tests use a lazy pool that is never touched, so they
//! run without a database. Tests that need live Postgres are `#[ignore]`d;
//! run them with: cargo test --test api_integration_test -- --ignored

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use lamsa_server::app::{create_router, AppState};
use lamsa_server::config::{Config, Environment};
use lamsa_server::services::auth::AuthService;
use lamsa_server::services::auth_db::AuthDbClient;
use lamsa_server::services::salon_db::SalonDbClient;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower::ServiceExt;

fn test_config(database_url: &str) -> Config {
    Config {
        database_url: database_url.to_string(),
        port: 3000,
        base_url: "http://localhost:3000".to_string(),
        environment: Environment::Development,
        session_max_age_days: 30,
        db_max_connections: 2,
    }
}

/// Build the app over a lazy pool: no connection is opened until a handler
/// actually queries, which the cookie-lifecycle tests never do.
fn create_test_app() -> Router {
    let database_url = "postgres://localhost:5432/lamsa_test";
    let pool = PgPoolOptions::new()
        .connect_lazy(database_url)
        .expect("lazy pool construction should not fail");

    let state = AppState {
        auth: Arc::new(AuthService::new(AuthDbClient::new(pool.clone()), 30)),
        salon_db: SalonDbClient::new(pool),
        config: Arc::new(test_config(database_url)),
    };
    create_router(state)
}

/// Build the app against the real database named by DATABASE_URL.
async fn create_db_app() -> Router {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .expect("Failed to connect to Postgres");

    let state = AppState {
        auth: Arc::new(AuthService::new(AuthDbClient::new(pool.clone()), 30)),
        salon_db: SalonDbClient::new(pool),
        config: Arc::new(test_config(&database_url)),
    };
    create_router(state)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Collect every Set-Cookie header value of a response.
fn set_cookies(response: &axum::response::Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

fn assert_cookie_cleared(cookies: &[String], name: &str) {
    let cleared = cookies
        .iter()
        .any(|c| c.starts_with(&format!("{name}=")) && c.contains("Max-Age=0"));
    assert!(cleared, "expected {name} to be cleared, got: {cookies:?}");
}

// ============================================================================
// Basic surface
// ============================================================================

#[tokio::test]
async fn test_version_endpoint_response() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/version")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["service"], "lamsa-server");
    assert_eq!(json["environment"], "development");
}

#[tokio::test]
async fn test_invalid_route_returns_404() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/invalid")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_concurrent_requests_succeed() {
    let app = create_test_app();

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let app_clone = app.clone();
            tokio::spawn(async move {
                let response = app_clone
                    .oneshot(
                        Request::builder()
                            .uri("/version")
                            .body(Body::empty())
                            .unwrap(),
                    )
                    .await
                    .unwrap();
                response.status()
            })
        })
        .collect();

    for handle in handles {
        let status = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
    }
}

// ============================================================================
// Logout is idempotent and always clears cookies
// ============================================================================

#[tokio::test]
async fn test_admin_logout_without_session_is_200_and_clears_cookies() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/logout")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let cookies = set_cookies(&response);
    assert_cookie_cleared(&cookies, "admin_session");
    assert_cookie_cleared(&cookies, "user-info");

    let json = body_json(response).await;
    assert_eq!(json["message"], "تم تسجيل الخروج بنجاح");
}

#[tokio::test]
async fn test_client_logout_without_session_is_200_and_clears_cookie() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/client/logout")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let cookies = set_cookies(&response);
    assert_cookie_cleared(&cookies, "client_session");

    let json = body_json(response).await;
    assert_eq!(json["message"], "تم تسجيل الخروج بنجاح");
}

#[tokio::test]
async fn test_logout_twice_still_200() {
    // No session state is held in the process, so a second logout behaves
    // exactly like the first.
    for _ in 0..2 {
        let app = create_test_app();
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/client/logout")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

// ============================================================================
// Server-side session gate
// ============================================================================

#[tokio::test]
async fn test_check_session_without_cookie_is_401() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/auth/check-session")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_client_treatments_without_cookie_is_401() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/client/treatments")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_bookings_without_cookie_is_401() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/admin/bookings")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_client_bookings_without_cookie_is_401() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/client/bookings")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"service_id":"s1","scheduled_at":"2026-09-01T10:00:00Z"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Upstream failure contract
// ============================================================================

/// App wired to a port nothing listens on: every query fails immediately
/// with a connection error.
fn create_unreachable_db_app() -> Router {
    let database_url = "postgres://127.0.0.1:1/unreachable";
    let pool = PgPoolOptions::new()
        .connect_lazy(database_url)
        .expect("lazy pool construction should not fail");

    let state = AppState {
        auth: Arc::new(AuthService::new(AuthDbClient::new(pool.clone()), 30)),
        salon_db: SalonDbClient::new(pool),
        config: Arc::new(test_config(database_url)),
    };
    create_router(state)
}

#[tokio::test]
async fn test_db_probe_failure_includes_stringified_error() {
    let app = create_unreachable_db_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/test-db")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    // The probe is the one endpoint that exposes the raw error.
    assert!(json["error"].is_string());
    assert!(json.get("data").is_none());
}

#[tokio::test]
async fn test_report_lookup_db_failure_is_generic_500() {
    let app = create_unreachable_db_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/client/treatments/sessions/any-id/reports")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    // Generic localized message only; no upstream detail leaks.
    assert_eq!(json["message"], "حدث خطأ في الخادم، يرجى المحاولة لاحقاً");
    assert!(json.get("error").is_none());
}

// ============================================================================
// Database-backed scenarios
// ============================================================================

#[tokio::test]
#[ignore] // Requires Postgres
async fn test_report_lookup_for_unknown_session_is_404() {
    let app = create_db_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/client/treatments/sessions/does-not-exist/reports")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["message"], "جلسة العلاج غير موجودة");
}

#[tokio::test]
#[ignore] // Requires Postgres
async fn test_db_probe_success_contract() {
    let app = create_db_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/test-db")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(json["data"].is_array());
    assert!(json["data"].as_array().unwrap().len() <= 5);
    assert!(json.get("error").is_none());
}

#[tokio::test]
#[ignore] // Requires Postgres
async fn test_services_catalog_is_public() {
    let app = create_db_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/services")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["services"].is_array());
}
