// SPDX-License-Identifier: BSD-3-Clause

//! Session cookie helpers and the server-side session gate.
//!
//! Provides:
//! - cookie builders for the two session realms and the auxiliary
//!   `user-info` cookie
//! - `AuthError`: localized rejection type for auth failures
//! - `AdminSession` / `ClientSession`: extractors that validate the cookie
//!   against the session store before a handler body runs. The dashboard's
//!   `check-session` call is UX; these extractors are the actual gate.

use crate::app::AppState;
use crate::messages;
use crate::models::auth::{AdminContext, ClientContext, MessageResponse, SessionRealm};
use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tower_cookies::{Cookie, Cookies};
use tracing::error;

/// Non-httpOnly cookie read by the dashboard shell; carries the signed-in
/// admin's email. Cleared together with `admin_session`.
pub const USER_INFO_COOKIE_NAME: &str = "user-info";

/// Auth error responses.
#[derive(Debug)]
pub enum AuthError {
    MissingSession,
    InvalidSession,
    InternalError(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingSession => (StatusCode::UNAUTHORIZED, messages::UNAUTHORIZED),
            AuthError::InvalidSession => (StatusCode::UNAUTHORIZED, messages::SESSION_EXPIRED),
            AuthError::InternalError(msg) => {
                error!(detail = %msg, "Session gate internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, messages::INTERNAL_ERROR)
            }
        };
        (
            status,
            Json(MessageResponse {
                success: false,
                message: message.to_string(),
            }),
        )
            .into_response()
    }
}

/// Extract the session token for a realm from the request cookies.
pub fn extract_session_token(cookies: &Cookies, realm: SessionRealm) -> Option<String> {
    cookies
        .get(realm.cookie_name())
        .map(|c| c.value().to_string())
}

/// Create a session cookie with the given token.
pub fn create_session_cookie(
    realm: SessionRealm,
    token: &str,
    max_age_days: u64,
    secure: bool,
) -> Cookie<'static> {
    let max_age_secs = max_age_days * 24 * 60 * 60;
    Cookie::build((realm.cookie_name(), token.to_string()))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(tower_cookies::cookie::SameSite::Lax)
        .max_age(tower_cookies::cookie::time::Duration::seconds(
            max_age_secs as i64,
        ))
        .build()
}

/// Create the auxiliary `user-info` cookie. Readable by page scripts, so it
/// is not httpOnly and must never carry secrets.
pub fn create_user_info_cookie(email: &str, secure: bool) -> Cookie<'static> {
    Cookie::build((USER_INFO_COOKIE_NAME, email.to_string()))
        .path("/")
        .http_only(false)
        .secure(secure)
        .same_site(tower_cookies::cookie::SameSite::Lax)
        .build()
}

/// Create a cookie that clears a realm's session (for logout).
/// `Max-Age=0` is the "delete immediately" signal for HTTP clients.
pub fn clear_session_cookie(realm: SessionRealm) -> Cookie<'static> {
    Cookie::build((realm.cookie_name(), ""))
        .path("/")
        .http_only(true)
        .max_age(tower_cookies::cookie::time::Duration::ZERO)
        .build()
}

/// Create a cookie that clears the `user-info` cookie.
pub fn clear_user_info_cookie() -> Cookie<'static> {
    Cookie::build((USER_INFO_COOKIE_NAME, ""))
        .path("/")
        .max_age(tower_cookies::cookie::time::Duration::ZERO)
        .build()
}

// ============================================================================
// Session gate extractors
// ============================================================================

/// Extractor for routes that require a valid admin session.
pub struct AdminSession(pub AdminContext);

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let cookies = Cookies::from_request_parts(parts, state)
            .await
            .map_err(|_| AuthError::InternalError("Failed to read request cookies".to_string()))?;

        let token = extract_session_token(&cookies, SessionRealm::Admin)
            .ok_or(AuthError::MissingSession)?;

        state
            .auth
            .validate_admin_session(&token)
            .await
            .map_err(|e| AuthError::InternalError(format!("Session validation error: {e}")))?
            .ok_or(AuthError::InvalidSession)
            .map(AdminSession)
    }
}

/// Extractor for routes that require a valid client session.
pub struct ClientSession(pub ClientContext);

impl FromRequestParts<AppState> for ClientSession {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let cookies = Cookies::from_request_parts(parts, state)
            .await
            .map_err(|_| AuthError::InternalError("Failed to read request cookies".to_string()))?;

        let token = extract_session_token(&cookies, SessionRealm::Client)
            .ok_or(AuthError::MissingSession)?;

        state
            .auth
            .validate_client_session(&token)
            .await
            .map_err(|e| AuthError::InternalError(format!("Session validation error: {e}")))?
            .ok_or(AuthError::InvalidSession)
            .map(ClientSession)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_status_codes() {
        use axum::body::Body;
        use axum::http::Response;

        let response: Response<Body> = AuthError::MissingSession.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response: Response<Body> = AuthError::InvalidSession.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response: Response<Body> = AuthError::InternalError("test".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_create_session_cookie() {
        let cookie = create_session_cookie(SessionRealm::Admin, "test_token", 30, false);
        assert_eq!(cookie.name(), "admin_session");
        assert_eq!(cookie.value(), "test_token");
        assert!(cookie.http_only().unwrap_or(false));
        assert!(!cookie.secure().unwrap_or(false));
    }

    #[test]
    fn test_session_cookie_secure_in_production() {
        let cookie = create_session_cookie(SessionRealm::Client, "t", 30, true);
        assert!(cookie.secure().unwrap_or(false));
    }

    #[test]
    fn test_clear_session_cookie() {
        let cookie = clear_session_cookie(SessionRealm::Client);
        assert_eq!(cookie.name(), "client_session");
        assert_eq!(cookie.value(), "");
        assert_eq!(
            cookie.max_age(),
            Some(tower_cookies::cookie::time::Duration::ZERO)
        );
    }

    #[test]
    fn test_user_info_cookie_is_not_http_only() {
        let cookie = create_user_info_cookie("admin@salon.example", false);
        assert_eq!(cookie.name(), USER_INFO_COOKIE_NAME);
        // Must stay readable by the dashboard shell.
        assert!(!cookie.http_only().unwrap_or(false));
    }
}
