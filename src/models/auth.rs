// SPDX-License-Identifier: BSD-3-Clause

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// ============================================================================
// Session Realms
// ============================================================================

/// The two independent cookie-backed session realms.
///
/// An admin token is never accepted where a client token is expected and
/// vice versa; the realm is part of the session lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SessionRealm {
    Admin,
    Client,
}

impl SessionRealm {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionRealm::Admin => "admin",
            SessionRealm::Client => "client",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(SessionRealm::Admin),
            "client" => Some(SessionRealm::Client),
            _ => None,
        }
    }

    /// Name of the HTTP cookie carrying this realm's session token.
    pub fn cookie_name(&self) -> &'static str {
        match self {
            SessionRealm::Admin => "admin_session",
            SessionRealm::Client => "client_session",
        }
    }
}

// ============================================================================
// Database Models
// ============================================================================

/// Admin account record.
#[derive(Debug, Clone, FromRow)]
pub struct Admin {
    pub admin_id: String,
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Salon client (customer) record.
#[derive(Debug, Clone, FromRow)]
pub struct Client {
    pub client_id: String,
    pub phone: String,
    pub full_name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Session record. `token_hash` is the SHA-256 of the cookie value; the raw
/// token is never stored.
#[derive(Debug, Clone, FromRow)]
pub struct SessionRecord {
    pub token_hash: String,
    pub realm: String,
    pub subject_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Check if the session has expired
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }
}

// ============================================================================
// Authenticated Contexts
// ============================================================================

/// Authenticated admin context extracted from the `admin_session` cookie.
#[derive(Debug, Clone)]
pub struct AdminContext {
    pub admin_id: String,
    pub email: String,
    pub display_name: String,
}

/// Authenticated client context extracted from the `client_session` cookie.
#[derive(Debug, Clone)]
pub struct ClientContext {
    pub client_id: String,
    pub phone: String,
    pub full_name: String,
}

// ============================================================================
// API Request Types
// ============================================================================

/// Admin sign-in request.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AdminLoginRequest {
    pub email: String,
    pub password: String,
}

/// Client sign-in request. Clients authenticate with their phone number.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ClientLoginRequest {
    pub phone: String,
    pub password: String,
}

/// Admin request to register a new client account.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateClientRequest {
    pub phone: String,
    pub full_name: String,
    pub password: String,
}

// ============================================================================
// API Response Types
// ============================================================================

/// Generic message response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// Bare localized message body. Used where the contract is `{message}` only:
/// logout responses and not-found errors.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiMessage {
    pub message: String,
}

/// Admin identity returned by the session check.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminInfo {
    pub email: String,
    pub display_name: String,
}

/// Response of the dashboard session probe.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CheckSessionResponse {
    pub success: bool,
    pub message: String,
    pub admin: AdminInfo,
}

/// Response after an admin registers a client.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateClientResponse {
    pub success: bool,
    pub message: String,
    pub client_id: String,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_realm_roundtrip() {
        for realm in [SessionRealm::Admin, SessionRealm::Client] {
            assert_eq!(SessionRealm::parse(realm.as_str()), Some(realm));
        }
        assert_eq!(SessionRealm::parse("staff"), None);
    }

    #[test]
    fn test_realm_cookie_names() {
        assert_eq!(SessionRealm::Admin.cookie_name(), "admin_session");
        assert_eq!(SessionRealm::Client.cookie_name(), "client_session");
    }

    #[test]
    fn test_session_expiry() {
        let expired = SessionRecord {
            token_hash: "h".to_string(),
            realm: "admin".to_string(),
            subject_id: "a".to_string(),
            created_at: Utc::now() - Duration::days(2),
            expires_at: Utc::now() - Duration::hours(1),
            last_active_at: Utc::now() - Duration::hours(1),
        };
        assert!(expired.is_expired());

        let valid = SessionRecord {
            expires_at: Utc::now() + Duration::hours(1),
            ..expired
        };
        assert!(!valid.is_expired());
    }
}
