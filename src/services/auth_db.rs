// SPDX-License-Identifier: BSD-3-Clause

//! Database operations for accounts and sessions.
//!
//! Account and session data lives in the same hosted Postgres as the salon
//! records; this client owns the account/session queries only.

use crate::models::auth::{Admin, Client, SessionRealm, SessionRecord};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Parameters for creating a session.
pub struct CreateSessionParams<'a> {
    pub token_hash: &'a str,
    pub realm: SessionRealm,
    pub subject_id: &'a str,
    pub expires_at: DateTime<Utc>,
}

/// Parameters for registering a client account.
pub struct CreateClientParams<'a> {
    pub phone: &'a str,
    pub full_name: &'a str,
    pub password_hash: &'a str,
}

/// Account/session database client.
#[derive(Clone)]
pub struct AuthDbClient {
    pool: PgPool,
}

impl AuthDbClient {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ========== Admin Operations ==========

    /// Get an admin account by email.
    pub async fn get_admin_by_email(&self, email: &str) -> Result<Option<Admin>, sqlx::Error> {
        sqlx::query_as::<_, Admin>(
            "SELECT admin_id, email, password_hash, display_name, created_at, last_login_at
             FROM admins WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    /// Get an admin account by id.
    pub async fn get_admin_by_id(&self, admin_id: &str) -> Result<Option<Admin>, sqlx::Error> {
        sqlx::query_as::<_, Admin>(
            "SELECT admin_id, email, password_hash, display_name, created_at, last_login_at
             FROM admins WHERE admin_id = $1",
        )
        .bind(admin_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Update an admin's last login time.
    pub async fn touch_admin_login(&self, admin_id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE admins SET last_login_at = now() WHERE admin_id = $1")
            .bind(admin_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // ========== Client Operations ==========

    /// Get a client account by phone number.
    pub async fn get_client_by_phone(&self, phone: &str) -> Result<Option<Client>, sqlx::Error> {
        sqlx::query_as::<_, Client>(
            "SELECT client_id, phone, full_name, password_hash, created_at, last_login_at
             FROM clients WHERE phone = $1",
        )
        .bind(phone)
        .fetch_optional(&self.pool)
        .await
    }

    /// Get a client account by id.
    pub async fn get_client_by_id(&self, client_id: &str) -> Result<Option<Client>, sqlx::Error> {
        sqlx::query_as::<_, Client>(
            "SELECT client_id, phone, full_name, password_hash, created_at, last_login_at
             FROM clients WHERE client_id = $1",
        )
        .bind(client_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Register a new client account and return its id.
    pub async fn create_client(&self, params: &CreateClientParams<'_>) -> Result<String, sqlx::Error> {
        let client_id = Uuid::now_v7().to_string();

        sqlx::query(
            "INSERT INTO clients (client_id, phone, full_name, password_hash)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(&client_id)
        .bind(params.phone)
        .bind(params.full_name)
        .bind(params.password_hash)
        .execute(&self.pool)
        .await?;

        Ok(client_id)
    }

    /// Update a client's last login time.
    pub async fn touch_client_login(&self, client_id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE clients SET last_login_at = now() WHERE client_id = $1")
            .bind(client_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // ========== Session Operations ==========

    /// Create a new session row.
    pub async fn create_session(&self, params: &CreateSessionParams<'_>) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO sessions (token_hash, realm, subject_id, expires_at)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(params.token_hash)
        .bind(params.realm.as_str())
        .bind(params.subject_id)
        .bind(params.expires_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Get a session by token hash, scoped to one realm.
    pub async fn get_session(
        &self,
        token_hash: &str,
        realm: SessionRealm,
    ) -> Result<Option<SessionRecord>, sqlx::Error> {
        sqlx::query_as::<_, SessionRecord>(
            "SELECT token_hash, realm, subject_id, created_at, expires_at, last_active_at
             FROM sessions WHERE token_hash = $1 AND realm = $2",
        )
        .bind(token_hash)
        .bind(realm.as_str())
        .fetch_optional(&self.pool)
        .await
    }

    /// Delete a session. Deleting an absent session is not an error.
    pub async fn delete_session(&self, token_hash: &str) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM sessions WHERE token_hash = $1")
            .bind(token_hash)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Update a session's last active time.
    pub async fn touch_session(&self, token_hash: &str) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE sessions SET last_active_at = now() WHERE token_hash = $1")
            .bind(token_hash)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to create an AuthDbClient against the test database.
    async fn create_test_client() -> AuthDbClient {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let pool = PgPool::connect(&database_url)
            .await
            .expect("Failed to connect to Postgres");
        AuthDbClient::new(pool)
    }

    #[tokio::test]
    #[ignore] // Requires Postgres
    async fn test_create_and_get_client() {
        let db = create_test_client().await;
        let phone = format!("05{}", &Uuid::now_v7().simple().to_string()[..8]);

        let client_id = db
            .create_client(&CreateClientParams {
                phone: &phone,
                full_name: "اختبار",
                password_hash: "$argon2id$test",
            })
            .await
            .expect("Failed to create client");

        let client = db
            .get_client_by_phone(&phone)
            .await
            .expect("Failed to get client")
            .expect("Client should exist");
        assert_eq!(client.client_id, client_id);
        assert_eq!(client.full_name, "اختبار");
        assert!(client.last_login_at.is_none());
    }

    #[tokio::test]
    #[ignore] // Requires Postgres
    async fn test_session_lifecycle() {
        let db = create_test_client().await;
        let token_hash = format!("test-hash-{}", Uuid::now_v7());
        let expires_at = Utc::now() + chrono::Duration::days(1);

        db.create_session(&CreateSessionParams {
            token_hash: &token_hash,
            realm: SessionRealm::Client,
            subject_id: "test-subject",
            expires_at,
        })
        .await
        .expect("Failed to create session");

        // Visible in its own realm only
        let session = db
            .get_session(&token_hash, SessionRealm::Client)
            .await
            .expect("Failed to get session")
            .expect("Session should exist");
        assert!(!session.is_expired());

        let cross_realm = db
            .get_session(&token_hash, SessionRealm::Admin)
            .await
            .expect("Query should succeed");
        assert!(cross_realm.is_none());

        db.delete_session(&token_hash)
            .await
            .expect("Failed to delete session");
        let gone = db
            .get_session(&token_hash, SessionRealm::Client)
            .await
            .expect("Query should succeed");
        assert!(gone.is_none());

        // Idempotent delete
        db.delete_session(&token_hash)
            .await
            .expect("Deleting an absent session should succeed");
    }

    #[tokio::test]
    #[ignore] // Requires Postgres
    async fn test_get_nonexistent_admin_returns_none() {
        let db = create_test_client().await;
        let result = db
            .get_admin_by_email("nonexistent@example.com")
            .await
            .expect("Query should succeed");
        assert!(result.is_none());
    }
}
