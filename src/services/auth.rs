// SPDX-License-Identifier: BSD-3-Clause

//! Authentication service: password checks, session issuance and validation
//! for the two cookie realms.

use crate::models::auth::{Admin, AdminContext, Client, ClientContext, SessionRealm};
use crate::services::auth_db::{AuthDbClient, CreateClientParams, CreateSessionParams};
use crate::services::logging::{anonymize_email, anonymize_phone};
use anyhow::{Context, Result};
use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use chrono::{Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};
use tracing::{info, warn};

/// Authentication service.
pub struct AuthService {
    db: AuthDbClient,
    session_max_age_days: u64,
}

impl AuthService {
    pub fn new(db: AuthDbClient, session_max_age_days: u64) -> Self {
        Self {
            db,
            session_max_age_days,
        }
    }

    // ========== Token Generation ==========

    /// Generate a secure random session token.
    /// Returns (raw_token, hash) - raw_token goes into the cookie, hash into the DB.
    pub fn generate_token() -> (String, String) {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        let raw_token = hex::encode(bytes);
        let hash = Self::hash_token(&raw_token);
        (raw_token, hash)
    }

    /// Hash a token for storage.
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }

    // ========== Password Handling ==========

    /// Hash a password with Argon2id into PHC string format.
    pub fn hash_password(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Password hashing failed: {e}"))?;
        Ok(hash.to_string())
    }

    /// Verify a plaintext password against a stored PHC-format hash.
    fn verify_password(password: &str, stored_hash: &str) -> bool {
        let Ok(parsed) = argon2::PasswordHash::new(stored_hash) else {
            warn!("Stored password hash is malformed");
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    // ========== Login Flows ==========

    /// Authenticate an admin and open an admin-realm session.
    /// Returns `None` on unknown email or wrong password.
    pub async fn login_admin(&self, email: &str, password: &str) -> Result<Option<(String, Admin)>> {
        let Some(admin) = self
            .db
            .get_admin_by_email(email)
            .await
            .context("Failed to look up admin account")?
        else {
            return Ok(None);
        };

        if !Self::verify_password(password, &admin.password_hash) {
            warn!(email = %anonymize_email(email), "Admin login rejected: wrong password");
            return Ok(None);
        }

        let token = self
            .open_session(SessionRealm::Admin, &admin.admin_id)
            .await?;
        self.db
            .touch_admin_login(&admin.admin_id)
            .await
            .context("Failed to update admin last login")?;

        info!(
            admin_id = %admin.admin_id,
            email = %anonymize_email(&admin.email),
            "Admin signed in"
        );
        Ok(Some((token, admin)))
    }

    /// Authenticate a client and open a client-realm session.
    /// Returns `None` on unknown phone or wrong password.
    pub async fn login_client(
        &self,
        phone: &str,
        password: &str,
    ) -> Result<Option<(String, Client)>> {
        let Some(client) = self
            .db
            .get_client_by_phone(phone)
            .await
            .context("Failed to look up client account")?
        else {
            return Ok(None);
        };

        if !Self::verify_password(password, &client.password_hash) {
            warn!(phone = %anonymize_phone(phone), "Client login rejected: wrong password");
            return Ok(None);
        }

        let token = self
            .open_session(SessionRealm::Client, &client.client_id)
            .await?;
        self.db
            .touch_client_login(&client.client_id)
            .await
            .context("Failed to update client last login")?;

        info!(
            client_id = %client.client_id,
            phone = %anonymize_phone(&client.phone),
            "Client signed in"
        );
        Ok(Some((token, client)))
    }

    /// Create a session row for a subject and return the raw token.
    async fn open_session(&self, realm: SessionRealm, subject_id: &str) -> Result<String> {
        let (token, token_hash) = Self::generate_token();
        let expires_at = Utc::now() + Duration::days(self.session_max_age_days as i64);

        self.db
            .create_session(&CreateSessionParams {
                token_hash: &token_hash,
                realm,
                subject_id,
                expires_at,
            })
            .await
            .context("Failed to create session")?;

        Ok(token)
    }

    // ========== Session Management ==========

    /// Validate an admin session token and return the admin context.
    pub async fn validate_admin_session(&self, token: &str) -> Result<Option<AdminContext>> {
        let Some(subject_id) = self.resolve_session(SessionRealm::Admin, token).await? else {
            return Ok(None);
        };

        let admin = self
            .db
            .get_admin_by_id(&subject_id)
            .await
            .context("Failed to load admin for session")?;

        Ok(admin.map(|a| AdminContext {
            admin_id: a.admin_id,
            email: a.email,
            display_name: a.display_name,
        }))
    }

    /// Validate a client session token and return the client context.
    pub async fn validate_client_session(&self, token: &str) -> Result<Option<ClientContext>> {
        let Some(subject_id) = self.resolve_session(SessionRealm::Client, token).await? else {
            return Ok(None);
        };

        let client = self
            .db
            .get_client_by_id(&subject_id)
            .await
            .context("Failed to load client for session")?;

        Ok(client.map(|c| ClientContext {
            client_id: c.client_id,
            phone: c.phone,
            full_name: c.full_name,
        }))
    }

    /// Resolve a token to the session subject within one realm.
    /// Expired sessions are deleted on sight and treated as absent.
    async fn resolve_session(&self, realm: SessionRealm, token: &str) -> Result<Option<String>> {
        let token_hash = Self::hash_token(token);

        let session = match self
            .db
            .get_session(&token_hash, realm)
            .await
            .context("Failed to get session")?
        {
            Some(s) => s,
            None => return Ok(None),
        };

        if session.is_expired() {
            self.db
                .delete_session(&token_hash)
                .await
                .context("Failed to delete expired session")?;
            return Ok(None);
        }

        // Update last active time (fire and forget)
        let _ = self.db.touch_session(&token_hash).await;

        Ok(Some(session.subject_id))
    }

    /// Sign out - invalidate the session. Idempotent.
    pub async fn sign_out(&self, token: &str) -> Result<()> {
        let token_hash = Self::hash_token(token);
        self.db
            .delete_session(&token_hash)
            .await
            .context("Failed to delete session")?;
        Ok(())
    }

    // ========== Account Registration ==========

    /// Register a client account. Returns `None` when the phone number is
    /// already registered.
    pub async fn register_client(
        &self,
        phone: &str,
        full_name: &str,
        password: &str,
    ) -> Result<Option<String>> {
        if self
            .db
            .get_client_by_phone(phone)
            .await
            .context("Failed to check phone number")?
            .is_some()
        {
            return Ok(None);
        }

        let password_hash = Self::hash_password(password)?;
        let client_id = self
            .db
            .create_client(&CreateClientParams {
                phone,
                full_name,
                password_hash: &password_hash,
            })
            .await
            .context("Failed to create client account")?;

        info!(
            client_id = %client_id,
            phone = %anonymize_phone(phone),
            "Client account registered"
        );
        Ok(Some(client_id))
    }
}
