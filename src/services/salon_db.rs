// SPDX-License-Identifier: BSD-3-Clause

//! Database operations for the salon domain: catalog, bookings, treatment
//! sessions and their reports.

use crate::models::booking::{Booking, BookingStatus};
use crate::models::catalog::SalonService;
use crate::models::treatment::{TreatmentReport, TreatmentSession, TreatmentStatus};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Parameters for recording a treatment session.
pub struct CreateTreatmentSessionParams<'a> {
    pub client_id: &'a str,
    pub service_id: &'a str,
    pub performed_at: DateTime<Utc>,
    pub staff_name: &'a str,
    pub status: TreatmentStatus,
    pub notes: Option<&'a str>,
}

/// Parameters for writing a treatment report.
pub struct CreateReportParams<'a> {
    pub session_id: &'a str,
    pub summary: &'a str,
    pub recommendations: Option<&'a str>,
    pub products_used: Option<&'a str>,
}

/// Parameters for creating a booking.
pub struct CreateBookingParams<'a> {
    pub client_id: &'a str,
    pub service_id: &'a str,
    pub scheduled_at: DateTime<Utc>,
    pub notes: Option<&'a str>,
}

/// Salon domain database client.
#[derive(Clone)]
pub struct SalonDbClient {
    pool: PgPool,
}

impl SalonDbClient {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ========== Catalog Operations ==========

    /// List the services shown on the public pages.
    pub async fn list_active_services(&self) -> Result<Vec<SalonService>, sqlx::Error> {
        sqlx::query_as::<_, SalonService>(
            "SELECT service_id, name_ar, name_en, category, duration_minutes, price, active
             FROM services WHERE active ORDER BY category, name_ar",
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Bounded read used by the connectivity probe.
    pub async fn probe_services(&self, limit: i64) -> Result<Vec<SalonService>, sqlx::Error> {
        sqlx::query_as::<_, SalonService>(
            "SELECT service_id, name_ar, name_en, category, duration_minutes, price, active
             FROM services LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    /// Check that a service id refers to an active catalog entry.
    pub async fn service_exists(&self, service_id: &str) -> Result<bool, sqlx::Error> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT service_id FROM services WHERE service_id = $1 AND active")
                .bind(service_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.is_some())
    }

    // ========== Treatment Session Operations ==========

    /// Get a treatment session by id.
    pub async fn get_treatment_session(
        &self,
        session_id: &str,
    ) -> Result<Option<TreatmentSession>, sqlx::Error> {
        sqlx::query_as::<_, TreatmentSession>(
            "SELECT session_id, client_id, service_id, performed_at, staff_name, status, notes, created_at
             FROM treatment_sessions WHERE session_id = $1",
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// List a client's treatment history, newest first.
    pub async fn list_client_treatments(
        &self,
        client_id: &str,
    ) -> Result<Vec<TreatmentSession>, sqlx::Error> {
        sqlx::query_as::<_, TreatmentSession>(
            "SELECT session_id, client_id, service_id, performed_at, staff_name, status, notes, created_at
             FROM treatment_sessions WHERE client_id = $1 ORDER BY performed_at DESC",
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Record a treatment session and return its id.
    pub async fn create_treatment_session(
        &self,
        params: &CreateTreatmentSessionParams<'_>,
    ) -> Result<String, sqlx::Error> {
        let session_id = Uuid::now_v7().to_string();

        sqlx::query(
            "INSERT INTO treatment_sessions
             (session_id, client_id, service_id, performed_at, staff_name, status, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&session_id)
        .bind(params.client_id)
        .bind(params.service_id)
        .bind(params.performed_at)
        .bind(params.staff_name)
        .bind(params.status.as_str())
        .bind(params.notes)
        .execute(&self.pool)
        .await?;

        Ok(session_id)
    }

    // ========== Treatment Report Operations ==========

    /// Get the report attached to a treatment session, if any.
    pub async fn get_report_for_session(
        &self,
        session_id: &str,
    ) -> Result<Option<TreatmentReport>, sqlx::Error> {
        sqlx::query_as::<_, TreatmentReport>(
            "SELECT report_id, session_id, summary, recommendations, products_used, created_at
             FROM treatment_reports WHERE session_id = $1",
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Write the report for a session, replacing any previous one.
    pub async fn upsert_report(&self, params: &CreateReportParams<'_>) -> Result<String, sqlx::Error> {
        let report_id = Uuid::now_v7().to_string();

        sqlx::query(
            "INSERT INTO treatment_reports
             (report_id, session_id, summary, recommendations, products_used)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (session_id) DO UPDATE SET
                 summary = EXCLUDED.summary,
                 recommendations = EXCLUDED.recommendations,
                 products_used = EXCLUDED.products_used",
        )
        .bind(&report_id)
        .bind(params.session_id)
        .bind(params.summary)
        .bind(params.recommendations)
        .bind(params.products_used)
        .execute(&self.pool)
        .await?;

        Ok(report_id)
    }

    // ========== Booking Operations ==========

    /// Create a booking in `pending` status and return its id.
    pub async fn create_booking(&self, params: &CreateBookingParams<'_>) -> Result<String, sqlx::Error> {
        let booking_id = Uuid::now_v7().to_string();

        sqlx::query(
            "INSERT INTO bookings (booking_id, client_id, service_id, scheduled_at, status, notes)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&booking_id)
        .bind(params.client_id)
        .bind(params.service_id)
        .bind(params.scheduled_at)
        .bind(BookingStatus::Pending.as_str())
        .bind(params.notes)
        .execute(&self.pool)
        .await?;

        Ok(booking_id)
    }

    /// List a client's bookings, newest first.
    pub async fn list_client_bookings(&self, client_id: &str) -> Result<Vec<Booking>, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            "SELECT booking_id, client_id, service_id, scheduled_at, status, notes, created_at
             FROM bookings WHERE client_id = $1 ORDER BY scheduled_at DESC",
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await
    }

    /// List recent bookings for the admin dashboard.
    pub async fn list_recent_bookings(&self, limit: i64) -> Result<Vec<Booking>, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            "SELECT booking_id, client_id, service_id, scheduled_at, status, notes, created_at
             FROM bookings ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn create_test_client() -> SalonDbClient {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let pool = PgPool::connect(&database_url)
            .await
            .expect("Failed to connect to Postgres");
        SalonDbClient::new(pool)
    }

    #[tokio::test]
    #[ignore] // Requires Postgres
    async fn test_get_nonexistent_treatment_session_returns_none() {
        let db = create_test_client().await;
        let result = db
            .get_treatment_session("does-not-exist")
            .await
            .expect("Query should succeed");
        assert!(result.is_none());
    }

    #[tokio::test]
    #[ignore] // Requires Postgres
    async fn test_probe_is_bounded() {
        let db = create_test_client().await;
        let rows = db.probe_services(5).await.expect("Probe should succeed");
        assert!(rows.len() <= 5);
    }

    #[tokio::test]
    #[ignore] // Requires Postgres
    async fn test_report_for_session_without_report_is_none() {
        let db = create_test_client().await;
        let result = db
            .get_report_for_session("no-report-session")
            .await
            .expect("Query should succeed");
        assert!(result.is_none());
    }
}
