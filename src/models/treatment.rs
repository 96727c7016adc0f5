// SPDX-License-Identifier: BSD-3-Clause

//! Treatment sessions and their reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Status of a treatment session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TreatmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl TreatmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TreatmentStatus::Scheduled => "scheduled",
            TreatmentStatus::Completed => "completed",
            TreatmentStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "scheduled" => Some(TreatmentStatus::Scheduled),
            "completed" => Some(TreatmentStatus::Completed),
            "cancelled" => Some(TreatmentStatus::Cancelled),
            _ => None,
        }
    }
}

/// A scheduled or completed treatment event for a client.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct TreatmentSession {
    pub session_id: String,
    pub client_id: String,
    pub service_id: String,
    pub performed_at: DateTime<Utc>,
    pub staff_name: String,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Specialist report written after a treatment session.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct TreatmentReport {
    pub report_id: String,
    pub session_id: String,
    pub summary: String,
    pub recommendations: Option<String>,
    pub products_used: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// API Request Types
// ============================================================================

/// Admin request to record a treatment session.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateTreatmentSessionRequest {
    pub client_id: String,
    pub service_id: String,
    pub performed_at: DateTime<Utc>,
    pub staff_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Admin request to attach a report to a treatment session.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateReportRequest {
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products_used: Option<String>,
}

// ============================================================================
// API Response Types
// ============================================================================

/// Combined payload of the report lookup endpoint.
///
/// `report` is `null` when the session exists but no report has been written
/// yet; the session being absent is a 404 instead.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionReportResponse {
    pub session: TreatmentSession,
    pub report: Option<TreatmentReport>,
}

/// A client's treatment history.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListTreatmentsResponse {
    pub sessions: Vec<TreatmentSession>,
    pub count: usize,
}

/// Response after recording a treatment session.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateTreatmentSessionResponse {
    pub success: bool,
    pub message: String,
    pub session_id: String,
}
