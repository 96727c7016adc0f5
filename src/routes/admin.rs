// SPDX-License-Identifier: BSD-3-Clause

//! Admin dashboard route handlers (`/api/admin`). Every handler requires a
//! valid admin session via the `AdminSession` extractor.

use crate::app::AppState;
use crate::messages;
use crate::models::auth::{
    ApiMessage, CreateClientRequest, CreateClientResponse, MessageResponse,
};
use crate::models::booking::ListBookingsResponse;
use crate::models::treatment::{
    CreateReportRequest, CreateTreatmentSessionRequest, CreateTreatmentSessionResponse,
    TreatmentStatus,
};
use crate::routes::internal_error;
use crate::services::salon_db::{CreateReportParams, CreateTreatmentSessionParams};
use crate::services::session_cookies::AdminSession;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

/// Number of bookings shown on the dashboard overview.
const DASHBOARD_BOOKINGS_LIMIT: i64 = 100;

/// Create the admin dashboard router.
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/bookings", get(list_bookings_handler))
        .route("/clients", post(create_client_handler))
        .route("/treatments/sessions", post(create_treatment_handler))
        .route(
            "/treatments/sessions/{id}/reports",
            post(create_report_handler),
        )
}

/// GET /api/admin/bookings - Recent bookings across all clients.
async fn list_bookings_handler(
    State(state): State<AppState>,
    AdminSession(_admin): AdminSession,
) -> Result<Json<ListBookingsResponse>, (StatusCode, Json<MessageResponse>)> {
    let bookings = state
        .salon_db
        .list_recent_bookings(DASHBOARD_BOOKINGS_LIMIT)
        .await
        .map_err(internal_error)?;

    let count = bookings.len();
    Ok(Json(ListBookingsResponse { bookings, count }))
}

/// POST /api/admin/clients - Register a client account.
async fn create_client_handler(
    State(state): State<AppState>,
    AdminSession(_admin): AdminSession,
    Json(payload): Json<CreateClientRequest>,
) -> Result<Json<CreateClientResponse>, (StatusCode, Json<MessageResponse>)> {
    let client_id = state
        .auth
        .register_client(&payload.phone, &payload.full_name, &payload.password)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                Json(MessageResponse {
                    success: false,
                    message: messages::CLIENT_PHONE_TAKEN.to_string(),
                }),
            )
        })?;

    Ok(Json(CreateClientResponse {
        success: true,
        message: messages::CLIENT_CREATED.to_string(),
        client_id,
    }))
}

/// POST /api/admin/treatments/sessions - Record a treatment session.
async fn create_treatment_handler(
    State(state): State<AppState>,
    AdminSession(_admin): AdminSession,
    Json(payload): Json<CreateTreatmentSessionRequest>,
) -> Result<Json<CreateTreatmentSessionResponse>, (StatusCode, Json<MessageResponse>)> {
    // Future-dated sessions are scheduled; past ones are recorded as done.
    let status = if payload.performed_at > Utc::now() {
        TreatmentStatus::Scheduled
    } else {
        TreatmentStatus::Completed
    };

    let session_id = state
        .salon_db
        .create_treatment_session(&CreateTreatmentSessionParams {
            client_id: &payload.client_id,
            service_id: &payload.service_id,
            performed_at: payload.performed_at,
            staff_name: &payload.staff_name,
            status,
            notes: payload.notes.as_deref(),
        })
        .await
        .map_err(internal_error)?;

    Ok(Json(CreateTreatmentSessionResponse {
        success: true,
        message: messages::TREATMENT_SESSION_CREATED.to_string(),
        session_id,
    }))
}

/// POST /api/admin/treatments/sessions/{id}/reports - Write the report for a
/// session. The parent session must exist; replaces an earlier report if one
/// was already written.
async fn create_report_handler(
    State(state): State<AppState>,
    AdminSession(_admin): AdminSession,
    Path(id): Path<String>,
    Json(payload): Json<CreateReportRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ApiMessage>)> {
    let session = state
        .salon_db
        .get_treatment_session(&id)
        .await
        .map_err(|e| {
            tracing::error!(detail = %e, session_id = %id, "Treatment session lookup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiMessage {
                    message: messages::INTERNAL_ERROR.to_string(),
                }),
            )
        })?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ApiMessage {
                    message: messages::TREATMENT_SESSION_NOT_FOUND.to_string(),
                }),
            )
        })?;

    state
        .salon_db
        .upsert_report(&CreateReportParams {
            session_id: &session.session_id,
            summary: &payload.summary,
            recommendations: payload.recommendations.as_deref(),
            products_used: payload.products_used.as_deref(),
        })
        .await
        .map_err(|e| {
            tracing::error!(detail = %e, session_id = %id, "Report write failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiMessage {
                    message: messages::INTERNAL_ERROR.to_string(),
                }),
            )
        })?;

    Ok(Json(MessageResponse {
        success: true,
        message: messages::REPORT_SAVED.to_string(),
    }))
}
