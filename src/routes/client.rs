// SPDX-License-Identifier: BSD-3-Clause

//! Client portal route handlers (`/api/client`): sign-in/out, treatment
//! history, the report lookup, and bookings.

use crate::app::AppState;
use crate::messages;
use crate::models::auth::{ApiMessage, ClientLoginRequest, MessageResponse, SessionRealm};
use crate::models::booking::{CreateBookingRequest, CreateBookingResponse, ListBookingsResponse};
use crate::models::treatment::{ListTreatmentsResponse, SessionReportResponse};
use crate::routes::internal_error;
use crate::services::salon_db::CreateBookingParams;
use crate::services::session_cookies::{
    clear_session_cookie, create_session_cookie, extract_session_token, ClientSession,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tower_cookies::Cookies;

/// Create the client portal router.
pub fn client_router() -> Router<AppState> {
    Router::new()
        // Public routes
        .route("/login", post(login_handler))
        .route("/logout", post(logout_handler))
        .route(
            "/treatments/sessions/{id}/reports",
            get(session_report_handler),
        )
        // Protected routes (client session required)
        .route("/treatments", get(list_treatments_handler))
        .route("/bookings", post(create_booking_handler))
        .route("/bookings", get(list_bookings_handler))
}

/// POST /api/client/login - Client sign-in. Sets the `client_session` cookie.
async fn login_handler(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(payload): Json<ClientLoginRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<MessageResponse>)> {
    let (token, _client) = state
        .auth
        .login_client(&payload.phone, &payload.password)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(MessageResponse {
                    success: false,
                    message: messages::INVALID_CREDENTIALS.to_string(),
                }),
            )
        })?;

    cookies.add(create_session_cookie(
        SessionRealm::Client,
        &token,
        state.config.session_max_age_days,
        state.config.environment.secure_cookies(),
    ));

    Ok(Json(MessageResponse {
        success: true,
        message: messages::LOGIN_SUCCESS.to_string(),
    }))
}

/// POST /api/client/logout - Client sign-out.
///
/// Always 200 and always clears the cookie, with or without a live session.
async fn logout_handler(
    State(state): State<AppState>,
    cookies: Cookies,
) -> Result<Json<ApiMessage>, (StatusCode, Json<ApiMessage>)> {
    if let Some(token) = extract_session_token(&cookies, SessionRealm::Client) {
        let _ = state.auth.sign_out(&token).await;
    }

    cookies.remove(clear_session_cookie(SessionRealm::Client));

    Ok(Json(ApiMessage {
        message: messages::LOGOUT_SUCCESS.to_string(),
    }))
}

/// GET /api/client/treatments - The signed-in client's treatment history.
async fn list_treatments_handler(
    State(state): State<AppState>,
    ClientSession(client): ClientSession,
) -> Result<Json<ListTreatmentsResponse>, (StatusCode, Json<MessageResponse>)> {
    let sessions = state
        .salon_db
        .list_client_treatments(&client.client_id)
        .await
        .map_err(internal_error)?;

    let count = sessions.len();
    Ok(Json(ListTreatmentsResponse { sessions, count }))
}

/// GET /api/client/treatments/sessions/{id}/reports - Session + report lookup.
///
/// The parent session is confirmed first; its absence is a 404 and the report
/// lookup is never attempted. A session without a report returns 200 with
/// `report: null`.
async fn session_report_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionReportResponse>, (StatusCode, Json<ApiMessage>)> {
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

    let report = state
        .salon_db
        .get_report_for_session(&session.session_id)
        .await
        .map_err(|e| {
            tracing::error!(detail = %e, session_id = %id, "Treatment report lookup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiMessage {
                    message: messages::INTERNAL_ERROR.to_string(),
                }),
            )
        })?;

    Ok(Json(SessionReportResponse { session, report }))
}

/// POST /api/client/bookings - Reserve a service slot.
async fn create_booking_handler(
    State(state): State<AppState>,
    ClientSession(client): ClientSession,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<Json<CreateBookingResponse>, (StatusCode, Json<MessageResponse>)> {
    let service_ok = state
        .salon_db
        .service_exists(&payload.service_id)
        .await
        .map_err(internal_error)?;

    if !service_ok {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(MessageResponse {
                success: false,
                message: messages::BOOKING_INVALID.to_string(),
            }),
        ));
    }

    let booking_id = state
        .salon_db
        .create_booking(&CreateBookingParams {
            client_id: &client.client_id,
            service_id: &payload.service_id,
            scheduled_at: payload.scheduled_at,
            notes: payload.notes.as_deref(),
        })
        .await
        .map_err(internal_error)?;

    Ok(Json(CreateBookingResponse {
        success: true,
        message: messages::BOOKING_CREATED.to_string(),
        booking_id,
    }))
}

/// GET /api/client/bookings - The signed-in client's bookings.
async fn list_bookings_handler(
    State(state): State<AppState>,
    ClientSession(client): ClientSession,
) -> Result<Json<ListBookingsResponse>, (StatusCode, Json<MessageResponse>)> {
    let bookings = state
        .salon_db
        .list_client_bookings(&client.client_id)
        .await
        .map_err(internal_error)?;

    let count = bookings.len();
    Ok(Json(ListBookingsResponse { bookings, count }))
}
