// SPDX-License-Identifier: BSD-3-Clause

//! Route handlers for the HTTP API.

use crate::messages;
use crate::models::auth::MessageResponse;
use axum::http::StatusCode;
use axum::Json;
use utoipa::OpenApi;

pub mod admin;
pub mod auth;
pub mod client;

pub use admin::admin_router;
pub use auth::admin_auth_router;
pub use client::client_router;

/// Map an upstream failure to the generic localized 500.
///
/// Full detail goes to the server log; the response body never carries the
/// raw error (the diagnostic probe is the one deliberate exception and does
/// not use this helper).
pub(crate) fn internal_error(err: impl std::fmt::Display) -> (StatusCode, Json<MessageResponse>) {
    tracing::error!(detail = %err, "Upstream failure");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(MessageResponse {
            success: false,
            message: messages::INTERNAL_ERROR.to_string(),
        }),
    )
}

/// OpenAPI document for the API, served through Swagger UI.
#[derive(OpenApi)]
#[openapi(components(schemas(
    crate::models::auth::AdminLoginRequest,
    crate::models::auth::ClientLoginRequest,
    crate::models::auth::CreateClientRequest,
    crate::models::auth::CreateClientResponse,
    crate::models::auth::MessageResponse,
    crate::models::auth::ApiMessage,
    crate::models::auth::AdminInfo,
    crate::models::auth::CheckSessionResponse,
    crate::models::booking::Booking,
    crate::models::booking::CreateBookingRequest,
    crate::models::booking::CreateBookingResponse,
    crate::models::booking::ListBookingsResponse,
    crate::models::catalog::SalonService,
    crate::models::catalog::ListServicesResponse,
    crate::models::catalog::DbCheckResponse,
    crate::models::treatment::TreatmentSession,
    crate::models::treatment::TreatmentReport,
    crate::models::treatment::SessionReportResponse,
    crate::models::treatment::ListTreatmentsResponse,
    crate::models::treatment::CreateTreatmentSessionRequest,
    crate::models::treatment::CreateTreatmentSessionResponse,
    crate::models::treatment::CreateReportRequest,
    crate::models::version::VersionResponse,
)))]
pub struct ApiDoc;
