// SPDX-License-Identifier: BSD-3-Clause

//! The bilingual treatment catalog shown on the marketing pages.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A salon service offered to clients. Names are carried in both languages;
/// the UI picks per locale.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct SalonService {
    pub service_id: String,
    pub name_ar: String,
    pub name_en: String,
    pub category: String,
    pub duration_minutes: i32,
    pub price: f64,
    pub active: bool,
}

/// Public catalog listing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListServicesResponse {
    pub services: Vec<SalonService>,
    pub count: usize,
}

/// Response of the database connectivity probe.
///
/// On success `data` holds the sampled rows; on failure `error` carries the
/// stringified upstream error. This endpoint is an operational probe and is
/// the one place a raw error string is allowed in a response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DbCheckResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<SalonService>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
