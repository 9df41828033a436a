//! HTTP REST adapter
//!
//! Depends only on core/. Provides the three public operations
//! (`ask`, `quran-query`, `hadith-query`) plus health via the Axum
//! web framework, and maps `TawfiqError` to HTTP responses.

pub mod handlers;
pub mod middleware;

pub use handlers::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::core::error::TawfiqError;

impl TawfiqError {
    /// Convert error to appropriate HTTP status code
    pub fn status_code(&self) -> StatusCode {
        if self.is_bad_request() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Automatic error conversion in Axum handlers.
///
/// Only genuinely malformed requests reach this path; empty
/// retrieval results are shaped into 2xx bodies by the handlers.
impl IntoResponse for TawfiqError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
