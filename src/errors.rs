// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::error::{JsonPayloadError, ResponseError};
use actix_web::{http::StatusCode, HttpRequest, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Every variant maps to an HTTP status code; the Display
/// string is exactly what goes on the wire in the `error` field
#[derive(Error, Debug)]
pub enum HbnbError {
    /// Missing place, owner, amenity or user. Carries the full message,
    /// e.g. "Place not found".
    #[error("{0}")]
    NotFound(String),

    /// Duplicate amenity link (409)
    #[error("{0}")]
    Conflict(String),

    /// Field-level validation failure (400)
    #[error("{0}")]
    Validation(String),

    /// Malformed payload or an unexpected store failure collapsed to a
    /// client error (400)
    #[error("{0}")]
    InvalidInput(String),

    #[error("Missing or invalid authentication token")]
    Unauthorized,

    #[error("Unauthorized action")]
    Forbidden,

    #[error("Database error: {0}")]
    Database(String),
}

/// Convert HbnbError to HTTP response
/// DOCUMENTATION: All errors serialize as {"error": "<message>"}
impl ResponseError for HbnbError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.to_string()
        }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            HbnbError::NotFound(_) => StatusCode::NOT_FOUND,
            HbnbError::Conflict(_) => StatusCode::CONFLICT,
            HbnbError::Validation(_) => StatusCode::BAD_REQUEST,
            HbnbError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            HbnbError::Unauthorized => StatusCode::UNAUTHORIZED,
            HbnbError::Forbidden => StatusCode::FORBIDDEN,
            HbnbError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Payloads that fail JSON extraction (missing field, wrong type, invalid
/// JSON) collapse to the same 400 response the handlers use, keeping the
/// {"error": ...} wire shape. Registered through web::JsonConfig.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected payload: {}", err);
    HbnbError::InvalidInput("Invalid input data".to_string()).into()
}
