//! HTTP error envelope.

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::access::AccessError;

/// JSON body returned for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub error: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, String>>,
}

/// An error ready to be rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    details: Option<HashMap<String, String>>,
}

impl ApiError {
    /// A 400 with the per-field validation messages.
    pub fn validation(details: HashMap<String, String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: "Validation failed".to_string(),
            details: Some(details),
        }
    }

    #[cfg(test)]
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        let (status, message) = match &err {
            AccessError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
            AccessError::Forbidden(reason) => (StatusCode::FORBIDDEN, (*reason).to_string()),
            AccessError::Database(e) => {
                // The caller gets a generic message; the real error stays in
                // the logs.
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        Self {
            status,
            message,
            details: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            status: self.status.as_u16(),
            error: self
                .status
                .canonical_reason()
                .unwrap_or("Unknown")
                .to_string(),
            message: self.message,
            timestamp: Utc::now(),
            details: self.details,
        };

        (self.status, Json(body)).into_response()
    }
}
