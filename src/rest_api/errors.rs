//! # REST API Errors
//!
//! Maps store errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Result type for REST handlers
pub type RestResult<T> = Result<T, RestError>;

/// REST API errors
#[derive(Debug, Error)]
pub enum RestError {
    /// Missing required query parameter
    #[error("Missing required parameter: {0}")]
    MissingParam(&'static str),

    /// Invalid query parameter value
    #[error("Invalid query parameter: {0}")]
    InvalidQueryParam(String),

    /// Core store failure
    #[error("{0}")]
    Store(#[from] StoreError),
}

impl RestError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::MissingParam(_) => StatusCode::BAD_REQUEST,
            RestError::InvalidQueryParam(_) => StatusCode::BAD_REQUEST,
            RestError::Store(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<RestError> for ErrorResponse {
    fn from(err: RestError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}
