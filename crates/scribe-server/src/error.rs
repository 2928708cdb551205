//! API error type and its HTTP rendering.
//!
//! | Error | Status |
//! |---|---|
//! | bad request body | 400 |
//! | missing provider credential | 500 |
//! | provider failure / all models failed | 502 |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use scribe_providers::GenerationError;

pub const MISSING_TYPE: &str = "Missing 'type'";
pub const INVALID_INPUT: &str = "Invalid input";

/// Errors returned by the API handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body was unusable.
    #[error("{0}")]
    BadRequest(&'static str),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Generation(e) if e.is_configuration() => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Generation(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

/// JSON error body. Diagnostics are only present for an exhausted fallback chain.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tried_models: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        let mut body = ErrorResponse {
            error: err.to_string(),
            details: None,
            tried_models: None,
            hint: None,
        };
        if let ApiError::Generation(GenerationError::AllModelsFailed {
            details,
            tried_models,
            hint,
        }) = err
        {
            body.details = Some(details.clone());
            body.tried_models = Some(tried_models.clone());
            body.hint = Some(hint.clone());
        }
        body
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}
