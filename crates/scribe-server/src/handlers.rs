//! API handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use scribe_core::prompt::build_prompt_for;
use scribe_core::utils::truncate_string;
use scribe_core::{ContentType, GenerationRequest, ProviderKind};

use crate::error::{ApiError, INVALID_INPUT, MISSING_TYPE};
use crate::state::AppState;

/// Success body for `POST /api/generate`.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub generated_text: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub model_used: String,
    pub provider: ProviderKind,
}

/// Success body for the legacy `POST /api/generate-email`.
#[derive(Debug, Serialize)]
pub struct GenerateEmailResponse {
    pub generated_email: String,
    pub model_used: String,
    pub provider: ProviderKind,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub provider: ProviderKind,
    pub models: Vec<String>,
}

/// `POST /api/generate` — any content type.
///
/// An unparsable body is treated the same as one without a `type`.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!(error = %rejection, "Rejected generate body");
            return Err(ApiError::BadRequest(MISSING_TYPE));
        }
    };
    let content_type = request
        .normalized_type()
        .ok_or(ApiError::BadRequest(MISSING_TYPE))?;

    if ContentType::parse(&content_type).is_none() {
        warn!(content_type = %content_type, "Unrecognized content type, using email template");
    }

    let kind = ContentType::resolve(&content_type);
    let prompt = build_prompt_for(kind, &request.fields);
    info!(
        content_type = %content_type,
        provider = %state.provider.kind(),
        prompt_chars = prompt.len(),
        "Generation request"
    );
    debug!(prompt = %truncate_string(&prompt, 120), "Built prompt");

    let generation = state.provider.generate(kind, &prompt).await?;

    Ok(Json(GenerateResponse {
        generated_text: generation.text,
        content_type,
        model_used: generation.model_used,
        provider: generation.provider,
    }))
}

/// `POST /api/generate-email` — legacy email-only endpoint.
///
/// Same pipeline as [`generate`] with the email template; only the
/// response field name differs.
pub async fn generate_email(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<GenerateEmailResponse>, ApiError> {
    let fields = match payload {
        Ok(Json(fields)) if !fields.is_empty() => fields,
        Ok(_) => return Err(ApiError::BadRequest(INVALID_INPUT)),
        Err(rejection) => {
            debug!(error = %rejection, "Rejected generate-email body");
            return Err(ApiError::BadRequest(INVALID_INPUT));
        }
    };

    let prompt = build_prompt_for(ContentType::Email, &fields);
    info!(
        provider = %state.provider.kind(),
        prompt_chars = prompt.len(),
        "Legacy email generation request"
    );

    let generation = state.provider.generate(ContentType::Email, &prompt).await?;

    Ok(Json(GenerateEmailResponse {
        generated_email: generation.text,
        model_used: generation.model_used,
        provider: generation.provider,
    }))
}

/// `GET /api/health`
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        provider: state.provider.kind(),
        models: state.provider.models(),
    })
}
