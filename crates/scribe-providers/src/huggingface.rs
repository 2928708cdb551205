//! Hugging Face inference API provider with sequential model fallback.
//!
//! The primary model is tried first, then each configured fallback in
//! order. Any single failure (404, other HTTP error, transport error,
//! inline `error` field, empty output) is recorded and the loop moves on.
//! The first non-empty text wins. If the whole chain fails, the collected
//! errors come back as [`GenerationError::AllModelsFailed`].

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use scribe_core::config::schema::{GenerationConfig, HuggingFaceConfig};
use scribe_core::utils::truncate_string;
use scribe_core::{ContentType, ProviderKind};

use crate::error::{AttemptError, GenerationError, HF_FALLBACK_HINT};
use crate::factory::http_client;
use crate::traits::{Generation, TextProvider};

// ─────────────────────────────────────────────
// Wire format
// ─────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
    options: InferenceOptions,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    max_new_tokens: u32,
    temperature: f64,
    return_full_text: bool,
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

// ─────────────────────────────────────────────
// HuggingFaceProvider
// ─────────────────────────────────────────────

/// Client for the Hugging Face per-model inference endpoints.
pub struct HuggingFaceProvider {
    /// HTTP client (shared, connection-pooled).
    client: reqwest::Client,
    /// API base URL (e.g. `"https://api-inference.huggingface.co"`).
    api_base: String,
    api_token: String,
    primary_model: String,
    fallback_models: Vec<String>,
    max_new_tokens: u32,
    temperature: f64,
}

impl std::fmt::Debug for HuggingFaceProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HuggingFaceProvider")
            .field("api_base", &self.api_base)
            .field("primary_model", &self.primary_model)
            .field("fallback_models", &self.fallback_models)
            .finish()
    }
}

impl HuggingFaceProvider {
    pub fn new(config: &HuggingFaceConfig, generation: &GenerationConfig) -> anyhow::Result<Self> {
        Ok(HuggingFaceProvider {
            client: http_client(generation.timeout_secs)?,
            api_base: config.api_base.clone(),
            api_token: config.api_token.clone(),
            primary_model: config.model_id.clone(),
            fallback_models: config.fallback_models.clone(),
            max_new_tokens: generation.max_tokens,
            temperature: generation.temperature,
        })
    }

    /// Inference URL for one model.
    fn model_url(&self, model_id: &str) -> String {
        let base = self.api_base.trim_end_matches('/');
        format!("{}/models/{}", base, model_id)
    }

    /// Candidate models in attempt order.
    pub fn candidates(&self) -> Vec<String> {
        candidate_models(&self.primary_model, &self.fallback_models)
    }

    /// One attempt against one model.
    async fn try_model(&self, model_id: &str, prompt: &str) -> Result<String, AttemptError> {
        let body = InferenceRequest {
            inputs: prompt,
            parameters: InferenceParameters {
                max_new_tokens: self.max_new_tokens,
                temperature: self.temperature,
                return_full_text: false,
            },
            options: InferenceOptions {
                wait_for_model: true,
            },
        };

        let response = self
            .client
            .post(self.model_url(model_id))
            .bearer_auth(&self.api_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| AttemptError::Request {
                model: model_id.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AttemptError::NotFound {
                model: model_id.to_string(),
            });
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(AttemptError::Http {
                model: model_id.to_string(),
                status,
                body: truncate_string(body.trim(), 300),
            });
        }

        let bytes = response.bytes().await.map_err(|e| AttemptError::Request {
            model: model_id.to_string(),
            message: e.to_string(),
        })?;
        let value: Value = serde_json::from_slice(&bytes).map_err(|e| AttemptError::InvalidBody {
            model: model_id.to_string(),
            message: e.to_string(),
        })?;

        if let Some(message) = inline_error(&value) {
            return Err(AttemptError::Inline(message));
        }

        let text = extract_text(&value);
        if text.trim().is_empty() {
            return Err(AttemptError::Empty);
        }
        Ok(text)
    }
}

#[async_trait]
impl TextProvider for HuggingFaceProvider {
    async fn generate(
        &self,
        _content_type: ContentType,
        prompt: &str,
    ) -> Result<Generation, GenerationError> {
        if self.api_token.is_empty() {
            warn!("Hugging Face request rejected: HF_API_TOKEN is not set");
            return Err(GenerationError::MissingCredential {
                var: ProviderKind::Hf.credential_var(),
            });
        }

        let tried = self.candidates();
        let mut details = Vec::with_capacity(tried.len());

        for (index, model_id) in tried.iter().enumerate() {
            debug!(
                model = %model_id,
                attempt = index + 1,
                candidates = tried.len(),
                "Calling Hugging Face model"
            );

            match self.try_model(model_id, prompt).await {
                Ok(text) => {
                    info!(
                        model = %model_id,
                        attempt = index + 1,
                        chars = text.len(),
                        "Hugging Face generation succeeded"
                    );
                    return Ok(Generation {
                        text,
                        model_used: model_id.clone(),
                        provider: ProviderKind::Hf,
                    });
                }
                Err(e) => {
                    warn!(model = %model_id, error = %e, "Model attempt failed");
                    details.push(e.to_string());
                }
            }
        }

        error!(tried = ?tried, "All Hugging Face models failed");
        Err(GenerationError::AllModelsFailed {
            details,
            tried_models: tried,
            hint: HF_FALLBACK_HINT.to_string(),
        })
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Hf
    }

    fn display_name(&self) -> &str {
        "Hugging Face"
    }

    fn models(&self) -> Vec<String> {
        self.candidates()
    }
}

// ─────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────

/// Primary model first, then every fallback that differs from it.
///
/// Only collisions with the primary are removed; the fallback list keeps
/// its configured order otherwise. Identifiers are trimmed and blank ones
/// are skipped.
pub fn candidate_models(primary: &str, fallbacks: &[String]) -> Vec<String> {
    let primary = primary.trim();
    std::iter::once(primary)
        .chain(
            fallbacks
                .iter()
                .map(|m| m.trim())
                .filter(|m| *m != primary),
        )
        .filter(|m| !m.is_empty())
        .map(String::from)
        .collect()
}

/// Pull the generated text out of an inference response.
///
/// Handles both `[{...}]` and `{...}`; prefers `generated_text`, then
/// `summary_text`. Anything else yields an empty string.
pub fn extract_text(value: &Value) -> String {
    let item = match value {
        Value::Array(items) => match items.first() {
            Some(first) => first,
            None => return String::new(),
        },
        other => other,
    };

    let Some(obj) = item.as_object() else {
        return String::new();
    };

    obj.get("generated_text")
        .or_else(|| obj.get("summary_text"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// An `error` field on a 2xx object response, if it carries anything.
fn inline_error(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{any, body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn models(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|m| m.to_string()).collect()
    }

    fn make_provider(
        api_base: &str,
        token: &str,
        primary: &str,
        fallbacks: &[&str],
        timeout_secs: u64,
    ) -> HuggingFaceProvider {
        let config = HuggingFaceConfig {
            api_token: token.to_string(),
            api_base: api_base.to_string(),
            model_id: primary.to_string(),
            fallback_models: models(fallbacks),
        };
        let generation = GenerationConfig {
            timeout_secs,
            ..Default::default()
        };
        HuggingFaceProvider::new(&config, &generation).unwrap()
    }

    // ── Unit tests ──

    #[test]
    fn test_candidates_dedupe_primary() {
        assert_eq!(
            candidate_models("M1", &models(&["M1", "M2", "M3"])),
            vec!["M1", "M2", "M3"]
        );
    }

    #[test]
    fn test_candidates_primary_first() {
        assert_eq!(
            candidate_models("M3", &models(&["M1", "M2", "M3"])),
            vec!["M3", "M1", "M2"]
        );
    }

    #[test]
    fn test_candidates_only_primary_collisions_removed() {
        assert_eq!(
            candidate_models("M1", &models(&["M2", "M2", "M1"])),
            vec!["M1", "M2", "M2"]
        );
    }

    #[test]
    fn test_candidates_blank_primary() {
        assert_eq!(candidate_models("  ", &models(&["M2"])), vec!["M2"]);
        assert!(candidate_models("", &[]).is_empty());
    }

    #[test]
    fn test_candidates_trim_and_skip_blank_fallbacks() {
        assert_eq!(
            candidate_models("M2", &models(&["", " M2", "  ", " M3 "])),
            vec!["M2", "M3"]
        );
    }

    #[tokio::test]
    async fn test_blank_fallback_makes_no_request() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/models/M1"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = make_provider(&mock_server.uri(), "tok", "M1", &["", " M1 "], 5);
        let err = provider
            .generate(ContentType::Email, "prompt")
            .await
            .unwrap_err();

        match err {
            GenerationError::AllModelsFailed { tried_models, .. } => {
                assert_eq!(tried_models, vec!["M1"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_extract_text_shapes() {
        assert_eq!(extract_text(&json!([{ "generated_text": "a" }])), "a");
        assert_eq!(extract_text(&json!([{ "summary_text": "b" }])), "b");
        assert_eq!(extract_text(&json!({ "generated_text": "c" })), "c");
        assert_eq!(extract_text(&json!({ "summary_text": "d" })), "d");
        assert_eq!(
            extract_text(&json!([{ "generated_text": "e", "summary_text": "f" }])),
            "e"
        );
        assert_eq!(extract_text(&json!([])), "");
        assert_eq!(extract_text(&json!(["plain"])), "");
        assert_eq!(extract_text(&json!({ "other": 1 })), "");
        assert_eq!(extract_text(&json!("text")), "");
    }

    #[test]
    fn test_model_url_trailing_slash() {
        let provider = make_provider("https://hf.example/", "t", "google/flan-t5-large", &[], 5);
        assert_eq!(
            provider.model_url("google/flan-t5-large"),
            "https://hf.example/models/google/flan-t5-large"
        );
    }

    // ── Integration tests with mock server ──

    #[tokio::test]
    async fn test_missing_token_makes_no_request() {
        let mock_server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let provider = make_provider(&mock_server.uri(), "", "M1", &["M2"], 5);
        let err = provider
            .generate(ContentType::Email, "prompt")
            .await
            .unwrap_err();

        assert_eq!(
            err,
            GenerationError::MissingCredential {
                var: "HF_API_TOKEN"
            }
        );
    }

    #[tokio::test]
    async fn test_primary_success_sends_expected_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/google/flan-t5-large"))
            .and(header("Authorization", "Bearer hf_test"))
            .and(body_partial_json(json!({
                "inputs": "Write something",
                "parameters": {
                    "max_new_tokens": 512,
                    "temperature": 0.7,
                    "return_full_text": false
                },
                "options": { "wait_for_model": true }
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{ "generated_text": "Subject: Hi\n---\nBody:\nHello" }])),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = make_provider(
            &mock_server.uri(),
            "hf_test",
            "google/flan-t5-large",
            &["google/flan-t5-large", "google/flan-t5-xl"],
            5,
        );
        let generation = provider
            .generate(ContentType::Email, "Write something")
            .await
            .unwrap();

        assert_eq!(generation.text, "Subject: Hi\n---\nBody:\nHello");
        assert_eq!(generation.model_used, "google/flan-t5-large");
        assert_eq!(generation.provider, ProviderKind::Hf);
    }

    #[tokio::test]
    async fn test_falls_back_after_transport_error() {
        let mock_server = MockServer::start().await;

        // M1 answers too late → client timeout (transport error)
        Mock::given(method("POST"))
            .and(path("/models/M1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{ "generated_text": "too late" }]))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/models/M2"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{ "generated_text": "from M2" }])),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/models/M3"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let provider = make_provider(&mock_server.uri(), "tok", "M1", &["M1", "M2", "M3"], 1);
        let generation = provider
            .generate(ContentType::Email, "prompt")
            .await
            .unwrap();

        assert_eq!(generation.model_used, "M2");
        assert_eq!(generation.text, "from M2");
    }

    #[tokio::test]
    async fn test_skips_not_found_and_empty_output() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/M1"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/models/M2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "generated_text": "  " }])))
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/models/M3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "summary_text": "summary" })))
            .mount(&mock_server)
            .await;

        let provider = make_provider(&mock_server.uri(), "tok", "M1", &["M2", "M3"], 5);
        let generation = provider
            .generate(ContentType::Email, "prompt")
            .await
            .unwrap();

        assert_eq!(generation.model_used, "M3");
        assert_eq!(generation.text, "summary");
    }

    #[tokio::test]
    async fn test_all_models_failed_aggregates_in_order() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/M1"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/models/M2"))
            .respond_with(ResponseTemplate::new(503).set_body_string("model is loading"))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/models/M3"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "error": "Input too long" })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/models/M4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/models/M5"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = make_provider(
            &mock_server.uri(),
            "tok",
            "M1",
            &["M1", "M2", "M3", "M4", "M5"],
            5,
        );
        let err = provider
            .generate(ContentType::Email, "prompt")
            .await
            .unwrap_err();

        let (details, tried_models, hint) = match err {
            GenerationError::AllModelsFailed {
                details,
                tried_models,
                hint,
            } => (details, tried_models, hint),
            other => panic!("expected AllModelsFailed, got {other:?}"),
        };

        assert_eq!(tried_models, vec!["M1", "M2", "M3", "M4", "M5"]);
        assert_eq!(details.len(), 5);
        assert_eq!(details[0], "Model not found (404) for M1");
        assert!(details[1].starts_with("HTTP error from HF for M2: 503"));
        assert!(details[1].contains("model is loading"));
        assert_eq!(details[2], "Input too long");
        assert_eq!(details[3], "Empty response from model");
        assert!(details[4].starts_with("Invalid response from M5"));
        assert_eq!(hint, HF_FALLBACK_HINT);
    }

    #[tokio::test]
    async fn test_network_error_recorded() {
        // Point to a port that's not listening
        let provider = make_provider("http://127.0.0.1:1", "tok", "M1", &[], 5);
        let err = provider
            .generate(ContentType::Email, "prompt")
            .await
            .unwrap_err();

        match err {
            GenerationError::AllModelsFailed {
                details,
                tried_models,
                ..
            } => {
                assert_eq!(tried_models, vec!["M1"]);
                assert!(details[0].starts_with("Request error for M1"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
