//! Groq provider — one OpenAI-compatible `/chat/completions` call, no fallback.
//!
//! The system message is the persona of the requested content type.

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use scribe_core::config::schema::{GenerationConfig, GroqConfig};
use scribe_core::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use scribe_core::utils::truncate_string;
use scribe_core::{ContentType, ProviderKind};

use crate::error::GenerationError;
use crate::factory::http_client;
use crate::traits::{Generation, TextProvider};

/// Client for Groq's chat completion API.
pub struct GroqProvider {
    /// HTTP client (shared, connection-pooled).
    client: reqwest::Client,
    /// API base URL (e.g. `"https://api.groq.com/openai/v1"`).
    api_base: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f64,
}

impl std::fmt::Debug for GroqProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqProvider")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .finish()
    }
}

impl GroqProvider {
    pub fn new(config: &GroqConfig, generation: &GenerationConfig) -> anyhow::Result<Self> {
        Ok(GroqProvider {
            client: http_client(generation.timeout_secs)?,
            api_base: config.api_base.clone(),
            api_key: config.api_key.clone(),
            model: config.model_id.clone(),
            max_tokens: generation.max_tokens,
            temperature: generation.temperature,
        })
    }

    /// Build the full chat completions URL.
    fn completions_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        format!("{}/chat/completions", base)
    }

    fn failure(detail: impl std::fmt::Display) -> GenerationError {
        GenerationError::Provider {
            message: format!("Groq request failed: {}", detail),
        }
    }
}

#[async_trait]
impl TextProvider for GroqProvider {
    async fn generate(
        &self,
        content_type: ContentType,
        prompt: &str,
    ) -> Result<Generation, GenerationError> {
        if self.api_key.is_empty() {
            warn!("Groq request rejected: GROQ_API_KEY is not set");
            return Err(GenerationError::MissingCredential {
                var: ProviderKind::Groq.credential_var(),
            });
        }

        debug!(
            model = %self.model,
            content_type = content_type.as_str(),
            prompt_chars = prompt.len(),
            "Calling Groq"
        );

        let request_body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(content_type.persona()),
                ChatMessage::user(prompt),
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = match self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                error!(error = %e, "Groq HTTP request failed");
                return Err(Self::failure(e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            error!(status = %status, body = %error_text, "Groq API error");
            return Err(Self::failure(format!(
                "{} {}",
                status,
                truncate_string(error_text.trim(), 300)
            )));
        }

        let chat_resp = match response.json::<ChatCompletionResponse>().await {
            Ok(r) => r,
            Err(e) => {
                error!(error = %e, "Failed to parse Groq response");
                return Err(Self::failure(e));
            }
        };

        let content = chat_resp.first_content();
        if content.trim().is_empty() {
            warn!(model = %self.model, "Groq returned empty content");
            return Err(GenerationError::Provider {
                message: "Empty response from Groq".to_string(),
            });
        }

        info!(model = %self.model, chars = content.len(), "Groq generation succeeded");
        Ok(Generation {
            text: content.to_string(),
            model_used: self.model.clone(),
            provider: ProviderKind::Groq,
        })
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Groq
    }

    fn display_name(&self) -> &str {
        "Groq"
    }

    fn models(&self) -> Vec<String> {
        vec![self.model.clone()]
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
