//! Configuration schema.
//!
//! Hierarchy: `Config` → `HuggingFaceConfig`, `GroqConfig`,
//! `GenerationConfig`, `ServerConfig`.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! We use `#[serde(rename_all = "camelCase")]` to handle the conversion.

use serde::{Deserialize, Serialize};

use crate::types::ProviderKind;

/// Default primary Hugging Face model.
pub const DEFAULT_HF_MODEL: &str = "google/flan-t5-large";

/// Default Hugging Face fallback chain.
pub const DEFAULT_HF_FALLBACK_MODELS: &[&str] = &[
    "google/flan-t5-large",
    "google/flan-t5-xl",
    "tiiuae/falcon-7b-instruct",
    "mistralai/Mistral-7B-Instruct-v0.2",
];

/// Default Groq chat model.
pub const DEFAULT_GROQ_MODEL: &str = "llama3-8b-8192";

pub const DEFAULT_HF_API_BASE: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — built once at startup, immutable afterwards.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Which provider serves generation requests.
    pub provider: ProviderKind,
    pub huggingface: HuggingFaceConfig,
    pub groq: GroqConfig,
    pub generation: GenerationConfig,
    pub server: ServerConfig,
}

impl Config {
    /// Whether the selected provider has a credential.
    pub fn has_credential(&self) -> bool {
        match self.provider {
            ProviderKind::Hf => self.huggingface.is_configured(),
            ProviderKind::Groq => self.groq.is_configured(),
        }
    }
}

// ─────────────────────────────────────────────
// Providers
// ─────────────────────────────────────────────

/// Hugging Face inference API settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HuggingFaceConfig {
    /// Bearer token (env: `HF_API_TOKEN`).
    #[serde(default)]
    pub api_token: String,
    /// API base URL; model endpoints live under `{api_base}/models/{id}`.
    pub api_base: String,
    /// Primary model, tried first (env: `HF_MODEL_ID`).
    pub model_id: String,
    /// Ordered fallback models (env: `HF_FALLBACK_MODELS`, comma-separated).
    pub fallback_models: Vec<String>,
}

impl HuggingFaceConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_token.is_empty()
    }
}

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            api_base: DEFAULT_HF_API_BASE.to_string(),
            model_id: DEFAULT_HF_MODEL.to_string(),
            fallback_models: DEFAULT_HF_FALLBACK_MODELS
                .iter()
                .map(|m| m.to_string())
                .collect(),
        }
    }
}

/// Groq chat-completion API settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroqConfig {
    /// Bearer token (env: `GROQ_API_KEY`).
    #[serde(default)]
    pub api_key: String,
    /// API base URL; requests go to `{api_base}/chat/completions`.
    pub api_base: String,
    /// Chat model (env: `GROQ_MODEL_ID`).
    pub model_id: String,
}

impl GroqConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: DEFAULT_GROQ_API_BASE.to_string(),
            model_id: DEFAULT_GROQ_MODEL.to_string(),
        }
    }
}

// ─────────────────────────────────────────────
// Generation parameters
// ─────────────────────────────────────────────

/// Sampling parameters shared by both providers.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationConfig {
    /// `max_new_tokens` for Hugging Face, `max_tokens` for Groq.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
    /// Per-request timeout in seconds. Each fallback attempt gets its own.
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_tokens: 512,
            temperature: 0.7,
            timeout_secs: 120,
        }
    }
}

// ─────────────────────────────────────────────
// Server
// ─────────────────────────────────────────────

/// HTTP server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    /// Listen address.
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// Directory holding the frontend bundle (`index.html`, scripts, styles).
    pub static_dir: String,
}

impl ServerConfig {
    /// `host:port` for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            static_dir: "frontend".to_string(),
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
