//! Core types for Scribe.
//!
//! Incoming requests arrive as loosely-shaped JSON objects (`{type, ...fields}`);
//! the typed pieces here are the content-type tag, the provider selector,
//! and the OpenAI-compatible chat-completion wire format used by Groq.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

// ─────────────────────────────────────────────
// Provider selection
// ─────────────────────────────────────────────

/// Which external text-generation service handles requests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Hugging Face inference API with model fallback.
    #[default]
    Hf,
    /// Groq OpenAI-compatible chat completions.
    Groq,
}

impl ProviderKind {
    /// Wire/config name (`"hf"` or `"groq"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Hf => "hf",
            ProviderKind::Groq => "groq",
        }
    }

    /// Name of the environment variable holding this provider's credential.
    pub fn credential_var(&self) -> &'static str {
        match self {
            ProviderKind::Hf => "HF_API_TOKEN",
            ProviderKind::Groq => "GROQ_API_KEY",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a provider name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownProvider(pub String);

impl fmt::Display for UnknownProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown provider '{}' (expected 'hf' or 'groq')", self.0)
    }
}

impl std::error::Error for UnknownProvider {}

impl FromStr for ProviderKind {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hf" => Ok(ProviderKind::Hf),
            "groq" => Ok(ProviderKind::Groq),
            _ => Err(UnknownProvider(s.to_string())),
        }
    }
}

// ─────────────────────────────────────────────
// Content types
// ─────────────────────────────────────────────

/// The genre of text a caller asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentType {
    Email,
    Essay,
    Story,
    Speech,
}

impl ContentType {
    /// All recognized content types.
    pub const ALL: [ContentType; 4] = [
        ContentType::Email,
        ContentType::Essay,
        ContentType::Story,
        ContentType::Speech,
    ];

    /// Parse a content-type tag, ignoring case and surrounding whitespace.
    ///
    /// Returns `None` for anything other than the four known tags.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "email" => Some(ContentType::Email),
            "essay" => Some(ContentType::Essay),
            "story" => Some(ContentType::Story),
            "speech" => Some(ContentType::Speech),
            _ => None,
        }
    }

    /// Like [`ContentType::parse`], but unrecognized tags resolve to email.
    pub fn resolve(tag: &str) -> Self {
        Self::parse(tag).unwrap_or(ContentType::Email)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Email => "email",
            ContentType::Essay => "essay",
            ContentType::Story => "story",
            ContentType::Speech => "speech",
        }
    }

    /// The writer persona the prompt opens with.
    pub fn persona(&self) -> &'static str {
        match self {
            ContentType::Email => "You are an expert email copywriter.",
            ContentType::Essay => "You are an expert essayist.",
            ContentType::Story => "You are a creative fiction writer.",
            ContentType::Speech => "You are a professional speechwriter.",
        }
    }

    /// Request fields this content type reads, in template order.
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            ContentType::Email => &["goal", "recipient", "tone", "points"],
            ContentType::Essay => &["topic", "tone", "length_words", "points"],
            ContentType::Story => &[
                "genre",
                "setting",
                "characters",
                "tone",
                "length_words",
                "points",
            ],
            ContentType::Speech => &["occasion", "audience", "tone", "duration_minutes", "points"],
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────
// Generation request
// ─────────────────────────────────────────────

/// A content-generation request as posted by the frontend.
///
/// `type` is pulled out; every other key stays in `fields` untouched so that
/// unknown keys are tolerated.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl GenerationRequest {
    /// The `type` tag, trimmed and lower-cased. `None` if missing or blank.
    pub fn normalized_type(&self) -> Option<String> {
        self.content_type
            .as_deref()
            .map(|t| t.trim().to_ascii_lowercase())
            .filter(|t| !t.is_empty())
    }
}

/// Read `key` from a JSON object as trimmed text.
///
/// Missing keys and `null` become an empty string; strings are trimmed;
/// numbers and booleans use their JSON text (`400`, `true`); arrays and
/// objects use their compact JSON encoding.
pub fn field_text(fields: &Map<String, Value>, key: &str) -> String {
    match fields.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string().trim().to_string(),
    }
}

// ─────────────────────────────────────────────
// Chat completion wire types (Groq / OpenAI-compatible)
// ─────────────────────────────────────────────

/// A chat message in the OpenAI format.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for an OpenAI-compatible chat completion API.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Raw chat completion response. Only the fields Scribe reads are modelled.
#[derive(Debug, Default, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

/// A single choice in a chat completion response.
#[derive(Debug, Default, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub message: AssistantMessage,
}

/// The assistant message within a chat completion choice.
#[derive(Debug, Default, Deserialize)]
pub struct AssistantMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Content of the first choice, or an empty string.
    pub fn first_content(&self) -> &str {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .unwrap_or_default()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
