//! Provider error types.

use reqwest::StatusCode;

/// Hint attached to an exhausted Hugging Face fallback chain.
pub const HF_FALLBACK_HINT: &str =
    "Set HF_MODEL_ID or switch PROVIDER=groq in your environment or .env";

/// Why a generation request failed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    /// The selected provider has no credential configured.
    #[error("Missing {var}. Set it in the environment or .env")]
    MissingCredential { var: &'static str },

    /// A single-shot provider call failed.
    #[error("{message}")]
    Provider { message: String },

    /// Every candidate model in the fallback chain failed.
    #[error("All models failed")]
    AllModelsFailed {
        /// One entry per attempt, in attempt order.
        details: Vec<String>,
        /// Every model attempted, in attempt order.
        tried_models: Vec<String>,
        hint: String,
    },
}

impl GenerationError {
    /// Whether this is a configuration problem rather than a provider failure.
    pub fn is_configuration(&self) -> bool {
        matches!(self, GenerationError::MissingCredential { .. })
    }
}

/// Failure of one candidate model during the Hugging Face fallback loop.
///
/// The `Display` text is what gets reported back in `details`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AttemptError {
    #[error("Model not found (404) for {model}")]
    NotFound { model: String },

    #[error("HTTP error from HF for {model}: {status} {body}")]
    Http {
        model: String,
        status: StatusCode,
        body: String,
    },

    #[error("Request error for {model}: {message}")]
    Request { model: String, message: String },

    #[error("Invalid response from {model}: {message}")]
    InvalidBody { model: String, message: String },

    /// The API answered 2xx but carried an `error` field.
    #[error("{0}")]
    Inline(String),

    #[error("Empty response from model")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_message() {
        let err = GenerationError::MissingCredential { var: "GROQ_API_KEY" };
        assert_eq!(
            err.to_string(),
            "Missing GROQ_API_KEY. Set it in the environment or .env"
        );
        assert!(err.is_configuration());
    }

    #[test]
    fn test_attempt_error_messages() {
        assert_eq!(
            AttemptError::NotFound { model: "a/b".into() }.to_string(),
            "Model not found (404) for a/b"
        );
        assert_eq!(
            AttemptError::Http {
                model: "a/b".into(),
                status: StatusCode::SERVICE_UNAVAILABLE,
                body: "loading".into(),
            }
            .to_string(),
            "HTTP error from HF for a/b: 503 Service Unavailable loading"
        );
        assert_eq!(AttemptError::Empty.to_string(), "Empty response from model");
        assert_eq!(
            AttemptError::Inline("Model is overloaded".into()).to_string(),
            "Model is overloaded"
        );
    }

    #[test]
    fn test_all_models_failed_display() {
        let err = GenerationError::AllModelsFailed {
            details: vec![],
            tried_models: vec![],
            hint: HF_FALLBACK_HINT.into(),
        };
        assert_eq!(err.to_string(), "All models failed");
        assert!(!err.is_configuration());
    }
}
