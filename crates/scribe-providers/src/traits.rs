//! Provider trait — the seam between request handling and the external
//! text-generation services.

use async_trait::async_trait;
use scribe_core::{ContentType, ProviderKind};

use crate::error::GenerationError;

/// Successful generation: the text plus where it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct Generation {
    /// Generated text, returned verbatim.
    pub text: String,
    /// Model identifier that produced `text`.
    pub model_used: String,
    /// Provider that served the request.
    pub provider: ProviderKind,
}

/// Trait that all text-generation providers implement.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate text for a fully-built prompt.
    ///
    /// `content_type` selects the persona for providers that take a
    /// separate system message. Failures come back as [`GenerationError`]
    /// values; implementations never panic on network or API errors.
    async fn generate(
        &self,
        content_type: ContentType,
        prompt: &str,
    ) -> Result<Generation, GenerationError>;

    /// Which provider this is.
    fn kind(&self) -> ProviderKind;

    /// Display name for logging.
    fn display_name(&self) -> &str;

    /// Models this provider may call, in attempt order.
    fn models(&self) -> Vec<String>;
}
