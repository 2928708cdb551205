//! Provider construction from configuration.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

use scribe_core::{Config, ProviderKind};

use crate::groq::GroqProvider;
use crate::huggingface::HuggingFaceProvider;
use crate::traits::TextProvider;

/// Build the provider selected by `config.provider`.
///
/// A missing credential does not fail here; it is reported per request so
/// the server can still start and serve the frontend.
pub fn create_provider(config: &Config) -> Result<Arc<dyn TextProvider>> {
    let provider: Arc<dyn TextProvider> = match config.provider {
        ProviderKind::Hf => Arc::new(HuggingFaceProvider::new(
            &config.huggingface,
            &config.generation,
        )?),
        ProviderKind::Groq => Arc::new(GroqProvider::new(&config.groq, &config.generation)?),
    };

    debug!(
        provider = provider.display_name(),
        models = ?provider.models(),
        credential_set = config.has_credential(),
        "Created text provider"
    );

    Ok(provider)
}

/// Shared HTTP client builder (connection-pooled, fixed timeout).
pub(crate) fn http_client(timeout_secs: u64) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .context("failed to build HTTP client")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_hf_provider() {
        let mut config = Config::default();
        config.huggingface.model_id = "M1".into();
        config.huggingface.fallback_models = vec!["M1".into(), "M2".into()];

        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.kind(), ProviderKind::Hf);
        assert_eq!(provider.models(), vec!["M1", "M2"]);
    }

    #[test]
    fn test_create_groq_provider_without_key() {
        let mut config = Config::default();
        config.provider = ProviderKind::Groq;

        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.kind(), ProviderKind::Groq);
        assert_eq!(provider.models(), vec!["llama3-8b-8192"]);
    }
}
