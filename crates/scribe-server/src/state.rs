use std::path::PathBuf;
use std::sync::Arc;

use scribe_providers::TextProvider;

/// Application state shared by all handlers. Built once at startup.
pub struct AppState {
    /// The configured text-generation provider.
    pub provider: Arc<dyn TextProvider>,
    /// Directory served for `GET /` and every non-API path.
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(provider: Arc<dyn TextProvider>, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            provider,
            static_dir: static_dir.into(),
        }
    }
}
