//! `scribe serve` — run the HTTP API and static frontend.
//!
//! Startup sequence:
//! 1. Load config, apply flag overrides
//! 2. Create the provider
//! 3. Serve until Ctrl+C (graceful shutdown)

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::{info, warn};

use scribe_core::config::{load_config, Config};
use scribe_providers::create_provider;
use scribe_server::AppState;

use crate::helpers;

/// Command-line values that take precedence over the loaded config.
#[derive(Debug, Default)]
pub struct ServeOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub static_dir: Option<PathBuf>,
}

impl ServeOverrides {
    fn apply(self, config: &mut Config) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(dir) = self.static_dir {
            config.server.static_dir = dir.to_string_lossy().into_owned();
        }
    }
}

/// Run the server.
pub async fn run(config_path: Option<&Path>, overrides: ServeOverrides) -> Result<()> {
    let mut config = load_config(config_path);
    overrides.apply(&mut config);

    let provider = create_provider(&config).context("failed to create provider")?;
    if !config.has_credential() {
        warn!(
            var = config.provider.credential_var(),
            "Provider credential is not set; generation requests will fail"
        );
    }

    let static_dir = helpers::expand_tilde(&config.server.static_dir);
    if !static_dir.is_dir() {
        warn!(dir = %static_dir.display(), "Static frontend directory not found");
    }

    let bind_addr = config.server.bind_addr();

    helpers::print_banner();
    println!("  {:<10} {}", "Provider:".bold(), provider.display_name());
    println!("  {:<10} http://{}", "Listening:".bold(), bind_addr);
    println!("{}", "  Press Ctrl+C to stop.".dimmed());
    println!();

    let state = Arc::new(AppState::new(provider, static_dir));
    scribe_server::run(state, &bind_addr, shutdown_signal())
        .await
        .with_context(|| format!("server failed on {bind_addr}"))?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => warn!("Failed to listen for Ctrl+C: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_config_values() {
        let mut config = Config::default();
        ServeOverrides {
            host: Some("0.0.0.0".into()),
            port: Some(8080),
            static_dir: Some(PathBuf::from("/srv/scribe")),
        }
        .apply(&mut config);

        assert_eq!(config.server.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.server.static_dir, "/srv/scribe");
    }

    #[test]
    fn empty_overrides_keep_config() {
        let mut config = Config::default();
        ServeOverrides::default().apply(&mut config);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.static_dir, "frontend");
    }
}
