//! Config loader — reads `~/.scribe/config.json` (or an explicit path),
//! then layers environment variables on top.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at the given path, else `~/.scribe/config.json`
//! 3. Environment variables (a `.env` file in the working directory is
//!    loaded into the process environment first)

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::{Config, GenerationConfig};
use crate::types::ProviderKind;
use crate::utils::split_csv;

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from `path` (or the default path) + env vars.
///
/// Never fails: a missing or broken file falls back to defaults.
pub fn load_config(path: Option<&Path>) -> Config {
    match dotenvy::dotenv() {
        Ok(env_path) => debug!("Loaded environment from {}", env_path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Failed to load .env file: {}", e),
    }

    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);
    let config = read_config_file(&config_path);
    apply_env_overrides(config)
}

/// Read a JSON config file without applying env overrides.
fn read_config_file(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return Config::default();
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return Config::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(config) => validated(config),
        Err(e) => {
            warn!("Failed to parse config file {}: {}", path.display(), e);
            Config::default()
        }
    }
}

/// Replace file values that cannot work with their defaults.
fn validated(mut config: Config) -> Config {
    if config.generation.timeout_secs == 0 {
        warn!("Ignoring invalid generation.timeoutSecs=0");
        config.generation.timeout_secs = GenerationConfig::default().timeout_secs;
    }
    config
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config).map_err(std::io::Error::other)?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply process environment overrides on top of a loaded config.
fn apply_env_overrides(config: Config) -> Config {
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Apply overrides from `lookup` (normally `std::env::var`).
///
/// Supported variables:
/// - `PROVIDER` → `provider` (`hf` | `groq`, case-insensitive)
/// - `HF_API_TOKEN` → `huggingface.api_token`
/// - `HF_MODEL_ID` → `huggingface.model_id`
/// - `HF_FALLBACK_MODELS` → `huggingface.fallback_models` (comma-separated)
/// - `GROQ_API_KEY` → `groq.api_key`
/// - `GROQ_MODEL_ID` → `groq.model_id`
/// - `SCRIBE_HF_API_BASE` → `huggingface.api_base`
/// - `SCRIBE_GROQ_API_BASE` → `groq.api_base`
/// - `SCRIBE_GENERATION__TIMEOUT_SECS` → `generation.timeout_secs`
/// - `SCRIBE_SERVER__HOST` → `server.host`
/// - `SCRIBE_SERVER__PORT` → `server.port`
/// - `SCRIBE_SERVER__STATIC_DIR` → `server.static_dir`
fn apply_overrides<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("PROVIDER") {
        config.provider = match val.parse::<ProviderKind>() {
            Ok(kind) => kind,
            Err(e) => {
                warn!("{}, using hf", e);
                ProviderKind::Hf
            }
        };
    }

    // Hugging Face
    if let Some(val) = lookup("HF_API_TOKEN") {
        config.huggingface.api_token = val;
    }
    if let Some(val) = lookup("HF_MODEL_ID") {
        config.huggingface.model_id = val.trim().to_string();
    }
    if let Some(val) = lookup("HF_FALLBACK_MODELS") {
        config.huggingface.fallback_models = split_csv(&val);
    }
    if let Some(val) = lookup("SCRIBE_HF_API_BASE") {
        config.huggingface.api_base = val;
    }

    // Groq
    if let Some(val) = lookup("GROQ_API_KEY") {
        config.groq.api_key = val;
    }
    if let Some(val) = lookup("GROQ_MODEL_ID") {
        config.groq.model_id = val.trim().to_string();
    }
    if let Some(val) = lookup("SCRIBE_GROQ_API_BASE") {
        config.groq.api_base = val;
    }

    // Generation
    if let Some(val) = lookup("SCRIBE_GENERATION__TIMEOUT_SECS") {
        match val.parse::<u64>() {
            Ok(secs) if secs > 0 => config.generation.timeout_secs = secs,
            _ => warn!("Ignoring invalid SCRIBE_GENERATION__TIMEOUT_SECS={}", val),
        }
    }

    // Server
    if let Some(val) = lookup("SCRIBE_SERVER__HOST") {
        config.server.host = val;
    }
    if let Some(val) = lookup("SCRIBE_SERVER__PORT") {
        match val.parse::<u16>() {
            Ok(port) => config.server.port = port,
            Err(_) => warn!("Ignoring invalid SCRIBE_SERVER__PORT={}", val),
        }
    }
    if let Some(val) = lookup("SCRIBE_SERVER__STATIC_DIR") {
        config.server.static_dir = val;
    }

    config
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
