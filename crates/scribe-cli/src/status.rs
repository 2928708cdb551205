//! `scribe status` — show configuration and provider status.

use std::path::{Path, PathBuf};

use anyhow::Result;
use colored::Colorize;

use scribe_core::config::{get_config_path, load_config};
use scribe_core::ProviderKind;
use scribe_providers::huggingface::candidate_models;

use crate::helpers::expand_tilde;

/// Run the status command.
pub fn run(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path);
    let config_path = config_path.map(PathBuf::from).unwrap_or_else(get_config_path);

    println!();
    println!("{}", "✍️  Scribe Status".cyan().bold());
    println!();

    println!(
        "  {:<14} {} {}",
        "Config:".bold(),
        config_path.display(),
        found_marker(config_path.exists())
    );
    println!("  {:<14} {}", "Provider:".bold(), config.provider);

    // Credentials
    println!();
    println!("  {}", "Credentials:".bold());
    for (kind, configured) in [
        (ProviderKind::Hf, config.huggingface.is_configured()),
        (ProviderKind::Groq, config.groq.is_configured()),
    ] {
        let status = if configured {
            format!("{} (set)", "✓".green())
        } else if kind == config.provider {
            format!("{}", "✗ missing".red())
        } else {
            format!("{}", "· not set".dimmed())
        };
        println!("    {:<16} {}", kind.credential_var(), status);
    }

    // Models
    println!();
    match config.provider {
        ProviderKind::Hf => {
            println!("  {}", "Candidate models:".bold());
            let candidates = candidate_models(
                &config.huggingface.model_id,
                &config.huggingface.fallback_models,
            );
            for (i, model) in candidates.iter().enumerate() {
                println!("    {}. {}", i + 1, model);
            }
        }
        ProviderKind::Groq => {
            println!("  {:<14} {}", "Model:".bold(), config.groq.model_id);
        }
    }
    println!(
        "  {:<14} {} | {} | {}",
        "Parameters:".bold(),
        format!("temp: {}", config.generation.temperature).dimmed(),
        format!("max_tokens: {}", config.generation.max_tokens).dimmed(),
        format!("timeout: {}s", config.generation.timeout_secs).dimmed(),
    );

    // Server
    println!();
    let static_dir = expand_tilde(&config.server.static_dir);
    println!(
        "  {:<14} http://{}",
        "Server:".bold(),
        config.server.bind_addr()
    );
    println!(
        "  {:<14} {} {}",
        "Frontend:".bold(),
        static_dir.display(),
        found_marker(static_dir.is_dir())
    );
    println!();

    Ok(())
}

fn found_marker(found: bool) -> String {
    if found {
        "✓".green().to_string()
    } else {
        "(not found)".red().to_string()
    }
}
