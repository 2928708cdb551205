//! `scribe init` — write a default configuration file.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use scribe_core::config::{get_config_path, save_config, Config};

/// Run the init command.
pub fn run(force: bool) -> Result<()> {
    println!();
    println!("{}", "✍️  Scribe — Setup".cyan().bold());
    println!();

    let config_path = get_config_path();
    if write_default_config(&config_path, force)? {
        println!(
            "  {} created config at {}",
            "✓".green(),
            config_path.display()
        );
        println!();
        println!(
            "{}",
            "  Set HF_API_TOKEN (or PROVIDER=groq and GROQ_API_KEY), then run `scribe serve`."
                .green()
        );
    } else {
        println!(
            "  {} config already exists at {} (use --force to overwrite)",
            "✓".green(),
            config_path.display()
        );
    }
    println!();

    Ok(())
}

/// Write `Config::default()` to `path`. Returns `false` if the file already
/// exists and `force` is not set.
fn write_default_config(path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    save_config(&Config::default(), Some(path))
        .with_context(|| format!("failed to write config: {}", path.display()))?;
    Ok(true)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
