//! Shared CLI helpers — path expansion, field parsing, banner.

use std::path::PathBuf;

use colored::Colorize;

/// Expand `~` at the start of a path to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_next::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs_next::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

/// Parse a `--field key=value` argument. The value may contain `=`.
pub fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty field name in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Print the banner shown by long-running commands.
pub fn print_banner() {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!("{}  v{}", "✍️  Scribe".cyan().bold(), version.dimmed());
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
