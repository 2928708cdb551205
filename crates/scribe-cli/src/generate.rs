//! `scribe generate` — one-shot generation from the command line.

use std::path::Path;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use scribe_core::config::load_config;
use scribe_core::prompt::build_prompt_for;
use scribe_core::ContentType;
use scribe_providers::{create_provider, GenerationError};

/// Run the generate command.
pub async fn run(
    config_path: Option<&Path>,
    content_type: &str,
    fields: Vec<(String, String)>,
) -> Result<()> {
    let content_type = content_type.trim().to_lowercase();
    if content_type.is_empty() {
        bail!("Missing 'type'");
    }
    if ContentType::parse(&content_type).is_none() {
        warn!(
            content_type = %content_type,
            known = %known_types(),
            "Unrecognized content type, using email template"
        );
    }
    let kind = ContentType::resolve(&content_type);

    let fields = to_field_map(fields);
    let ignored = unused_fields(kind, &fields);
    if !ignored.is_empty() {
        warn!(
            content_type = %kind,
            ignored = ?ignored,
            expected = ?kind.fields(),
            "Fields not used by the template"
        );
    }

    let config = load_config(config_path);
    let provider = create_provider(&config).context("failed to create provider")?;

    let prompt = build_prompt_for(kind, &fields);
    info!(content_type = %content_type, provider = %provider.kind(), "Generating");

    match provider.generate(kind, &prompt).await {
        Ok(generation) => {
            println!();
            println!(
                "{} {}",
                format!("✍️  {content_type}").cyan().bold(),
                format!("({} · {})", generation.provider, generation.model_used).dimmed()
            );
            println!();
            println!("{}", generation.text);
            println!();
            Ok(())
        }
        Err(e) => {
            print_failure(&e);
            Err(e).context("generation failed")
        }
    }
}

/// Collect `--field` pairs into the field map; later duplicates win.
fn to_field_map(fields: Vec<(String, String)>) -> Map<String, Value> {
    fields
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect()
}

/// Field names the template for `kind` does not read.
fn unused_fields(kind: ContentType, fields: &Map<String, Value>) -> Vec<String> {
    fields
        .keys()
        .filter(|key| !kind.fields().contains(&key.as_str()))
        .cloned()
        .collect()
}

/// Recognized content types, comma-separated.
fn known_types() -> String {
    ContentType::ALL
        .iter()
        .map(ContentType::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_failure(err: &GenerationError) {
    eprintln!();
    eprintln!("{} {}", "✗".red().bold(), err.to_string().red());
    if let GenerationError::AllModelsFailed {
        details,
        tried_models,
        hint,
    } = err
    {
        for (model, detail) in tried_models.iter().zip(details) {
            eprintln!("  {} {}", format!("{model}:").bold(), detail.dimmed());
        }
        eprintln!("  {}", hint.yellow());
    }
    eprintln!();
}
