//! Scribe CLI — entry point.
//!
//! # Commands
//!
//! - `scribe serve` — run the HTTP API and frontend
//! - `scribe generate --type T --field key=value...` — one-shot generation
//! - `scribe status` — show configuration and provider status
//! - `scribe init` — write a default config file

mod generate;
mod helpers;
mod init;
mod serve;
mod status;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// ✍️ Scribe — AI content generation for emails, essays, stories and speeches
#[derive(Parser)]
#[command(name = "scribe", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API and serve the frontend
    Serve {
        /// Bind host (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory with the static frontend (overrides config)
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Config file path (default: ~/.scribe/config.json)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Enable debug logging
        #[arg(short = 'v', long, default_value_t = false)]
        logs: bool,
    },

    /// Generate content once and print it
    Generate {
        /// Content type: email, essay, story or speech
        #[arg(short = 't', long = "type")]
        content_type: String,

        /// Template field as key=value (repeatable)
        #[arg(short = 'f', long = "field", value_parser = helpers::parse_field)]
        fields: Vec<(String, String)>,

        /// Config file path (default: ~/.scribe/config.json)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Enable debug logging
        #[arg(short = 'v', long, default_value_t = false)]
        logs: bool,
    },

    /// Show configuration and provider status
    Status {
        /// Config file path (default: ~/.scribe/config.json)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Write a default config file to ~/.scribe/config.json
    Init {
        /// Overwrite an existing config file
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            static_dir,
            config,
            logs,
        } => {
            init_logging(logs, "info");
            let overrides = serve::ServeOverrides {
                host,
                port,
                static_dir,
            };
            serve::run(config.as_deref(), overrides).await
        }
        Commands::Generate {
            content_type,
            fields,
            config,
            logs,
        } => {
            init_logging(logs, "warn");
            generate::run(config.as_deref(), &content_type, fields).await
        }
        Commands::Status { config } => {
            init_logging(false, "warn");
            status::run(config.as_deref())
        }
        Commands::Init { force } => {
            init_logging(false, "warn");
            init::run(force)
        }
    }
}

/// Initialize tracing/logging. `RUST_LOG` wins when set.
fn init_logging(verbose: bool, default_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if verbose => EnvFilter::new("scribe=debug,tower_http=debug,info"),
        Err(_) => EnvFilter::new(default_level),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
