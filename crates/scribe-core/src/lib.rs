//! Scribe Core — shared types, prompt templates, and configuration.
//!
//! This crate contains:
//! - **types**: Request payloads, content types, provider kinds, and chat-completion wire types
//! - **prompt**: The instruction templates for each content type
//! - **config**: Configuration schema plus the file/env loader

pub mod config;
pub mod prompt;
pub mod types;
pub mod utils;

pub use config::Config;
pub use prompt::build_prompt;
pub use types::{ContentType, GenerationRequest, ProviderKind};
