//! Text-generation provider layer for Scribe.
//!
//! # Architecture
//!
//! - [`traits::TextProvider`] — trait both providers implement
//! - [`huggingface::HuggingFaceProvider`] — inference API with sequential model fallback
//! - [`groq::GroqProvider`] — single-shot OpenAI-compatible chat completion
//! - [`factory::create_provider`] — picks the implementation from [`scribe_core::Config`]

pub mod error;
pub mod factory;
pub mod groq;
pub mod huggingface;
pub mod traits;

// Re-export main types for convenience
pub use error::{AttemptError, GenerationError};
pub use factory::create_provider;
pub use groq::GroqProvider;
pub use huggingface::HuggingFaceProvider;
pub use traits::{Generation, TextProvider};
