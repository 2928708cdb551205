//! Scribe Server — HTTP API and static frontend.
//!
//! This crate provides:
//! - **router**: the axum `Router` (API routes, static files, CORS, tracing) and `run`
//! - **handlers**: `POST /api/generate`, `POST /api/generate-email`, `GET /api/health`
//! - **error**: `ApiError` and its mapping to HTTP status codes and JSON bodies
//! - **state**: shared, immutable application state

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::{create_router, run};
pub use state::AppState;
