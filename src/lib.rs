//! Coopvet advisory core — the AI pipeline behind a poultry healthcare
//! companion app.
//!
//! Three request/response orchestrators sit over a single remote
//! generative-service boundary:
//! - [`advisory::diagnostic`] — multimodal diagnostic screening with a
//!   structured-output contract
//! - [`advisory::session`] — ordered, single-flight conversational advice
//! - [`advisory::digest`] — search-grounded poultry health news with
//!   deduplicated citations
//!
//! None of these depend on UI state; callers own presentation, retry
//! policy, and persistence.

pub mod advisory;
pub mod client;
pub mod config;

pub use advisory::{
    AdvisoryError, AdvisorySession, ChatMessage, DiagnosticClient, DiagnosticRequest,
    DiagnosticResult, GroundedDigest, GroundingSource, ImageData, MessageRole, NewsDigest,
    Urgency, ValidatedDiagnosis,
};
pub use client::gemini::GeminiClient;
pub use client::{BackendError, GenerativeBackend, GroundedReply, Segment};

use tracing_subscriber::EnvFilter;

/// Initialize tracing for binaries embedding the advisory core.
/// Honors RUST_LOG, falling back to the crate default.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}
