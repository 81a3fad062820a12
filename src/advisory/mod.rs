//! The AI advisory pipeline: diagnostic screening, conversational advice,
//! and the grounded news digest.
//!
//! Every operation here is one remote round trip with typed results; none
//! of them retries, caches, or persists. Errors always surface to the
//! caller — a malformed diagnosis is never substituted with a fallback.

pub mod contract;
pub mod diagnostic;
pub mod digest;
pub mod prompt;
pub mod session;
pub mod types;

pub use contract::ValidatedDiagnosis;
pub use diagnostic::DiagnosticClient;
pub use digest::GroundedDigest;
pub use session::AdvisorySession;
pub use types::{
    ChatMessage, DiagnosticRequest, DiagnosticResult, GroundingSource, ImageData, MessageRole,
    NewsDigest, Urgency,
};

use thiserror::Error;

use crate::client::BackendError;

#[derive(Error, Debug)]
pub enum AdvisoryError {
    /// The caller gave insufficient input. Not retryable without new input.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Network or service failure. Safe to retry; the pipeline itself
    /// never does.
    #[error("generative service unavailable: {0}")]
    RemoteUnavailable(String),

    /// The service answered, but the structured content violates the
    /// declared contract. Replaying the same request will not help.
    #[error("response violates the diagnostic contract: {0}")]
    ContractViolation(String),

    /// A reply is already pending on this session. Wait for it before
    /// sending again.
    #[error("session busy: a reply is already pending")]
    SessionBusy,
}

impl From<BackendError> for AdvisoryError {
    fn from(e: BackendError) -> Self {
        // Every transport-level failure, including an unparseable response
        // envelope, counts as the service being unavailable. Contract
        // violations are only raised on well-formed transport replies.
        AdvisoryError::RemoteUnavailable(e.to_string())
    }
}
