//! Remote generative-service boundary.
//!
//! The advisory pipeline only ever talks to one external collaborator: a
//! generative-completion service, invoked three ways (structured,
//! conversational, search-grounded). [`GenerativeBackend`] is that seam;
//! [`gemini::GeminiClient`] is the production implementation and tests
//! substitute in-memory fakes.

pub mod gemini;
pub mod wire;

use async_trait::async_trait;
use thiserror::Error;

use self::wire::GroundingChunk;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("cannot reach generative service at {0}")]
    Connection(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("service returned error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("response parsing error: {0}")]
    ResponseParsing(String),

    #[error("model returned an empty reply")]
    EmptyReply,

    #[error("no API key found in {0}")]
    MissingApiKey(&'static str),
}

/// One ordered piece of multimodal request content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Image { mime_type: String, bytes: Vec<u8> },
}

impl Segment {
    pub fn text(t: impl Into<String>) -> Self {
        Self::Text(t.into())
    }
}

/// Reply from a search-grounded completion: narrative text plus whatever
/// citation metadata the service attached. The chunks are best-effort and
/// may be empty or partially unusable.
#[derive(Debug, Default)]
pub struct GroundedReply {
    pub text: String,
    pub chunks: Vec<GroundingChunk>,
}

/// The three invocation shapes the advisory pipeline needs from a
/// generative service. Transport, authentication, and retry policy live
/// behind this trait, never in front of it.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Completion constrained by a declared output schema. Returns the raw
    /// reply text, expected (but not guaranteed) to be JSON matching the
    /// schema.
    async fn structured(
        &self,
        model: &str,
        segments: &[Segment],
        schema: &serde_json::Value,
    ) -> Result<String, BackendError>;

    /// Conversational completion under a fixed system persona.
    async fn converse(
        &self,
        model: &str,
        system: &str,
        message: &str,
    ) -> Result<String, BackendError>;

    /// Completion with the search tool enabled, returning citation
    /// metadata alongside the narrative.
    async fn grounded(&self, model: &str, query: &str) -> Result<GroundedReply, BackendError>;
}
