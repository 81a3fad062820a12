//! Search-grounded poultry health news digest.
//!
//! One fixed topical query with the search tool enabled; the reply's
//! citation metadata is normalized into a stable source list. Citation
//! entries are best-effort data: anything without a usable link is
//! dropped silently, and duplicates collapse onto the first appearance.

use std::collections::HashSet;

use super::types::{GroundingSource, NewsDigest};
use super::AdvisoryError;
use crate::client::wire::GroundingChunk;
use crate::client::GenerativeBackend;
use crate::config;

/// The fixed topical query behind every fetch.
pub const NEWS_QUERY: &str = "What are the latest poultry health trends, disease outbreaks, \
or medical breakthroughs globally for 2024 and 2025?";

pub struct GroundedDigest<B: GenerativeBackend> {
    backend: B,
    model: String,
}

impl<B: GenerativeBackend> GroundedDigest<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            model: config::NEWS_MODEL.to_string(),
        }
    }

    /// Fetch a fresh digest. Never cached here; never partially returned —
    /// a failed remote call yields `RemoteUnavailable` and nothing else.
    pub async fn fetch(&self) -> Result<NewsDigest, AdvisoryError> {
        let reply = self.backend.grounded(&self.model, NEWS_QUERY).await?;
        let total = reply.chunks.len();
        let sources = collect_sources(reply.chunks);
        tracing::info!(
            sources = sources.len(),
            dropped = total - sources.len(),
            "news digest fetched"
        );
        Ok(NewsDigest {
            narrative: reply.text,
            sources,
        })
    }
}

/// Normalize raw citation chunks: drop entries without a link, dedupe by
/// URI, keep first-appearance order. A missing title falls back to the
/// URI so every kept source stays displayable.
pub fn collect_sources(chunks: Vec<GroundingChunk>) -> Vec<GroundingSource> {
    let mut seen = HashSet::new();
    let mut sources = Vec::new();

    for chunk in chunks {
        let Some(web) = chunk.web else { continue };
        let Some(uri) = web.uri.filter(|u| !u.trim().is_empty()) else {
            continue;
        };
        if !seen.insert(uri.clone()) {
            continue;
        }
        let title = web
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| uri.clone());
        sources.push(GroundingSource { uri, title });
    }

    sources
}
