//! The conversational advisory session.
//!
//! A session owns an ordered, append-only transcript and a fixed persona,
//! and serializes remote calls: at most one reply may be pending at a
//! time. A second `send` while one is in flight would otherwise let the
//! answers append out of order, so it is rejected outright rather than
//! queued.
//!
//! The remote service keeps its own multi-turn state, but the local
//! transcript is the single source of truth for display: each call
//! carries the persona plus the latest user message only.

use std::sync::Mutex;

use super::types::ChatMessage;
use super::AdvisoryError;
use crate::client::GenerativeBackend;
use crate::config;

/// The advisor's fixed system persona, set once at session creation.
pub const ADVISOR_PERSONA: &str = "You are Dr. Cluck, a world-class avian healthcare AI assistant. \
You specialize in poultry pathology, pharmacology, and farm management. You provide precise, \
helpful, and compassionate medical advice for poultry farmers. Always mention bio-security \
measures and appropriate drug withdrawal periods if applicable.";

pub struct AdvisorySession<B: GenerativeBackend> {
    backend: B,
    model: String,
    persona: String,
    transcript: Mutex<Vec<ChatMessage>>,
    /// Single-flight guard: held for the whole remote round trip.
    in_flight: tokio::sync::Mutex<()>,
}

impl<B: GenerativeBackend> AdvisorySession<B> {
    pub fn new(backend: B) -> Self {
        Self::with_persona(backend, ADVISOR_PERSONA)
    }

    pub fn with_persona(backend: B, persona: impl Into<String>) -> Self {
        Self {
            backend,
            model: config::ADVISORY_MODEL.to_string(),
            persona: persona.into(),
            transcript: Mutex::new(Vec::new()),
            in_flight: tokio::sync::Mutex::new(()),
        }
    }

    pub fn persona(&self) -> &str {
        &self.persona
    }

    /// Send one user message and await the assistant's reply.
    ///
    /// Only valid while idle; fails with `SessionBusy` (leaving the
    /// transcript untouched) when a reply is already pending. On remote
    /// failure the appended user message stays in the transcript, visibly
    /// unanswered, and the session returns to idle — the next `send` works
    /// normally.
    pub async fn send(&self, text: &str) -> Result<ChatMessage, AdvisoryError> {
        let _guard = self
            .in_flight
            .try_lock()
            .map_err(|_| AdvisoryError::SessionBusy)?;

        self.transcript_guard().push(ChatMessage::user(text));

        let reply = self
            .backend
            .converse(&self.model, &self.persona, text)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "advisory call failed; user message kept");
                AdvisoryError::from(e)
            })?;

        let message = ChatMessage::assistant(reply);
        self.transcript_guard().push(message.clone());
        Ok(message)
    }

    /// Read-only snapshot of the transcript, in append order.
    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.transcript_guard().clone()
    }

    fn transcript_guard(&self) -> std::sync::MutexGuard<'_, Vec<ChatMessage>> {
        // A poisoned transcript is still the authoritative transcript.
        self.transcript
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
