//! Diagnostic screening orchestrator: prompt assembly → structured remote
//! call → contract validation.

use super::contract;
use super::prompt;
use super::types::{DiagnosticRequest, DiagnosticResult};
use super::AdvisoryError;
use crate::client::GenerativeBackend;
use crate::config;

/// Stateless orchestrator over one backend. Independent `diagnose` calls
/// are safe to run concurrently.
pub struct DiagnosticClient<B: GenerativeBackend> {
    backend: B,
    model: String,
}

impl<B: GenerativeBackend> DiagnosticClient<B> {
    pub fn new(backend: B) -> Self {
        Self::with_model(backend, config::DIAGNOSTIC_MODEL)
    }

    pub fn with_model(backend: B, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
        }
    }

    /// Run one diagnostic screening.
    ///
    /// Returns either a fully valid [`DiagnosticResult`] or an error;
    /// never a partially populated report. An empty request fails before
    /// any remote call is issued.
    pub async fn diagnose(
        &self,
        request: &DiagnosticRequest,
    ) -> Result<DiagnosticResult, AdvisoryError> {
        let segments = prompt::assemble_diagnostic(request)?;
        let schema = contract::response_schema();

        let raw = self
            .backend
            .structured(&self.model, &segments, &schema)
            .await?;

        let validated = contract::parse_diagnostic_reply(&raw)?;
        if validated.confidence_clamped {
            tracing::warn!(
                disease = %validated.result.disease,
                "model reported confidence outside [0, 1] — clamped"
            );
        }
        tracing::info!(
            disease = %validated.result.disease,
            urgency = validated.result.urgency.as_str(),
            "diagnostic screening complete"
        );
        Ok(validated.result)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::advisory::types::Urgency;
    use crate::client::{BackendError, GroundedReply, Segment};

    /// Backend fake returning a scripted structured reply and counting
    /// calls.
    struct ScriptedBackend {
        reply: Result<String, ()>,
        calls: Arc<AtomicUsize>,
    }

    impl ScriptedBackend {
        fn replying(reply: &str) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    reply: Ok(reply.to_string()),
                    calls: calls.clone(),
                },
                calls,
            )
        }

        fn failing() -> Self {
            Self {
                reply: Err(()),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl crate::client::GenerativeBackend for ScriptedBackend {
        async fn structured(
            &self,
            _model: &str,
            _segments: &[Segment],
            _schema: &serde_json::Value,
        ) -> Result<String, BackendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply
                .clone()
                .map_err(|_| BackendError::Connection("https://example.org".into()))
        }

        async fn converse(
            &self,
            _model: &str,
            _system: &str,
            _message: &str,
        ) -> Result<String, BackendError> {
            unreachable!("diagnostic client never converses")
        }

        async fn grounded(&self, _model: &str, _query: &str) -> Result<GroundedReply, BackendError> {
            unreachable!("diagnostic client never runs grounded queries")
        }
    }

    const VALID_REPLY: &str = r#"{
        "disease": "Infectious Coryza",
        "confidence": 0.78,
        "symptoms": ["swollen face", "nasal discharge"],
        "recommendedTreatments": ["Enrofloxacin", "isolate affected birds"],
        "urgency": "Medium",
        "explanation": "Facial swelling with discharge points to A. paragallinarum."
    }"#;

    #[tokio::test]
    async fn valid_reply_becomes_a_typed_result() {
        let (backend, _) = ScriptedBackend::replying(VALID_REPLY);
        let client = DiagnosticClient::new(backend);

        let result = client
            .diagnose(&DiagnosticRequest::from_symptoms("swollen face"))
            .await
            .unwrap();

        assert_eq!(result.disease, "Infectious Coryza");
        assert_eq!(result.urgency, Urgency::Medium);
        assert!((0.0..=1.0).contains(&result.confidence));
    }

    #[tokio::test]
    async fn empty_request_fails_without_a_remote_call() {
        let (backend, calls) = ScriptedBackend::replying(VALID_REPLY);
        let client = DiagnosticClient::new(backend);

        let err = client.diagnose(&DiagnosticRequest::default()).await.unwrap_err();

        assert!(matches!(err, AdvisoryError::InvalidRequest(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn remote_failure_surfaces_as_remote_unavailable() {
        let client = DiagnosticClient::new(ScriptedBackend::failing());

        let err = client
            .diagnose(&DiagnosticRequest::from_symptoms("lethargy"))
            .await
            .unwrap_err();

        assert!(matches!(err, AdvisoryError::RemoteUnavailable(_)));
    }

    #[tokio::test]
    async fn malformed_reply_is_a_contract_violation_not_a_result() {
        let (backend, _) = ScriptedBackend::replying("The bird is probably fine.");
        let client = DiagnosticClient::new(backend);

        let err = client
            .diagnose(&DiagnosticRequest::from_symptoms("sneezing"))
            .await
            .unwrap_err();

        assert!(matches!(err, AdvisoryError::ContractViolation(_)));
    }

    #[tokio::test]
    async fn clamped_confidence_still_yields_an_in_range_result() {
        let reply = VALID_REPLY.replace("0.78", "1.4");
        let (backend, _) = ScriptedBackend::replying(&reply);
        let client = DiagnosticClient::new(backend);

        let result = client
            .diagnose(&DiagnosticRequest::from_symptoms("swollen face"))
            .await
            .unwrap();

        assert_eq!(result.confidence, 1.0);
    }
}
