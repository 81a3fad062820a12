use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AdvisoryError;

/// Caller input for one diagnostic screening. Either field alone is
/// enough; a fully empty request is rejected before any remote call.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticRequest {
    pub image: Option<ImageData>,
    pub symptoms: Option<String>,
}

impl DiagnosticRequest {
    pub fn from_symptoms(symptoms: impl Into<String>) -> Self {
        Self {
            image: None,
            symptoms: Some(symptoms.into()),
        }
    }

    /// True when neither an image nor non-blank symptom text is present.
    pub fn is_empty(&self) -> bool {
        self.image.is_none()
            && self
                .symptoms
                .as_deref()
                .map_or(true, |s| s.trim().is_empty())
    }
}

/// An uploaded photo, tagged with its media type.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageData {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Photo in the default upload format.
    pub fn jpeg(bytes: Vec<u8>) -> Self {
        Self::new(crate::config::DEFAULT_IMAGE_MIME, bytes)
    }
}

/// A validated diagnostic report. Field names round-trip with the wire
/// JSON the structured-output contract declares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticResult {
    pub disease: String,
    /// Always within [0, 1] once validated.
    pub confidence: f32,
    pub symptoms: Vec<String>,
    pub recommended_treatments: Vec<String>,
    pub urgency: Urgency,
    pub explanation: String,
}

/// How fast the keeper should act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Urgency {
    Low,
    Medium,
    High,
    Critical,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl std::str::FromStr for Urgency {
    type Err = AdvisoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Self::Low),
            "Medium" => Ok(Self::Medium),
            "High" => Ok(Self::High),
            "Critical" => Ok(Self::Critical),
            _ => Err(AdvisoryError::ContractViolation(format!(
                "unknown urgency rating: {s}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One transcript entry. Immutable once appended; owned by the session
/// that created it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: MessageRole,
    pub text: String,
    pub timestamp: NaiveDateTime,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self::with_role(MessageRole::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::with_role(MessageRole::Assistant, text)
    }

    fn with_role(role: MessageRole, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            text: text.into(),
            timestamp: Local::now().naive_local(),
        }
    }
}

/// A citation backing the news digest, unique by `uri`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroundingSource {
    pub uri: String,
    pub title: String,
}

/// Result of one grounded news fetch. Recomputed per call; the pipeline
/// never caches digests.
#[derive(Debug, Clone, Serialize)]
pub struct NewsDigest {
    pub narrative: String,
    /// Unique by uri, in order of first appearance.
    pub sources: Vec<GroundingSource>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn empty_request_detected() {
        assert!(DiagnosticRequest::default().is_empty());
        assert!(DiagnosticRequest::from_symptoms("   ").is_empty());
        assert!(!DiagnosticRequest::from_symptoms("lethargy").is_empty());

        let with_image = DiagnosticRequest {
            image: Some(ImageData::jpeg(vec![1, 2, 3])),
            symptoms: None,
        };
        assert!(!with_image.is_empty());
    }

    #[test]
    fn urgency_round_trips_through_strings() {
        for urgency in [
            Urgency::Low,
            Urgency::Medium,
            Urgency::High,
            Urgency::Critical,
        ] {
            assert_eq!(Urgency::from_str(urgency.as_str()).unwrap(), urgency);
        }
    }

    #[test]
    fn unknown_urgency_is_a_contract_violation() {
        let err = Urgency::from_str("Severe").unwrap_err();
        assert!(matches!(err, AdvisoryError::ContractViolation(_)));
    }

    #[test]
    fn urgency_serializes_as_the_bare_literal() {
        assert_eq!(
            serde_json::to_string(&Urgency::Critical).unwrap(),
            r#""Critical""#
        );
    }

    #[test]
    fn urgency_orders_low_to_critical() {
        assert!(Urgency::Low < Urgency::Medium);
        assert!(Urgency::High < Urgency::Critical);
    }

    #[test]
    fn chat_messages_carry_role_and_text() {
        let msg = ChatMessage::user("My hen stopped laying");
        assert_eq!(msg.role, MessageRole::User);
        assert_eq!(msg.text, "My hen stopped laying");

        let reply = ChatMessage::assistant("A few common causes...");
        assert_eq!(reply.role, MessageRole::Assistant);
    }

    #[test]
    fn default_image_is_jpeg() {
        let img = ImageData::jpeg(vec![0xFF]);
        assert_eq!(img.mime_type, "image/jpeg");
    }
}
