//! The structured-output contract for diagnostic replies.
//!
//! One declarative schema constrains generation on the remote side and one
//! parse step validates what comes back; both are anchored to the same
//! [`DiagnosticResult`] shape so the two cannot drift apart.
//!
//! Validation policy (deliberate, see DESIGN.md): a `confidence` outside
//! [0, 1] is clamped and flagged rather than rejected; an unknown
//! `urgency`, a missing field, or a non-JSON payload rejects the whole
//! reply. The pipeline never invents a fallback diagnosis.

use serde_json::{json, Value};

use super::types::{DiagnosticResult, Urgency};
use super::AdvisoryError;

/// The schema attached to every structured diagnostic call.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "disease": { "type": "STRING" },
            "confidence": { "type": "NUMBER" },
            "symptoms": { "type": "ARRAY", "items": { "type": "STRING" } },
            "recommendedTreatments": { "type": "ARRAY", "items": { "type": "STRING" } },
            "urgency": {
                "type": "STRING",
                "enum": [
                    Urgency::Low.as_str(),
                    Urgency::Medium.as_str(),
                    Urgency::High.as_str(),
                    Urgency::Critical.as_str(),
                ]
            },
            "explanation": { "type": "STRING" }
        },
        "required": [
            "disease",
            "confidence",
            "symptoms",
            "recommendedTreatments",
            "urgency",
            "explanation"
        ]
    })
}

/// A reply that passed contract validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedDiagnosis {
    pub result: DiagnosticResult,
    /// True when the model reported a confidence outside [0, 1] and the
    /// value was clamped into range.
    pub confidence_clamped: bool,
}

/// Parse and validate the raw reply text of a structured diagnostic call.
pub fn parse_diagnostic_reply(raw: &str) -> Result<ValidatedDiagnosis, AdvisoryError> {
    let payload = strip_json_fence(raw);

    let mut result: DiagnosticResult = serde_json::from_str(payload)
        .map_err(|e| AdvisoryError::ContractViolation(e.to_string()))?;

    let mut confidence_clamped = false;
    if !(0.0..=1.0).contains(&result.confidence) {
        result.confidence = result.confidence.clamp(0.0, 1.0);
        confidence_clamped = true;
    }

    Ok(ValidatedDiagnosis {
        result,
        confidence_clamped,
    })
}

/// Schema-constrained replies arrive as bare JSON, but models occasionally
/// wrap output in a Markdown fence anyway. Strip it before parsing.
fn strip_json_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(after_open) = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
    else {
        return trimmed;
    };
    match after_open.find("```") {
        Some(end) => after_open[..end].trim(),
        None => after_open.trim(),
    }
}
