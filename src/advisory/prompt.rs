//! Diagnostic prompt assembly.
//!
//! Pure transform from a [`DiagnosticRequest`] to the ordered content
//! segments the structured completion call sends: instruction template,
//! symptom text (or a placeholder), then the image when one was uploaded.

use super::types::DiagnosticRequest;
use super::AdvisoryError;
use crate::client::Segment;

pub const DIAGNOSTIC_INSTRUCTION: &str = r#"You are an expert avian veterinarian specializing in poultry (chickens, ducks, turkeys and other domestic fowl). Analyze the described symptoms and/or the attached photo and produce a detailed diagnostic report.

Rules:
- Be scientific but accessible to a non-veterinarian flock keeper.
- If a specific disease is likely, name it explicitly.
- Recommend treatments from standard poultry medicine, mentioning generic drugs (such as Tylosin, Amoxicillin, Enrofloxacin) or vaccines where applicable.
- Rate the urgency of the situation.
- EXPLICITLY state that this report is AI-assisted and the keeper should consult a licensed local veterinarian."#;

/// Placeholder sent when the keeper described no symptoms in text.
pub const NO_SYMPTOMS_PLACEHOLDER: &str = "None provided";

/// Build the ordered segments for one diagnostic call.
///
/// Fails with `InvalidRequest` when the request carries neither symptom
/// text nor an image — there is nothing to diagnose and the remote call
/// would be wasted.
pub fn assemble_diagnostic(request: &DiagnosticRequest) -> Result<Vec<Segment>, AdvisoryError> {
    if request.is_empty() {
        return Err(AdvisoryError::InvalidRequest(
            "describe symptoms, attach a photo, or both".into(),
        ));
    }

    let symptoms = request
        .symptoms
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(NO_SYMPTOMS_PLACEHOLDER);

    let mut segments = vec![
        Segment::text(DIAGNOSTIC_INSTRUCTION),
        Segment::text(format!("Symptoms described: {symptoms}")),
    ];

    if let Some(image) = &request.image {
        segments.push(Segment::Image {
            mime_type: image.mime_type.clone(),
            bytes: image.bytes.clone(),
        });
    }

    Ok(segments)
}
