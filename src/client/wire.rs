//! Wire types for the generative-language `generateContent` REST surface.
//!
//! Request structs serialize to the camelCase JSON the API expects;
//! response structs deserialize leniently — every field the pipeline does
//! not strictly need is optional or defaulted, because citation metadata
//! in particular varies in shape between service versions.

use base64::Engine as _;
use serde::{Deserialize, Serialize};

use super::Segment;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    /// Base64-encoded bytes.
    pub data: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: serde_json::Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub google_search: serde_json::Value,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

/// One citation entry. The service nests the usable part under `web`;
/// entries without it occur in practice and are dropped downstream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroundingChunk {
    #[serde(default)]
    pub web: Option<WebSource>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebSource {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl GenerateContentRequest {
    /// Schema-constrained request: ordered multimodal segments plus the
    /// declared output schema, asking for a JSON reply.
    pub fn structured(segments: &[Segment], schema: &serde_json::Value) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".into()),
                parts: segments.iter().map(Part::from_segment).collect(),
            }],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".into(),
                response_schema: schema.clone(),
            }),
            tools: None,
        }
    }

    /// Single-turn conversational request under a system persona.
    pub fn conversational(system: &str, message: &str) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".into()),
                parts: vec![Part::text(message)],
            }],
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part::text(system)],
            }),
            generation_config: None,
            tools: None,
        }
    }

    /// Query with the search tool enabled.
    pub fn grounded(query: &str) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".into()),
                parts: vec![Part::text(query)],
            }],
            system_instruction: None,
            generation_config: None,
            tools: Some(vec![Tool {
                google_search: serde_json::json!({}),
            }]),
        }
    }
}

impl Part {
    pub fn text(t: impl Into<String>) -> Self {
        Self {
            text: Some(t.into()),
            inline_data: None,
        }
    }

    fn from_segment(segment: &Segment) -> Self {
        match segment {
            Segment::Text(t) => Part::text(t.clone()),
            Segment::Image { mime_type, bytes } => Part {
                text: None,
                inline_data: Some(InlineData {
                    mime_type: mime_type.clone(),
                    data: base64::engine::general_purpose::STANDARD.encode(bytes),
                }),
            },
        }
    }
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts, or None when the
    /// reply carries no usable text.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let joined: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if joined.trim().is_empty() {
            None
        } else {
            Some(joined)
        }
    }

    /// Citation metadata of the first candidate, if any was attached.
    pub fn into_grounding_chunks(self) -> Vec<GroundingChunk> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.grounding_metadata)
            .map(|g| g.grounding_chunks)
            .unwrap_or_default()
    }
}
