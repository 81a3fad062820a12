//! HTTP client for the generative-language REST API.

use std::time::Duration;

use async_trait::async_trait;

use super::wire::{GenerateContentRequest, GenerateContentResponse};
use super::{BackendError, GenerativeBackend, GroundedReply, Segment};
use crate::config;

/// Generative-language API client. One instance per process is enough;
/// it is cheap to clone and safe to share.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl GeminiClient {
    /// Create a client against an explicit endpoint. `base_url` may carry a
    /// trailing slash.
    pub fn new(base_url: &str, api_key: impl Into<String>, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
            timeout_secs,
        }
    }

    /// Production client: default endpoint, key from the environment.
    pub fn from_env() -> Result<Self, BackendError> {
        let api_key =
            config::api_key_from_env().ok_or(BackendError::MissingApiKey(config::API_KEY_ENV))?;
        Ok(Self::new(
            config::GEMINI_BASE_URL,
            api_key,
            config::REQUEST_TIMEOUT_SECS,
        ))
    }

    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, BackendError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    BackendError::Connection(self.base_url.clone())
                } else if e.is_timeout() {
                    BackendError::Timeout(self.timeout_secs)
                } else {
                    BackendError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| BackendError::ResponseParsing(e.to_string()))
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn structured(
        &self,
        model: &str,
        segments: &[Segment],
        schema: &serde_json::Value,
    ) -> Result<String, BackendError> {
        let request = GenerateContentRequest::structured(segments, schema);
        let response = self.generate(model, &request).await?;
        tracing::debug!(model = %model, segments = segments.len(), "structured completion done");
        response.text().ok_or(BackendError::EmptyReply)
    }

    async fn converse(
        &self,
        model: &str,
        system: &str,
        message: &str,
    ) -> Result<String, BackendError> {
        let request = GenerateContentRequest::conversational(system, message);
        let response = self.generate(model, &request).await?;
        tracing::debug!(model = %model, "conversational completion done");
        response.text().ok_or(BackendError::EmptyReply)
    }

    async fn grounded(&self, model: &str, query: &str) -> Result<GroundedReply, BackendError> {
        let request = GenerateContentRequest::grounded(query);
        let response = self.generate(model, &request).await?;
        let text = response.text().ok_or(BackendError::EmptyReply)?;
        let chunks = response.into_grounding_chunks();
        tracing::debug!(model = %model, chunks = chunks.len(), "grounded completion done");
        Ok(GroundedReply { text, chunks })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_loses_trailing_slash() {
        let client = GeminiClient::new("https://example.org/", "k", 30);
        assert_eq!(client.base_url, "https://example.org");
    }

    #[test]
    fn client_is_cloneable_for_sharing() {
        let client = GeminiClient::new("https://example.org", "k", 30);
        let clone = client.clone();
        assert_eq!(clone.timeout_secs, 30);
    }
}
