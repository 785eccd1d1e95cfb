// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the copy generation endpoint.
//!
//! Assembles the instruction block from the request's slot and client
//! context, posts it to the briefing's copy route, and retries once on
//! transient errors (429, 500, 503).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::json;
use tracing::{debug, warn};

use copydeck_core::error::CopydeckError;
use copydeck_core::traits::GenerationService;
use copydeck_core::types::{CopyVersion, GenerationRequest};

use crate::types::extract_copy_version;

/// HTTP client for the generation API.
///
/// Cheap to clone; the inner reqwest client pools connections.
#[derive(Debug, Clone)]
pub struct GenerationClient {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl GenerationClient {
    /// Creates a client against `base_url` (e.g. `http://localhost:3333/api`).
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, CopydeckError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "content-type",
            HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| CopydeckError::Generation {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_retries: 1,
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }
}

/// Builds the instruction block sent with a generation request.
///
/// Blank lines are dropped, so optional context simply disappears instead
/// of producing `Client: ` noise.
pub fn build_instructions(request: &GenerationRequest) -> String {
    let mut lines: Vec<String> = Vec::new();

    if let Some(client) = &request.client {
        if !client.name.is_empty() {
            lines.push(format!("Client: {}", client.name));
        }
        if let Some(segment) = client.segment.as_deref().filter(|s| !s.is_empty()) {
            lines.push(format!("Segment: {segment}"));
        }
    }

    let format = non_empty_or(&request.slot.format, "not specified");
    let platform = non_empty_or(&request.slot.platform, "not specified");
    lines.push(format!("Selected format: {format}"));
    lines.push(format!("Platform: {platform}"));
    if let Some(production_type) = request
        .slot
        .production_type
        .as_deref()
        .filter(|p| !p.is_empty())
    {
        lines.push(format!("Production type: {production_type}"));
    }
    if let Some(tone) = request.tone.as_deref().filter(|t| !t.is_empty()) {
        lines.push(format!("Tone of voice: {tone}"));
    }
    lines.push("Return numbered, separated options.".to_string());

    lines.extend(format_guidelines(&request.slot.format));

    if let Some(extra) = request
        .extra_instructions
        .as_deref()
        .filter(|e| !e.trim().is_empty())
    {
        lines.push(extra.to_string());
    }

    lines.join("\n")
}

/// Extra guidance keyed off the format family.
fn format_guidelines(format: &str) -> Vec<String> {
    let lower = format.to_lowercase();
    let mut guidelines = Vec::new();
    if lower.contains("radio") || lower.contains("spot") {
        guidelines.push(
            "Radio format: write a short script with estimated timing and natural speech."
                .to_string(),
        );
    }
    if lower.contains("tv") || lower.contains("video") {
        guidelines.push(
            "Audiovisual format: include scene directions and voice-over notes where relevant."
                .to_string(),
        );
    }
    if lower.contains("outdoor") || lower.contains("ooh") || lower.contains("busdoor") {
        guidelines.push("OOH: short, direct copy readable at a distance.".to_string());
    }
    guidelines
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}

#[async_trait]
impl GenerationService for GenerationClient {
    /// Posts the request to `/briefings/{id}/copy` and returns the new
    /// copy version. Retries once after one second on 429, 500 and 503.
    async fn generate(&self, request: &GenerationRequest) -> Result<CopyVersion, CopydeckError> {
        let briefing_id = request
            .briefing_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| CopydeckError::Generation {
                message: "generation requires a briefing_id".to_string(),
                source: None,
            })?;

        let url = format!("{}/briefings/{briefing_id}/copy", self.base_url);
        let body = json!({
            "count": request.count,
            "pipeline": request.pipeline,
            "task_type": request.task_type,
            "force_provider": request.force_provider,
            "instructions": build_instructions(request),
            "metadata": {
                "format": request.slot.format,
                "platform": request.slot.platform,
                "production_type": request.slot.production_type,
                "client_id": request.client.as_ref().map(|c| c.id.clone()),
                "client_name": request.client.as_ref().map(|c| c.name.clone()),
                "tone": request.tone,
                "task_type": request.task_type,
                "pipeline": request.pipeline,
                "provider": request.force_provider,
            },
        });

        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying generation request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(&url)
                .json(&body)
                .send()
                .await
                .map_err(|e| CopydeckError::Generation {
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

            let status = response.status();
            debug!(status = %status, attempt, "generation response received");

            if status.is_success() {
                let payload: serde_json::Value =
                    response.json().await.map_err(|e| CopydeckError::Generation {
                        message: format!("failed to read generation response: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                return extract_copy_version(&payload).ok_or_else(|| CopydeckError::Generation {
                    message: "generation response carried no copy version".to_string(),
                    source: None,
                });
            }

            if is_transient_error(status) && attempt < self.max_retries {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(CopydeckError::Generation {
                    message: format!("API returned {status}: {body}"),
                    source: None,
                });
                continue;
            }

            let body = response.text().await.unwrap_or_default();
            return Err(CopydeckError::Generation {
                message: format!("API returned {status}: {body}"),
                source: None,
            });
        }

        Err(last_error.unwrap_or_else(|| CopydeckError::Generation {
            message: "generation request failed after retries".to_string(),
            source: None,
        }))
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
pub(crate) fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}

#[cfg(test)]
mod tests {
    use super::*;
    use copydeck_core::types::{ClientRef, FormatSelection};
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_request() -> GenerationRequest {
        GenerationRequest {
            briefing_id: Some("b1".to_string()),
            slot: FormatSelection::new("Instagram", "Feed"),
            client: Some(ClientRef {
                id: "acme".to_string(),
                name: "Acme".to_string(),
                segment: Some("Retail".to_string()),
            }),
            tone: Some("playful".to_string()),
            extra_instructions: None,
            count: 3,
            pipeline: "standard".to_string(),
            task_type: "social_post".to_string(),
            force_provider: None,
        }
    }

    fn test_client(base_url: &str) -> GenerationClient {
        GenerationClient::new("http://unused", 5)
            .unwrap()
            .with_base_url(base_url.to_string())
    }

    #[test]
    fn instructions_include_all_context_lines() {
        let instructions = build_instructions(&test_request());
        assert!(instructions.contains("Client: Acme"));
        assert!(instructions.contains("Segment: Retail"));
        assert!(instructions.contains("Selected format: Feed"));
        assert!(instructions.contains("Platform: Instagram"));
        assert!(instructions.contains("Tone of voice: playful"));
        assert!(instructions.contains("Return numbered, separated options."));
    }

    #[test]
    fn instructions_omit_absent_context() {
        let mut request = test_request();
        request.client = None;
        request.tone = None;
        let instructions = build_instructions(&request);
        assert!(!instructions.contains("Client:"));
        assert!(!instructions.contains("Tone of voice:"));
        assert!(!instructions.contains("\n\n"), "no blank lines: {instructions}");
    }

    #[test]
    fn format_family_guidelines_are_appended() {
        let mut request = test_request();
        request.slot = FormatSelection::new("OOH", "Busdoor");
        let instructions = build_instructions(&request);
        assert!(instructions.contains("readable at a distance"));

        request.slot = FormatSelection::new("Radio", "Spot 30s");
        let instructions = build_instructions(&request);
        assert!(instructions.contains("Radio format"));
    }

    #[tokio::test]
    async fn generate_posts_to_briefing_route() {
        let server = MockServer::start().await;
        let response = serde_json::json!({
            "success": true,
            "data": {"copy": {"id": "c1", "output": "1. first\n2. second"}}
        });

        Mock::given(method("POST"))
            .and(path("/briefings/b1/copy"))
            .and(body_partial_json(serde_json::json!({
                "count": 3,
                "pipeline": "standard",
                "task_type": "social_post",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response))
            .mount(&server)
            .await;

        let version = test_client(&server.uri())
            .generate(&test_request())
            .await
            .unwrap();
        assert_eq!(version.id, "c1");
        assert!(version.output.starts_with("1."));
    }

    #[tokio::test]
    async fn generate_retries_once_on_429() {
        let server = MockServer::start().await;
        let success = serde_json::json!({
            "data": {"copy": {"id": "c2", "output": "after retry"}}
        });

        Mock::given(method("POST"))
            .and(path("/briefings/b1/copy"))
            .respond_with(ResponseTemplate::new(429))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/briefings/b1/copy"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&success))
            .mount(&server)
            .await;

        let version = test_client(&server.uri())
            .generate(&test_request())
            .await
            .unwrap();
        assert_eq!(version.id, "c2");
    }

    #[tokio::test]
    async fn generate_fails_fast_on_400() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
            .expect(1)
            .mount(&server)
            .await;

        let result = test_client(&server.uri()).generate(&test_request()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn generate_requires_briefing_id() {
        let mut request = test_request();
        request.briefing_id = None;
        let result = test_client("http://localhost:1").generate(&request).await;
        assert!(result.is_err());
    }
}
