// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the `/mockups` record store.
//!
//! Reads retry once on transient errors; writes are delivered at most once
//! since create is not idempotent.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::{debug, warn};

use copydeck_core::error::CopydeckError;
use copydeck_core::traits::PersistenceService;
use copydeck_core::types::{RecordDraft, RecordFilter, ServerRecord};

use crate::generation::is_transient_error;
use crate::types::{extract_record, extract_record_list, unwrap_data};

/// HTTP client for the mockup persistence API.
#[derive(Debug, Clone)]
pub struct MockupClient {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl MockupClient {
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
            .map_err(|e| CopydeckError::Persistence {
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

    /// Fetches a record's exported JSON snapshot from `/mockups/{id}/json`,
    /// unwrapping a `{data: ...}` envelope when present.
    pub async fn payload(&self, id: &str) -> Result<Value, CopydeckError> {
        let url = format!("{}/mockups/{id}/json", self.base_url);
        let payload: Value = self.get_with_retry(&url).await?;
        Ok(unwrap_data(payload))
    }

    async fn get_with_retry(&self, url: &str) -> Result<Value, CopydeckError> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, url, "retrying request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response =
                self.client
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| CopydeckError::Persistence {
                        message: format!("HTTP request failed: {e}"),
                        source: Some(Box::new(e)),
                    })?;

            let status = response.status();
            debug!(status = %status, attempt, url, "response received");

            if status.is_success() {
                return response.json().await.map_err(|e| CopydeckError::Persistence {
                    message: format!("failed to read response body: {e}"),
                    source: Some(Box::new(e)),
                });
            }

            if is_transient_error(status) && attempt < self.max_retries {
                last_error = Some(CopydeckError::Persistence {
                    message: format!("API returned {status}"),
                    source: None,
                });
                continue;
            }

            let body = response.text().await.unwrap_or_default();
            return Err(CopydeckError::Persistence {
                message: format!("API returned {status}: {body}"),
                source: None,
            });
        }

        Err(last_error.unwrap_or_else(|| CopydeckError::Persistence {
            message: "request failed after retries".to_string(),
            source: None,
        }))
    }

    async fn send_write(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Value, CopydeckError> {
        let response = request.send().await.map_err(|e| CopydeckError::Persistence {
            message: format!("HTTP request failed: {e}"),
            source: Some(Box::new(e)),
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CopydeckError::Persistence {
                message: format!("API returned {status}: {body}"),
                source: None,
            });
        }

        response.json().await.map_err(|e| CopydeckError::Persistence {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

#[async_trait]
impl PersistenceService for MockupClient {
    /// Lists records matching the filter via `GET /mockups`.
    async fn list(&self, filter: &RecordFilter) -> Result<Vec<ServerRecord>, CopydeckError> {
        let mut url = format!("{}/mockups", self.base_url);
        let mut params = Vec::new();
        if let Some(briefing_id) = filter.briefing_id.as_deref().filter(|b| !b.is_empty()) {
            params.push(format!("briefing_id={briefing_id}"));
        }
        if let Some(client_id) = filter.client_id.as_deref().filter(|c| !c.is_empty()) {
            params.push(format!("client_id={client_id}"));
        }
        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.join("&"));
        }

        let payload = self.get_with_retry(&url).await?;
        Ok(extract_record_list(&payload))
    }

    async fn create(&self, draft: &RecordDraft) -> Result<ServerRecord, CopydeckError> {
        let url = format!("{}/mockups", self.base_url);
        let payload = self.send_write(self.client.post(&url).json(draft)).await?;
        extract_record(&payload).ok_or_else(|| CopydeckError::Persistence {
            message: "create response carried no record".to_string(),
            source: None,
        })
    }

    async fn patch(&self, id: &str, draft: &RecordDraft) -> Result<ServerRecord, CopydeckError> {
        let url = format!("{}/mockups/{id}", self.base_url);
        let payload = self.send_write(self.client.patch(&url).json(draft)).await?;
        extract_record(&payload).ok_or_else(|| CopydeckError::Persistence {
            message: "patch response carried no record".to_string(),
            source: None,
        })
    }

    async fn delete(&self, id: &str) -> Result<(), CopydeckError> {
        let url = format!("{}/mockups/{id}", self.base_url);
        let response =
            self.client
                .delete(&url)
                .send()
                .await
                .map_err(|e| CopydeckError::Persistence {
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CopydeckError::Persistence {
                message: format!("API returned {status}: {body}"),
                source: None,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> MockupClient {
        MockupClient::new("http://unused", 5)
            .unwrap()
            .with_base_url(base_url.to_string())
    }

    fn draft() -> RecordDraft {
        RecordDraft {
            platform: "Instagram".to_string(),
            format: "Feed".to_string(),
            production_type: None,
            status: Some("draft".to_string()),
            title: Some("Instagram • Feed".to_string()),
            metadata: json!({"copy": "hello"}),
        }
    }

    #[tokio::test]
    async fn list_passes_filter_as_query_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/mockups"))
            .and(query_param("briefing_id", "b1"))
            .and(query_param("client_id", "acme"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"id": "r1", "platform": "Instagram", "format": "Feed"}]
            })))
            .mount(&server)
            .await;

        let records = test_client(&server.uri())
            .list(&RecordFilter {
                briefing_id: Some("b1".to_string()),
                client_id: Some("acme".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "r1");
    }

    #[tokio::test]
    async fn list_retries_once_on_503() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/mockups"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/mockups"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let records = test_client(&server.uri())
            .list(&RecordFilter::default())
            .await
            .unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn create_round_trips_the_draft() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/mockups"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "data": {"id": "srv1", "platform": "Instagram", "format": "Feed", "status": "draft"}
            })))
            .mount(&server)
            .await;

        let record = test_client(&server.uri()).create(&draft()).await.unwrap();
        assert_eq!(record.id, "srv1");
        assert_eq!(record.status.as_deref(), Some("draft"));
    }

    #[tokio::test]
    async fn patch_targets_the_record_id() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/mockups/srv1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "srv1", "platform": "Instagram", "format": "Feed", "status": "saved"
            })))
            .mount(&server)
            .await;

        let record = test_client(&server.uri())
            .patch("srv1", &draft())
            .await
            .unwrap();
        assert_eq!(record.status.as_deref(), Some("saved"));
    }

    #[tokio::test]
    async fn delete_succeeds_on_2xx() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/mockups/srv1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        assert!(test_client(&server.uri()).delete("srv1").await.is_ok());
    }

    #[tokio::test]
    async fn payload_unwraps_data_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/mockups/srv1/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"copy": "from snapshot"}
            })))
            .mount(&server)
            .await;

        let payload = test_client(&server.uri()).payload("srv1").await.unwrap();
        assert_eq!(payload["copy"], "from snapshot");
    }
}
