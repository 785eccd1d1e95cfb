// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock generation service with pre-configured outputs.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use copydeck_core::types::{CopyVersion, GenerationRequest};
use copydeck_core::{CopydeckError, GenerationService};

/// A `GenerationService` that returns pre-configured raw outputs.
///
/// Outputs are popped from a FIFO queue; an empty queue yields a default
/// numbered-list text. Requests are captured for assertions.
pub struct MockGeneration {
    outputs: Arc<Mutex<VecDeque<String>>>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl MockGeneration {
    pub fn new() -> Self {
        Self {
            outputs: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_outputs(outputs: Vec<String>) -> Self {
        Self {
            outputs: Arc::new(Mutex::new(VecDeque::from(outputs))),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn push_output(&self, text: impl Into<String>) {
        self.outputs.lock().await.push_back(text.into());
    }

    /// Requests seen so far, oldest first.
    pub async fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().await.clone()
    }
}

impl Default for MockGeneration {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationService for MockGeneration {
    async fn generate(&self, request: &GenerationRequest) -> Result<CopyVersion, CopydeckError> {
        self.requests.lock().await.push(request.clone());
        let output = self
            .outputs
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| "1. mock option one\n2. mock option two".to_string());
        Ok(CopyVersion {
            id: Uuid::new_v4().to_string(),
            output,
            model: Some("mock-model".to_string()),
            payload: Some(serde_json::json!({"provider": "mock", "tier": "test"})),
            created_at: Some(chrono::Utc::now()),
        })
    }
}
