// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence service trait for server-side mockup records.

use async_trait::async_trait;

use crate::error::CopydeckError;
use crate::types::{RecordDraft, RecordFilter, ServerRecord};

/// The authoritative remote store of mockup records.
///
/// The reconciler only consumes [`list`](PersistenceService::list);
/// create/patch/delete are invoked by save actions above the core.
#[async_trait]
pub trait PersistenceService: Send + Sync + 'static {
    async fn list(&self, filter: &RecordFilter) -> Result<Vec<ServerRecord>, CopydeckError>;

    async fn create(&self, draft: &RecordDraft) -> Result<ServerRecord, CopydeckError>;

    async fn patch(&self, id: &str, draft: &RecordDraft) -> Result<ServerRecord, CopydeckError>;

    async fn delete(&self, id: &str) -> Result<(), CopydeckError>;
}
