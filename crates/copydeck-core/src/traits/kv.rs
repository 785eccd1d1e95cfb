// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable key-value storage trait.

use async_trait::async_trait;

use crate::error::CopydeckError;

/// Durable string-keyed storage, persistent across restarts within one
/// profile.
///
/// There are no transactional guarantees across keys; the cache layer
/// compensates by keeping an in-memory mirror and flushing whole blobs.
#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    /// Returns the stored value for `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<String>, CopydeckError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), CopydeckError>;

    /// Removes `key` if present.
    async fn remove(&self, key: &str) -> Result<(), CopydeckError>;
}
