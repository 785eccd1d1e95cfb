// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared command context: storage, cache, HTTP clients.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use copydeck_cache::CopyCache;
use copydeck_client::{GenerationClient, MockupClient, SequenceGuard};
use copydeck_config::CopydeckConfig;
use copydeck_core::error::CopydeckError;
use copydeck_core::KeyValueStore;
use copydeck_storage::SqliteKvStore;

/// Everything a subcommand needs, wired once at startup.
pub struct App {
    pub config: CopydeckConfig,
    pub cache: Arc<CopyCache>,
    pub mockups: MockupClient,
    pub generation: GenerationClient,
    pub sequence: SequenceGuard,
    store: Arc<SqliteKvStore>,
    flusher: tokio::task::JoinHandle<()>,
}

impl App {
    /// Opens storage, loads the cache mirror and builds the HTTP clients.
    pub async fn init(config: CopydeckConfig) -> Result<Self, CopydeckError> {
        let store = Arc::new(SqliteKvStore::open(&config.storage.path).await?);
        let cache = Arc::new(CopyCache::load(store.clone() as Arc<dyn KeyValueStore>).await?);
        let flusher =
            cache.spawn_flusher(Duration::from_millis(config.storage.flush_debounce_ms));
        debug!(path = %config.storage.path, "storage opened");

        let mockups = MockupClient::new(&config.api.base_url, config.api.timeout_secs)?;
        let generation = GenerationClient::new(&config.api.base_url, config.api.timeout_secs)?;

        Ok(Self {
            config,
            cache,
            mockups,
            generation,
            sequence: SequenceGuard::new(),
            store,
            flusher,
        })
    }

    /// Flushes pending cache state and closes storage.
    pub async fn shutdown(self) -> Result<(), CopydeckError> {
        self.flusher.abort();
        self.cache.flush().await?;
        self.store.close().await?;
        Ok(())
    }
}
