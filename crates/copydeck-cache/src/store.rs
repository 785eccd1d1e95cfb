// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The keyed cache store.
//!
//! All reads and writes go through an in-memory mirror guarded by one
//! mutex; the durable store only sees whole-blob flushes. This removes the
//! read-whole-blob/write-whole-blob race where two interleaved writers to
//! different keys could drop each other's changes.
//!
//! A logical generation update (copy text + parsed options + metadata) is
//! written under a single lock acquisition, so a reader never observes copy
//! text paired with another generation's options or metadata.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::sync::Notify;
use tracing::{debug, warn};

use copydeck_core::types::{AssetKey, CopyMeta, FormatSelection, LocalAsset, ParsedOption};
use copydeck_core::{CopydeckError, KeyValueStore};

use crate::keys;

/// Parse a stored JSON blob, returning the typed fallback on anything
/// malformed. Corrupt cache data is a cache miss, never an error.
pub fn safe_parse<T: DeserializeOwned>(raw: Option<&str>, fallback: T) -> T {
    match raw {
        Some(raw) => serde_json::from_str(raw).unwrap_or(fallback),
        None => fallback,
    }
}

#[derive(Debug, Default)]
struct CacheState {
    copy: HashMap<String, String>,
    options: HashMap<String, Vec<ParsedOption>>,
    meta: HashMap<String, CopyMeta>,
    assets: Vec<LocalAsset>,
    inventory: Vec<FormatSelection>,
    /// Bumped on every mirror write.
    version: u64,
    /// The version the durable store is known to hold in full.
    flushed: u64,
}

/// Persistent keyed cache for copy text, parsed options, generation
/// metadata, the last reconciled asset list, and the current inventory.
pub struct CopyCache {
    store: Arc<dyn KeyValueStore>,
    state: Mutex<CacheState>,
    changed: Notify,
}

impl CopyCache {
    /// Loads the mirror from the durable store. Corrupt blobs fall back to
    /// empty maps; only store access itself can fail.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Result<Self, CopydeckError> {
        let copy = safe_parse(store.get(keys::COPY_BLOB).await?.as_deref(), HashMap::new());
        let options = safe_parse(
            store.get(keys::OPTIONS_BLOB).await?.as_deref(),
            HashMap::new(),
        );
        let meta = safe_parse(store.get(keys::META_BLOB).await?.as_deref(), HashMap::new());
        let assets = safe_parse(store.get(keys::ASSETS_BLOB).await?.as_deref(), Vec::new());
        let inventory = safe_parse(
            store.get(keys::INVENTORY_BLOB).await?.as_deref(),
            Vec::new(),
        );
        debug!(
            copy_entries = copy.len(),
            option_entries = options.len(),
            assets = assets.len(),
            "cache mirror loaded"
        );
        Ok(Self {
            store,
            state: Mutex::new(CacheState {
                copy,
                options,
                meta,
                assets,
                inventory,
                version: 0,
                flushed: 0,
            }),
            changed: Notify::new(),
        })
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        // The mirror mutex is never held across an await point.
        self.state.lock().expect("cache mirror poisoned")
    }

    // --- reads (scoped key first, unscoped fallback, typed default) ---

    /// Cached copy text for a key, or empty string.
    pub fn copy_for(&self, key: &AssetKey, client_id: Option<&str>) -> String {
        let state = self.lock();
        keys::lookup_scoped(&state.copy, key, client_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Cached parsed options for a key, or an empty list.
    pub fn options_for(&self, key: &AssetKey, client_id: Option<&str>) -> Vec<ParsedOption> {
        let state = self.lock();
        keys::lookup_scoped(&state.options, key, client_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Cached generation metadata for a key, if any.
    pub fn meta_for(&self, key: &AssetKey, client_id: Option<&str>) -> Option<CopyMeta> {
        let state = self.lock();
        keys::lookup_scoped(&state.meta, key, client_id).cloned()
    }

    /// Whether a non-blank copy entry exists for this key.
    pub fn has_copy(&self, key: &AssetKey, client_id: Option<&str>) -> bool {
        let state = self.lock();
        keys::lookup_scoped(&state.copy, key, client_id)
            .is_some_and(|text| !text.trim().is_empty())
    }

    /// The last reconciled asset list.
    pub fn assets(&self) -> Vec<LocalAsset> {
        self.lock().assets.clone()
    }

    /// The current format inventory.
    pub fn inventory(&self) -> Vec<FormatSelection> {
        self.lock().inventory.clone()
    }

    // --- writes (mirror + version bump + flush nudge) ---

    /// Stores copy text for a key.
    pub fn set_copy(&self, key: &AssetKey, client_id: Option<&str>, text: &str) {
        {
            let mut state = self.lock();
            state.copy.insert(keys::write_key(key, client_id), text.to_string());
            state.version += 1;
        }
        self.changed.notify_one();
    }

    /// Stores copy text under the unscoped key only when no entry exists.
    ///
    /// This is the reconciler's server-metadata path: server data must
    /// never silently overwrite a newer local edit. Returns whether the
    /// write happened.
    pub fn set_copy_if_absent(&self, key: &AssetKey, text: &str) -> bool {
        let written = {
            let mut state = self.lock();
            if state.copy.contains_key(key.as_str()) {
                false
            } else {
                state.copy.insert(key.as_str().to_string(), text.to_string());
                state.version += 1;
                true
            }
        };
        if written {
            self.changed.notify_one();
        }
        written
    }

    /// Records one complete generation result: copy text, its parsed
    /// options, and its metadata, atomically with respect to readers.
    pub fn record_generation(
        &self,
        key: &AssetKey,
        client_id: Option<&str>,
        text: &str,
        options: Vec<ParsedOption>,
        meta: CopyMeta,
    ) {
        {
            let mut state = self.lock();
            let entry_key = keys::write_key(key, client_id);
            state.copy.insert(entry_key.clone(), text.to_string());
            state.options.insert(entry_key.clone(), options);
            state.meta.insert(entry_key, meta);
            state.version += 1;
        }
        self.changed.notify_one();
    }

    /// Replaces the reconciled asset list.
    pub fn set_assets(&self, assets: Vec<LocalAsset>) {
        {
            let mut state = self.lock();
            state.assets = assets;
            state.version += 1;
        }
        self.changed.notify_one();
    }

    /// Replaces the current inventory.
    pub fn set_inventory(&self, inventory: Vec<FormatSelection>) {
        {
            let mut state = self.lock();
            state.inventory = inventory;
            state.version += 1;
        }
        self.changed.notify_one();
    }

    // --- persistence ---

    /// Writes the mirror to the durable store if anything changed.
    ///
    /// Serialization happens under the lock; store writes happen outside
    /// it. The flushed watermark only advances after every blob write
    /// succeeds, so a failed or cancelled flush leaves the whole version
    /// pending and the next flush rewrites all five blobs. The store is
    /// never left permanently torn across blobs.
    pub async fn flush(&self) -> Result<(), CopydeckError> {
        let (blobs, seen) = {
            let state = self.lock();
            if state.version == state.flushed {
                return Ok(());
            }
            let blobs = [
                (keys::COPY_BLOB, to_json(&state.copy)?),
                (keys::OPTIONS_BLOB, to_json(&state.options)?),
                (keys::META_BLOB, to_json(&state.meta)?),
                (keys::ASSETS_BLOB, to_json(&state.assets)?),
                (keys::INVENTORY_BLOB, to_json(&state.inventory)?),
            ];
            (blobs, state.version)
        };
        for (blob_key, blob) in blobs {
            self.store.set(blob_key, &blob).await?;
        }
        let mut state = self.lock();
        if state.flushed < seen {
            state.flushed = seen;
        }
        debug!("cache flushed");
        Ok(())
    }

    /// Spawns the debounced flusher: waits for a change, sleeps out the
    /// debounce window, then flushes. Failed flushes are logged and
    /// retried on the next change.
    pub fn spawn_flusher(self: &Arc<Self>, debounce: Duration) -> tokio::task::JoinHandle<()> {
        let cache = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                cache.changed.notified().await;
                tokio::time::sleep(debounce).await;
                if let Err(err) = cache.flush().await {
                    warn!(error = %err, "debounced cache flush failed");
                }
            }
        })
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, CopydeckError> {
    serde_json::to_string(value)
        .map_err(|err| CopydeckError::Internal(format!("cache blob serialization: {err}")))
}
