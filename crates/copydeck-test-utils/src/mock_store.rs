// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory key-value store for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use copydeck_core::{CopydeckError, KeyValueStore};

/// A `KeyValueStore` backed by a plain in-process map.
///
/// Values survive for the lifetime of the store instance, which is enough
/// to exercise load/flush cycles in cache tests.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed an entry, e.g. a corrupt JSON blob for safe-parse tests.
    pub fn seed(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .expect("mock store lock")
            .insert(key.to_string(), value.to_string());
    }

    /// Synchronous peek for assertions.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries.lock().expect("mock store lock").get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("mock store lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KeyValueStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CopydeckError> {
        Ok(self.entries.lock().expect("mock store lock").get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CopydeckError> {
        self.entries
            .lock()
            .expect("mock store lock")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), CopydeckError> {
        self.entries.lock().expect("mock store lock").remove(key);
        Ok(())
    }
}
