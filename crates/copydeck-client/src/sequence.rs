// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-key sequence tickets for in-flight request ordering.
//!
//! Concurrent generate/save calls for the same slot resolve in arbitrary
//! order. Callers take a [`Ticket`] before starting a call and check it on
//! resolution; a stale ticket means a newer call was issued for the key in
//! the meantime and this result must be discarded, not applied.

use std::collections::HashMap;
use std::sync::Mutex;

use copydeck_core::types::AssetKey;

/// Proof of when a call was issued relative to others for the same key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    key: AssetKey,
    seq: u64,
}

impl Ticket {
    pub fn key(&self) -> &AssetKey {
        &self.key
    }
}

/// Issues monotonically increasing tickets per [`AssetKey`].
#[derive(Debug, Default)]
pub struct SequenceGuard {
    latest: Mutex<HashMap<AssetKey, u64>>,
}

impl SequenceGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves the next sequence number for a key. The returned ticket is
    /// current until `issue` is called again for the same key.
    pub fn issue(&self, key: &AssetKey) -> Ticket {
        let mut latest = self.latest.lock().expect("sequence guard poisoned");
        let seq = latest
            .entry(key.clone())
            .and_modify(|seq| *seq += 1)
            .or_insert(1);
        Ticket {
            key: key.clone(),
            seq: *seq,
        }
    }

    /// Whether the ticket is still the newest issued for its key.
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        let latest = self.latest.lock().expect("sequence guard poisoned");
        latest.get(&ticket.key) == Some(&ticket.seq)
    }
}
