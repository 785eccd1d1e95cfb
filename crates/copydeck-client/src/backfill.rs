// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Copy backfill from exported record snapshots.
//!
//! Some server records carry their copy only inside the exported JSON
//! snapshot (`json_key` set, metadata blank). After a reconciliation pass,
//! those snapshots are fetched and their copy text cached, without ever
//! overwriting an existing local entry.

use futures::future::join_all;
use tracing::{debug, warn};

use copydeck_cache::CopyCache;
use copydeck_core::types::ServerRecord;
use copydeck_reconcile::extract_copy_text;

use crate::mockups::MockupClient;

/// Fetches snapshots for records whose key still has no cached copy.
///
/// Fetch failures are logged and skipped; the backfill is opportunistic.
/// Returns the number of keys that received copy.
pub async fn backfill_missing_copy(
    records: &[ServerRecord],
    client: &MockupClient,
    cache: &CopyCache,
) -> usize {
    let candidates: Vec<&ServerRecord> = records
        .iter()
        .filter(|record| record.json_key.is_some())
        .filter(|record| !cache.has_copy(&record.key(), None))
        .collect();
    if candidates.is_empty() {
        return 0;
    }

    let fetches = candidates.iter().map(|record| async move {
        match client.payload(&record.id).await {
            Ok(payload) => extract_copy_text(&payload).map(|text| (record.key(), text)),
            Err(error) => {
                warn!(record_id = %record.id, %error, "snapshot fetch failed, skipping");
                None
            }
        }
    });

    let mut backfilled = 0;
    for (key, text) in join_all(fetches).await.into_iter().flatten() {
        if cache.set_copy_if_absent(&key, &text) {
            backfilled += 1;
        }
    }
    debug!(
        candidates = candidates.len(),
        backfilled, "snapshot copy backfill complete"
    );
    backfilled
}
