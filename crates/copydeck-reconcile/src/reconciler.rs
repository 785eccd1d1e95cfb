// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The three-way asset merge.
//!
//! Three independently-updated sources describe the same creative slots:
//! the previously rendered local list, the freshly built inventory, and
//! the server's persisted records. Every reconciliation pass rebuilds the
//! merged view from scratch; nothing is patched incrementally, so stale
//! caches and hard refreshes converge on the same result.
//!
//! The server wins on identity and status; it never wins on in-flight copy
//! text. Cached copy is only backfilled for keys with no local entry.

use std::collections::HashMap;

use tracing::debug;

use copydeck_cache::CopyCache;
use copydeck_core::types::{AssetKey, FormatSelection, LocalAsset, ServerRecord};

use crate::metadata::extract_copy_text;

/// Merges the three views of the asset list into one.
///
/// Inputs are snapshots taken synchronously by the caller; the merge runs
/// to completion without suspension, so it is internally consistent even
/// when individual inputs are stale relative to the server.
///
/// Side effect: copy text found in server metadata is written to the copy
/// cache for keys that have no cached value yet.
///
/// Output order is deterministic: previous-list order first, then
/// inventory-only keys, then server-only keys.
pub fn reconcile(
    previous: &[LocalAsset],
    inventory: &[FormatSelection],
    server_records: &[ServerRecord],
    cache: &CopyCache,
) -> Vec<LocalAsset> {
    let prev_map: HashMap<AssetKey, &LocalAsset> =
        previous.iter().map(|asset| (asset.key(), asset)).collect();
    let inventory_map: HashMap<AssetKey, &FormatSelection> = inventory
        .iter()
        .map(|selection| (selection.key(), selection))
        .collect();
    let server_map: HashMap<AssetKey, &ServerRecord> = server_records
        .iter()
        .map(|record| (record.key(), record))
        .collect();

    // Backfill the copy cache from server metadata. Existing entries are
    // local state and must survive untouched.
    for record in server_records {
        if let Some(text) = extract_copy_text(&record.metadata) {
            cache.set_copy_if_absent(&record.key(), &text);
        }
    }

    // Union of keys across all three maps. A key may exist in only one of
    // them: a server record for a deselected format stays visible, and an
    // inventory slot never generated still gets a shell.
    let mut keys: Vec<AssetKey> = Vec::with_capacity(prev_map.len() + inventory.len());
    let mut push_unique = |keys: &mut Vec<AssetKey>, key: AssetKey| {
        if !keys.contains(&key) {
            keys.push(key);
        }
    };
    for asset in previous {
        push_unique(&mut keys, asset.key());
    }
    for selection in inventory {
        push_unique(&mut keys, selection.key());
    }
    for record in server_records {
        push_unique(&mut keys, record.key());
    }

    let merged: Vec<LocalAsset> = keys
        .iter()
        .map(|key| {
            // Base preserves user-visible local state: the previous entry
            // when one exists, else a fresh shell from the inventory slot,
            // else a shell synthesized from the key itself.
            let base = prev_map
                .get(key)
                .map(|asset| (*asset).clone())
                .or_else(|| {
                    inventory_map
                        .get(key)
                        .map(|selection| LocalAsset::from_selection(selection))
                })
                .unwrap_or_else(|| LocalAsset::shell(key.platform(), key.format()));

            match server_map.get(key) {
                Some(record) => apply_server(base, record),
                None => base,
            }
        })
        .collect();

    debug!(
        previous = previous.len(),
        inventory = inventory.len(),
        server = server_records.len(),
        merged = merged.len(),
        "reconciliation pass complete"
    );
    merged
}

/// Server presence is authoritative for identity and status, and implies
/// the slot was produced. Local-only fields (the not-yet-synced id) ride
/// along on the base.
fn apply_server(mut base: LocalAsset, record: &ServerRecord) -> LocalAsset {
    if !record.platform.is_empty() {
        base.platform = record.platform.clone();
    }
    if !record.format.is_empty() {
        base.format = record.format.clone();
    }
    base.server_id = Some(record.id.clone());
    if record.status.is_some() {
        base.status = record.status.clone();
    }
    if record.title.is_some() {
        base.title = record.title.clone();
    }
    if let Some(created_at) = record.created_at {
        base.created_at = created_at;
    }
    base.generated = true;
    base
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    use copydeck_core::KeyValueStore;
    use copydeck_test_utils::MemoryKvStore;
    use serde_json::json;

    async fn empty_cache() -> CopyCache {
        CopyCache::load(Arc::new(MemoryKvStore::new()) as Arc<dyn KeyValueStore>)
            .await
            .unwrap()
    }

    fn record(id: &str, platform: &str, format: &str) -> ServerRecord {
        ServerRecord {
            id: id.to_string(),
            platform: platform.to_string(),
            format: format.to_string(),
            production_type: None,
            status: Some("saved".to_string()),
            title: None,
            metadata: serde_json::Value::Null,
            json_key: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn fresh_inventory_yields_ungenerated_shell() {
        let cache = empty_cache().await;
        let inventory = vec![FormatSelection::new("Instagram", "Feed")];

        let merged = reconcile(&[], &inventory, &[], &cache);

        assert_eq!(merged.len(), 1);
        assert!(!merged[0].generated);
        assert!(merged[0].server_id.is_none());
        assert_eq!(merged[0].key(), AssetKey::new("Instagram", "Feed"));
    }

    #[tokio::test]
    async fn server_record_upgrades_shell_and_backfills_cache() {
        let cache = empty_cache().await;
        let inventory = vec![FormatSelection::new("Instagram", "Feed")];
        let mut server = record("srv1", "Instagram", "Feed");
        server.metadata = json!({"caption": "Buy now"});

        let merged = reconcile(&[], &inventory, &[server], &cache);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].server_id.as_deref(), Some("srv1"));
        assert!(merged[0].generated);
        assert_eq!(merged[0].status.as_deref(), Some("saved"));
        assert_eq!(
            cache.copy_for(&AssetKey::new("Instagram", "Feed"), None),
            "Buy now"
        );
    }

    #[tokio::test]
    async fn server_metadata_never_clobbers_cached_copy() {
        let cache = empty_cache().await;
        let key = AssetKey::new("Instagram", "Feed");
        cache.set_copy(&key, None, "Y");

        let mut server = record("srv1", "Instagram", "Feed");
        server.metadata = json!({"copy": "X"});
        reconcile(&[], &[], &[server], &cache);

        assert_eq!(cache.copy_for(&key, None), "Y");
    }

    #[tokio::test]
    async fn output_is_exact_key_union() {
        let cache = empty_cache().await;
        let previous = vec![
            LocalAsset::shell("Instagram", "Feed"),
            LocalAsset::shell("Instagram", "Stories"),
        ];
        let inventory = vec![
            FormatSelection::new("Instagram", "Feed"),
            FormatSelection::new("TikTok", "Video"),
        ];
        let server = vec![record("s1", "OOH", "Busdoor")];

        let merged = reconcile(&previous, &inventory, &server, &cache);

        let expected: HashSet<AssetKey> = [
            AssetKey::new("Instagram", "Feed"),
            AssetKey::new("Instagram", "Stories"),
            AssetKey::new("TikTok", "Video"),
            AssetKey::new("OOH", "Busdoor"),
        ]
        .into_iter()
        .collect();
        let actual: HashSet<AssetKey> = merged.iter().map(LocalAsset::key).collect();
        assert_eq!(actual, expected);
        assert_eq!(merged.len(), expected.len(), "no duplicate keys");
    }

    #[tokio::test]
    async fn generated_flag_set_for_any_server_key() {
        let cache = empty_cache().await;
        let mut previous = LocalAsset::shell("Instagram", "Feed");
        previous.generated = false;

        let merged = reconcile(
            &[previous],
            &[],
            &[record("srv1", "Instagram", "Feed")],
            &cache,
        );

        assert!(merged[0].generated);
    }

    #[tokio::test]
    async fn previous_entry_preferred_over_fresh_shell() {
        let cache = empty_cache().await;
        let mut previous = LocalAsset::shell("Instagram", "Feed");
        previous.id = "local-kept".to_string();
        previous.generated = true;

        let inventory = vec![FormatSelection::new("Instagram", "Feed")];
        let merged = reconcile(&[previous], &inventory, &[], &cache);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].id, "local-kept");
        assert!(merged[0].generated, "local affordance state preserved");
    }

    #[tokio::test]
    async fn local_id_survives_server_merge() {
        let cache = empty_cache().await;
        let mut previous = LocalAsset::shell("Instagram", "Feed");
        previous.id = "local-7".to_string();

        let merged = reconcile(
            &[previous],
            &[],
            &[record("srv1", "Instagram", "Feed")],
            &cache,
        );

        assert_eq!(merged[0].id, "local-7");
        assert_eq!(merged[0].server_id.as_deref(), Some("srv1"));
    }

    #[tokio::test]
    async fn key_in_inventory_and_server_but_not_previous_merges() {
        // Different browser/session: no previous list, but inventory and
        // server agree on the slot.
        let cache = empty_cache().await;
        let inventory = vec![FormatSelection::new("Instagram", "Feed")];
        let merged = reconcile(
            &[],
            &inventory,
            &[record("srv1", "Instagram", "Feed")],
            &cache,
        );

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].server_id.as_deref(), Some("srv1"));
        assert!(merged[0].generated);
    }

    #[tokio::test]
    async fn deselected_format_with_server_history_stays_visible() {
        let cache = empty_cache().await;
        let merged = reconcile(&[], &[], &[record("srv1", "LinkedIn", "Post")], &cache);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].key(), AssetKey::new("LinkedIn", "Post"));
    }

    #[tokio::test]
    async fn server_created_at_overrides_shell_timestamp() {
        let cache = empty_cache().await;
        let mut server = record("srv1", "Instagram", "Feed");
        let stamp = chrono::DateTime::parse_from_rfc3339("2026-01-15T12:00:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        server.created_at = Some(stamp);

        let merged = reconcile(&[], &[], &[server], &cache);
        assert_eq!(merged[0].created_at, stamp);
    }

    #[tokio::test]
    async fn passes_are_recomputed_not_accumulated() {
        // A slot removed from inventory AND absent from previous AND the
        // server disappears from the view on the next pass.
        let cache = empty_cache().await;
        let inventory = vec![FormatSelection::new("Instagram", "Feed")];
        let first = reconcile(&[], &inventory, &[], &cache);
        assert_eq!(first.len(), 1);

        let second = reconcile(&[], &[], &[], &cache);
        assert!(second.is_empty());
    }
}
