// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-briefing generation progress, derived from the inventory and the
//! copy cache rather than stored anywhere.

use copydeck_cache::CopyCache;
use copydeck_core::types::{AssetKey, FormatSelection};

/// Snapshot of how many inventory slots already have copy.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryProgress {
    pub done: usize,
    pub total: usize,
    pub items: Vec<SlotProgress>,
}

/// Progress for a single slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotProgress {
    pub selection: FormatSelection,
    pub key: AssetKey,
    pub has_copy: bool,
}

/// Counts inventory slots with non-blank cached copy. The cache read is
/// scoped to the active client with an unscoped fallback, same as every
/// other copy lookup.
pub fn inventory_progress(
    inventory: &[FormatSelection],
    cache: &CopyCache,
    client_id: Option<&str>,
) -> InventoryProgress {
    let items: Vec<SlotProgress> = inventory
        .iter()
        .map(|selection| {
            let key = selection.key();
            let has_copy = cache.has_copy(&key, client_id);
            SlotProgress {
                selection: selection.clone(),
                key,
                has_copy,
            }
        })
        .collect();

    InventoryProgress {
        done: items.iter().filter(|item| item.has_copy).count(),
        total: items.len(),
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use copydeck_core::KeyValueStore;
    use copydeck_test_utils::MemoryKvStore;

    async fn cache() -> CopyCache {
        CopyCache::load(Arc::new(MemoryKvStore::new()) as Arc<dyn KeyValueStore>)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn counts_slots_with_copy() {
        let cache = cache().await;
        let inventory = vec![
            FormatSelection::new("Instagram", "Feed"),
            FormatSelection::new("Instagram", "Stories"),
            FormatSelection::new("TikTok", "Video"),
        ];
        cache.set_copy(&AssetKey::new("Instagram", "Feed"), None, "done");
        // Whitespace-only copy does not count.
        cache.set_copy(&AssetKey::new("TikTok", "Video"), None, "   ");

        let progress = inventory_progress(&inventory, &cache, None);

        assert_eq!(progress.total, 3);
        assert_eq!(progress.done, 1);
        assert!(progress.items[0].has_copy);
        assert!(!progress.items[1].has_copy);
        assert!(!progress.items[2].has_copy);
    }

    #[tokio::test]
    async fn scoped_copy_counts_with_unscoped_fallback() {
        let cache = cache().await;
        let inventory = vec![
            FormatSelection::new("Instagram", "Feed"),
            FormatSelection::new("Instagram", "Stories"),
        ];
        cache.set_copy(&AssetKey::new("Instagram", "Feed"), Some("acme"), "scoped");
        cache.set_copy(&AssetKey::new("Instagram", "Stories"), None, "shared");

        let progress = inventory_progress(&inventory, &cache, Some("acme"));

        assert_eq!(progress.done, 2);
    }

    #[tokio::test]
    async fn empty_inventory_is_zero_of_zero() {
        let cache = cache().await;
        let progress = inventory_progress(&[], &cache, None);
        assert_eq!(progress.done, 0);
        assert_eq!(progress.total, 0);
        assert!(progress.items.is_empty());
    }
}
