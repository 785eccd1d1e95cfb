// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage blob names and scoped-key lookup.
//!
//! Each logical map is persisted as one JSON blob in the durable store.
//! Entries inside a map are addressed by `platform::format`, optionally
//! prefixed with a client id. Reads fall back from the scoped key to the
//! unscoped one, so pre-multi-client data and single-client flows keep
//! working transparently.

use std::collections::HashMap;

use copydeck_core::types::AssetKey;

/// Copy text per asset key.
pub const COPY_BLOB: &str = "copydeck.copy_by_key";
/// Parsed options per asset key.
pub const OPTIONS_BLOB: &str = "copydeck.options_by_key";
/// Generation metadata per asset key.
pub const META_BLOB: &str = "copydeck.meta_by_key";
/// The last reconciled asset list.
pub const ASSETS_BLOB: &str = "copydeck.assets";
/// The user's current format inventory.
pub const INVENTORY_BLOB: &str = "copydeck.inventory";

/// Scoped read: client-prefixed entry first, unscoped entry second.
pub(crate) fn lookup_scoped<'a, T>(
    map: &'a HashMap<String, T>,
    key: &AssetKey,
    client_id: Option<&str>,
) -> Option<&'a T> {
    if let Some(client) = client_id.filter(|c| !c.is_empty())
        && let Some(value) = map.get(&key.scoped(client))
    {
        return Some(value);
    }
    map.get(key.as_str())
}

/// Write key: scoped when a client context is active, unscoped otherwise.
pub(crate) fn write_key(key: &AssetKey, client_id: Option<&str>) -> String {
    match client_id.filter(|c| !c.is_empty()) {
        Some(client) => key.scoped(client),
        None => key.as_str().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_read_falls_back_to_unscoped() {
        let mut map = HashMap::new();
        map.insert("Instagram::Feed".to_string(), 1);
        let key = AssetKey::new("Instagram", "Feed");

        assert_eq!(lookup_scoped(&map, &key, Some("c1")), Some(&1));
        map.insert("c1::Instagram::Feed".to_string(), 2);
        assert_eq!(lookup_scoped(&map, &key, Some("c1")), Some(&2));
        assert_eq!(lookup_scoped(&map, &key, None), Some(&1));
    }

    #[test]
    fn empty_client_id_counts_as_unscoped() {
        let key = AssetKey::new("Instagram", "Feed");
        assert_eq!(write_key(&key, Some("")), "Instagram::Feed");
        assert_eq!(write_key(&key, Some("c1")), "c1::Instagram::Feed");
        assert_eq!(write_key(&key, None), "Instagram::Feed");
    }
}
