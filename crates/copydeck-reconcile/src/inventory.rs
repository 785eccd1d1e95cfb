// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inventory builders.
//!
//! The inventory is the set of platform/format slots the user selected for
//! the current briefing. It is stored in two redundant shapes (a
//! per-platform map and a flat display list) and either can be the source
//! of truth, so both rebuild paths exist.

use std::collections::BTreeMap;

use copydeck_core::types::{slug, FormatSelection};

/// Platform used for list entries that carry no `Platform:` prefix.
const FALLBACK_PLATFORM: &str = "Plataforma";

/// Rebuilds the flat inventory from a platform-to-formats map.
///
/// Iteration over a `BTreeMap` keeps the output order stable across runs.
/// Blank formats are skipped.
pub fn rebuild_inventory(formats_by_platform: &BTreeMap<String, Vec<String>>) -> Vec<FormatSelection> {
    let mut items = Vec::new();
    for (platform, formats) in formats_by_platform {
        for format in formats {
            if format.is_empty() {
                continue;
            }
            items.push(FormatSelection {
                id: format!("{}-{}-1", slug(platform), slug(format)),
                platform: platform.clone(),
                format: format.clone(),
                production_type: None,
            });
        }
    }
    items
}

/// Rebuilds the inventory from the flat `"Platform: Format"` display list,
/// also regrouping it into the per-platform map.
///
/// Entries without a colon are treated as bare formats under the
/// [`FALLBACK_PLATFORM`]. A format containing further colons keeps them
/// (only the first segment names the platform).
pub fn rebuild_inventory_from_list(
    entries: &[String],
) -> (Vec<FormatSelection>, BTreeMap<String, Vec<String>>) {
    let mut inventory = Vec::with_capacity(entries.len());
    let mut formats_by_platform: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for (index, entry) in entries.iter().enumerate() {
        let parts: Vec<&str> = entry
            .split(':')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();
        let (platform, format) = if parts.len() > 1 {
            (parts[0].to_string(), parts[1..].join(":"))
        } else {
            (FALLBACK_PLATFORM.to_string(), entry.trim().to_string())
        };
        if format.is_empty() {
            continue;
        }

        formats_by_platform
            .entry(platform.clone())
            .or_default()
            .push(format.clone());
        inventory.push(FormatSelection {
            id: slug(&format!("{platform}-{format}-{index}")),
            platform,
            format,
            production_type: None,
        });
    }

    (inventory, formats_by_platform)
}
