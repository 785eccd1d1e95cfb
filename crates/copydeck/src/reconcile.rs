// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `copydeck reconcile` command implementation.

use tracing::debug;

use copydeck_client::backfill_missing_copy;
use copydeck_core::error::CopydeckError;
use copydeck_core::traits::PersistenceService;
use copydeck_core::types::RecordFilter;
use copydeck_reconcile::{rebuild_inventory_from_list, reconcile};

use crate::app::App;

/// Run the `copydeck reconcile` command.
///
/// Optionally replaces the inventory from `--slot` arguments, fetches the
/// server records for the active briefing/client, merges the three views
/// and stores the result as the new asset list.
pub async fn run(
    app: &App,
    briefing_id: Option<String>,
    client_id: Option<String>,
    slots: &[String],
) -> Result<(), CopydeckError> {
    if !slots.is_empty() {
        let (inventory, by_platform) = rebuild_inventory_from_list(slots);
        debug!(
            slots = inventory.len(),
            platforms = by_platform.len(),
            "inventory replaced from arguments"
        );
        app.cache.set_inventory(inventory);
    }

    let filter = RecordFilter {
        briefing_id: briefing_id.or_else(|| app.config.studio.briefing_id.clone()),
        client_id: client_id.or_else(|| app.config.studio.active_client_id.clone()),
    };
    let records = app.mockups.list(&filter).await?;

    let previous = app.cache.assets();
    let inventory = app.cache.inventory();
    let merged = reconcile(&previous, &inventory, &records, &app.cache);
    let backfilled = backfill_missing_copy(&records, &app.mockups, &app.cache).await;

    println!(
        "reconciled {} assets ({} server records, {} snapshot backfills)",
        merged.len(),
        records.len(),
        backfilled
    );
    for asset in &merged {
        let marker = if asset.generated { "*" } else { " " };
        let server = asset.server_id.as_deref().unwrap_or("-");
        let status = asset.status.as_deref().unwrap_or("-");
        println!("{marker} {:<40} {server:<12} {status}", asset.key().as_str());
    }

    app.cache.set_assets(merged);
    Ok(())
}
