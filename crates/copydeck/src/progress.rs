// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `copydeck progress` command implementation.

use copydeck_core::error::CopydeckError;
use copydeck_reconcile::inventory_progress;

use crate::app::App;

/// Run the `copydeck progress` command: one line per inventory slot, plus
/// a done/total summary.
pub fn run(app: &App) -> Result<(), CopydeckError> {
    let inventory = app.cache.inventory();
    if inventory.is_empty() {
        println!("no inventory selected; run `copydeck reconcile --slot \"Platform: Format\"` first");
        return Ok(());
    }

    let client_id = app.config.studio.active_client_id.as_deref();
    let progress = inventory_progress(&inventory, &app.cache, client_id);

    for item in &progress.items {
        let marker = if item.has_copy { "x" } else { " " };
        println!("[{marker}] {}", item.key.as_str());
    }
    println!("{}/{} slots have copy", progress.done, progress.total);
    Ok(())
}
