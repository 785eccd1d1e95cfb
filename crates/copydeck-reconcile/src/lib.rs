// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Asset reconciliation: merging the local asset list, the selected format
//! inventory, and the server's records into one consistent view, plus the
//! inventory builders and progress summary that feed it.

pub mod inventory;
pub mod metadata;
pub mod progress;
pub mod reconciler;

pub use inventory::{rebuild_inventory, rebuild_inventory_from_list};
pub use metadata::extract_copy_text;
pub use progress::{inventory_progress, InventoryProgress, SlotProgress};
pub use reconciler::reconcile;
