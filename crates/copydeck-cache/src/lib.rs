// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyed cache store for the Copydeck studio core.
//!
//! Holds the small amount of durable keyed state shared across
//! independently-rendered views: copy text, parsed options, and generation
//! metadata per `platform::format` key (optionally client-scoped), plus the
//! last reconciled asset list and the current inventory. Backed by any
//! [`copydeck_core::KeyValueStore`] through an in-memory mirror with a
//! debounced flush.

pub mod keys;
pub mod store;

pub use store::{safe_parse, CopyCache};
