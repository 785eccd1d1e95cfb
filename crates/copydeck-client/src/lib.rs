// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP clients for the copydeck backend.
//!
//! [`GenerationClient`] implements [`copydeck_core::traits::GenerationService`]
//! against the briefing copy route; [`MockupClient`] implements
//! [`copydeck_core::traits::PersistenceService`] against `/mockups`. Both
//! retry reads once on transient errors. [`SequenceGuard`] keeps overlapping
//! in-flight calls from applying stale results.

pub mod backfill;
pub mod draft;
pub mod generation;
pub mod mockups;
pub mod sequence;

mod types;

pub use backfill::backfill_missing_copy;
pub use draft::build_record_draft;
pub use generation::{build_instructions, GenerationClient};
pub use mockups::MockupClient;
pub use sequence::{SequenceGuard, Ticket};
