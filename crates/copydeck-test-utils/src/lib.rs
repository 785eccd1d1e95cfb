// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Copydeck tests.
//!
//! Provides in-memory stand-ins for the external collaborators so cache,
//! reconciler, and flow tests run fast and deterministically without a
//! database or network.
//!
//! - [`MemoryKvStore`] - in-memory `KeyValueStore`
//! - [`MockGeneration`] - `GenerationService` with pre-configured outputs

pub mod mock_generation;
pub mod mock_store;

pub use mock_generation::MockGeneration;
pub use mock_store::MemoryKvStore;
