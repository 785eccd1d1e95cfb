// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits the core consumes. Implementations live in the
//! storage and client crates (and in test-utils for tests).

pub mod generation;
pub mod kv;
pub mod persistence;

pub use generation::GenerationService;
pub use kv::KeyValueStore;
pub use persistence::PersistenceService;
