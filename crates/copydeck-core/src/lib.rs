// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Copydeck studio reconciliation core.
//!
//! This crate provides the foundational trait definitions, error type, and
//! domain types used throughout the Copydeck workspace: asset identity,
//! local/server record shapes, generation results, and the collaborator
//! traits implemented by the storage and client crates.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::CopydeckError;
pub use traits::{GenerationService, KeyValueStore, PersistenceService};
pub use types::{
    AssetKey, ClientRef, CopyMeta, CopyVersion, FormatSelection, GenerationRequest, LocalAsset,
    ParseConfidence, ParsedOption, RecordDraft, RecordFilter, ServerRecord,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_has_all_variants() {
        let _config = CopydeckError::Config("test".into());
        let _storage = CopydeckError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _generation = CopydeckError::Generation {
            message: "test".into(),
            source: None,
        };
        let _persistence = CopydeckError::Persistence {
            message: "test".into(),
            source: None,
        };
        let _internal = CopydeckError::Internal("test".into());
    }

    #[test]
    fn all_trait_modules_are_exported() {
        // Compile-time check that the collaborator traits are reachable
        // through the public API.
        fn _assert_kv<T: KeyValueStore>() {}
        fn _assert_generation<T: GenerationService>() {}
        fn _assert_persistence<T: PersistenceService>() {}
    }
}
