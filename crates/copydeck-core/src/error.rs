// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Copydeck studio core.

use thiserror::Error;

/// The primary error type used across all Copydeck traits and operations.
///
/// The Option Parser and the reconciliation merge itself have no error path
/// at all (malformed input degrades to a broader match); errors only arise
/// from configuration, the durable store, or the network collaborators.
#[derive(Debug, Error)]
pub enum CopydeckError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Durable key-value store errors (connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Generation service errors (API failure, provider unavailable, bad response).
    #[error("generation error: {message}")]
    Generation {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Persistence service errors (list/create/patch/delete round-trips).
    #[error("persistence error: {message}")]
    Persistence {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_carry_context() {
        let err = CopydeckError::Generation {
            message: "provider returned 502".into(),
            source: None,
        };
        assert!(err.to_string().contains("provider returned 502"));

        let err = CopydeckError::Storage {
            source: Box::new(std::io::Error::other("disk full")),
        };
        assert!(err.to_string().contains("disk full"));
    }
}
