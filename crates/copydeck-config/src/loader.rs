// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./copydeck.toml` > `~/.config/copydeck/copydeck.toml`
//! > `/etc/copydeck/copydeck.toml` with environment variable overrides via
//! `COPYDECK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::CopydeckConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/copydeck/copydeck.toml` (system-wide)
/// 3. `~/.config/copydeck/copydeck.toml` (user XDG config)
/// 4. `./copydeck.toml` (local directory)
/// 5. `COPYDECK_*` environment variables
pub fn load_config() -> Result<CopydeckConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CopydeckConfig::default()))
        .merge(Toml::file("/etc/copydeck/copydeck.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("copydeck/copydeck.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("copydeck.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and for callers that carry their own config text.
pub fn load_config_from_str(toml_content: &str) -> Result<CopydeckConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CopydeckConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<CopydeckConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CopydeckConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` so underscore-containing key
/// names stay unambiguous: `COPYDECK_STUDIO_ACTIVE_CLIENT_ID` must map to
/// `studio.active_client_id`, not `studio.active.client.id`.
fn env_provider() -> Env {
    Env::prefixed("COPYDECK_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: COPYDECK_API_BASE_URL -> "api_base_url"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("studio_", "studio.", 1)
            .replacen("api_", "api.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("generation_", "generation.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn str_loader_overrides_defaults() {
        let config = load_config_from_str(
            r#"
            [storage]
            path = "/tmp/deck.db"
            flush_debounce_ms = 50

            [generation]
            count = 5
            tone = "playful"
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.path, "/tmp/deck.db");
        assert_eq!(config.storage.flush_debounce_ms, 50);
        assert_eq!(config.generation.count, 5);
        assert_eq!(config.generation.tone.as_deref(), Some("playful"));
        // Untouched sections keep defaults.
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let result = load_config_from_str(
            r#"
            [api]
            base_uri = "https://api.example.com"
            "#,
        );
        assert!(result.is_err());
    }

    // Serialized: figment::Jail mutates process env vars.
    #[test]
    #[serial_test::serial]
    fn env_vars_map_to_dotted_keys() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("COPYDECK_STUDIO_ACTIVE_CLIENT_ID", "acme");
            jail.set_env("COPYDECK_API_TIMEOUT_SECS", "5");

            let config = load_config().unwrap();
            assert_eq!(config.studio.active_client_id.as_deref(), Some("acme"));
            assert_eq!(config.api.timeout_secs, 5);
            Ok(())
        });
    }
}
