// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup instead of silently ignoring them.

use serde::{Deserialize, Serialize};

/// Top-level copydeck configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CopydeckConfig {
    /// Active studio context: client, briefing, default slot.
    #[serde(default)]
    pub studio: StudioConfig,

    /// Backend API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Local key-value storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Copy generation settings.
    #[serde(default)]
    pub generation: GenerationConfig,
}

/// Studio working context.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StudioConfig {
    /// Client the session is scoped to. `None` means unscoped cache keys.
    #[serde(default)]
    pub active_client_id: Option<String>,

    /// Briefing used to filter server records.
    #[serde(default)]
    pub briefing_id: Option<String>,

    /// Platform used when a command names only a format.
    #[serde(default = "default_platform")]
    pub default_platform: String,

    /// Format used when a command names only a platform.
    #[serde(default = "default_format")]
    pub default_format: String,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            active_client_id: None,
            briefing_id: None,
            default_platform: default_platform(),
            default_format: default_format(),
        }
    }
}

fn default_platform() -> String {
    "Instagram".to_string()
}

fn default_format() -> String {
    "Post".to_string()
}

/// Backend API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL for the generation and mockup endpoints.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3333/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Local storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// SQLite database path.
    #[serde(default = "default_storage_path")]
    pub path: String,

    /// Quiet period before dirty cache state is flushed, in milliseconds.
    #[serde(default = "default_flush_debounce_ms")]
    pub flush_debounce_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            flush_debounce_ms: default_flush_debounce_ms(),
        }
    }
}

fn default_storage_path() -> String {
    "copydeck.db".to_string()
}

fn default_flush_debounce_ms() -> u64 {
    400
}

/// Copy generation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationConfig {
    /// Generation pipeline name sent with each request.
    #[serde(default = "default_pipeline")]
    pub pipeline: String,

    /// Task type sent with each request.
    #[serde(default = "default_task_type")]
    pub task_type: String,

    /// How many options to request per slot.
    #[serde(default = "default_count")]
    pub count: u32,

    /// Tone of voice directive. `None` omits the line.
    #[serde(default)]
    pub tone: Option<String>,

    /// Pin generation to one provider instead of letting the backend route.
    #[serde(default)]
    pub force_provider: Option<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            pipeline: default_pipeline(),
            task_type: default_task_type(),
            count: default_count(),
            tone: None,
            force_provider: None,
        }
    }
}

fn default_pipeline() -> String {
    "standard".to_string()
}

fn default_task_type() -> String {
    "social_post".to_string()
}

fn default_count() -> u32 {
    3
}
