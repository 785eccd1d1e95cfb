// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Copydeck workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Composite identity `platform::format` joining the local, inventory, and
/// server views of one creative slot.
///
/// Case-sensitive and not normalized: two selections with equal
/// (platform, format) yield identical keys, and that is the only identity
/// guarantee shared between local and server records before first
/// persistence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetKey(String);

impl AssetKey {
    /// Builds the key from a platform/format pairing.
    pub fn new(platform: &str, format: &str) -> Self {
        Self(format!("{platform}::{format}"))
    }

    /// Wraps an already-joined `platform::format` string.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The key prefixed with a client id, for client-scoped cache entries.
    pub fn scoped(&self, client_id: &str) -> String {
        format!("{client_id}::{}", self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Platform half of the key (everything before the first `::`).
    pub fn platform(&self) -> &str {
        self.0.split_once("::").map_or(self.0.as_str(), |(p, _)| p)
    }

    /// Format half of the key (everything after the first `::`).
    pub fn format(&self) -> &str {
        self.0.split_once("::").map_or("", |(_, f)| f)
    }
}

impl std::fmt::Display for AssetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lowercase a value into a stable id fragment (non-alphanumerics collapse to `-`).
pub fn slug(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut last_dash = true;
    for ch in value.chars() {
        if ch.is_alphanumeric() {
            out.extend(ch.to_lowercase());
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// One creative slot the user wants content for.
///
/// Ephemeral: rebuilt from scratch whenever the user changes their
/// platform/format selections. No server representation exists until an
/// asset is first saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatSelection {
    pub id: String,
    pub platform: String,
    pub format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_type: Option<String>,
}

impl FormatSelection {
    pub fn new(platform: impl Into<String>, format: impl Into<String>) -> Self {
        let platform = platform.into();
        let format = format.into();
        Self {
            id: slug(&format!("{platform}-{format}")),
            platform,
            format,
            production_type: None,
        }
    }

    pub fn key(&self) -> AssetKey {
        AssetKey::new(&self.platform, &self.format)
    }
}

/// A locally owned creative asset, one per [`AssetKey`].
///
/// `id` is stable once created; `server_id` is populated only after the
/// first successful persistence round-trip. `generated` is a local
/// affordance flag (not authoritative) meaning generation was triggered or
/// the server holds a record for this slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalAsset {
    pub id: String,
    pub platform: String,
    pub format: String,
    pub generated: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl LocalAsset {
    /// Fresh not-yet-generated shell for an inventory slot.
    pub fn shell(platform: &str, format: &str) -> Self {
        Self {
            id: format!("mockup-{}", slug(&format!("{platform}-{format}"))),
            platform: platform.to_string(),
            format: format.to_string(),
            generated: false,
            created_at: Utc::now(),
            server_id: None,
            status: None,
            title: None,
        }
    }

    /// Shell carrying the selection's own id, so the slot stays addressable
    /// by whatever id the inventory assigned it.
    pub fn from_selection(selection: &FormatSelection) -> Self {
        let mut shell = Self::shell(&selection.platform, &selection.format);
        if !selection.id.is_empty() {
            shell.id = selection.id.clone();
        }
        shell
    }

    pub fn key(&self) -> AssetKey {
        AssetKey::new(&self.platform, &self.format)
    }
}

/// A server-persisted mockup record. Authoritative; identity is the
/// server-assigned `id`, joined to local state by [`AssetKey`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerRecord {
    pub id: String,
    pub platform: String,
    pub format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Opaque server-side payload; copy text is opportunistically extracted
    /// from well-known keys during reconciliation.
    #[serde(default)]
    pub metadata: serde_json::Value,
    /// Storage key of the record's exported JSON snapshot, when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ServerRecord {
    pub fn key(&self) -> AssetKey {
        AssetKey::new(&self.platform, &self.format)
    }
}

/// One AI generation result. Append-only: each generation call produces a
/// new version; the "current" version per key is whatever the cache holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopyVersion {
    pub id: String,
    /// Raw text returned by the generation service. May be JSON,
    /// pseudo-JSON, a numbered list, or free prose.
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Which fallback stage of the Option Parser produced an option.
///
/// Lets consumers distinguish a clean structured parse from a degraded
/// best-effort one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ParseConfidence {
    /// Strict JSON with a recognized options array.
    Structured,
    /// Numbered-block split with labeled-field extraction.
    Enumerated,
    /// Whole-text fallback; no structure markers found.
    Degraded,
}

/// A structured creative option derived from one generation output.
///
/// Not persisted independently of its source [`CopyVersion`]'s cache entry;
/// regenerated by re-running the parser if absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedOption {
    pub title: String,
    pub body: String,
    pub cta: String,
    /// Enough of the source to show "original" without recomputation.
    pub raw: String,
    pub confidence: ParseConfidence,
}

/// Generation metadata cached alongside copy text and parsed options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CopyMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub tier: String,
    #[serde(default)]
    pub task_type: String,
}

impl CopyMeta {
    /// Extract metadata from a generation result's payload.
    ///
    /// Probes top-level keys first, then a nested `engine` section, since
    /// the generation service reports routing info in either place.
    pub fn from_version(version: &CopyVersion) -> Self {
        let payload = version.payload.as_ref();
        let probe = |key: &str| -> String {
            payload
                .and_then(|p| {
                    p.get(key)
                        .or_else(|| p.get("engine").and_then(|e| e.get(key)))
                })
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };
        let task_type = {
            let direct = probe("task_type");
            if direct.is_empty() { probe("taskType") } else { direct }
        };
        Self {
            model: version.model.clone(),
            provider: probe("provider"),
            tier: probe("tier"),
            task_type,
        }
    }

    /// Human-readable provider label ("OpenAI", "Gemini", "Claude", or the
    /// raw provider/model string when unrecognized).
    pub fn provider_label(&self) -> String {
        let to_label = |value: &str| -> String {
            let lower = value.to_lowercase();
            if lower.contains("gpt") || lower.contains("openai") {
                "OpenAI".to_string()
            } else if lower.contains("gemini") {
                "Gemini".to_string()
            } else if lower.contains("claude") {
                "Claude".to_string()
            } else {
                value.to_string()
            }
        };

        let provider = to_label(&self.provider);
        let model = self.model.clone().unwrap_or_default();
        match (!provider.is_empty(), !model.is_empty()) {
            (true, true) => format!("{provider} • {model}"),
            (true, false) => provider,
            (false, true) => to_label(&model),
            (false, false) => String::new(),
        }
    }
}

/// A client the studio is generating content for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRef {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<String>,
}

/// Structured request handed to the generation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub briefing_id: Option<String>,
    pub slot: FormatSelection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<ClientRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    /// Free-form operator instructions appended after the derived lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_instructions: Option<String>,
    pub count: u32,
    pub pipeline: String,
    pub task_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_provider: Option<String>,
}

/// Filter for listing server records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub briefing_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

/// Payload for creating or patching a server record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDraft {
    pub platform: String,
    pub format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub metadata: serde_json::Value,
}
