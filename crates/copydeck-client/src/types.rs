// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire-format tolerance helpers.
//!
//! The backend wraps responses in varying envelopes depending on the route
//! and its version: a bare array, `{data: [...]}`, or `{items: [...]}`.
//! Records may also omit platform/format, which default to the studio's
//! primary slot.

use serde::Deserialize;
use serde_json::Value;

use copydeck_core::types::{CopyVersion, ServerRecord};

/// Platform assumed for records that do not carry one.
const DEFAULT_PLATFORM: &str = "Instagram";
/// Format assumed for records that do not carry one.
const DEFAULT_FORMAT: &str = "Post";

/// A server record as it appears on the wire, before defaults are applied.
#[derive(Debug, Deserialize)]
pub(crate) struct ServerRecordWire {
    pub id: String,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub production_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub metadata: Value,
    #[serde(default)]
    pub json_key: Option<String>,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<ServerRecordWire> for ServerRecord {
    fn from(wire: ServerRecordWire) -> Self {
        ServerRecord {
            id: wire.id,
            platform: wire
                .platform
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| DEFAULT_PLATFORM.to_string()),
            format: wire
                .format
                .filter(|f| !f.is_empty())
                .unwrap_or_else(|| DEFAULT_FORMAT.to_string()),
            production_type: wire.production_type,
            status: wire.status,
            title: wire.title,
            metadata: wire.metadata,
            json_key: wire.json_key,
            created_at: wire.created_at,
            updated_at: wire.updated_at,
        }
    }
}

/// Pulls the record list out of whichever envelope the backend used.
/// Elements that fail to deserialize are dropped rather than failing the
/// whole list.
pub(crate) fn extract_record_list(payload: &Value) -> Vec<ServerRecord> {
    let items = if let Some(array) = payload.as_array() {
        array
    } else if let Some(array) = payload.get("data").and_then(Value::as_array) {
        array
    } else if let Some(array) = payload.get("items").and_then(Value::as_array) {
        array
    } else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| serde_json::from_value::<ServerRecordWire>(item.clone()).ok())
        .map(ServerRecord::from)
        .collect()
}

/// Pulls a single record out of `{data: {...}}` or a bare object.
pub(crate) fn extract_record(payload: &Value) -> Option<ServerRecord> {
    let candidate = payload.get("data").unwrap_or(payload);
    serde_json::from_value::<ServerRecordWire>(candidate.clone())
        .ok()
        .map(ServerRecord::from)
}

/// Pulls the generated copy out of `{data: {copy: {...}}}`, `{copy: {...}}`,
/// or a bare CopyVersion object.
pub(crate) fn extract_copy_version(payload: &Value) -> Option<CopyVersion> {
    let candidate = payload
        .get("data")
        .and_then(|data| data.get("copy"))
        .or_else(|| payload.get("copy"))
        .unwrap_or(payload);
    serde_json::from_value(candidate.clone()).ok()
}

/// Unwraps `{data: {...}}` snapshot payloads to the inner value.
pub(crate) fn unwrap_data(payload: Value) -> Value {
    match payload {
        Value::Object(mut map) => map.remove("data").unwrap_or(Value::Object(map)),
        other => other,
    }
}
