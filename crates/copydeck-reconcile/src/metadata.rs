// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Opportunistic copy-text extraction from server record metadata.

use serde_json::Value;

/// Well-known metadata keys that may carry the caption text, probed in
/// priority order.
const COPY_KEYS: [&str; 5] = ["copy", "captionText", "caption", "text", "description"];

/// Extracts copy text from an opaque server payload.
///
/// A bare string payload is the copy itself; otherwise the well-known keys
/// are probed in order. Non-string and blank values are skipped.
pub fn extract_copy_text(payload: &Value) -> Option<String> {
    if let Value::String(text) = payload {
        return non_blank(text);
    }
    COPY_KEYS
        .iter()
        .find_map(|key| payload.get(key).and_then(Value::as_str).and_then(non_blank))
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
