// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The Option Parser: turns one raw generation output into an ordered list
//! of structured creative options.
//!
//! Ordered fallback chain, first match wins:
//! 1. strict JSON with a recognized options array,
//! 2. numbered-block split with per-chunk labeled-field extraction,
//! 3. whole-text degenerate fallback.
//!
//! There is no error path. Ambiguous or malformed input degrades to a
//! broader match so the consumer always has at least a usable text blob.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use copydeck_core::types::{ParseConfidence, ParsedOption};

/// JSON keys that may hold the options array.
const OPTION_ARRAY_KEYS: [&str; 4] = ["options", "copys", "copies", "variations"];

/// Field-name synonyms probed per JSON element, in priority order.
const TITLE_KEYS: [&str; 3] = ["title", "headline", "titulo"];
const BODY_KEYS: [&str; 3] = ["body", "corpo", "text"];
const CTA_KEYS: [&str; 3] = ["cta", "call_to_action", "callToAction"];

/// A newline that begins a new enumerated item (`1. `, `2) `, `3: `, `4- `).
static ENUM_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\d+[).:\-]\s").unwrap());

/// Enumerator prefix stripped from each chunk.
static ENUM_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+[).:\-]\s*").unwrap());

/// Labeled-field extractors, Portuguese/English synonyms, case-insensitive.
static TITLE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:titulo|título|title|headline)\s*[:\-]\s*(.+)").unwrap());
static BODY_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:corpo|body|texto)\s*[:\-]\s*(.+)").unwrap());
static CTA_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:cta|call to action|call_to_action)\s*[:\-]\s*(.+)").unwrap());

/// Parses raw generation output into structured options.
///
/// Pure and deterministic. For any non-empty input the result has at least
/// one option; empty (or whitespace-only) input yields an empty list.
pub fn parse_options(text: &str) -> Vec<ParsedOption> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    if let Some(options) = parse_structured(trimmed) {
        return options;
    }

    let (chunks, enumerated) = split_numbered(trimmed);
    if chunks.is_empty() {
        // Input reduced to nothing after enumerator stripping: keep the
        // original text visible rather than returning nothing.
        return vec![ParsedOption {
            title: String::new(),
            body: trimmed.to_string(),
            cta: String::new(),
            raw: trimmed.to_string(),
            confidence: ParseConfidence::Degraded,
        }];
    }

    let confidence = if enumerated {
        ParseConfidence::Enumerated
    } else {
        ParseConfidence::Degraded
    };
    chunks
        .iter()
        .map(|chunk| option_from_chunk(chunk, confidence))
        .collect()
}

/// Stage 1: the whole text as strict JSON with a recognized options array.
///
/// An empty array counts as "no options" and falls through to the next
/// stage, preserving the at-least-one-option guarantee.
fn parse_structured(trimmed: &str) -> Option<Vec<ParsedOption>> {
    let value: Value = match serde_json::from_str(trimmed) {
        Ok(value) => value,
        Err(err) => {
            debug!(error = %err, "not strict JSON, falling back to numbered split");
            return None;
        }
    };

    let array = OPTION_ARRAY_KEYS
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_array))?;
    if array.is_empty() {
        return None;
    }

    Some(
        array
            .iter()
            .map(|element| ParsedOption {
                title: probe_str(element, &TITLE_KEYS),
                body: probe_str(element, &BODY_KEYS),
                cta: probe_str(element, &CTA_KEYS),
                raw: element.to_string(),
                confidence: ParseConfidence::Structured,
            })
            .collect(),
    )
}

/// First non-empty string value among the synonym keys.
fn probe_str(element: &Value, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| element.get(key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Stage 2: split on newlines that begin an enumerated item, stripping the
/// enumerator prefix from each chunk.
///
/// Returns the non-empty chunks and whether any enumerator pattern was seen
/// at all (drives the Enumerated/Degraded confidence tag).
fn split_numbered(trimmed: &str) -> (Vec<String>, bool) {
    let mut starts = vec![0usize];
    for boundary in ENUM_BOUNDARY.find_iter(trimmed) {
        // The match begins at the newline; the chunk starts just after it.
        starts.push(boundary.start() + 1);
    }
    let enumerated = starts.len() > 1 || ENUM_PREFIX.is_match(trimmed);

    let mut chunks = Vec::new();
    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).map_or(trimmed.len(), |&next| next);
        let chunk = ENUM_PREFIX.replace(&trimmed[start..end], "");
        let chunk = chunk.trim();
        if !chunk.is_empty() {
            chunks.push(chunk.to_string());
        }
    }
    (chunks, enumerated)
}

/// Stage 3: labeled-field extraction within one chunk.
///
/// Missing fields default to empty; when no body label is present the whole
/// chunk becomes the body.
fn option_from_chunk(chunk: &str, confidence: ParseConfidence) -> ParsedOption {
    let capture = |re: &Regex| -> String {
        re.captures(chunk)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default()
    };

    let title = capture(&TITLE_LABEL);
    let cta = capture(&CTA_LABEL);
    let body = {
        let labeled = capture(&BODY_LABEL);
        if labeled.is_empty() {
            chunk.to_string()
        } else {
            labeled
        }
    };

    ParsedOption {
        title,
        body,
        cta,
        raw: chunk.to_string(),
        confidence,
    }
}
