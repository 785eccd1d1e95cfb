// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plain-text cleanup helpers shared by the field and variant extractors.

use std::sync::LazyLock;

use regex::Regex;

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static UNDERLINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"__([^_]+)__").unwrap());
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());
static BLOCKQUOTE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^>\s?").unwrap());
static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\s*#{1,6}\s*").unwrap());
static MULTI_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Leading copy labels (PT/EN) stripped from cleaned text so captions read
/// as sentences instead of form output.
static COPY_LABELS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)(^|\n)\s*(t[ií]tulo|headline|chamada|assunto|corpo|mensagem|texto|cta|chamada\s+para\s+a[cç][aã]o)\s*[:\-–—]\s*",
    )
    .unwrap()
});

static LEFTOVER_MARKDOWN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[*_`~]+").unwrap());

/// Collapses all whitespace runs to single spaces and trims.
pub fn normalize_whitespace(value: &str) -> String {
    MULTI_SPACE.replace_all(value, " ").trim().to_string()
}

/// Removes common markdown decoration while keeping the inner text.
pub fn strip_markdown(value: &str) -> String {
    let value = BOLD.replace_all(value, "$1");
    let value = UNDERLINE.replace_all(&value, "$1");
    let value = INLINE_CODE.replace_all(&value, "$1");
    let value = BLOCKQUOTE.replace_all(&value, "");
    let value = HEADING.replace_all(&value, "");
    value.trim().to_string()
}

/// Markdown-stripped, label-stripped copy text ready for caption use.
pub fn clean_copy(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    let without_markdown = strip_markdown(value).replace('\r', "");
    let without_labels = COPY_LABELS.replace_all(&without_markdown, "$1");
    LEFTOVER_MARKDOWN
        .replace_all(&without_labels, "")
        .trim()
        .to_string()
}

/// Truncates to `max` characters, appending `…` when cut. A zero budget
/// yields the empty string.
pub fn clamp_text(value: &str, max: usize) -> String {
    let normalized = normalize_whitespace(value);
    if normalized.chars().count() <= max {
        return normalized;
    }
    if max == 0 {
        return String::new();
    }
    let cut: String = normalized.chars().take(max - 1).collect();
    format!("{cut}…")
}
