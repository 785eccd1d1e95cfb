// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Splitting one copy blob into its presentation variants.
//!
//! Generation output sometimes packs several alternatives into a single
//! text: numbered items, `Opção N` / `Variação N` headers, or `---`
//! separators. Two or more markers are required before a split happens;
//! a single marker is treated as formatting noise.

use std::sync::LazyLock;

use regex::Regex;

/// Inline enumerators that should start a new line before marker scanning.
static BREAK_BEFORE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^\n])\s+(\d{1,2}[.)]\s+)").unwrap());
static BREAK_BEFORE_DASH_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^\n])\s+(\d{1,2}\s*[-–—]\s+)").unwrap());
static BREAK_BEFORE_OPTION_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([^\n])\s+(op[cç][aã]?o\s*\d+|varia[cç][aã]o\s*\d+)\s*[:\-–—]?\s*").unwrap()
});

/// A variant marker at line start: `1.`, `2)`, `3 -`, `Opção 4`, `Variação 5`.
static VARIANT_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:^|\n)\s*(?:\d{1,2}[.)]|\d{1,2}\s*[-–—]|op[cç][aã]?o\s*\d+|varia[cç][aã]o\s*\d+)\s*[:\-–—]?\s*",
    )
    .unwrap()
});

static SEPARATOR_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n---+\n").unwrap());

/// Splits a copy blob into its variants. Returns the whole (normalized)
/// text as a single variant when no splitting markers are found.
pub fn extract_copy_variants(raw: &str) -> Vec<String> {
    let normalized = raw.replace('\r', "");
    let normalized = normalized.trim();
    if normalized.is_empty() {
        return Vec::new();
    }

    let with_breaks = BREAK_BEFORE_NUMBER.replace_all(normalized, "${1}\n${2}");
    let with_breaks = BREAK_BEFORE_DASH_NUMBER.replace_all(&with_breaks, "${1}\n${2}");
    let with_breaks = BREAK_BEFORE_OPTION_LABEL.replace_all(&with_breaks, "${1}\n${2} ");

    let markers: Vec<_> = VARIANT_MARKER.find_iter(&with_breaks).collect();
    if markers.len() >= 2 {
        let starts: Vec<usize> = markers.iter().map(|m| m.start()).collect();
        let variants: Vec<String> = starts
            .iter()
            .enumerate()
            .map(|(i, &start)| {
                let end = starts.get(i + 1).copied().unwrap_or(with_breaks.len());
                VARIANT_MARKER
                    .replace_all(&with_breaks[start..end], "")
                    .trim()
                    .to_string()
            })
            .filter(|v| !v.is_empty())
            .collect();
        if !variants.is_empty() {
            return variants;
        }
    }

    if SEPARATOR_LINE.is_match(&with_breaks) {
        let parts: Vec<String> = SEPARATOR_LINE
            .split(&with_breaks)
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() > 1 {
            return parts;
        }
    }

    vec![with_breaks.to_string()]
}
