// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Label-driven extraction of headline/body/cta from free-form copy text.
//!
//! Unlike the Option Parser, which structures one generation output into
//! options, this scanner works on a single option's text: labeled lines
//! switch the current field, unlabeled lines continue it, and leading
//! unlabeled lines become headline then body.

use std::sync::LazyLock;

use regex::Regex;

use crate::text::{clean_copy, normalize_whitespace, strip_markdown};

/// Fields extracted from one copy variant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CopyFields {
    pub headline: String,
    pub body: String,
    pub cta: String,
    /// The cleaned full text, for callers that need the uncut caption.
    pub full_text: String,
}

static HEADLINE_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:t[ií]tulo|headline|chamada|assunto)\s*[:\-]\s*").unwrap()
});
static BODY_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:corpo|mensagem|texto)\s*[:\-]\s*").unwrap());
static CTA_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:cta|chamada\s+para\s+a[cç][aã]o|acao)\s*[:\-]\s*").unwrap()
});

#[derive(Clone, Copy, PartialEq)]
enum Field {
    Headline,
    Body,
    Cta,
}

/// Extracts headline/body/cta from free-form copy text.
///
/// The scanner sees markdown-stripped text so `Título:` lines still carry
/// their labels; `full_text` is the fully cleaned caption-ready copy.
pub fn extract_copy_fields(raw: &str) -> CopyFields {
    let scannable = strip_markdown(raw).replace('\r', "");
    let mut headline = String::new();
    let mut body = String::new();
    let mut cta = String::new();
    let mut current: Option<Field> = None;

    let append = |target: &mut String, value: &str| {
        if value.is_empty() {
            return;
        }
        if target.is_empty() {
            target.push_str(value);
        } else {
            target.push(' ');
            target.push_str(value);
        }
    };

    for line in scannable.lines() {
        let line = normalize_whitespace(line);
        if line.is_empty() {
            continue;
        }

        let matched = [
            (Field::Headline, &HEADLINE_LABEL),
            (Field::Body, &BODY_LABEL),
            (Field::Cta, &CTA_LABEL),
        ]
        .iter()
        .find(|(_, re)| re.is_match(&line))
        .map(|(field, re)| (*field, re.replace(&line, "").trim().to_string()));

        if let Some((field, value)) = matched {
            current = Some(field);
            let target = match field {
                Field::Headline => &mut headline,
                Field::Body => &mut body,
                Field::Cta => &mut cta,
            };
            append(target, &value);
            continue;
        }

        match current {
            Some(Field::Headline) => append(&mut headline, &line),
            Some(Field::Body) => append(&mut body, &line),
            Some(Field::Cta) => append(&mut cta, &line),
            None => {
                // Unlabeled leading lines: first is the headline, the rest
                // accumulate as body.
                if headline.is_empty() {
                    headline = line;
                } else {
                    append(&mut body, &line);
                }
            }
        }
    }

    CopyFields {
        headline,
        body,
        cta,
        full_text: clean_copy(raw),
    }
}
