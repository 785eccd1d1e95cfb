// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resilient parsing of AI-generated copy text.
//!
//! The generation service is not schema-constrained, so everything here is
//! total: malformed input degrades to a broader match instead of erroring.
//! [`parse_options`] structures one generation output into creative
//! options; the `fields`/`variants`/`text` modules handle free-form copy
//! text downstream of option selection.

pub mod fields;
pub mod options;
pub mod text;
pub mod variants;

pub use fields::{extract_copy_fields, CopyFields};
pub use options::parse_options;
pub use text::{clamp_text, clean_copy, normalize_whitespace, strip_markdown};
pub use variants::extract_copy_variants;
