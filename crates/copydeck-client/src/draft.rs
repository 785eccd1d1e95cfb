// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record draft assembly: turning a local asset plus its cached copy into
//! the persistence payload the server expects.

use serde_json::json;

use copydeck_core::types::{ClientRef, LocalAsset, RecordDraft};
use copydeck_parser::{clamp_text, extract_copy_fields, extract_copy_variants, normalize_whitespace};

/// Maximum length of the short-text summary stored in record metadata.
const SHORT_TEXT_LIMIT: usize = 120;

/// Builds the create/patch payload for one asset.
///
/// `raw_copy` is the cached copy text for the asset's key; `variant_index`
/// selects one numbered variant out of it (out-of-range falls back to the
/// whole text). The caption is the variant's body, label-stripped and
/// whitespace-normalized.
pub fn build_record_draft(
    asset: &LocalAsset,
    raw_copy: &str,
    variant_index: usize,
    client: Option<&ClientRef>,
    production_type: Option<&str>,
) -> RecordDraft {
    let variants = extract_copy_variants(raw_copy);
    let variant = variants
        .get(variant_index)
        .map(String::as_str)
        .unwrap_or(raw_copy);

    let fields = extract_copy_fields(variant);
    let caption_source = if !fields.body.is_empty() {
        fields.body.as_str()
    } else if !fields.full_text.is_empty() {
        fields.full_text.as_str()
    } else {
        raw_copy
    };
    let caption = normalize_whitespace(caption_source);

    let short_source = if !fields.headline.is_empty() {
        fields.headline.clone()
    } else if !caption.is_empty() {
        caption.clone()
    } else {
        format!("{} {}", asset.platform, asset.format)
    };
    let short_text = clamp_text(&short_source, SHORT_TEXT_LIMIT);

    let status = asset
        .status
        .clone()
        .unwrap_or_else(|| if asset.generated { "saved" } else { "draft" }.to_string());
    let title = asset
        .title
        .clone()
        .unwrap_or_else(|| format!("{} • {}", asset.platform, asset.format));

    let copy = if caption.is_empty() {
        raw_copy.to_string()
    } else {
        caption
    };

    RecordDraft {
        platform: asset.platform.clone(),
        format: asset.format.clone(),
        production_type: production_type
            .filter(|p| !p.is_empty())
            .map(str::to_string),
        status: Some(status),
        title: Some(title),
        metadata: json!({
            "copy": copy,
            "shortText": short_text,
            "platform": asset.platform,
            "format": asset.format,
            "productionType": production_type.filter(|p| !p.is_empty()),
            "client": client.map(|c| c.name.clone()).unwrap_or_default(),
            "clientId": client.map(|c| c.id.clone()).unwrap_or_default(),
            "updatedAt": chrono::Utc::now().to_rfc3339(),
            "source": "copydeck",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset() -> LocalAsset {
        LocalAsset::shell("Instagram", "Feed")
    }

    #[test]
    fn draft_carries_caption_and_short_text() {
        let raw = "Headline: Fresh drops\nCorpo: New collection out now.\nCTA: Shop today";
        let draft = build_record_draft(&asset(), raw, 0, None, None);

        assert_eq!(draft.platform, "Instagram");
        assert_eq!(draft.metadata["copy"], "New collection out now.");
        assert_eq!(draft.metadata["shortText"], "Fresh drops");
        assert_eq!(draft.metadata["source"], "copydeck");
    }

    #[test]
    fn variant_index_selects_one_option() {
        let raw = "1. First option body\n2. Second option body";
        let first = build_record_draft(&asset(), raw, 0, None, None);
        let second = build_record_draft(&asset(), raw, 1, None, None);

        assert!(first.metadata["copy"]
            .as_str()
            .unwrap()
            .contains("First option"));
        assert!(second.metadata["copy"]
            .as_str()
            .unwrap()
            .contains("Second option"));
    }

    #[test]
    fn out_of_range_variant_falls_back_to_whole_text() {
        let raw = "single paragraph of copy";
        let draft = build_record_draft(&asset(), raw, 7, None, None);
        assert_eq!(draft.metadata["copy"], "single paragraph of copy");
    }

    #[test]
    fn status_defaults_from_generated_flag() {
        let mut generated = asset();
        generated.generated = true;
        let draft = build_record_draft(&generated, "text", 0, None, None);
        assert_eq!(draft.status.as_deref(), Some("saved"));

        let draft = build_record_draft(&asset(), "text", 0, None, None);
        assert_eq!(draft.status.as_deref(), Some("draft"));
    }

    #[test]
    fn empty_copy_short_text_names_the_slot() {
        let draft = build_record_draft(&asset(), "", 0, None, None);
        assert_eq!(draft.metadata["shortText"], "Instagram Feed");
        assert_eq!(draft.title.as_deref(), Some("Instagram • Feed"));
    }

    #[test]
    fn client_context_lands_in_metadata() {
        let client = ClientRef {
            id: "acme".to_string(),
            name: "Acme".to_string(),
            segment: None,
        };
        let draft = build_record_draft(&asset(), "text", 0, Some(&client), Some("organic"));
        assert_eq!(draft.metadata["client"], "Acme");
        assert_eq!(draft.metadata["clientId"], "acme");
        assert_eq!(draft.production_type.as_deref(), Some("organic"));
    }
}
