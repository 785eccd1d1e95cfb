// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `copydeck generate` command implementation.

use tracing::warn;

use copydeck_core::error::CopydeckError;
use copydeck_core::traits::GenerationService;
use copydeck_core::types::{CopyMeta, FormatSelection, GenerationRequest};
use copydeck_parser::parse_options;

use crate::app::App;

/// Run the `copydeck generate` command.
///
/// Generates copy for one slot, parses the output into options and records
/// all of it in the cache under the active client scope. The result is
/// discarded if a newer generation was issued for the same key while this
/// one was in flight.
pub async fn run(
    app: &App,
    platform: Option<String>,
    format: Option<String>,
    tone: Option<String>,
    instructions: Option<String>,
) -> Result<(), CopydeckError> {
    let studio = &app.config.studio;
    let generation_cfg = &app.config.generation;

    let slot = FormatSelection::new(
        platform.unwrap_or_else(|| studio.default_platform.clone()),
        format.unwrap_or_else(|| studio.default_format.clone()),
    );
    let key = slot.key();

    let request = GenerationRequest {
        briefing_id: studio.briefing_id.clone(),
        slot,
        client: None,
        tone: tone.or_else(|| generation_cfg.tone.clone()),
        extra_instructions: instructions,
        count: generation_cfg.count,
        pipeline: generation_cfg.pipeline.clone(),
        task_type: generation_cfg.task_type.clone(),
        force_provider: generation_cfg.force_provider.clone(),
    };

    let ticket = app.sequence.issue(&key);
    let version = app.generation.generate(&request).await?;
    if !app.sequence.is_current(&ticket) {
        warn!(key = key.as_str(), "generation superseded, discarding result");
        return Ok(());
    }

    let options = parse_options(&version.output);
    let meta = CopyMeta::from_version(&version);
    app.cache.record_generation(
        &key,
        studio.active_client_id.as_deref(),
        &version.output,
        options.clone(),
        meta.clone(),
    );

    let label = meta.provider_label();
    if label.is_empty() {
        println!("generated {} options for {}", options.len(), key.as_str());
    } else {
        println!(
            "generated {} options for {} via {label}",
            options.len(),
            key.as_str()
        );
    }
    for (index, option) in options.iter().enumerate() {
        let headline = if option.title.is_empty() {
            &option.body
        } else {
            &option.title
        };
        println!(
            "{}. [{}] {}",
            index + 1,
            option.confidence,
            copydeck_parser::clamp_text(headline, 80)
        );
    }
    Ok(())
}
