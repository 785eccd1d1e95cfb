// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `copydeck show` command implementation.

use copydeck_core::error::CopydeckError;
use copydeck_core::types::AssetKey;

use crate::app::App;

/// Run the `copydeck show` command: cached copy, parsed options and
/// generation metadata for one slot.
pub fn run(app: &App, platform: &str, format: &str) -> Result<(), CopydeckError> {
    let key = AssetKey::new(platform, format);
    let client_id = app.config.studio.active_client_id.as_deref();

    let copy = app.cache.copy_for(&key, client_id);
    if copy.trim().is_empty() {
        println!("no copy cached for {}", key.as_str());
        return Ok(());
    }

    if let Some(meta) = app.cache.meta_for(&key, client_id) {
        let label = meta.provider_label();
        if !label.is_empty() {
            println!("{} ({label})", key.as_str());
        } else {
            println!("{}", key.as_str());
        }
    } else {
        println!("{}", key.as_str());
    }
    println!();
    println!("{copy}");

    let options = app.cache.options_for(&key, client_id);
    if !options.is_empty() {
        println!();
        println!("parsed options:");
        for (index, option) in options.iter().enumerate() {
            println!("{}. [{}]", index + 1, option.confidence);
            if !option.title.is_empty() {
                println!("   title: {}", option.title);
            }
            if !option.body.is_empty() {
                println!("   body:  {}", option.body);
            }
            if !option.cta.is_empty() {
                println!("   cta:   {}", option.cta);
            }
        }
    }
    Ok(())
}
