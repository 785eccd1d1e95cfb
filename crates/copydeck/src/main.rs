// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Copydeck binary entry point.

use clap::{Parser, Subcommand};

mod app;
mod generate;
mod progress;
mod reconcile;
mod show;

use app::App;

/// Copy studio pipeline: generate, reconcile and persist creative assets.
#[derive(Parser, Debug)]
#[command(name = "copydeck", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Merge the local asset list with the inventory and server records.
    Reconcile {
        /// Briefing to filter server records by (defaults to config).
        #[arg(long)]
        briefing_id: Option<String>,
        /// Client to filter server records by (defaults to config).
        #[arg(long)]
        client_id: Option<String>,
        /// Replace the inventory with these "Platform: Format" slots first.
        #[arg(long = "slot")]
        slots: Vec<String>,
    },
    /// Generate copy options for one slot.
    Generate {
        /// Platform of the slot (defaults to config).
        #[arg(long)]
        platform: Option<String>,
        /// Format of the slot (defaults to config).
        #[arg(long)]
        format: Option<String>,
        /// Tone of voice directive.
        #[arg(long)]
        tone: Option<String>,
        /// Extra free-form instructions.
        #[arg(long)]
        instructions: Option<String>,
    },
    /// Show how many inventory slots already have copy.
    Progress,
    /// Show cached copy, options and metadata for one slot.
    Show {
        platform: String,
        format: String,
    },
}

#[tokio::main]
async fn main() {
    init_tracing();

    let config = match copydeck_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            copydeck_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let cli = Cli::parse();

    let app = match App::init(config).await {
        Ok(app) => app,
        Err(err) => {
            eprintln!("copydeck: {err}");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Reconcile {
            briefing_id,
            client_id,
            slots,
        } => reconcile::run(&app, briefing_id, client_id, &slots).await,
        Commands::Generate {
            platform,
            format,
            tone,
            instructions,
        } => generate::run(&app, platform, format, tone, instructions).await,
        Commands::Progress => progress::run(&app),
        Commands::Show { platform, format } => show::run(&app, &platform, &format),
    };

    let shutdown = app.shutdown().await;

    if let Err(err) = result {
        eprintln!("copydeck: {err}");
        std::process::exit(1);
    }
    if let Err(err) = shutdown {
        eprintln!("copydeck: {err}");
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber. `RUST_LOG` overrides the default
/// filter.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("copydeck=info,warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_reconcile_with_repeated_slots() {
        let cli = Cli::try_parse_from([
            "copydeck",
            "reconcile",
            "--briefing-id",
            "b1",
            "--slot",
            "Instagram: Feed",
            "--slot",
            "TikTok: Video",
        ])
        .unwrap();
        match cli.command {
            Commands::Reconcile {
                briefing_id, slots, ..
            } => {
                assert_eq!(briefing_id.as_deref(), Some("b1"));
                assert_eq!(slots.len(), 2);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_parses_show_positionals() {
        let cli = Cli::try_parse_from(["copydeck", "show", "Instagram", "Feed"]).unwrap();
        match cli.command {
            Commands::Show { platform, format } => {
                assert_eq!(platform, "Instagram");
                assert_eq!(format, "Feed");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = copydeck_config::load_and_validate_str("")
            .expect("default config should be valid");
        assert_eq!(config.studio.default_platform, "Instagram");
    }
}
