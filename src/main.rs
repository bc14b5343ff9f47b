// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};

mod cli;

#[derive(Parser)]
#[command(name = "photobooth")]
#[command(about = "Multi-shot photobooth capture and sharing demo")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a capture session against the synthetic test feed
    Capture(cli::CaptureArgs),

    /// List overlays and cosmetic palettes
    List,

    /// Walk the reaction toggle protocol against an in-memory store
    Reactions,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=photobooth=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Capture(args) => cli::run_capture(args).await,
        Commands::List => {
            cli::list_styles();
            Ok(())
        }
        Commands::Reactions => cli::run_reactions_demo().await,
    }
}
