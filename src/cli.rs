// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for the photobooth demo
//!
//! This module provides command-line functionality for:
//! - Running a complete capture session against the synthetic feed
//! - Listing overlays and cosmetic palettes
//! - Walking the reaction toggle protocol against an in-memory store

use photobooth::backends::camera::{CameraFeed, TestPatternFeed};
use photobooth::backends::store::{MemoryStore, PhotoStore, UserId};
use photobooth::config::Config;
use photobooth::constants::{
    BackgroundStyle, BorderStyle, COUNTDOWN_START_SECS, SESSION_SHOTS,
};
use photobooth::filters::FilterSettings;
use photobooth::overlay::OverlayId;
use photobooth::pipelines::export::{DirectorySprites, NoSprites, export_session};
use photobooth::pipelines::publish::publish;
use photobooth::reactions::{ReactionAggregate, ReactionKind, submit_toggle};
use photobooth::session::engine::{SessionEngine, TickOutcome};
use photobooth::session::timer::Countdown;
use std::path::PathBuf;
use std::time::Duration;

/// Options for the `capture` subcommand
#[derive(clap::Args)]
pub struct CaptureArgs {
    /// Title for publishing; omit to only export the strip
    #[arg(short, long)]
    pub title: Option<String>,

    /// Overlay key (axolotl, minecraft, cat, bear, gamer, demon-slayer, none)
    #[arg(long)]
    pub overlay: Option<String>,

    /// Output directory (default: ~/Pictures/photobooth)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory with sprite art (<dir>/<overlay>/<asset>.png)
    #[arg(long)]
    pub sprites: Option<PathBuf>,

    /// Countdown tick length in milliseconds
    #[arg(long, default_value = "1000")]
    pub tick_ms: u64,

    /// Sepia level, 0-100
    #[arg(long, default_value = "0")]
    pub sepia: u16,

    /// Grayscale level, 0-100
    #[arg(long, default_value = "0")]
    pub grayscale: u16,

    /// Hue rotation in degrees, 0-360
    #[arg(long, default_value = "0")]
    pub hue_rotate: u16,

    /// Inversion level, 0-100
    #[arg(long, default_value = "0")]
    pub invert: u16,

    /// Brightness, 0-200 (100 = unchanged)
    #[arg(long, default_value = "100")]
    pub brightness: u16,

    /// Contrast, 0-200 (100 = unchanged)
    #[arg(long, default_value = "100")]
    pub contrast: u16,

    /// Open the exported strip when done
    #[arg(long)]
    pub open: bool,
}

/// Run a scripted capture session against the synthetic test feed
pub async fn run_capture(args: CaptureArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load();

    let overlay = match &args.overlay {
        Some(key) => key.parse::<OverlayId>()?,
        None => config.last_overlay,
    };

    let mut feed = TestPatternFeed::new(640, 480);
    let mut engine = SessionEngine::new();
    engine.select_overlay(overlay);
    engine.set_background(config.last_background);
    engine.set_border(config.last_border);
    engine.set_filter(FilterSettings {
        sepia: args.sepia,
        grayscale: args.grayscale,
        hue_rotate: args.hue_rotate,
        invert: args.invert,
        brightness: args.brightness,
        contrast: args.contrast,
    });

    println!(
        "Capturing {} shots with overlay '{}'...",
        SESSION_SHOTS, overlay
    );
    engine.start_sequence(feed.is_ready())?;

    while !engine.session().is_complete() {
        println!("  {}", COUNTDOWN_START_SECS);
        let mut countdown =
            Countdown::start(COUNTDOWN_START_SECS, Duration::from_millis(args.tick_ms));
        while let Some(remaining) = countdown.next_tick().await {
            match engine.tick() {
                Some(TickOutcome::Continue(_)) => println!("  {}", remaining),
                Some(TickOutcome::Capture) => {
                    engine.capture_one(&mut feed)?;
                    println!(
                        "  \u{1f4f8} shot {} of {}",
                        engine.session().shots_taken(),
                        SESSION_SHOTS
                    );
                    break;
                }
                None => break,
            }
        }
    }

    // Export the strip; a failed export is reported, never fatal
    let output = args.output.unwrap_or_else(|| config.export_dir());
    let exported = match &args.sprites {
        Some(root) => {
            export_session(engine.session(), &DirectorySprites::new(root), &output).await
        }
        None => export_session(engine.session(), &NoSprites, &output).await,
    };
    match exported {
        Ok(path) => {
            println!("Strip saved to {}", path.display());
            if args.open || config.reveal_after_export {
                open::that_detached(&path)?;
            }
        }
        Err(error) => eprintln!("Export failed: {}", error),
    }

    // Publish when a title was given
    if let Some(title) = &args.title {
        let mut store = MemoryStore::new();
        let author = UserId::new();
        let author_name = if config.display_name.is_empty() {
            "demo"
        } else {
            &config.display_name
        };
        let id = publish(&mut engine, &mut store, title, author, author_name).await?;
        let photo = store.photo(id).expect("just published");
        println!(
            "Published '{}' as {} ({} images, {} filter snapshots)",
            photo.title,
            id,
            photo.images.len(),
            photo.filters.len()
        );
    }

    // Remember cosmetic choices for the next run
    config.last_overlay = overlay;
    if let Err(error) = config.save() {
        eprintln!("Warning: config not saved: {}", error);
    }

    Ok(())
}

/// List overlays and cosmetic palettes
pub fn list_styles() {
    println!("Overlays:");
    for overlay in OverlayId::ALL {
        println!("  {:<14} ({})", overlay.key(), overlay.display_name());
    }

    println!();
    println!("Backgrounds:");
    for background in BackgroundStyle::ALL {
        let (from, _, to) = background.stops();
        println!(
            "  {:<8} #{:02x}{:02x}{:02x} → #{:02x}{:02x}{:02x}",
            background.display_name(),
            from.r,
            from.g,
            from.b,
            to.r,
            to.g,
            to.b
        );
    }

    println!();
    println!("Borders:");
    for border in BorderStyle::ALL {
        let color = border.color();
        println!(
            "  {:<8} #{:02x}{:02x}{:02x}",
            border.display_name(),
            color.r,
            color.g,
            color.b
        );
    }
}

/// Walk the reaction toggle protocol against an in-memory store
pub async fn run_reactions_demo() -> Result<(), Box<dyn std::error::Error>> {
    let mut store = MemoryStore::new();

    // Publish a photo to react to
    let mut feed = TestPatternFeed::new(64, 48);
    let mut engine = SessionEngine::new();
    engine.start_sequence(feed.is_ready())?;
    while !engine.session().is_complete() {
        while let Some(outcome) = engine.tick() {
            if outcome == TickOutcome::Capture {
                engine.capture_one(&mut feed)?;
                break;
            }
        }
    }
    let author = UserId::new();
    let photo = publish(&mut engine, &mut store, "Demo strip", author, "demo").await?;

    let viewer = UserId::new();
    let steps = [
        ("first reaction", ReactionKind::Heart),
        ("switch kind", ReactionKind::Sad),
        ("toggle off", ReactionKind::Sad),
        ("react again", ReactionKind::Wow),
    ];

    for (label, kind) in steps {
        let action = submit_toggle(&mut store, viewer, photo, kind).await?;
        let records = store.fetch_reactions(&[photo]).await?;
        let aggregate = ReactionAggregate::for_photo(photo, &records);
        println!(
            "{:<15} {:?} → {:?}  (hearts {}, sad {}, cool {}, wow {})",
            label, kind, action, aggregate.heart, aggregate.sad, aggregate.cool, aggregate.wow
        );
    }

    Ok(())
}
