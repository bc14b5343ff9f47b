// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Number of shots in one capture session
pub const SESSION_SHOTS: usize = 3;

/// Countdown start value for each capture cycle, in seconds
pub const COUNTDOWN_START_SECS: u32 = 3;

/// Interval between countdown ticks
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Consecutive capture failures tolerated for one shot before the
/// sequence aborts with a hard error
pub const MAX_CAPTURE_RETRIES: u32 = 3;

/// An RGB color used by cosmetic palettes and the strip renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Inclusive legal range and neutral value for one filter adjustment
///
/// Every adjustment is independently bounded; levels outside the range are
/// clamped, never rejected. The neutral value is the identity for that
/// adjustment (e.g. brightness 100 leaves the image unchanged).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjustmentRange {
    pub min: u16,
    pub max: u16,
    pub neutral: u16,
}

impl AdjustmentRange {
    /// Clamp a level into the legal range
    pub fn clamp(&self, level: u16) -> u16 {
        level.clamp(self.min, self.max)
    }
}

/// Sepia intensity, percent
pub const SEPIA_RANGE: AdjustmentRange = AdjustmentRange {
    min: 0,
    max: 100,
    neutral: 0,
};

/// Grayscale intensity, percent
pub const GRAYSCALE_RANGE: AdjustmentRange = AdjustmentRange {
    min: 0,
    max: 100,
    neutral: 0,
};

/// Hue rotation, degrees
pub const HUE_ROTATE_RANGE: AdjustmentRange = AdjustmentRange {
    min: 0,
    max: 360,
    neutral: 0,
};

/// Color inversion, percent
pub const INVERT_RANGE: AdjustmentRange = AdjustmentRange {
    min: 0,
    max: 100,
    neutral: 0,
};

/// Brightness, percent of identity (100 = unchanged, 0 = black)
pub const BRIGHTNESS_RANGE: AdjustmentRange = AdjustmentRange {
    min: 0,
    max: 200,
    neutral: 100,
};

/// Contrast, percent of identity (100 = unchanged)
pub const CONTRAST_RANGE: AdjustmentRange = AdjustmentRange {
    min: 0,
    max: 200,
    neutral: 100,
};

/// Background gradient presets for the photobooth frame
///
/// Each preset is a three-stop diagonal gradient rendered behind the shots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BackgroundStyle {
    /// Amber → orange → red (default)
    #[default]
    Sunset,
    /// Sky → blue → indigo
    Ocean,
    /// Green → emerald → teal
    Meadow,
    /// Fuchsia → purple → violet
    Orchid,
    /// Neutral gray, no gradient
    Slate,
}

impl BackgroundStyle {
    /// All presets for UI iteration
    pub const ALL: [BackgroundStyle; 5] = [
        BackgroundStyle::Sunset,
        BackgroundStyle::Ocean,
        BackgroundStyle::Meadow,
        BackgroundStyle::Orchid,
        BackgroundStyle::Slate,
    ];

    /// Display name for the preset
    pub fn display_name(&self) -> &'static str {
        match self {
            BackgroundStyle::Sunset => "Sunset",
            BackgroundStyle::Ocean => "Ocean",
            BackgroundStyle::Meadow => "Meadow",
            BackgroundStyle::Orchid => "Orchid",
            BackgroundStyle::Slate => "Slate",
        }
    }

    /// Gradient stops (from, via, to)
    pub fn stops(&self) -> (Rgb, Rgb, Rgb) {
        match self {
            BackgroundStyle::Sunset => (
                Rgb::new(0xfb, 0xbf, 0x24),
                Rgb::new(0xfb, 0x92, 0x3c),
                Rgb::new(0xf8, 0x71, 0x71),
            ),
            BackgroundStyle::Ocean => (
                Rgb::new(0x38, 0xbd, 0xf8),
                Rgb::new(0x60, 0xa5, 0xfa),
                Rgb::new(0x81, 0x8c, 0xf8),
            ),
            BackgroundStyle::Meadow => (
                Rgb::new(0x4a, 0xde, 0x80),
                Rgb::new(0x34, 0xd3, 0x99),
                Rgb::new(0x2d, 0xd4, 0xbf),
            ),
            BackgroundStyle::Orchid => (
                Rgb::new(0xe8, 0x79, 0xf9),
                Rgb::new(0xc0, 0x84, 0xfc),
                Rgb::new(0xa7, 0x8b, 0xfa),
            ),
            BackgroundStyle::Slate => (
                Rgb::new(0x94, 0xa3, 0xb8),
                Rgb::new(0x94, 0xa3, 0xb8),
                Rgb::new(0x94, 0xa3, 0xb8),
            ),
        }
    }
}

/// Border color presets for the photobooth frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BorderStyle {
    /// Sky blue (default)
    #[default]
    Sky,
    /// Rose red
    Rose,
    /// Amber yellow
    Amber,
    /// Plain white
    White,
    /// Near-black
    Ink,
}

impl BorderStyle {
    /// All presets for UI iteration
    pub const ALL: [BorderStyle; 5] = [
        BorderStyle::Sky,
        BorderStyle::Rose,
        BorderStyle::Amber,
        BorderStyle::White,
        BorderStyle::Ink,
    ];

    /// Display name for the preset
    pub fn display_name(&self) -> &'static str {
        match self {
            BorderStyle::Sky => "Sky",
            BorderStyle::Rose => "Rose",
            BorderStyle::Amber => "Amber",
            BorderStyle::White => "White",
            BorderStyle::Ink => "Ink",
        }
    }

    /// Border color
    pub fn color(&self) -> Rgb {
        match self {
            BorderStyle::Sky => Rgb::new(0x38, 0xbd, 0xf8),
            BorderStyle::Rose => Rgb::new(0xfb, 0x71, 0x85),
            BorderStyle::Amber => Rgb::new(0xfb, 0xbf, 0x24),
            BorderStyle::White => Rgb::new(0xff, 0xff, 0xff),
            BorderStyle::Ink => Rgb::new(0x1e, 0x29, 0x3b),
        }
    }
}

/// Strip layout: border frame thickness in pixels
pub const STRIP_BORDER_PX: u32 = 10;

/// Strip layout: padding between the border and the shots, and between shots
pub const STRIP_PADDING_PX: u32 = 14;
