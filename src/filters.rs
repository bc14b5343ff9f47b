// SPDX-License-Identifier: GPL-3.0-only

//! Filter model: adjustment levels and the render transform they produce
//!
//! [`FilterSettings`] is the user-facing record of six named adjustment
//! levels. [`RenderTransform`] is the pure, deterministic transform derived
//! from it: an ordered chain of adjustment operations that a live preview
//! surface can describe (via [`fmt::Display`]) and a static renderer can
//! apply pixel-by-pixel to RGBA data. Deriving the transform twice from the
//! same settings yields an identical chain.

use crate::constants::{
    BRIGHTNESS_RANGE, CONTRAST_RANGE, GRAYSCALE_RANGE, HUE_ROTATE_RANGE, INVERT_RANGE, SEPIA_RANGE,
};
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The six filter adjustment levels for one shot
///
/// Always fully populated; [`FilterSettings::default`] is the all-neutral
/// value and [`FilterSettings::reset`] restores every field at once.
/// Levels outside an adjustment's legal range are clamped when the
/// transform is derived, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSettings {
    /// Sepia intensity, 0-100
    pub sepia: u16,
    /// Grayscale intensity, 0-100
    pub grayscale: u16,
    /// Hue rotation in degrees, 0-360
    pub hue_rotate: u16,
    /// Color inversion, 0-100
    pub invert: u16,
    /// Brightness, 0-200 (100 = unchanged)
    pub brightness: u16,
    /// Contrast, 0-200 (100 = unchanged)
    pub contrast: u16,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            sepia: SEPIA_RANGE.neutral,
            grayscale: GRAYSCALE_RANGE.neutral,
            hue_rotate: HUE_ROTATE_RANGE.neutral,
            invert: INVERT_RANGE.neutral,
            brightness: BRIGHTNESS_RANGE.neutral,
            contrast: CONTRAST_RANGE.neutral,
        }
    }
}

impl FilterSettings {
    /// Whether every adjustment sits at its neutral value
    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }

    /// Reset every adjustment to its neutral default simultaneously
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Return a copy with every level clamped into its legal range
    pub fn clamped(&self) -> Self {
        Self {
            sepia: SEPIA_RANGE.clamp(self.sepia),
            grayscale: GRAYSCALE_RANGE.clamp(self.grayscale),
            hue_rotate: HUE_ROTATE_RANGE.clamp(self.hue_rotate),
            invert: INVERT_RANGE.clamp(self.invert),
            brightness: BRIGHTNESS_RANGE.clamp(self.brightness),
            contrast: CONTRAST_RANGE.clamp(self.contrast),
        }
    }

    /// Flatten the six levels into a display-friendly string list,
    /// in declaration order
    pub fn display_list(&self) -> Vec<String> {
        vec![
            self.sepia.to_string(),
            self.grayscale.to_string(),
            self.hue_rotate.to_string(),
            self.invert.to_string(),
            self.brightness.to_string(),
            self.contrast.to_string(),
        ]
    }

    /// Parse a flattened six-entry list back into settings
    ///
    /// The inverse of [`display_list`](Self::display_list). Used when
    /// re-rendering a stored photo's snapshots.
    pub fn from_display_list(levels: &[String]) -> Result<Self, crate::errors::ValidationError> {
        use crate::errors::ValidationError;

        if levels.len() != 6 {
            return Err(ValidationError::MalformedAdjustment(format!(
                "expected 6 levels, got {}",
                levels.len()
            )));
        }
        let mut parsed = [0u16; 6];
        for (slot, level) in parsed.iter_mut().zip(levels) {
            *slot = level
                .parse::<u16>()
                .map_err(|_| ValidationError::MalformedAdjustment(level.clone()))?;
        }
        Ok(Self {
            sepia: parsed[0],
            grayscale: parsed[1],
            hue_rotate: parsed[2],
            invert: parsed[3],
            brightness: parsed[4],
            contrast: parsed[5],
        }
        .clamped())
    }
}

/// One adjustment operation with its normalized magnitude
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterOp {
    /// Invert colors, amount 0.0-1.0
    Invert(f32),
    /// Multiply channels, factor 0.0-2.0 (1.0 = identity)
    Brightness(f32),
    /// Sepia tone, amount 0.0-1.0
    Sepia(f32),
    /// Rotate hue, radians
    HueRotate(f32),
    /// Desaturate toward luminance, amount 0.0-1.0
    Grayscale(f32),
    /// Scale contrast around mid-gray, factor 0.0-2.0 (1.0 = identity)
    Contrast(f32),
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterOp::Invert(a) => write!(f, "invert({})", a),
            FilterOp::Brightness(v) => write!(f, "brightness({})", v),
            FilterOp::Sepia(a) => write!(f, "sepia({})", a),
            FilterOp::HueRotate(rad) => write!(f, "hue-rotate({}deg)", rad.to_degrees().round()),
            FilterOp::Grayscale(a) => write!(f, "grayscale({})", a),
            FilterOp::Contrast(v) => write!(f, "contrast({})", v),
        }
    }
}

/// Ordered chain of adjustment operations derived from [`FilterSettings`]
///
/// Neutral adjustments are skipped, so the chain for default settings is
/// empty and [`RenderTransform::is_identity`] holds.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderTransform {
    ops: Vec<FilterOp>,
}

impl RenderTransform {
    /// Derive the transform for a set of adjustment levels
    ///
    /// Pure: identical settings always produce an identical chain. Levels
    /// outside their legal range are clamped first. Operations are chained
    /// in a fixed order so the composed result is stable regardless of the
    /// order the user changed the levels in.
    pub fn from_settings(settings: &FilterSettings) -> Self {
        let s = settings.clamped();
        let mut ops = Vec::new();

        if s.invert != INVERT_RANGE.neutral {
            ops.push(FilterOp::Invert(f32::from(s.invert) / 100.0));
        }
        if s.brightness != BRIGHTNESS_RANGE.neutral {
            ops.push(FilterOp::Brightness(f32::from(s.brightness) / 100.0));
        }
        if s.sepia != SEPIA_RANGE.neutral {
            ops.push(FilterOp::Sepia(f32::from(s.sepia) / 100.0));
        }
        if s.hue_rotate != HUE_ROTATE_RANGE.neutral {
            ops.push(FilterOp::HueRotate(f32::from(s.hue_rotate).to_radians()));
        }
        if s.grayscale != GRAYSCALE_RANGE.neutral {
            ops.push(FilterOp::Grayscale(f32::from(s.grayscale) / 100.0));
        }
        if s.contrast != CONTRAST_RANGE.neutral {
            ops.push(FilterOp::Contrast(f32::from(s.contrast) / 100.0));
        }

        Self { ops }
    }

    /// Whether the chain performs no work
    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }

    /// The operations in application order
    pub fn ops(&self) -> &[FilterOp] {
        &self.ops
    }

    /// Apply the chain in place to an RGBA image
    ///
    /// Alpha is preserved; only color channels are adjusted.
    pub fn apply_to_image(&self, image: &mut RgbaImage) {
        if self.is_identity() {
            return;
        }
        for pixel in image.pixels_mut() {
            let rgb = self.apply_to_pixel([pixel[0], pixel[1], pixel[2]]);
            pixel[0] = rgb[0];
            pixel[1] = rgb[1];
            pixel[2] = rgb[2];
        }
    }

    /// Apply the chain to a single RGB pixel
    pub fn apply_to_pixel(&self, rgb: [u8; 3]) -> [u8; 3] {
        let mut r = f32::from(rgb[0]);
        let mut g = f32::from(rgb[1]);
        let mut b = f32::from(rgb[2]);

        for op in &self.ops {
            match *op {
                FilterOp::Invert(a) => {
                    r += (255.0 - 2.0 * r) * a;
                    g += (255.0 - 2.0 * g) * a;
                    b += (255.0 - 2.0 * b) * a;
                }
                FilterOp::Brightness(v) => {
                    r *= v;
                    g *= v;
                    b *= v;
                }
                FilterOp::Sepia(a) => {
                    let sr = 0.393 * r + 0.769 * g + 0.189 * b;
                    let sg = 0.349 * r + 0.686 * g + 0.168 * b;
                    let sb = 0.272 * r + 0.534 * g + 0.131 * b;
                    r += (sr - r) * a;
                    g += (sg - g) * a;
                    b += (sb - b) * a;
                }
                FilterOp::HueRotate(rad) => {
                    let (sin, cos) = rad.sin_cos();
                    // Hue rotation matrix around the luminance axis
                    let nr = (0.213 + cos * 0.787 - sin * 0.213) * r
                        + (0.715 - cos * 0.715 - sin * 0.715) * g
                        + (0.072 - cos * 0.072 + sin * 0.928) * b;
                    let ng = (0.213 - cos * 0.213 + sin * 0.143) * r
                        + (0.715 + cos * 0.285 + sin * 0.140) * g
                        + (0.072 - cos * 0.072 - sin * 0.283) * b;
                    let nb = (0.213 - cos * 0.213 - sin * 0.787) * r
                        + (0.715 - cos * 0.715 + sin * 0.715) * g
                        + (0.072 + cos * 0.928 + sin * 0.072) * b;
                    r = nr;
                    g = ng;
                    b = nb;
                }
                FilterOp::Grayscale(a) => {
                    let gray = 0.299 * r + 0.587 * g + 0.114 * b;
                    r += (gray - r) * a;
                    g += (gray - g) * a;
                    b += (gray - b) * a;
                }
                FilterOp::Contrast(v) => {
                    r = (r - 128.0) * v + 128.0;
                    g = (g - 128.0) * v + 128.0;
                    b = (b - 128.0) * v + 128.0;
                }
            }
            r = r.clamp(0.0, 255.0);
            g = g.clamp(0.0, 255.0);
            b = b.clamp(0.0, 255.0);
        }

        [r as u8, g as u8, b as u8]
    }
}

impl fmt::Display for RenderTransform {
    /// CSS-filter-style description, e.g. `brightness(1.2) sepia(0.5)`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ops.is_empty() {
            return write!(f, "none");
        }
        for (i, op) in self.ops.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", op)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_neutral() {
        let settings = FilterSettings::default();
        assert!(settings.is_neutral());
        assert!(RenderTransform::from_settings(&settings).is_identity());
    }

    #[test]
    fn test_transform_is_deterministic() {
        let settings = FilterSettings {
            sepia: 50,
            brightness: 120,
            ..Default::default()
        };
        assert_eq!(
            RenderTransform::from_settings(&settings),
            RenderTransform::from_settings(&settings)
        );
    }

    #[test]
    fn test_out_of_range_levels_clamp() {
        let settings = FilterSettings {
            sepia: 400,
            hue_rotate: 900,
            brightness: 999,
            ..Default::default()
        };
        let clamped = settings.clamped();
        assert_eq!(clamped.sepia, 100);
        assert_eq!(clamped.hue_rotate, 360);
        assert_eq!(clamped.brightness, 200);
    }

    #[test]
    fn test_brightness_zero_darkens_fully() {
        let settings = FilterSettings {
            brightness: 0,
            ..Default::default()
        };
        let transform = RenderTransform::from_settings(&settings);
        assert_eq!(transform.apply_to_pixel([200, 150, 90]), [0, 0, 0]);
    }

    #[test]
    fn test_full_invert_flips_channels() {
        let settings = FilterSettings {
            invert: 100,
            ..Default::default()
        };
        let transform = RenderTransform::from_settings(&settings);
        assert_eq!(transform.apply_to_pixel([255, 0, 10]), [0, 255, 245]);
    }

    #[test]
    fn test_full_grayscale_equalizes_channels() {
        let settings = FilterSettings {
            grayscale: 100,
            ..Default::default()
        };
        let transform = RenderTransform::from_settings(&settings);
        let [r, g, b] = transform.apply_to_pixel([200, 40, 90]);
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn test_display_list_round_trip() {
        let settings = FilterSettings {
            sepia: 30,
            grayscale: 0,
            hue_rotate: 90,
            invert: 0,
            brightness: 110,
            contrast: 95,
        };
        let list = settings.display_list();
        assert_eq!(FilterSettings::from_display_list(&list).unwrap(), settings);
    }

    #[test]
    fn test_malformed_display_list_rejected() {
        let list = vec!["10".to_string(), "twenty".to_string()];
        assert!(FilterSettings::from_display_list(&list).is_err());
    }

    #[test]
    fn test_transform_description_order() {
        let settings = FilterSettings {
            sepia: 50,
            invert: 25,
            brightness: 150,
            ..Default::default()
        };
        let transform = RenderTransform::from_settings(&settings);
        // Fixed chain order: invert before brightness before sepia
        assert_eq!(
            transform.to_string(),
            "invert(0.25) brightness(1.5) sepia(0.5)"
        );
    }
}
