// SPDX-License-Identifier: GPL-3.0-only

//! Strip rendering and encoding
//!
//! The exporter rasterizes a finalized session into a single downloadable
//! image: the shots stacked in capture order inside a colored frame, each
//! with its own filter snapshot applied and its overlay sprites
//! composited. It is a snapshot of the finalized visual state — the stored
//! per-shot snapshots are used, never the live filter.

use crate::constants::{
    BackgroundStyle, BorderStyle, Rgb, STRIP_BORDER_PX, STRIP_PADDING_PX,
};
use crate::errors::ExportError;
use crate::filters::RenderTransform;
use crate::overlay::{self, Anchor, OverlayContext, OverlayId};
use crate::session::state::{CaptureSession, CaptureShot};
use image::imageops;
use image::{Rgba, RgbaImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Supplies sticker art for overlay compositing
///
/// Sprite art lives outside the core (asset packs shipped with the UI), so
/// the exporter asks a source for each sprite by overlay and asset name.
pub trait SpriteSource {
    /// The sprite image, or `None` when the asset is unavailable
    fn sprite(&self, overlay: OverlayId, asset: &str) -> Option<RgbaImage>;
}

/// A source with no sprite art; overlays render as nothing
pub struct NoSprites;

impl SpriteSource for NoSprites {
    fn sprite(&self, _overlay: OverlayId, _asset: &str) -> Option<RgbaImage> {
        None
    }
}

/// Loads sprites from `<root>/<overlay-key>/<asset>.png`
pub struct DirectorySprites {
    root: PathBuf,
}

impl DirectorySprites {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl SpriteSource for DirectorySprites {
    fn sprite(&self, overlay: OverlayId, asset: &str) -> Option<RgbaImage> {
        let path = self.root.join(overlay.key()).join(format!("{asset}.png"));
        match image::open(&path) {
            Ok(img) => Some(img.to_rgba8()),
            Err(error) => {
                warn!(path = %path.display(), %error, "Sprite not loaded");
                None
            }
        }
    }
}

/// Render a finalized session into a strip image
///
/// Fails with [`ExportError::NothingToRender`] unless the session is
/// complete. Rendering never mutates the session.
pub fn render_session(
    session: &CaptureSession,
    sprites: &impl SpriteSource,
) -> Result<RgbaImage, ExportError> {
    if !session.is_complete() {
        return Err(ExportError::NothingToRender);
    }
    render_strip(
        session.shots(),
        session.overlay(),
        session.background(),
        session.border(),
        sprites,
    )
}

/// Render shots into a vertical strip with frame styling
pub fn render_strip(
    shots: &[CaptureShot],
    overlay: OverlayId,
    background: BackgroundStyle,
    border: BorderStyle,
    sprites: &impl SpriteSource,
) -> Result<RgbaImage, ExportError> {
    if shots.is_empty() {
        return Err(ExportError::NothingToRender);
    }

    let cell_width = shots.iter().map(|s| s.frame.width).max().unwrap_or(0);
    let cells: Vec<RgbaImage> = shots
        .iter()
        .enumerate()
        .map(|(i, shot)| render_cell(shot, i + 1, overlay, cell_width, sprites))
        .collect::<Result<_, _>>()?;

    let inset = STRIP_BORDER_PX + STRIP_PADDING_PX;
    let width = cell_width + 2 * inset;
    let height: u32 =
        cells.iter().map(|c| c.height()).sum::<u32>() + STRIP_PADDING_PX * (cells.len() as u32 - 1) + 2 * inset;

    let mut canvas = RgbaImage::new(width, height);
    paint_border(&mut canvas, border.color());
    paint_background(&mut canvas, background, STRIP_BORDER_PX);

    let mut y = inset;
    for cell in &cells {
        let x = inset + (cell_width - cell.width()) / 2;
        imageops::overlay(&mut canvas, cell, i64::from(x), i64::from(y));
        y += cell.height() + STRIP_PADDING_PX;
    }

    debug!(width, height, shots = shots.len(), "Strip rendered");
    Ok(canvas)
}

/// Render one shot: decode, apply its filter snapshot, composite overlays
fn render_cell(
    shot: &CaptureShot,
    position: usize,
    overlay: OverlayId,
    cell_width: u32,
    sprites: &impl SpriteSource,
) -> Result<RgbaImage, ExportError> {
    let frame = &shot.frame;
    let mut cell = RgbaImage::from_raw(frame.width, frame.height, frame.data.to_vec())
        .ok_or_else(|| {
            ExportError::BadFrame(format!(
                "{} bytes for {}x{}",
                frame.data.len(),
                frame.width,
                frame.height
            ))
        })?;

    // Camera frames are opaque; normalize alpha before compositing
    for pixel in cell.pixels_mut() {
        pixel[3] = 255;
    }

    RenderTransform::from_settings(&shot.filter).apply_to_image(&mut cell);

    if let Some(asset) = overlay::resolve(overlay, position, OverlayContext::Final) {
        for sprite in asset.sprites {
            let Some(art) = sprites.sprite(overlay, sprite.asset) else {
                continue;
            };
            let target = cell_width * u32::from(sprite.scale_pct) / 100;
            if target == 0 || art.width() == 0 || art.height() == 0 {
                continue;
            }
            let scale = target as f32 / art.width() as f32;
            let scaled_h = ((art.height() as f32 * scale) as u32).max(1);
            let art = imageops::resize(&art, target, scaled_h, imageops::FilterType::Triangle);
            let (x, y) = anchor_position(sprite.anchor, cell.width(), cell.height(), &art);
            imageops::overlay(&mut cell, &art, x, y);
        }
    }

    Ok(cell)
}

/// Top-left placement for a sprite anchored within a cell
fn anchor_position(anchor: Anchor, cell_w: u32, cell_h: u32, sprite: &RgbaImage) -> (i64, i64) {
    let margin = i64::from(STRIP_PADDING_PX) / 2;
    let (w, h) = (i64::from(sprite.width()), i64::from(sprite.height()));
    let (cell_w, cell_h) = (i64::from(cell_w), i64::from(cell_h));
    match anchor {
        Anchor::TopLeft => (margin, margin),
        Anchor::TopRight => (cell_w - w - margin, margin),
        Anchor::BottomLeft => (margin, cell_h - h - margin),
        Anchor::BottomRight => (cell_w - w - margin, cell_h - h - margin),
        Anchor::TopCenter => ((cell_w - w) / 2, margin),
        Anchor::BottomCenter => ((cell_w - w) / 2, cell_h - h - margin),
    }
}

/// Fill the whole canvas with the border color
fn paint_border(canvas: &mut RgbaImage, color: Rgb) {
    for pixel in canvas.pixels_mut() {
        *pixel = Rgba([color.r, color.g, color.b, 255]);
    }
}

/// Paint the background gradient inside the border
fn paint_background(canvas: &mut RgbaImage, background: BackgroundStyle, border_px: u32) {
    let (from, via, to) = background.stops();
    let (width, height) = canvas.dimensions();
    if width <= 2 * border_px || height <= 2 * border_px {
        return;
    }
    let span = (width - 2 * border_px + height - 2 * border_px).max(1) as f32;

    for y in border_px..height - border_px {
        for x in border_px..width - border_px {
            // Diagonal two-segment gradient: from → via → to
            let t = ((x - border_px) + (y - border_px)) as f32 / span;
            let color = if t < 0.5 {
                lerp_rgb(from, via, t * 2.0)
            } else {
                lerp_rgb(via, to, (t - 0.5) * 2.0)
            };
            canvas.put_pixel(x, y, Rgba([color.r, color.g, color.b, 255]));
        }
    }
}

fn lerp_rgb(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| (f32::from(x) + (f32::from(y) - f32::from(x)) * t) as u8;
    Rgb::new(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b))
}

/// Encode a rendered strip as PNG bytes
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, image::ImageFormat::Png)
        .map_err(|e| ExportError::EncodingFailed(e.to_string()))?;
    Ok(bytes.into_inner())
}

/// Render, encode and save a finalized session in one step
///
/// Encoding runs on a blocking task. A failure here is reported to the
/// caller and leaves the session untouched; export is never fatal.
pub async fn export_session(
    session: &CaptureSession,
    sprites: &impl SpriteSource,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let strip = render_session(session, sprites)?;
    let bytes = tokio::task::spawn_blocking(move || encode_png(&strip))
        .await
        .map_err(|e| ExportError::EncodingFailed(e.to_string()))??;

    let path = crate::storage::save_export(&bytes, dir)
        .await
        .map_err(|e| ExportError::SaveFailed(e.to_string()))?;
    info!(path = %path.display(), "Strip exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::camera::RawFrame;
    use crate::filters::FilterSettings;

    fn shot(width: u32, height: u32) -> CaptureShot {
        CaptureShot {
            frame: RawFrame::new(width, height, vec![128u8; (width * height * 4) as usize])
                .unwrap(),
            filter: FilterSettings::default(),
        }
    }

    #[test]
    fn test_empty_session_has_nothing_to_render() {
        let result = render_strip(
            &[],
            OverlayId::None,
            BackgroundStyle::Sunset,
            BorderStyle::Sky,
            &NoSprites,
        );
        assert_eq!(result.unwrap_err(), ExportError::NothingToRender);
    }

    #[test]
    fn test_strip_dimensions_cover_all_shots() {
        let shots = vec![shot(32, 24), shot(32, 24), shot(32, 24)];
        let strip = render_strip(
            &shots,
            OverlayId::None,
            BackgroundStyle::Sunset,
            BorderStyle::Sky,
            &NoSprites,
        )
        .unwrap();

        let inset = STRIP_BORDER_PX + STRIP_PADDING_PX;
        assert_eq!(strip.width(), 32 + 2 * inset);
        assert_eq!(strip.height(), 3 * 24 + 2 * STRIP_PADDING_PX + 2 * inset);
    }

    #[test]
    fn test_border_color_frames_the_strip() {
        let shots = vec![shot(16, 16)];
        let strip = render_strip(
            &shots,
            OverlayId::None,
            BackgroundStyle::Slate,
            BorderStyle::Ink,
            &NoSprites,
        )
        .unwrap();

        let ink = BorderStyle::Ink.color();
        let corner = strip.get_pixel(0, 0);
        assert_eq!(corner.0, [ink.r, ink.g, ink.b, 255]);
    }

    #[test]
    fn test_filter_snapshot_applied_per_shot() {
        // Second shot fully inverted, first untouched
        let mut shots = vec![shot(8, 8), shot(8, 8)];
        shots[1].filter.invert = 100;
        let strip = render_strip(
            &shots,
            OverlayId::None,
            BackgroundStyle::Slate,
            BorderStyle::Sky,
            &NoSprites,
        )
        .unwrap();

        let inset = STRIP_BORDER_PX + STRIP_PADDING_PX;
        let first = strip.get_pixel(inset, inset);
        let second = strip.get_pixel(inset, inset + 8 + STRIP_PADDING_PX);
        assert_eq!(first.0[0], 128);
        assert_eq!(second.0[0], 127);
    }

    #[test]
    fn test_missing_sprites_do_not_fail_render() {
        let shots = vec![shot(16, 16), shot(16, 16), shot(16, 16)];
        let result = render_strip(
            &shots,
            OverlayId::Cat,
            BackgroundStyle::Sunset,
            BorderStyle::Sky,
            &NoSprites,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_encode_png_produces_signature() {
        let strip = render_strip(
            &[shot(8, 8)],
            OverlayId::None,
            BackgroundStyle::Sunset,
            BorderStyle::Sky,
            &NoSprites,
        )
        .unwrap();
        let bytes = encode_png(&strip).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }
}
