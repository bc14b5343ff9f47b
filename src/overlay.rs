// SPDX-License-Identifier: GPL-3.0-only

//! Overlay resolver: sticker identifiers to per-shot asset layouts
//!
//! Overlays are decorative sticker sets composited over the live preview
//! and over each shot of the finalized strip. Which sprites appear, and
//! where, depends on the overlay, the shot position (1-based) and the
//! presentation context. The resolver is a pure lookup over a static
//! layout table; adding an overlay means adding table rows, not branches.

use crate::constants::SESSION_SHOTS;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Decorative overlay identifier
///
/// Closed set plus a `None` sentinel. Unknown identifiers parse to `None`
/// so a stored photo with a retired sticker still renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OverlayId {
    /// No overlay
    #[default]
    None,
    Axolotl,
    Minecraft,
    Cat,
    Bear,
    Gamer,
    DemonSlayer,
}

impl OverlayId {
    /// All selectable overlays for UI iteration, `None` last
    pub const ALL: [OverlayId; 7] = [
        OverlayId::Axolotl,
        OverlayId::Minecraft,
        OverlayId::Cat,
        OverlayId::Bear,
        OverlayId::Gamer,
        OverlayId::DemonSlayer,
        OverlayId::None,
    ];

    /// Display name for the overlay
    pub fn display_name(&self) -> &'static str {
        match self {
            OverlayId::None => "None",
            OverlayId::Axolotl => "Axolotl",
            OverlayId::Minecraft => "Minecraft",
            OverlayId::Cat => "Cat",
            OverlayId::Bear => "Bear",
            OverlayId::Gamer => "Gamer",
            OverlayId::DemonSlayer => "Demon Slayer",
        }
    }

    /// Stable identifier used in stored photo metadata
    pub fn key(&self) -> &'static str {
        match self {
            OverlayId::None => "none",
            OverlayId::Axolotl => "axolotl",
            OverlayId::Minecraft => "minecraft",
            OverlayId::Cat => "cat",
            OverlayId::Bear => "bear",
            OverlayId::Gamer => "gamer",
            OverlayId::DemonSlayer => "demon-slayer",
        }
    }
}

impl FromStr for OverlayId {
    type Err = std::convert::Infallible;

    /// Parse a stored identifier; unknown values resolve to `None`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(OverlayId::ALL
            .into_iter()
            .find(|id| id.key() == s)
            .unwrap_or(OverlayId::None))
    }
}

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Presentation context an overlay variant is resolved for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayContext {
    /// Composited over the live camera preview
    Live,
    /// Composited into the finalized strip image
    Final,
}

/// Corner or edge a sprite is anchored to within its shot cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    TopCenter,
    BottomCenter,
}

/// One sprite placement within a shot cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlaySprite {
    /// Asset name within the overlay's sticker set
    pub asset: &'static str,
    /// Anchor within the shot cell
    pub anchor: Anchor,
    /// Sprite size as a fraction of the cell width, in percent
    pub scale_pct: u8,
}

/// The sprites resolved for one (overlay, shot, context) triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayAsset {
    pub sprites: &'static [OverlaySprite],
}

/// One row of the overlay layout table
struct OverlayVariant {
    id: OverlayId,
    shot: u8,
    context: OverlayContext,
    asset: OverlayAsset,
}

macro_rules! sprite {
    ($asset:literal, $anchor:ident, $scale:literal) => {
        OverlaySprite {
            asset: $asset,
            anchor: Anchor::$anchor,
            scale_pct: $scale,
        }
    };
}

macro_rules! variant {
    ($id:ident, $shot:literal, $context:ident, $sprites:expr) => {
        OverlayVariant {
            id: OverlayId::$id,
            shot: $shot,
            context: OverlayContext::$context,
            asset: OverlayAsset { sprites: $sprites },
        }
    };
}

/// Layout table: which sprites each overlay shows per shot and context.
///
/// Live variants lead the eye toward the lens with a single sprite; final
/// variants frame the cell with the matching pair.
static OVERLAY_TABLE: &[OverlayVariant] = &[
    // Axolotl
    variant!(Axolotl, 1, Live, &[sprite!("yes", TopLeft, 28)]),
    variant!(Axolotl, 2, Live, &[sprite!("happy", TopRight, 28)]),
    variant!(Axolotl, 3, Live, &[sprite!("wave", BottomLeft, 28)]),
    variant!(
        Axolotl,
        1,
        Final,
        &[sprite!("yes", TopLeft, 22), sprite!("bubble", BottomRight, 18)]
    ),
    variant!(
        Axolotl,
        2,
        Final,
        &[sprite!("happy", TopRight, 22), sprite!("bubble", BottomLeft, 18)]
    ),
    variant!(
        Axolotl,
        3,
        Final,
        &[sprite!("wave", BottomLeft, 22), sprite!("heart", TopRight, 18)]
    ),
    // Minecraft
    variant!(Minecraft, 1, Live, &[sprite!("pig", BottomRight, 30)]),
    variant!(Minecraft, 2, Live, &[sprite!("creeper", TopLeft, 30)]),
    variant!(Minecraft, 3, Live, &[sprite!("sword", BottomLeft, 30)]),
    variant!(
        Minecraft,
        1,
        Final,
        &[sprite!("pig", BottomRight, 24), sprite!("grass", BottomLeft, 20)]
    ),
    variant!(
        Minecraft,
        2,
        Final,
        &[sprite!("creeper", TopLeft, 24), sprite!("grass", BottomRight, 20)]
    ),
    variant!(
        Minecraft,
        3,
        Final,
        &[sprite!("sword", BottomLeft, 24), sprite!("diamond", TopRight, 20)]
    ),
    // Cat
    variant!(Cat, 1, Live, &[sprite!("smile", TopRight, 26)]),
    variant!(Cat, 2, Live, &[sprite!("paw", BottomLeft, 26)]),
    variant!(Cat, 3, Live, &[sprite!("sleep", BottomRight, 26)]),
    variant!(
        Cat,
        1,
        Final,
        &[sprite!("smile", TopRight, 20), sprite!("paw", BottomLeft, 16)]
    ),
    variant!(
        Cat,
        2,
        Final,
        &[sprite!("paw", BottomLeft, 20), sprite!("fish", TopLeft, 16)]
    ),
    variant!(
        Cat,
        3,
        Final,
        &[sprite!("sleep", BottomRight, 20), sprite!("yarn", TopLeft, 16)]
    ),
    // Bear
    variant!(Bear, 1, Live, &[sprite!("smile", TopLeft, 28)]),
    variant!(Bear, 2, Live, &[sprite!("honey", BottomRight, 28)]),
    variant!(Bear, 3, Live, &[sprite!("sleepy", TopRight, 28)]),
    variant!(
        Bear,
        1,
        Final,
        &[sprite!("smile", TopLeft, 22), sprite!("honey", BottomRight, 18)]
    ),
    variant!(
        Bear,
        2,
        Final,
        &[sprite!("honey", BottomRight, 22), sprite!("bee", TopCenter, 14)]
    ),
    variant!(
        Bear,
        3,
        Final,
        &[sprite!("sleepy", TopRight, 22), sprite!("moon", TopLeft, 16)]
    ),
    // Gamer
    variant!(Gamer, 1, Live, &[sprite!("video-game", BottomLeft, 30)]),
    variant!(Gamer, 2, Live, &[sprite!("headset", TopRight, 30)]),
    variant!(Gamer, 3, Live, &[sprite!("trophy", TopLeft, 30)]),
    variant!(
        Gamer,
        1,
        Final,
        &[sprite!("video-game", BottomLeft, 24), sprite!("dpad", TopRight, 18)]
    ),
    variant!(
        Gamer,
        2,
        Final,
        &[sprite!("headset", TopRight, 24), sprite!("dpad", BottomLeft, 18)]
    ),
    variant!(
        Gamer,
        3,
        Final,
        &[sprite!("trophy", TopLeft, 24), sprite!("star", BottomRight, 18)]
    ),
    // Demon Slayer
    variant!(DemonSlayer, 1, Live, &[sprite!("blade", BottomRight, 30)]),
    variant!(DemonSlayer, 2, Live, &[sprite!("mask", TopLeft, 30)]),
    variant!(DemonSlayer, 3, Live, &[sprite!("flame", BottomCenter, 34)]),
    variant!(
        DemonSlayer,
        1,
        Final,
        &[sprite!("blade", BottomRight, 24), sprite!("mask", TopLeft, 18)]
    ),
    variant!(
        DemonSlayer,
        2,
        Final,
        &[sprite!("mask", TopLeft, 24), sprite!("flame", BottomRight, 18)]
    ),
    variant!(
        DemonSlayer,
        3,
        Final,
        &[sprite!("flame", BottomCenter, 28), sprite!("blade", TopRight, 18)]
    ),
];

/// Resolve the sprites for an overlay at a shot position
///
/// Pure table lookup, stable for identical triples. `OverlayId::None` and
/// shot indices outside `1..=SESSION_SHOTS` resolve to no overlay.
pub fn resolve(
    overlay: OverlayId,
    shot_index: usize,
    context: OverlayContext,
) -> Option<&'static OverlayAsset> {
    if overlay == OverlayId::None || shot_index == 0 || shot_index > SESSION_SHOTS {
        return None;
    }
    OVERLAY_TABLE
        .iter()
        .find(|v| v.id == overlay && usize::from(v.shot) == shot_index && v.context == context)
        .map(|v| &v.asset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_never_resolves() {
        for shot in 0..=4 {
            assert!(resolve(OverlayId::None, shot, OverlayContext::Live).is_none());
            assert!(resolve(OverlayId::None, shot, OverlayContext::Final).is_none());
        }
    }

    #[test]
    fn test_every_overlay_covers_every_shot_and_context() {
        for id in OverlayId::ALL {
            if id == OverlayId::None {
                continue;
            }
            for shot in 1..=SESSION_SHOTS {
                for context in [OverlayContext::Live, OverlayContext::Final] {
                    let asset = resolve(id, shot, context);
                    assert!(
                        asset.is_some_and(|a| !a.sprites.is_empty()),
                        "{:?} shot {} {:?} has no sprites",
                        id,
                        shot,
                        context
                    );
                }
            }
        }
    }

    #[test]
    fn test_resolution_is_stable() {
        let first = resolve(OverlayId::Cat, 2, OverlayContext::Final);
        let second = resolve(OverlayId::Cat, 2, OverlayContext::Final);
        assert_eq!(first, second);
    }

    #[test]
    fn test_out_of_range_shot_resolves_to_none() {
        assert!(resolve(OverlayId::Bear, 0, OverlayContext::Live).is_none());
        assert!(resolve(OverlayId::Bear, SESSION_SHOTS + 1, OverlayContext::Live).is_none());
    }

    #[test]
    fn test_unknown_identifier_parses_to_none() {
        let parsed: OverlayId = "glitter-unicorn".parse().unwrap();
        assert_eq!(parsed, OverlayId::None);
    }

    #[test]
    fn test_key_round_trip() {
        for id in OverlayId::ALL {
            let parsed: OverlayId = id.key().parse().unwrap();
            assert_eq!(parsed, id);
        }
    }
}
