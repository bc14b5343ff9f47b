// SPDX-License-Identifier: GPL-3.0-only

//! Session state management

use crate::backends::camera::RawFrame;
use crate::constants::{BackgroundStyle, BorderStyle, SESSION_SHOTS};
use crate::filters::FilterSettings;
use crate::overlay::{self, OverlayAsset, OverlayContext, OverlayId};

/// Capture session phase state machine
///
/// `Idle` → `Countdown` → `Capturing` → back to `Countdown` while shots
/// remain, else `Complete`. Reset returns to `Idle` from anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// No countdown running
    #[default]
    Idle,
    /// Counting down to the next shot
    Countdown {
        /// Seconds until the shot is taken
        remaining: u32,
    },
    /// Transient: a shot is being taken
    Capturing,
    /// The session holds a full set of shots
    Complete,
}

impl SessionPhase {
    /// Whether a countdown is in progress
    pub fn is_countdown(&self) -> bool {
        matches!(self, SessionPhase::Countdown { .. })
    }

    /// Whether a shot is being taken right now
    pub fn is_capturing(&self) -> bool {
        matches!(self, SessionPhase::Capturing)
    }

    /// The displayed countdown value, if counting
    pub fn remaining(&self) -> Option<u32> {
        match self {
            SessionPhase::Countdown { remaining } => Some(*remaining),
            _ => None,
        }
    }
}

/// One captured frame with the filter settings active at capture time
///
/// Owned exclusively by the session; dropped when the session resets or
/// publishes successfully.
#[derive(Debug, Clone)]
pub struct CaptureShot {
    /// Raw RGBA frame from the camera feed
    pub frame: RawFrame,
    /// Filter snapshot for this shot (filters may change between shots)
    pub filter: FilterSettings,
}

/// All state for one capture-to-publish workflow
///
/// Mutated only through its command methods and the engine, so the
/// invariants hold everywhere: never more than [`SESSION_SHOTS`] shots,
/// and shots stay in capture order.
#[derive(Debug, Default)]
pub struct CaptureSession {
    shots: Vec<CaptureShot>,
    phase: SessionPhase,
    filter: FilterSettings,
    overlay: OverlayId,
    background: BackgroundStyle,
    border: BorderStyle,
}

impl CaptureSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub(crate) fn set_phase(&mut self, phase: SessionPhase) {
        self.phase = phase;
    }

    /// Shots captured so far, in capture order
    pub fn shots(&self) -> &[CaptureShot] {
        &self.shots
    }

    /// Number of shots captured so far
    pub fn shots_taken(&self) -> usize {
        self.shots.len()
    }

    /// Shots still to capture
    pub fn remaining_shots(&self) -> usize {
        SESSION_SHOTS - self.shots.len()
    }

    /// Whether the session holds a full set of shots
    pub fn is_complete(&self) -> bool {
        self.shots.len() == SESSION_SHOTS
    }

    /// Append a shot with the current filter snapshot
    ///
    /// The frame and the snapshot are stored together so later filter
    /// changes cannot retroactively alter an earlier shot.
    pub(crate) fn push_shot(&mut self, frame: RawFrame) {
        debug_assert!(self.shots.len() < SESSION_SHOTS);
        self.shots.push(CaptureShot {
            frame,
            filter: self.filter,
        });
    }

    /// The live filter settings
    pub fn filter(&self) -> &FilterSettings {
        &self.filter
    }

    /// Replace the live filter settings
    pub fn set_filter(&mut self, filter: FilterSettings) {
        self.filter = filter;
    }

    /// Reset the live filter and cosmetic selectors to their defaults
    pub fn reset_styling(&mut self) {
        self.filter.reset();
        self.overlay = OverlayId::default();
        self.background = BackgroundStyle::default();
        self.border = BorderStyle::default();
    }

    /// Selected overlay
    pub fn overlay(&self) -> OverlayId {
        self.overlay
    }

    /// Select a different overlay
    pub fn select_overlay(&mut self, overlay: OverlayId) {
        self.overlay = overlay;
    }

    /// Selected background gradient
    pub fn background(&self) -> BackgroundStyle {
        self.background
    }

    pub fn set_background(&mut self, background: BackgroundStyle) {
        self.background = background;
    }

    /// Selected border color
    pub fn border(&self) -> BorderStyle {
        self.border
    }

    pub fn set_border(&mut self, border: BorderStyle) {
        self.border = border;
    }

    /// Overlay sprites for the live preview
    ///
    /// The preview shows the variant for the shot about to be taken, i.e.
    /// position `shots_taken + 1`. `None` once the session is complete.
    pub fn live_overlay(&self) -> Option<&'static OverlayAsset> {
        if self.is_complete() {
            return None;
        }
        overlay::resolve(self.overlay, self.shots_taken() + 1, OverlayContext::Live)
    }

    /// Drop all shots and return to defaults
    pub(crate) fn clear(&mut self) {
        self.shots.clear();
        self.phase = SessionPhase::Idle;
        self.reset_styling();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> RawFrame {
        RawFrame::new(2, 2, vec![0u8; 16]).unwrap()
    }

    #[test]
    fn test_push_shot_snapshots_live_filter() {
        let mut session = CaptureSession::new();
        let mut filter = FilterSettings::default();
        filter.sepia = 50;
        session.set_filter(filter);
        session.push_shot(frame());

        // Later filter changes must not touch the stored snapshot
        filter.sepia = 0;
        session.set_filter(filter);
        assert_eq!(session.shots()[0].filter.sepia, 50);
    }

    #[test]
    fn test_live_overlay_follows_next_shot() {
        let mut session = CaptureSession::new();
        session.select_overlay(OverlayId::Cat);

        let first = session.live_overlay();
        session.push_shot(frame());
        let second = session.live_overlay();
        // Preview advances with the shot position
        assert_ne!(first, second);

        session.push_shot(frame());
        session.push_shot(frame());
        assert!(session.is_complete());
        assert!(session.live_overlay().is_none());
    }

    #[test]
    fn test_clear_restores_defaults() {
        let mut session = CaptureSession::new();
        session.select_overlay(OverlayId::Gamer);
        session.set_background(BackgroundStyle::Orchid);
        session.push_shot(frame());
        session.set_phase(SessionPhase::Capturing);

        session.clear();
        assert_eq!(session.shots_taken(), 0);
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert_eq!(session.overlay(), OverlayId::None);
        assert_eq!(session.background(), BackgroundStyle::Sunset);
    }
}
