// SPDX-License-Identifier: GPL-3.0-only

//! Session commands and the capture sequence driver

use crate::backends::camera::{CameraFeed, RawFrame};
use crate::backends::store::UserId;
use crate::constants::{
    BackgroundStyle, BorderStyle, COUNTDOWN_START_SECS, MAX_CAPTURE_RETRIES, SESSION_SHOTS,
    TICK_INTERVAL,
};
use crate::errors::{AppResult, SessionError, ValidationError};
use crate::filters::FilterSettings;
use crate::overlay::OverlayId;
use crate::session::state::{CaptureSession, SessionPhase};
use crate::session::timer::Countdown;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Everything the publish collaborator needs to store one session
#[derive(Debug, Clone)]
pub struct PublishRequest {
    pub title: String,
    pub author: UserId,
    pub author_name: String,
    /// Raw frames in capture order
    pub frames: Vec<RawFrame>,
    /// Per-shot filter snapshots matching `frames`
    pub filters: Vec<FilterSettings>,
    pub overlay: OverlayId,
    pub background: BackgroundStyle,
    pub border: BorderStyle,
}

impl PublishRequest {
    /// Per-shot filter levels flattened to display-friendly strings
    pub fn filter_display_lists(&self) -> Vec<Vec<String>> {
        self.filters.iter().map(|f| f.display_list()).collect()
    }
}

/// Result of advancing the countdown by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Countdown continues with this many seconds left
    Continue(u32),
    /// The countdown reached zero: take the shot now
    Capture,
}

/// Result of a capture attempt at tick zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Shot stored; a new countdown cycle begins
    NextCycle,
    /// Shot stored; the session is complete
    Complete,
    /// The feed produced no frame; the cycle restarts for the same shot
    Retry,
}

/// Drives a [`CaptureSession`] through its commands
///
/// The engine owns the session and the active countdown handle, so
/// `reset_all` has one clear cancellation point. All commands reject while
/// a publish is pending (the busy signal).
#[derive(Debug)]
pub struct SessionEngine {
    session: CaptureSession,
    countdown: Option<Countdown>,
    /// Consecutive capture failures for the shot currently being retried
    failed_attempts: u32,
    busy: bool,
    tick_interval: Duration,
}

impl Default for SessionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionEngine {
    pub fn new() -> Self {
        Self {
            session: CaptureSession::new(),
            countdown: None,
            failed_attempts: 0,
            busy: false,
            tick_interval: TICK_INTERVAL,
        }
    }

    /// Override the tick interval (demo and tests)
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Read access to the session state
    pub fn session(&self) -> &CaptureSession {
        &self.session
    }

    /// Whether a publish or export is pending
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    // ===== Styling commands (legal between shots) =====

    /// Replace the live filter settings
    pub fn set_filter(&mut self, filter: FilterSettings) {
        self.session.set_filter(filter);
    }

    /// Reset filter and cosmetic selectors to defaults
    pub fn reset_styling(&mut self) {
        self.session.reset_styling();
    }

    pub fn select_overlay(&mut self, overlay: OverlayId) {
        self.session.select_overlay(overlay);
    }

    pub fn set_background(&mut self, background: BackgroundStyle) {
        self.session.set_background(background);
    }

    pub fn set_border(&mut self, border: BorderStyle) {
        self.session.set_border(border);
    }

    // ===== Sequence commands =====

    /// Start (or restart after a stall) the countdown sequence
    ///
    /// Legal from `Idle` or a stalled `Countdown`; rejected while a
    /// capture is in flight, while the session is full, while busy, or
    /// while the camera feed is not ready.
    pub fn start_sequence(&mut self, feed_ready: bool) -> AppResult<()> {
        if self.busy {
            return Err(SessionError::Busy.into());
        }
        if self.session.phase().is_capturing() || self.countdown.is_some() {
            return Err(SessionError::SequenceActive.into());
        }
        if self.session.is_complete() {
            return Err(SessionError::SessionFull.into());
        }
        if !feed_ready {
            return Err(crate::errors::CaptureError::FeedNotReady.into());
        }

        info!(
            shots_taken = self.session.shots_taken(),
            from = COUNTDOWN_START_SECS,
            "Starting capture countdown"
        );
        self.failed_attempts = 0;
        self.session.set_phase(SessionPhase::Countdown {
            remaining: COUNTDOWN_START_SECS,
        });
        Ok(())
    }

    /// Advance the countdown by one tick
    ///
    /// Returns `None` when no countdown is running. At zero the phase
    /// moves to `Capturing`; the caller must follow up with
    /// [`capture_one`](Self::capture_one).
    pub fn tick(&mut self) -> Option<TickOutcome> {
        let remaining = self.session.phase().remaining()?;
        if remaining > 1 {
            let next = remaining - 1;
            self.session
                .set_phase(SessionPhase::Countdown { remaining: next });
            debug!(remaining = next, "Countdown tick");
            Some(TickOutcome::Continue(next))
        } else {
            self.session.set_phase(SessionPhase::Capturing);
            debug!("Countdown complete, capturing");
            Some(TickOutcome::Capture)
        }
    }

    /// Take the shot at the end of a countdown cycle
    ///
    /// On success the frame and the current filter snapshot are appended
    /// atomically and the phase moves on: a fresh countdown while shots
    /// remain, `Complete` at the full count. A feed failure is logged, the
    /// shot count does not advance, and the cycle restarts for the same
    /// shot; after [`MAX_CAPTURE_RETRIES`] consecutive failures the
    /// sequence surfaces a hard error instead of silently stalling.
    pub fn capture_one<F: CameraFeed>(
        &mut self,
        feed: &mut F,
    ) -> Result<CaptureOutcome, SessionError> {
        if !self.session.phase().is_capturing() {
            return Err(SessionError::SequenceActive);
        }

        match feed.capture_frame() {
            Ok(frame) => {
                self.failed_attempts = 0;
                self.session.push_shot(frame);
                let taken = self.session.shots_taken();
                info!(shot = taken, of = SESSION_SHOTS, "Shot captured");

                if self.session.is_complete() {
                    self.session.set_phase(SessionPhase::Complete);
                    info!("Capture session complete");
                    Ok(CaptureOutcome::Complete)
                } else {
                    self.session.set_phase(SessionPhase::Countdown {
                        remaining: COUNTDOWN_START_SECS,
                    });
                    Ok(CaptureOutcome::NextCycle)
                }
            }
            Err(error) => {
                self.failed_attempts += 1;
                warn!(
                    %error,
                    attempt = self.failed_attempts,
                    shot = self.session.shots_taken() + 1,
                    "Capture failed, shot count not advanced"
                );

                if self.failed_attempts >= MAX_CAPTURE_RETRIES {
                    // Leave the countdown frozen so the sequence can be
                    // restarted once the feed recovers
                    self.session.set_phase(SessionPhase::Countdown {
                        remaining: COUNTDOWN_START_SECS,
                    });
                    Err(SessionError::SequenceStalled {
                        shot_index: self.session.shots_taken() + 1,
                        attempts: self.failed_attempts,
                    })
                } else {
                    self.session.set_phase(SessionPhase::Countdown {
                        remaining: COUNTDOWN_START_SECS,
                    });
                    Ok(CaptureOutcome::Retry)
                }
            }
        }
    }

    /// Reset everything: shots, countdown, styling
    ///
    /// Always legal. Cancels any in-flight countdown through its handle.
    pub fn reset_all(&mut self) {
        if let Some(mut countdown) = self.countdown.take() {
            countdown.cancel();
        }
        self.failed_attempts = 0;
        self.busy = false;
        self.session.clear();
        info!("Session reset");
    }

    /// Run the full capture sequence to completion
    ///
    /// Drives `start_sequence` and then one countdown/capture cycle per
    /// shot, with no further input required. Ticks come from a
    /// [`Countdown`] task held on the engine so a cooperative `reset_all`
    /// cancels it. Returns once the session is complete, or with the
    /// stall error after repeated capture failures.
    pub async fn run_sequence<F: CameraFeed>(&mut self, feed: &mut F) -> AppResult<()> {
        self.start_sequence(feed.is_ready()).map_err(|error| {
            warn!(%error, "Capture sequence not started");
            error
        })?;

        loop {
            self.countdown = Some(Countdown::start(COUNTDOWN_START_SECS, self.tick_interval));
            loop {
                let Some(countdown) = self.countdown.as_mut() else {
                    // Reset mid-cycle: the sequence ends quietly
                    return Ok(());
                };
                let Some(_) = countdown.next_tick().await else {
                    break;
                };
                if let Some(TickOutcome::Capture) = self.tick() {
                    break;
                }
            }
            self.countdown = None;

            if !self.session.phase().is_capturing() {
                // Countdown was cancelled before reaching zero
                return Ok(());
            }

            match self.capture_one(feed) {
                Ok(CaptureOutcome::Complete) => return Ok(()),
                Ok(CaptureOutcome::NextCycle) | Ok(CaptureOutcome::Retry) => continue,
                Err(error) => return Err(error.into()),
            }
        }
    }

    // ===== Finalization =====

    /// Package the completed session for the publish collaborator
    ///
    /// Legal only in `Complete`. An empty title is a validation error and
    /// leaves the session untouched, still `Complete`. The session keeps
    /// its shots until the publish succeeds.
    pub fn finalize(
        &self,
        title: &str,
        author: UserId,
        author_name: &str,
    ) -> AppResult<PublishRequest> {
        if self.busy {
            return Err(SessionError::Busy.into());
        }
        if !self.session.is_complete() {
            return Err(SessionError::NotComplete.into());
        }
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }

        let shots = self.session.shots();
        Ok(PublishRequest {
            title: title.trim().to_string(),
            author,
            author_name: author_name.to_string(),
            frames: shots.iter().map(|s| s.frame.clone()).collect(),
            filters: shots.iter().map(|s| s.filter).collect(),
            overlay: self.session.overlay(),
            background: self.session.background(),
            border: self.session.border(),
        })
    }

    /// Raise the busy signal for a pending publish
    pub(crate) fn begin_publish(&mut self) -> Result<(), SessionError> {
        if self.busy {
            return Err(SessionError::Busy);
        }
        self.busy = true;
        Ok(())
    }

    /// Publish succeeded: drop the session and return to `Idle`
    pub(crate) fn mark_published(&mut self) {
        self.busy = false;
        self.reset_all();
    }

    /// Publish failed: clear the busy signal, keep the session as it was
    pub(crate) fn abort_publish(&mut self) {
        self.busy = false;
    }
}
