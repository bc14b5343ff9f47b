// SPDX-License-Identifier: GPL-3.0-only

//! Camera feed abstraction
//!
//! The capture engine pulls frames through [`CameraFeed`]. A feed may stop
//! being ready at any time (device unplugged, permission revoked); capture
//! failures are reported as errors and must never crash the session.

use crate::errors::CaptureError;
use std::sync::Arc;
use std::time::Instant;

/// One raw RGBA frame from the camera feed
///
/// Pixel data is shared via `Arc` so a frame can ride through the session,
/// the exporter and a publish request without copies.
#[derive(Debug, Clone)]
pub struct RawFrame {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Tightly packed RGBA pixel data
    pub data: Arc<[u8]>,
    /// When the frame was captured
    pub captured_at: Instant,
}

impl RawFrame {
    /// Construct a frame, verifying the buffer matches the dimensions
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CaptureError> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(CaptureError::CaptureFailed(format!(
                "frame buffer is {} bytes, expected {}",
                data.len(),
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            data: Arc::from(data),
            captured_at: Instant::now(),
        })
    }

    /// Buffer length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the frame holds no data
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// The live camera feed collaborator
pub trait CameraFeed {
    /// Whether the feed can currently produce frames
    fn is_ready(&self) -> bool;

    /// Capture the current frame
    ///
    /// Fails with [`CaptureError::FeedNotReady`] when the feed is down and
    /// [`CaptureError::NoFrameAvailable`] when no frame could be produced.
    fn capture_frame(&mut self) -> Result<RawFrame, CaptureError>;
}

/// Synthetic feed producing deterministic gradient frames
///
/// Used by the CLI demo and by tests. Each captured frame shifts its
/// gradient by the capture counter so consecutive shots are
/// distinguishable. Readiness can be toggled to exercise failure paths.
#[derive(Debug)]
pub struct TestPatternFeed {
    width: u32,
    height: u32,
    ready: bool,
    captures: u32,
}

impl TestPatternFeed {
    /// Create a ready feed with the given frame dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ready: true,
            captures: 0,
        }
    }

    /// Toggle feed readiness (simulates losing the device)
    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    /// Number of frames captured so far
    pub fn captures(&self) -> u32 {
        self.captures
    }
}

impl CameraFeed for TestPatternFeed {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn capture_frame(&mut self) -> Result<RawFrame, CaptureError> {
        if !self.ready {
            return Err(CaptureError::FeedNotReady);
        }

        let shift = (self.captures * 40) as u8;
        let mut data = Vec::with_capacity(self.width as usize * self.height as usize * 4);
        for y in 0..self.height {
            for x in 0..self.width {
                let r = ((x * 255) / self.width.max(1)) as u8;
                let g = ((y * 255) / self.height.max(1)) as u8;
                data.extend_from_slice(&[r.wrapping_add(shift), g, shift, 255]);
            }
        }
        self.captures += 1;

        RawFrame::new(self.width, self.height, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_dimensions_verified() {
        // Buffer too short for the declared dimensions
        assert!(RawFrame::new(4, 4, vec![0u8; 10]).is_err());
        assert!(RawFrame::new(4, 4, vec![0u8; 64]).is_ok());
    }

    #[test]
    fn test_pattern_feed_produces_distinct_frames() {
        let mut feed = TestPatternFeed::new(8, 8);
        let first = feed.capture_frame().unwrap();
        let second = feed.capture_frame().unwrap();
        assert_ne!(first.data, second.data);
        assert_eq!(feed.captures(), 2);
    }

    #[test]
    fn test_unready_feed_fails_capture() {
        let mut feed = TestPatternFeed::new(8, 8);
        feed.set_ready(false);
        assert!(!feed.is_ready());
        assert_eq!(
            feed.capture_frame().unwrap_err(),
            CaptureError::FeedNotReady
        );
    }
}
