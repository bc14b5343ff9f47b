// SPDX-License-Identifier: MPL-2.0

//! Photobooth - multi-shot capture, compositing and reaction core
//!
//! This library provides the core logic of a photobooth application:
//! timed multi-shot capture with live filters and overlays, strip export,
//! publishing, and the reaction toggle protocol for published photos.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`session`]: the capture session state machine and its commands
//! - [`filters`]: adjustment levels and the derived render transform
//! - [`overlay`]: sticker identifiers and the per-shot layout resolver
//! - [`reactions`]: the one-reaction-per-user toggle protocol
//! - [`pipelines`]: strip export and publish flows
//! - [`backends`]: camera feed and persistence collaborator traits
//! - [`config`]: user configuration handling
//! - [`storage`]: export directory and file saving
//!
//! # Example
//!
//! ```ignore
//! // Run the demo capture session via the CLI:
//! // photobooth capture --title "Sunset"
//! ```

pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod filters;
pub mod overlay;
pub mod pipelines;
pub mod reactions;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use backends::{CameraFeed, MemoryStore, PhotoStore, RawFrame, TestPatternFeed};
pub use backends::store::{PhotoId, UserId};
pub use config::Config;
pub use constants::{BackgroundStyle, BorderStyle, SESSION_SHOTS};
pub use filters::{FilterSettings, RenderTransform};
pub use overlay::{OverlayContext, OverlayId};
pub use reactions::{ReactionAction, ReactionAggregate, ReactionKind, ReactionRecord, toggle};
pub use session::{CaptureSession, PublishRequest, SessionEngine, SessionPhase};
