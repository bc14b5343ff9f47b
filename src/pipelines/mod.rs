// SPDX-License-Identifier: MPL-2.0

//! Processing pipelines for finalized sessions
//!
//! Both pipelines consume a completed capture session without mutating it
//! until the external call succeeds:
//!
//! ```text
//! ┌──────────────┐     ┌───────────────────┐     ┌──────────────┐
//! │ CaptureShots │ ──▶ │  Export Pipeline  │ ──▶ │   PNG File   │
//! │ (RGBA+filter)│     │  - Filters        │     │              │
//! │              │     │  - Overlays       │     │              │
//! │              │     │  - Frame styling  │     │              │
//! └──────────────┘     └───────────────────┘     └──────────────┘
//!
//! ┌──────────────┐     ┌───────────────────┐     ┌──────────────┐
//! │PublishRequest│ ──▶ │ Publish Pipeline  │ ──▶ │  PhotoStore  │
//! │              │     │  - busy signal    │     │              │
//! │              │     │  - reset on OK    │     │              │
//! └──────────────┘     └───────────────────┘     └──────────────┘
//! ```
//!
//! Pixel work runs on a blocking task so async callers stay responsive.
//!
//! # Modules
//!
//! - [`export`]: strip rendering and PNG encoding
//! - [`publish`]: busy-guarded publish against the persistence collaborator

pub mod export;
pub mod publish;
