// SPDX-License-Identifier: GPL-3.0-only

//! User configuration handling
//!
//! Preferences persist as JSON under the platform config directory and
//! survive application runs. Loading falls back to defaults on a missing
//! or unreadable file so a broken config never blocks startup.

use crate::constants::{BackgroundStyle, BorderStyle};
use crate::errors::{AppError, AppResult};
use crate::overlay::OverlayId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Config format version, bumped on incompatible changes
const CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Config format version
    pub version: u32,
    /// Display name attached to published photos
    pub display_name: String,
    /// Export directory override (default: ~/Pictures/photobooth)
    pub export_dir: Option<PathBuf>,
    /// Reveal the exported file in the file manager after saving
    pub reveal_after_export: bool,
    /// Last used overlay, restored on the next session
    pub last_overlay: OverlayId,
    /// Last used background gradient
    pub last_background: BackgroundStyle,
    /// Last used border color
    pub last_border: BorderStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            display_name: String::new(),
            export_dir: None,
            reveal_after_export: false,
            last_overlay: OverlayId::default(),
            last_background: BackgroundStyle::default(),
            last_border: BorderStyle::default(),
        }
    }
}

impl Config {
    /// Path of the config file under the platform config directory
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("photobooth").join("config.json"))
    }

    /// Load the config, falling back to defaults when missing or invalid
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            warn!("No config directory available, using defaults");
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<Config>(&contents) {
                Ok(config) if config.version == CONFIG_VERSION => {
                    debug!(path = %path.display(), "Config loaded");
                    config
                }
                Ok(config) => {
                    warn!(
                        found = config.version,
                        expected = CONFIG_VERSION,
                        "Config version mismatch, using defaults"
                    );
                    Self::default()
                }
                Err(error) => {
                    warn!(%error, "Config unreadable, using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Persist the config
    pub fn save(&self) -> AppResult<()> {
        let path =
            Self::path().ok_or_else(|| AppError::Config("no config directory".to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(&path, contents)?;
        debug!(path = %path.display(), "Config saved");
        Ok(())
    }

    /// Effective export directory
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(crate::storage::default_export_dir)
    }
}
