// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// File name of the persisted configuration inside the data directory.
pub const CONFIG_FILE: &str = "config.json";

/// Resolution metadata applied to images embedded as PDF pages.
pub const DEFAULT_RESOLUTION_DPI: f32 = 100.0;

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Dots per inch used to size image pages (one pixel = 1/dpi inch).
    pub image_resolution_dpi: f32,
    /// Rotation applied when the user does not pick an angle.
    pub default_rotation: i64,
    /// Directory for outputs given as bare file names.
    pub output_dir: Option<PathBuf>,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            image_resolution_dpi: DEFAULT_RESOLUTION_DPI,
            default_rotation: 90,
            output_dir: None,
            log_filter: "info".into(),
        }
    }
}

impl AppConfig {
    /// Load the persisted config from `data_dir`.
    ///
    /// A missing or unreadable file is `Ok(None)`; a file that exists but
    /// does not parse is an error, so the caller can report it once logging
    /// is up.
    pub fn load(data_dir: &Path) -> Result<Option<Self>, serde_json::Error> {
        let path = data_dir.join(CONFIG_FILE);
        let Ok(data) = std::fs::read_to_string(&path) else {
            return Ok(None);
        };
        let config = serde_json::from_str(&data)?;
        debug!(path = %path.display(), "config loaded");
        Ok(Some(config))
    }

    /// Persist the config as pretty-printed JSON, creating `data_dir` if needed.
    pub fn save(&self, data_dir: &Path) -> std::io::Result<()> {
        std::fs::create_dir_all(data_dir)?;
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(data_dir.join(CONFIG_FILE), json)
    }

    /// Options for image-to-PDF conversion derived from this config.
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            resolution_dpi: self.image_resolution_dpi,
        }
    }

    /// Resolve an output path: bare file names land in `output_dir` when one
    /// is configured; anything with a directory component is left alone.
    pub fn resolve_output(&self, output: &Path) -> PathBuf {
        let is_bare = output
            .parent()
            .is_none_or(|parent| parent.as_os_str().is_empty());
        match (&self.output_dir, is_bare) {
            (Some(dir), true) => dir.join(output),
            _ => output.to_path_buf(),
        }
    }
}

/// Settings for image-to-PDF conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvertOptions {
    pub resolution_dpi: f32,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            resolution_dpi: DEFAULT_RESOLUTION_DPI,
        }
    }
}
