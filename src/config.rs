//! Runtime configuration, loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) yields the stock behaviour:
//! a 200px code with a quiet margin, free logo placement and `qrcode.svg` as download name.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::common::{QRError, QRResult};
use crate::compose::RenderOptions;
use crate::placement::PlacementMode;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Rendered width and height of the code, in pixels.
    pub display_size: u32,
    /// Draws the 4 module quiet zone around the matrix.
    pub include_margin: bool,
    pub placement_mode: PlacementMode,
    pub download_filename: String,
    /// Zero disables auto-dismiss.
    pub notification_timeout_ms: u64,
    pub share_title: String,
    pub share_text: String,
    pub email_subject: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display_size: 200,
            include_margin: true,
            placement_mode: PlacementMode::Free,
            download_filename: "qrcode.svg".to_string(),
            notification_timeout_ms: 5000,
            share_title: "QR Code".to_string(),
            share_text: "Check out this QR code!".to_string(),
            email_subject: "Check out this QR code".to_string(),
        }
    }
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> QRResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> QRResult<Self> {
        let config: Config = toml::from_str(content).map_err(|e| QRError::Config(e.to_string()))?;
        if config.display_size == 0 {
            return Err(QRError::Config("display_size must be greater than zero".to_string()));
        }
        if config.download_filename.trim().is_empty() {
            return Err(QRError::Config("download_filename must not be empty".to_string()));
        }
        Ok(config)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions { display_size: self.display_size, include_margin: self.include_margin }
    }

    pub fn notification_timeout(&self) -> Option<Duration> {
        match self.notification_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }
}
