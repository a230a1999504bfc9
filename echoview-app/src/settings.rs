//! Persistent device settings (JSON file).
//!
//! Every field has a default matching the observed deployment, so an absent
//! or partial settings file still yields a runnable configuration.

use std::fs;
use std::path::{Path, PathBuf};

use echoview_core::StreamConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct AppSettings {
    /// Transcriber subprocess invocation.
    pub stream: StreamConfig,
    /// OLED panel parameters.
    pub display: DisplaySettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct DisplaySettings {
    /// I2C bus device node.
    pub i2c_bus: PathBuf,
    /// 7-bit I2C address of the panel.
    pub i2c_address: u8,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Render to an in-memory stub instead of hardware.
    pub headless: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            i2c_bus: "/dev/i2c-1".into(),
            i2c_address: 0x3D,
            width: 128,
            height: 64,
            headless: false,
        }
    }
}

impl AppSettings {
    pub fn normalize(&mut self) {
        self.stream.threads = self.stream.threads.clamp(1, 16);
        self.stream.step_ms = self.stream.step_ms.clamp(500, 30_000);
        self.stream.length_ms = self.stream.length_ms.clamp(self.stream.step_ms, 60_000);

        if self.display.headless {
            self.display.width = self.display.width.clamp(8, 1_024);
            self.display.height = self.display.height.clamp(8, 1_024);
        } else {
            // The hardware sink drives a fixed 128×64 panel; other frame
            // sizes are only meaningful headless.
            if (self.display.width, self.display.height) != (128, 64) {
                warn!(
                    width = self.display.width,
                    height = self.display.height,
                    "non-native frame size ignored for hardware panel"
                );
            }
            self.display.width = 128;
            self.display.height = 64;
        }
    }
}

/// Settings file path: `ECHOVIEW_SETTINGS` or `echoview.json` beside the binary.
pub fn default_settings_path() -> PathBuf {
    std::env::var_os("ECHOVIEW_SETTINGS")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("echoview.json"))
}

/// Load and normalize settings; any read or parse failure falls back to
/// defaults rather than aborting startup.
pub fn load_settings(path: &Path) -> AppSettings {
    let mut settings = match fs::read_to_string(path) {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(path = ?path, error = %e, "settings file invalid — using defaults");
                AppSettings::default()
            }
        },
        Err(_) => AppSettings::default(),
    };
    settings.normalize();
    settings
}
