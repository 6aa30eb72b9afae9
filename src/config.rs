//! Tunables and viewport configuration.
//!
//! The core takes both by value at construction; nothing in the engine reads
//! ambient globals. The CLI loads tunables from
//! `~/.config/flickview/config.toml`, installing the bundled default on
//! first run.

use anyhow::{Result, anyhow};
use directories::UserDirs;
use log::info;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::error::ConfigError;

/// Explicit viewport size, re-injected on resize.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    pub width: f64,
    pub height: f64,
}

impl ViewportConfig {
    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Gesture/physics constants. The defaults are the tuned values the engine
/// ships with; the config file only needs to name the ones it overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tunables {
    /// Gap between slides in the filmstrip, px.
    pub slide_margin: f64,
    /// Drag delta beyond which a release advances to the neighbor slide, px.
    pub snap_threshold: f64,
    /// Eased transition applied to the snap, ms.
    pub snap_duration_ms: u64,
    /// Two taps within this window make a double-tap, ms.
    pub double_tap_ms: u64,
    /// Zoom ratio applied by a double-tap on a non-zoomed image.
    pub double_tap_ratio: f64,
    /// Frame-time unit the release speed is normalized to, ms.
    pub momentum_frame_ms: f64,
    /// Cap on the decay constant; higher release speeds decay no slower.
    pub momentum_rate_cap: f64,
    /// Decay ends once speed falls below this, px per frame.
    pub momentum_min_speed: f64,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            slide_margin: 30.0,
            snap_threshold: 100.0,
            snap_duration_ms: 300,
            double_tap_ms: 300,
            double_tap_ratio: 2.0,
            momentum_frame_ms: 16.67,
            momentum_rate_cap: 10.0,
            momentum_min_speed: 0.1,
        }
    }
}

impl Tunables {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let tunables: Self = toml::from_str(text)?;
        tunables.validate()?;
        Ok(tunables)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slide_margin < 0.0 {
            return Err(ConfigError::Invalid("slide_margin must be >= 0".into()));
        }
        if self.snap_threshold <= 0.0 {
            return Err(ConfigError::Invalid("snap_threshold must be > 0".into()));
        }
        if self.double_tap_ms == 0 {
            return Err(ConfigError::Invalid("double_tap_ms must be > 0".into()));
        }
        if self.double_tap_ratio <= 0.0 {
            return Err(ConfigError::Invalid("double_tap_ratio must be > 0".into()));
        }
        if self.momentum_frame_ms <= 0.0 || self.momentum_rate_cap <= 0.0 {
            return Err(ConfigError::Invalid(
                "momentum_frame_ms and momentum_rate_cap must be > 0".into(),
            ));
        }
        if self.momentum_min_speed <= 0.0 {
            return Err(ConfigError::Invalid(
                "momentum_min_speed must be > 0".into(),
            ));
        }
        Ok(())
    }
}

fn config_dir() -> Result<PathBuf> {
    let user = UserDirs::new().ok_or_else(|| anyhow!("cannot resolve home directory"))?;
    Ok(user.home_dir().join(".config").join("flickview"))
}

fn default_config_text() -> &'static str {
    include_str!("../config/default.toml")
}

/// Load `~/.config/flickview/config.toml`, installing the bundled default
/// when missing.
pub fn load_or_install_default() -> Result<Tunables> {
    let dir = config_dir()?;
    fs::create_dir_all(&dir)?;

    let path = dir.join("config.toml");
    if !path.exists() {
        fs::write(&path, default_config_text())?;
        info!("installed default config at {}", path.display());
    }

    let text = fs::read_to_string(&path)
        .map_err(|e| anyhow!("failed to read {}: {e}", path.display()))?;
    let tunables = Tunables::from_toml_str(&text)
        .map_err(|e| anyhow!("failed to load {}: {e}", path.display()))?;
    Ok(tunables)
}
