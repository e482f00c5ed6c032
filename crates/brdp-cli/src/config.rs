//! Client configuration at `~/.brdp/config.toml`.
//!
//! Provides default bastion host, user, and display settings so frequent
//! users don't repeat them on every invocation. CLI flags always override
//! config file values.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use brdp_core::profile::{DEFAULT_COLOR_DEPTH, DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Top-level config file structure. Read-only: brdp never writes its
/// config back.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Default connection settings.
    #[serde(default)]
    pub default: DefaultConfig,

    /// Display settings for emitted profiles.
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Default connection settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DefaultConfig {
    /// Default bastion host (empty = none).
    #[serde(default)]
    pub bastion: String,

    /// Default user name (empty = none).
    #[serde(default)]
    pub user: String,
}

/// Display settings for emitted profiles.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Resolution mode: "fullscreen", "multimonitor", or anything else for
    /// a fixed-size window.
    #[serde(default)]
    pub resolution: String,

    /// Desktop width for windowed sessions.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Desktop height for windowed sessions.
    #[serde(default = "default_height")]
    pub height: u32,

    /// Session color depth in bits per pixel.
    #[serde(default = "default_color_bpp")]
    pub color_bpp: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            resolution: String::new(),
            width: default_width(),
            height: default_height(),
            color_bpp: default_color_bpp(),
        }
    }
}

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

fn default_color_bpp() -> u8 {
    DEFAULT_COLOR_DEPTH
}

impl Config {
    /// Load configuration from a TOML file, returning defaults if the file
    /// does not exist.
    pub fn load(path: &str) -> Result<Self> {
        let path = Path::new(path);
        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("failed to parse config at {}", path.display()))?;

        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}
