// src/config.rs

//! Configuration for the `tileblit` driver.
//!
//! Every section can be omitted from the JSON file; missing fields take the
//! defaults below.

use std::path::Path;

use anyhow::Context;
use log::info;
use serde::{Deserialize, Serialize};

use crate::blitter::factory::DEFAULT_BLITTER;

/// Environment variable naming the JSON configuration file.
pub const CONFIG_ENV_VAR: &str = "TILEBLIT_CONFIG";

// --- Top-Level Configuration Structure ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub blitter: BlitterConfig,
    pub screen: ScreenConfig,
    pub animation: AnimationConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Parses the JSON configuration at `path`.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let config: Config = serde_json::from_str(text)?;
        Ok(config)
    }

    /// Loads the file named by `TILEBLIT_CONFIG`, or returns the defaults
    /// when the variable is unset.
    pub fn load_or_default() -> anyhow::Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                info!("Loading configuration from {:?}", path);
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }
}

// --- Blitter Configuration ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlitterConfig {
    /// Registry name of the blitter. Empty selects the default blitter.
    pub name: String,
}

impl Default for BlitterConfig {
    fn default() -> Self {
        BlitterConfig {
            name: DEFAULT_BLITTER.to_string(),
        }
    }
}

// --- Screen Configuration ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        ScreenConfig {
            width: 640,
            height: 480,
        }
    }
}

// --- Animation Configuration ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Palette animation ticks the headless driver runs.
    pub frames: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        AnimationConfig { frames: 8 }
    }
}

// --- Logging Configuration ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `env_logger` filter; `RUST_LOG` takes precedence.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: "info".to_string(),
        }
    }
}
