use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Optional settings file looked up in the working directory.
pub const CONFIG_FILE: &str = "dashboard.json";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("slider min ({min}) must be below max ({max})")]
    EmptySliderRange { min: f64, max: f64 },
    #[error("slider step must be positive, got {0}")]
    InvalidStep(f64),
    #[error("slider mark {mark} lies outside {min}..={max}")]
    MarkOutOfRange { mark: f64, min: f64, max: f64 },
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Payload slider bounds, step and labelled tick marks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub marks: Vec<f64>,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 10_000.0,
            step: 1_000.0,
            marks: vec![0.0, 2_500.0, 5_000.0, 7_500.0, 10_000.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub min_width: f32,
    pub min_height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1100.0,
            height: 900.0,
            min_width: 600.0,
            min_height: 500.0,
        }
    }
}

/// Everything the dashboard reads at startup. Every field has a default, so a
/// partial `dashboard.json` only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Launch records CSV, relative to the working directory.
    pub data_path: PathBuf,
    pub title: String,
    pub slider: SliderConfig,
    pub window: WindowConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("spacex_launch_dash.csv"),
            title: "SpaceX Launch Records Dashboard".to_string(),
            slider: SliderConfig::default(),
            window: WindowConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Read `path` if it exists, otherwise fall back to the defaults.
    /// A file that exists but does not parse or validate is an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        if !path_ref.exists() {
            log::info!("No {} found, using default settings", path_ref.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading dashboard config {}", path_ref.display()))?;
        let config: DashboardConfig = serde_json::from_str(&contents)
            .with_context(|| format!("parsing dashboard config {}", path_ref.display()))?;
        config
            .validate()
            .with_context(|| format!("validating dashboard config {}", path_ref.display()))?;

        log::info!("Loaded settings from {}", path_ref.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let SliderConfig { min, max, step, .. } = self.slider;
        if !(min < max) {
            return Err(ConfigError::EmptySliderRange { min, max });
        }
        if !(step > 0.0) {
            return Err(ConfigError::InvalidStep(step));
        }
        if let Some(&mark) = self.slider.marks.iter().find(|&&m| m < min || m > max) {
            return Err(ConfigError::MarkOutOfRange { mark, min, max });
        }
        Ok(())
    }
}
