//! Run settings
//!
//! Optional YAML file describing one generation run. Every field has a
//! default, so an empty file is valid.
//!
//! ```yaml
//! subdivision: Hihifo
//! start_year: 2002
//! end_year: 2025
//! seed: 42
//! noise_scale: 1.0
//! output_dir: out
//! ```

use crate::error::{CoreError, Result};
use crate::period::{YearRange, DEFAULT_END_YEAR, DEFAULT_START_YEAR};
use crate::registry::FALLBACK_SUBDIVISION;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::{env, fs};

/// Environment variable pointing at a settings file.
pub const SETTINGS_PATH_ENV: &str = "WF_SETTINGS_PATH";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSettings {
    #[serde(default = "default_subdivision")]
    pub subdivision: String,
    #[serde(default = "default_start_year")]
    pub start_year: i32,
    #[serde(default = "default_end_year")]
    pub end_year: i32,
    /// Fixed seed for reproducible output; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// 1.0 = nominal noise, 0.0 = deterministic trend only
    #[serde(default = "default_noise_scale")]
    pub noise_scale: f64,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_subdivision() -> String {
    FALLBACK_SUBDIVISION.to_string()
}
fn default_start_year() -> i32 {
    DEFAULT_START_YEAR
}
fn default_end_year() -> i32 {
    DEFAULT_END_YEAR
}
fn default_noise_scale() -> f64 {
    1.0
}
fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            subdivision: default_subdivision(),
            start_year: default_start_year(),
            end_year: default_end_year(),
            seed: None,
            noise_scale: default_noise_scale(),
            output_dir: default_output_dir(),
        }
    }
}

impl RunSettings {
    pub fn from_yaml(content: &str) -> Result<Self> {
        // serde_yaml rejects a blank document; treat it as all defaults
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: RunSettings = serde_yaml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Settings from `WF_SETTINGS_PATH`, or `None` when unset or blank.
    pub fn from_env() -> Result<Option<Self>> {
        let Ok(path) = env::var(SETTINGS_PATH_ENV) else {
            return Ok(None);
        };
        let path = path.trim();
        if path.is_empty() {
            return Ok(None);
        }
        Self::load(Path::new(path)).map(Some)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.noise_scale.is_finite() || self.noise_scale < 0.0 {
            return Err(CoreError::InvalidSettings(format!(
                "noise_scale must be finite and non-negative, got {}",
                self.noise_scale
            )));
        }
        self.year_range().map(|_| ())
    }

    pub fn year_range(&self) -> Result<YearRange> {
        YearRange::new(self.start_year, self.end_year)
    }
}
