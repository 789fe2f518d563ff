use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::severity::SeverityTables;
use crate::error::DqaError;
use crate::Result;

pub const CONFIG_DIR_NAME: &str = "dqa";
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub thresholds: Thresholds,
    pub max_components_per_chunk: usize,
    pub max_array_length: usize,
    pub max_string_length: usize,
    /// Nesting depth beyond which the sanitizer prunes values
    pub max_depth: usize,
    /// Flatten `children` into the component list before chunking
    pub include_children: bool,
    pub matching: MatchingConfig,
    pub severity: SeverityTables,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            max_components_per_chunk: 10,
            max_array_length: 1000,
            max_string_length: 1000,
            max_depth: 32,
            include_children: false,
            matching: MatchingConfig::default(),
            severity: SeverityTables::default(),
        }
    }
}

/// Comparison tolerances; differences at or below these count as matches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub color_difference: f64,
    pub size_difference: f64,
    pub spacing_difference: f64,
    pub font_size_difference: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            color_difference: 10.0,
            size_difference: 5.0,
            spacing_difference: 3.0,
            font_size_difference: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    pub strategy: StrategyKind,
    /// Candidates must score strictly above this to be accepted
    pub acceptance_threshold: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Weighted,
            acceptance_threshold: 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    #[default]
    Weighted,
    Spatial,
}

impl StrategyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Weighted => "weighted",
            StrategyKind::Spatial => "spatial",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = DqaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weighted" => Ok(StrategyKind::Weighted),
            "spatial" => Ok(StrategyKind::Spatial),
            other => Err(DqaError::Config(format!(
                "Unknown matching strategy '{other}', expected one of: weighted, spatial"
            ))),
        }
    }
}

impl Config {
    /// Path of the per-user config file (`~/.config/dqa/config.toml`).
    pub fn central_config_path() -> Option<PathBuf> {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .filter(|p| p.is_absolute())
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
        Some(base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load config from an explicit path, the central config, or defaults.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        if let Some(path) = path {
            if !path.exists() {
                return Err(DqaError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::from_file(path);
        }

        match Self::central_config_path() {
            Some(central) if central.exists() => Self::from_file(&central),
            _ => Ok(Config::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Config> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Config> {
        let parsed: Config = toml::from_str(raw)?;
        Ok(parsed)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_components_per_chunk == 0 {
            return Err(DqaError::Config(
                "max_components_per_chunk must be at least 1".to_string(),
            ));
        }
        if self.max_array_length == 0 || self.max_string_length == 0 {
            return Err(DqaError::Config(
                "max_array_length and max_string_length must be at least 1".to_string(),
            ));
        }
        if self.max_depth == 0 {
            return Err(DqaError::Config("max_depth must be at least 1".to_string()));
        }

        let t = &self.thresholds;
        for (name, value) in [
            ("color_difference", t.color_difference),
            ("size_difference", t.size_difference),
            ("spacing_difference", t.spacing_difference),
            ("font_size_difference", t.font_size_difference),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(DqaError::Config(format!(
                    "tolerance {name} must be a non-negative number, got {value}"
                )));
            }
        }

        let threshold = self.matching.acceptance_threshold;
        if !(0.0..1.0).contains(&threshold) {
            return Err(DqaError::Config(format!(
                "acceptance threshold must lie in [0, 1), got {threshold}"
            )));
        }

        self.severity.validate()
    }
}
