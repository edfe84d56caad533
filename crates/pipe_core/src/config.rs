//! Puzzle configuration.
//!
//! Configs are JSON files; every field is optional and falls back to the
//! reference setup (10x10, reference weights, random seed).
//!
//! ```json
//! { "rows": 6, "cols": 8, "seed": 42, "weights": { "corner": 60 } }
//! ```

use crate::generator::{GridGenerator, DEFAULT_START_ATTEMPTS};
use crate::grid::{DEFAULT_COLS, DEFAULT_ROWS};
use crate::selector::WeightTable;
use crate::session::{DEFAULT_GENERATE_ATTEMPTS, DEFAULT_SCRAMBLE_ATTEMPTS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Errors that can occur while loading a config.
#[derive(Debug)]
pub enum ConfigError {
    /// File system error
    Io(std::io::Error),
    /// Malformed JSON or wrong field types
    Json(serde_json::Error),
    /// Parsed but unusable values
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Json(e) => write!(f, "JSON error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

/// Settings for generating and presenting one puzzle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleConfig {
    pub rows: usize,
    pub cols: usize,
    /// Fixed seed for reproducible puzzles; None draws from entropy
    pub seed: Option<u64>,
    pub weights: WeightTable,
    /// Start cells tried before generation gives up
    pub start_attempts: usize,
    /// Randomly rotate tiles after generation
    pub scramble: bool,
    /// Re-scrambles allowed when a scramble leaves the grid solved
    pub scramble_attempts: usize,
    /// Grids generated for a session while the result still has gaps
    pub generate_attempts: usize,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            seed: None,
            weights: WeightTable::default(),
            start_attempts: DEFAULT_START_ATTEMPTS,
            scramble: true,
            scramble_attempts: DEFAULT_SCRAMBLE_ATTEMPTS,
            generate_attempts: DEFAULT_GENERATE_ATTEMPTS,
        }
    }
}

impl PuzzleConfig {
    /// Load and validate a JSON config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parse and validate a JSON config string.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: PuzzleConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::Invalid(format!(
                "grid must have at least one row and column, got {}x{}",
                self.rows, self.cols
            )));
        }
        if self.rows.checked_mul(self.cols).is_none() {
            return Err(ConfigError::Invalid(format!(
                "grid of {}x{} cells is too large",
                self.rows, self.cols
            )));
        }
        if let Some(shape) = self.weights.zero_weight_shape() {
            return Err(ConfigError::Invalid(format!(
                "weight for {} must be positive",
                shape
            )));
        }
        if self.start_attempts == 0 {
            return Err(ConfigError::Invalid(
                "start_attempts must be at least 1".to_string(),
            ));
        }
        if self.generate_attempts == 0 {
            return Err(ConfigError::Invalid(
                "generate_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// A generator configured from these settings.
    pub fn generator(&self) -> GridGenerator {
        GridGenerator::new(self.rows, self.cols)
            .with_weights(self.weights)
            .with_start_attempts(self.start_attempts)
    }
}
