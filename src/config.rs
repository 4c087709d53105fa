// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Solver configuration, loadable from TOML.
//!
//! ```toml
//! max_iterations = 5000
//! orphan_gap = 2
//! anchor = { x = 10, y = 4 }
//!
//! [render]
//! max_width = 80
//! ```
//!
//! Every key is optional.

use crate::geometry::Position;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Node budget for one solve.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u64,

    /// Where the root component goes.
    #[serde(default)]
    pub anchor: Position,

    /// Columns left between the layout and each orphan placed east of it.
    #[serde(default = "default_orphan_gap")]
    pub orphan_gap: i32,

    #[serde(default)]
    pub render: RenderLimits,
}

/// Maximum size of a rendered layout; larger layouts are truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderLimits {
    #[serde(default = "default_max_width")]
    pub max_width: usize,
    #[serde(default = "default_max_height")]
    pub max_height: usize,
}

fn default_max_iterations() -> u64 {
    10_000
}

fn default_orphan_gap() -> i32 {
    1
}

fn default_max_width() -> usize {
    120
}

fn default_max_height() -> usize {
    40
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            anchor: Position::default(),
            orphan_gap: default_orphan_gap(),
            render: RenderLimits::default(),
        }
    }
}

impl Default for RenderLimits {
    fn default() -> Self {
        Self {
            max_width: default_max_width(),
            max_height: default_max_height(),
        }
    }
}

impl SolverConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: SolverConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(ConfigError::Invalid("max_iterations must be positive".into()));
        }
        if self.orphan_gap < 0 {
            return Err(ConfigError::Invalid("orphan_gap must not be negative".into()));
        }
        Ok(())
    }

    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_anchor(mut self, anchor: Position) -> Self {
        self.anchor = anchor;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_toml() {
        let config = SolverConfig::from_toml_str("").unwrap();
        assert_eq!(config, SolverConfig::default());
        assert_eq!(config.max_iterations, 10_000);
        assert_eq!(config.orphan_gap, 1);
        assert_eq!(config.render.max_width, 120);
        assert_eq!(config.render.max_height, 40);
    }

    #[test]
    fn test_partial_toml() {
        let config = SolverConfig::from_toml_str(
            "max_iterations = 50\nanchor = { x = 3, y = -2 }\n[render]\nmax_width = 80\n",
        )
        .unwrap();
        assert_eq!(config.max_iterations, 50);
        assert_eq!(config.anchor, Position::new(3, -2));
        assert_eq!(config.render.max_width, 80);
        assert_eq!(config.render.max_height, 40);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            SolverConfig::from_toml_str("max_iterations = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SolverConfig::from_toml_str("orphan_gap = \"wide\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SolverConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
