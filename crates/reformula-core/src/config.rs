//! Run configuration.
//!
//! Loaded from TOML; every key is optional and falls back to its default:
//!
//! ```toml
//! [search]
//! max_depth = 10    # window size K
//! tolerance = 0.01  # epsilon
//!
//! [region]
//! start_row = 3     # first data row (after headers)
//! start_col = 2     # first data column (after labels)
//! ```

use std::path::Path;

use reformula_engine::engine::{
    DEFAULT_MAX_DEPTH, DEFAULT_TOLERANCE, MAX_SEARCH_DEPTH, SearchConfig,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ReformulaError, Result};

/// A formula needs at least two terms.
const MIN_SEARCH_DEPTH: usize = 2;

/// Where the data region starts. It extends to the sheet's last row and column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegionConfig {
    pub start_row: usize,
    pub start_col: usize,
}

impl Default for RegionConfig {
    fn default() -> Self {
        RegionConfig {
            start_row: 3,
            start_col: 2,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub search: SearchConfig,
    pub region: RegionConfig,
}

impl Config {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML file.
    pub fn load(path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path)?;
        Config::from_toml_str(&content)
    }

    /// Read `path` if it exists, otherwise use defaults.
    pub fn load_or_default(path: &Path) -> Result<Config> {
        if path.exists() {
            Config::load(path)
        } else {
            Ok(Config::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        let depth = self.search.max_depth;
        if !(MIN_SEARCH_DEPTH..=MAX_SEARCH_DEPTH).contains(&depth) {
            return Err(ReformulaError::Config(format!(
                "search.max_depth must be between {} and {}, got {}",
                MIN_SEARCH_DEPTH, MAX_SEARCH_DEPTH, depth
            )));
        }
        let tolerance = self.search.tolerance;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ReformulaError::Config(format!(
                "search.tolerance must be a non-negative number, got {}",
                tolerance
            )));
        }
        if self.region.start_row == 0 || self.region.start_col == 0 {
            return Err(ReformulaError::Config(
                "region.start_row and region.start_col are 1-based".to_string(),
            ));
        }

        if depth > DEFAULT_MAX_DEPTH {
            warn!(depth, "search depth above the default makes each search much slower");
        }
        if tolerance > DEFAULT_TOLERANCE * 100.0 {
            warn!(tolerance, "large tolerance accepts loose matches");
        }
        Ok(())
    }
}
