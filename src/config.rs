//! Run configuration: report cadence, read buffer size and extremal word capacity.
//!
//! Values come from [`AnalyzerConfig::default`], an optional TOML file, and
//! finally from explicit overrides (CLI flags or [`crate::PipelineBuilder`]).

use crate::error::{Result, StatsError};
use crate::tokenizer::BoundaryPolicy;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Characters processed between intermediate reports
pub const DEFAULT_REPORT_INTERVAL: u64 = 1_000_000;

/// Bytes requested from the source per read
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Number of shortest and longest distinct words tracked
pub const DEFAULT_TOP_K: usize = 5;

/// Configuration for a stream statistics run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    pub report_interval: u64,
    pub chunk_size: usize,
    pub top_k: usize,
    pub boundary: BoundaryPolicy,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            report_interval: DEFAULT_REPORT_INTERVAL,
            chunk_size: DEFAULT_CHUNK_SIZE,
            top_k: DEFAULT_TOP_K,
            boundary: BoundaryPolicy::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Parse a configuration from TOML text; missing keys keep their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: AnalyzerConfig = toml::from_str(contents)
            .map_err(|e| StatsError::ConfigError(format!("invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path).map_err(|e| {
            StatsError::ConfigError(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Reject values that would make a run meaningless
    pub fn validate(&self) -> Result<()> {
        if self.report_interval == 0 {
            return Err(StatsError::ConfigError(
                "report interval must be at least 1 character".into(),
            ));
        }
        if self.chunk_size == 0 {
            return Err(StatsError::ConfigError(
                "chunk size must be at least 1 byte".into(),
            ));
        }
        if self.top_k == 0 {
            return Err(StatsError::ConfigError(
                "top-k must track at least 1 word".into(),
            ));
        }
        Ok(())
    }
}
