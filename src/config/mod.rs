//! Export configuration
//!
//! The source document and destination directory default to `articles.json`
//! and `markdown_files` in the working directory; [`ExportConfig`] overrides them.
//! Values are layered in this order, later layers winning:
//!
//! 1. built-in defaults
//! 2. an optional TOML file
//! 3. `ARTICLE_EXPORT_*` environment variables
//! 4. command-line flags (applied by the binary)
//!
//! # Example
//!
//! ```toml
//! input_path = "data/articles.json"
//! output_dir = "content/posts"
//! max_parallel_writes = 16
//! on_duplicate = "first-wins"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

use crate::error::{ExportError, ExportResult};


pub const DEFAULT_INPUT_PATH: &str = "articles.json";
pub const DEFAULT_OUTPUT_DIR: &str = "markdown_files";
pub const DEFAULT_MAX_PARALLEL_WRITES: usize = 64;

pub const ENV_INPUT: &str = "ARTICLE_EXPORT_INPUT";
pub const ENV_OUTPUT_DIR: &str = "ARTICLE_EXPORT_OUTPUT_DIR";
pub const ENV_MAX_PARALLEL: &str = "ARTICLE_EXPORT_MAX_PARALLEL";
pub const ENV_ON_DUPLICATE: &str = "ARTICLE_EXPORT_ON_DUPLICATE";

/// Which record wins when several records share a slug
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// The record appearing last in the input is written
    #[default]
    LastWins,
    /// The record appearing first in the input is written
    FirstWins,
}

impl FromStr for DuplicatePolicy {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last-wins" | "last" => Ok(Self::LastWins),
            "first-wins" | "first" => Ok(Self::FirstWins),
            other => Err(ExportError::config(format!(
                "unknown duplicate policy '{other}' (expected last-wins or first-wins)"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// JSON document holding the article records
    pub input_path: PathBuf,
    /// Directory receiving one `{slug}.md` per article
    pub output_dir: PathBuf,
    /// Upper bound on writes in flight at once
    pub max_parallel_writes: usize,
    pub on_duplicate: DuplicatePolicy,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            max_parallel_writes: DEFAULT_MAX_PARALLEL_WRITES,
            on_duplicate: DuplicatePolicy::default(),
        }
    }
}

impl ExportConfig {
    pub fn new(input_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_max_parallel_writes(mut self, max: usize) -> Self {
        self.max_parallel_writes = max;
        self
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.on_duplicate = policy;
        self
    }

    /// Load defaults, the optional TOML file and the process environment
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        config.merge_env_vars();
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn merge_env_vars(&mut self) {
        self.merge_env_with(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn merge_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(input) = lookup(ENV_INPUT) {
            self.input_path = PathBuf::from(input);
        }

        if let Some(output) = lookup(ENV_OUTPUT_DIR) {
            self.output_dir = PathBuf::from(output);
        }

        if let Some(max) = lookup(ENV_MAX_PARALLEL) {
            match max.trim().parse::<usize>() {
                Ok(value) => self.max_parallel_writes = value,
                Err(_) => warn!("Ignoring {ENV_MAX_PARALLEL}={max:?}: not a number"),
            }
        }

        if let Some(policy) = lookup(ENV_ON_DUPLICATE) {
            match policy.parse::<DuplicatePolicy>() {
                Ok(value) => self.on_duplicate = value,
                Err(e) => warn!("Ignoring {ENV_ON_DUPLICATE}: {e}"),
            }
        }
    }

    pub fn validate(&self) -> ExportResult<()> {
        if self.input_path.as_os_str().is_empty() {
            return Err(ExportError::config("input path must not be empty"));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ExportError::config("output directory must not be empty"));
        }
        if self.max_parallel_writes == 0 {
            return Err(ExportError::config("max_parallel_writes must be at least 1"));
        }
        Ok(())
    }
}
