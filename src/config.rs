//! Configuration file support
//!
//! Optional defaults are read from `~/.config/repolog/config.toml` (XDG
//! standard). Command-line flags override file values, and pattern lists
//! from both places are concatenated.
//!
//! ```toml
//! [log]
//! format = "[%rn] <%an> %s"
//! parallelism = 16
//! oneline = true
//!
//! [filter]
//! exclude_repo = ["archive/"]
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::services::PipelineOptions;
use crate::error::{Error, Result};

/// Application directory name under the user config directory
pub const CONFIG_DIR_NAME: &str = "repolog";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Contents of the config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepologConfig {
    /// Log rendering settings
    #[serde(default)]
    pub log: LogConfig,
    /// Default filter patterns
    #[serde(default)]
    pub filter: FilterConfig,
}

/// `[log]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// git pretty-format template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Maximum repositories read at once
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallelism: Option<i64>,
    /// Collapse commits to one line
    #[serde(default)]
    pub oneline: bool,
}

/// `[filter]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterConfig {
    /// Repository path patterns to drop
    #[serde(default)]
    pub exclude_repo: Vec<String>,
    /// Repository path patterns to require
    #[serde(default)]
    pub include_repo: Vec<String>,
    /// Commit text patterns to drop
    #[serde(default)]
    pub exclude_log: Vec<String>,
    /// Commit text patterns to require
    #[serde(default)]
    pub include_log: Vec<String>,
}

impl RepologConfig {
    /// Default config file location, if the platform has a config directory
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load the config from its default location
    ///
    /// A missing file (or a platform without a config directory) yields the
    /// defaults.
    pub fn load() -> Result<Self> {
        Self::default_path().map_or_else(|| Ok(Self::default()), |path| Self::load_from(&path))
    }

    /// Load the config from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("no config file at {}", path.display());
                return Ok(Self::default());
            },
            Err(err) => return Err(config_error(path, &err)),
        };
        Self::parse(&content).map_err(|err| config_error(path, &err))
    }

    /// Parse config file contents
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Pipeline options with this file's values over the built-in defaults
    #[must_use]
    pub fn pipeline_options(&self) -> PipelineOptions {
        let defaults = PipelineOptions::default();
        PipelineOptions {
            exclude_repo: self.filter.exclude_repo.clone(),
            include_repo: self.filter.include_repo.clone(),
            exclude_log: self.filter.exclude_log.clone(),
            include_log: self.filter.include_log.clone(),
            format: self.log.format.clone().unwrap_or(defaults.format),
            parallelism: self.log.parallelism.unwrap_or(defaults.parallelism),
            oneline: self.log.oneline,
        }
    }
}

fn config_error(path: &Path, err: &dyn std::error::Error) -> Error {
    Error::Config {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
