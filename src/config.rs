use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::sink::Points;

/// Indentation added per nesting level.
pub const DEFAULT_INDENT_STEP: Points = Points(30);

/// Space after headings (signatures, field names, definition terms).
pub const DEFAULT_TITLE_SPACING: Points = Points(4);

/// Deepest description nesting accepted before the tree is considered
/// unbounded.
pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("indent_step must be greater than zero")]
    ZeroIndentStep,

    #[error("max_depth must be greater than zero")]
    ZeroMaxDepth,
}

/// Engine-wide rendering constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub indent_step: Points,
    pub title_spacing: Points,
    pub max_depth: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent_step: DEFAULT_INDENT_STEP,
            title_spacing: DEFAULT_TITLE_SPACING,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl RenderConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: RenderConfig = toml::from_str(content)?;
        config.validate()
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.indent_step == Points::ZERO {
            return Err(ConfigError::ZeroIndentStep);
        }
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroMaxDepth);
        }
        Ok(self)
    }
}
