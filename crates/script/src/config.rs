// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Generator settings loaded from TOML.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory the debug configuration points into when nothing else is set.
pub const DEFAULT_SCRIPT_DIR: &str = "BashScripts";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Knobs that change generated text without changing the model.
///
/// ```toml
/// version = "1.2.0"
/// script_dir = "scripts"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Stamped into the `# bashWizard version` header line
    pub version: String,
    /// Workspace-relative directory used by the debug configuration
    pub script_dir: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            script_dir: DEFAULT_SCRIPT_DIR.to_string(),
        }
    }
}

impl GeneratorConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text)?;
        tracing::debug!(path = %path.display(), "loaded generator config");
        Ok(config)
    }

    pub fn with_script_dir(mut self, script_dir: impl Into<String>) -> Self {
        self.script_dir = script_dir.into();
        self
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
