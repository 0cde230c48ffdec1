// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Generator config resolution: BW_CONFIG > default path > built-in defaults.

use crate::env;
use anyhow::{Context, Result};
use bw_script::GeneratorConfig;
use std::path::Path;

pub fn load(flag_script_dir: Option<&str>) -> Result<GeneratorConfig> {
    let source = match env::config_override() {
        Some(path) => Some(path),
        None => env::default_config_path().filter(|p| p.exists()),
    };
    let config = match &source {
        // A named file must exist.
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("cannot use config {}", path.display()))?,
        None => GeneratorConfig::default(),
    };
    tracing::debug!(source = %describe(source.as_deref()), "generator config");
    Ok(apply_overrides(config, env::script_dir(), flag_script_dir))
}

/// Environment beats the file; a command-line flag beats both.
pub fn apply_overrides(
    config: GeneratorConfig,
    env_script_dir: Option<String>,
    flag_script_dir: Option<&str>,
) -> GeneratorConfig {
    match flag_script_dir.map(str::to_string).or(env_script_dir) {
        Some(dir) => config.with_script_dir(dir),
        None => config,
    }
}

pub fn describe(path: Option<&Path>) -> String {
    path.map_or_else(|| "defaults".to_string(), |p| p.display().to_string())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
