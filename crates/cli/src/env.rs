// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.

use std::path::PathBuf;

pub const LOG_ENV: &str = "BW_LOG";

/// Explicit config file, if one was named
pub fn config_override() -> Option<PathBuf> {
    std::env::var_os("BW_CONFIG").map(PathBuf::from)
}

/// Resolve the default config file: XDG_CONFIG_HOME/bashwiz > platform config dir
pub fn default_config_path() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg).join("bashwiz/config.toml"));
    }
    dirs::config_dir().map(|dir| dir.join("bashwiz/config.toml"))
}

/// Debug script directory override
pub fn script_dir() -> Option<String> {
    std::env::var("BW_SCRIPT_DIR").ok().filter(|s| !s.is_empty())
}
