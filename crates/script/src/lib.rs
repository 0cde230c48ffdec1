// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! bw-script: the text codecs around a script definition
//!
//! Shell script generation and parsing, the JSON document, and the derived
//! debug and input-values files.

pub mod artifacts;
pub mod config;
pub mod document;
pub mod generate;
pub mod parse;
pub mod templates;

pub use artifacts::{debug_config, input_json, input_values, DebugConfig};
pub use config::{ConfigError, GeneratorConfig, DEFAULT_SCRIPT_DIR};
pub use document::{from_json, to_json, DocumentError, ParameterDocument, ScriptDocument};
pub use generate::{render, render_with, try_render};
pub use parse::{extract_user_code, parse, parse_with, ParseError, ParseOutcome, Stage};
pub use templates::RenderError;
