// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

pub mod artifacts;
pub mod generate;
pub mod init;
pub mod parse;
pub mod validate;

use crate::exit_error::ExitError;
use anyhow::{Context, Result};
use bw_core::{Diagnostic, ScriptDefinition, UuidIdGen};
use std::io::Read;
use std::path::Path;

/// Read a file, or stdin when the path is `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// A definition recovered from either input form.
pub struct Loaded {
    pub definition: ScriptDefinition,
    /// Parse diagnostics; always empty for JSON documents
    pub diagnostics: Vec<Diagnostic>,
}

/// JSON documents are objects; anything else is treated as a script.
pub fn is_document(text: &str) -> bool {
    text.trim_start().starts_with('{')
}

pub fn load(text: &str) -> Result<Loaded> {
    if is_document(text) {
        let definition = bw_script::from_json(text, &UuidIdGen)?;
        return Ok(Loaded {
            definition,
            diagnostics: Vec::new(),
        });
    }
    let outcome = bw_script::parse(text);
    let diagnostics = outcome.to_diagnostics();
    Ok(Loaded {
        definition: outcome.definition,
        diagnostics,
    })
}

pub fn error_count(diagnostics: &[Diagnostic]) -> usize {
    diagnostics.iter().filter(|d| d.is_error()).count()
}

/// Exit code 1 for a run that reported `count` errors.
pub fn errors_found(count: usize, what: &str) -> anyhow::Error {
    ExitError::new(1, format!("{count} {what} error(s)")).into()
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
