// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use anyhow::Result;
use bw_core::Diagnostic;
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print any serializable value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Write `text` to `out`, or to stdout when no path is given.
///
/// A trailing newline is added on stdout only.
pub fn emit(out: Option<&Path>, text: &str) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, text)?;
            tracing::debug!(path = %path.display(), bytes = text.len(), "wrote output");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}

/// One line per diagnostic, e.g. `error: duplicate long name "name"`.
pub fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn print_diagnostics(diagnostics: &[Diagnostic], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for diagnostic in diagnostics {
                eprintln!("{diagnostic}");
            }
        }
        OutputFormat::Json => print_json(&diagnostics)?,
    }
    Ok(())
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
