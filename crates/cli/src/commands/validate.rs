// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{error_count, load, read_input};
use crate::exit_error::ExitError;
use crate::output::{format_diagnostics, print_json, OutputFormat};
use anyhow::Result;
use bw_core::{validate, Diagnostic};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args)]
pub struct ValidateArgs {
    /// Script or JSON document to check (`-` for stdin)
    pub file: PathBuf,
}

#[derive(Serialize)]
struct ValidationReport<'a> {
    script_name: &'a str,
    parameters: usize,
    diagnostics: &'a [Diagnostic],
}

pub fn handle(args: ValidateArgs, format: OutputFormat) -> Result<()> {
    let loaded = load(&read_input(&args.file)?)?;
    let definition = &loaded.definition;

    // Consistency checks are meaningless on a partial parse.
    let diagnostics = if loaded.diagnostics.is_empty() {
        validate(definition)
    } else {
        loaded.diagnostics.clone()
    };

    match format {
        OutputFormat::Text => {
            if diagnostics.is_empty() {
                println!(
                    "ok: {} ({} parameters)",
                    definition.script_name(),
                    definition.len()
                );
            } else {
                println!("{}", format_diagnostics(&diagnostics));
            }
        }
        OutputFormat::Json => print_json(&ValidationReport {
            script_name: definition.script_name(),
            parameters: definition.len(),
            diagnostics: &diagnostics,
        })?,
    }

    if error_count(&diagnostics) > 0 {
        return Err(ExitError::new(1, "").into());
    }
    Ok(())
}
