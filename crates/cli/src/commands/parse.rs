// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `bw parse`: script in, JSON document out.

use super::{errors_found, read_input};
use crate::exit_error::ExitError;
use crate::output::{emit, print_diagnostics, print_json, OutputFormat};
use anyhow::Result;
use bw_core::Diagnostic;
use bw_script::{parse, to_json, ScriptDocument};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args)]
pub struct ParseArgs {
    /// Generated script to read (`-` for stdin)
    pub script: PathBuf,

    /// Print only the user code region
    #[arg(long)]
    pub user_code: bool,

    /// Write the result here instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Serialize)]
struct ParseReport<'a> {
    version: Option<&'a str>,
    document: ScriptDocument,
    user_code: &'a str,
    diagnostics: &'a [Diagnostic],
}

pub fn handle(args: ParseArgs, format: OutputFormat) -> Result<()> {
    let text = read_input(&args.script)?;
    let outcome = parse(&text);
    let diagnostics = outcome.to_diagnostics();

    match format {
        OutputFormat::Text => {
            if !diagnostics.is_empty() {
                print_diagnostics(&diagnostics, format)?;
                return Err(errors_found(diagnostics.len(), "parse"));
            }
            let body = if args.user_code {
                outcome.definition.user_code().to_string()
            } else {
                to_json(&outcome.definition)?
            };
            emit(args.out.as_deref(), &body)?;
        }
        OutputFormat::Json => {
            print_json(&ParseReport {
                version: outcome.version.as_deref(),
                document: ScriptDocument::from_definition(&outcome.definition),
                user_code: outcome.definition.user_code(),
                diagnostics: &diagnostics,
            })?;
            if !diagnostics.is_empty() {
                // The report already carries the details.
                return Err(ExitError::new(1, "").into());
            }
        }
    }
    Ok(())
}
