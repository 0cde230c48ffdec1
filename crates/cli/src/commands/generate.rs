// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `bw generate`: JSON document in, script out.

use super::{error_count, errors_found, read_input};
use crate::config;
use crate::output::{emit, print_diagnostics, print_json, OutputFormat};
use anyhow::{bail, Result};
use bw_core::{validate, UuidIdGen};
use bw_engine::Views;
use bw_script::{extract_user_code, from_json, try_render};
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct GenerateArgs {
    /// JSON document to render (`-` for stdin)
    pub document: PathBuf,

    /// File whose contents become the user code region
    #[arg(long, conflicts_with = "keep_code")]
    pub user_code: Option<PathBuf>,

    /// Existing script whose user code is carried over
    #[arg(long)]
    pub keep_code: Option<PathBuf>,

    /// Write the script here instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Render even when validation reports errors
    #[arg(long)]
    pub force: bool,
}

pub fn handle(args: GenerateArgs, format: OutputFormat) -> Result<()> {
    let config = config::load(None)?;
    let mut definition = from_json(&read_input(&args.document)?, &UuidIdGen)?;

    if let Some(path) = &args.user_code {
        let code = read_input(path)?;
        definition.set_user_code(code.strip_suffix('\n').unwrap_or(&code));
    } else if let Some(path) = &args.keep_code {
        let script = read_input(path)?;
        match extract_user_code(&script) {
            Some(code) => definition.set_user_code(code),
            None => bail!("{} has no user code region", path.display()),
        }
    }

    let diagnostics = validate(&definition);
    let errors = error_count(&diagnostics);
    if errors > 0 && !args.force {
        print_diagnostics(&diagnostics, format)?;
        return Err(errors_found(errors, "validation"));
    }

    let script = try_render(&definition, &config)?;
    match format {
        OutputFormat::Text => emit(args.out.as_deref(), &script)?,
        OutputFormat::Json => {
            if let Some(out) = &args.out {
                emit(Some(out.as_path()), &script)?;
            }
            print_json(&Views::render(&definition, &config))?;
        }
    }
    Ok(())
}
