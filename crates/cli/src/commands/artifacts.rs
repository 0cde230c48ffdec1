// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `bw debug-config` and `bw input-json`.

use super::{errors_found, load, read_input};
use crate::config;
use crate::output::{emit, print_diagnostics, OutputFormat};
use anyhow::Result;
use bw_engine::Views;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct ArtifactArgs {
    /// Script or JSON document (`-` for stdin)
    pub file: PathBuf,

    /// Workspace-relative directory holding the script
    #[arg(long)]
    pub script_dir: Option<String>,

    /// Write the result here instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

fn views(args: &ArtifactArgs, format: OutputFormat) -> Result<Views> {
    let config = config::load(args.script_dir.as_deref())?;
    let loaded = load(&read_input(&args.file)?)?;
    if !loaded.diagnostics.is_empty() {
        print_diagnostics(&loaded.diagnostics, format)?;
        return Err(errors_found(loaded.diagnostics.len(), "parse"));
    }
    Ok(Views::render(&loaded.definition, &config))
}

pub fn debug_config(args: ArtifactArgs, format: OutputFormat) -> Result<()> {
    let views = views(&args, format)?;
    emit(args.out.as_deref(), &views.debug_config)
}

pub fn input_json(args: ArtifactArgs, format: OutputFormat) -> Result<()> {
    let views = views(&args, format)?;
    emit(args.out.as_deref(), &views.input_json)
}
