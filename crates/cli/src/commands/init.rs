// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `bw init`: build a new script through the editor.

use super::{error_count, errors_found};
use crate::config;
use crate::output::{emit, print_json, OutputFormat};
use anyhow::{bail, Result};
use bw_core::{BuiltInGroup, ParamId};
use bw_engine::{Edit, Editor, EditorError};
use clap::{Args, ValueEnum};
use std::path::PathBuf;

#[derive(Args)]
pub struct InitArgs {
    /// Script name; `.sh` is appended when missing
    pub name: String,

    #[arg(short = 'd', long, default_value = "")]
    pub description: String,

    /// Built-in parameters to install (repeatable)
    #[arg(short = 'b', long = "builtin", value_enum)]
    pub builtins: Vec<GroupArg>,

    /// Add a parameter that takes a value (repeatable)
    #[arg(long = "option", value_name = "LONG")]
    pub options: Vec<String>,

    /// Add a true/false switch (repeatable)
    #[arg(long = "flag", value_name = "LONG")]
    pub flags: Vec<String>,

    /// Mark a parameter as required (repeatable)
    #[arg(long = "require", value_name = "LONG")]
    pub required: Vec<String>,

    /// Write the script here instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Overwrite an existing --out file
    #[arg(long)]
    pub force: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum GroupArg {
    InputFile,
    Verbose,
    Logging,
    CreateVerifyDelete,
    All,
}

impl From<GroupArg> for BuiltInGroup {
    fn from(arg: GroupArg) -> Self {
        match arg {
            GroupArg::InputFile => BuiltInGroup::InputFile,
            GroupArg::Verbose => BuiltInGroup::Verbose,
            GroupArg::Logging => BuiltInGroup::Logging,
            GroupArg::CreateVerifyDelete => BuiltInGroup::CreateVerifyDelete,
            GroupArg::All => BuiltInGroup::All,
        }
    }
}

pub fn handle(args: InitArgs, format: OutputFormat) -> Result<()> {
    if let Some(out) = &args.out {
        if out.exists() && !args.force {
            bail!("{} already exists (use --force to overwrite)", out.display());
        }
    }

    let mut editor = build(&args, Editor::new(config::load(None)?))?;
    let errors = error_count(editor.revalidate());
    for notice in editor.take_notices() {
        eprintln!("{notice}");
    }
    if errors > 0 {
        return Err(errors_found(errors, "validation"));
    }

    match format {
        OutputFormat::Text => emit(args.out.as_deref(), &editor.views().script),
        OutputFormat::Json => {
            if let Some(out) = &args.out {
                emit(Some(out.as_path()), &editor.views().script)?;
            }
            print_json(editor.views())
        }
    }
}

/// Apply the requested parameters to a fresh editor.
///
/// Built-ins go first so user parameters autofill around their short names.
pub(crate) fn build(args: &InitArgs, mut editor: Editor) -> Result<Editor, EditorError> {
    editor.set_script_name(&args.name);
    editor.set_description(&args.description);
    for &group in &args.builtins {
        editor.install_builtin(group.into());
    }
    for long in &args.options {
        let id = add_named(&mut editor, long)?;
        editor.edit(&id, Edit::RequiresInputString(true))?;
    }
    for long in &args.flags {
        let id = add_named(&mut editor, long)?;
        editor.edit(&id, Edit::Default("false".into()))?;
        editor.edit(&id, Edit::ValueIfSet("true".into()))?;
    }
    for long in &args.required {
        let id = editor
            .definition()
            .find_by_long_name(long)
            .map(|r| r.id().clone())
            .ok_or_else(|| EditorError::UnknownLongName(long.clone()))?;
        editor.edit(&id, Edit::Required(true))?;
    }
    Ok(editor)
}

fn add_named(editor: &mut Editor, long: &str) -> Result<ParamId, EditorError> {
    let id = editor.add_parameter();
    editor.edit(&id, Edit::LongName(long.to_string()))?;
    Ok(id)
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
