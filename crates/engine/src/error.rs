// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the editor

use bw_core::{NotifyError, ParamId};
use bw_script::DocumentError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("parameter not found: {0}")]
    UnknownParameter(ParamId),
    #[error("no parameter with long name: {0}")]
    UnknownLongName(String),
    #[error("select a parameter first")]
    NoSelection,
    #[error("nothing to load: the text has no parameters")]
    NoParameters,
    #[error("refresh rejected with {count} diagnostic(s)")]
    RefreshRejected { count: usize },
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
}
