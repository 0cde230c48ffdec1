// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! bw-engine: the editor that keeps a script model and its views in sync

mod autofill;
mod editor;
mod error;
mod views;

pub use autofill::{camel_case, pick_short_name};
pub use editor::{Edit, Editor};
pub use error::EditorError;
pub use views::Views;
