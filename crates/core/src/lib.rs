// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! bw-core: the script model shared by the generator, parser and editor

pub mod builtin;
pub mod definition;
pub mod id;
pub mod notify;
pub mod parameter;
pub mod validate;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use builtin::{find_by_long_name, BuiltInGroup, BuiltInKind, BuiltInTemplate};
pub use definition::{with_script_suffix, ScriptDefinition, FORBIDDEN_NAME_CHARS, SCRIPT_SUFFIX};
pub use id::{IdGen, ParamId, SequentialIdGen, UuidIdGen};
pub use notify::{Field, Listener, ListenerId, Notifier, NotifyError};
pub use parameter::{
    strip_long_dashes, strip_short_dash, ParameterFields, ParameterRecord, NEXT_ARGUMENT,
};
pub use validate::{validate, Diagnostic, Severity};
