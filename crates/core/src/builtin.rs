// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Built-in parameter catalog.
//!
//! Built-ins are parameters with canonical values that the generator and
//! parser recognize as a group: they switch optional script sections on.

use crate::parameter::{ParameterFields, NEXT_ARGUMENT};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A recognized parameter bundle member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BuiltInKind {
    InputFileSupport,
    VerboseSupport,
    LoggingSupport,
    Create,
    Verify,
    Delete,
}

impl BuiltInKind {
    /// Every kind, in installation order.
    pub const ALL: [BuiltInKind; 6] = [
        BuiltInKind::InputFileSupport,
        BuiltInKind::VerboseSupport,
        BuiltInKind::LoggingSupport,
        BuiltInKind::Create,
        BuiltInKind::Verify,
        BuiltInKind::Delete,
    ];

    pub fn template(self) -> &'static BuiltInTemplate {
        match self {
            BuiltInKind::InputFileSupport => &CATALOG[0],
            BuiltInKind::VerboseSupport => &CATALOG[1],
            BuiltInKind::LoggingSupport => &CATALOG[2],
            BuiltInKind::Create => &CATALOG[3],
            BuiltInKind::Verify => &CATALOG[4],
            BuiltInKind::Delete => &CATALOG[5],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BuiltInKind::InputFileSupport => "InputFileSupport",
            BuiltInKind::VerboseSupport => "VerboseSupport",
            BuiltInKind::LoggingSupport => "LoggingSupport",
            BuiltInKind::Create => "Create",
            BuiltInKind::Verify => "Verify",
            BuiltInKind::Delete => "Delete",
        }
    }
}

impl fmt::Display for BuiltInKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical field values for a built-in kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltInTemplate {
    pub kind: BuiltInKind,
    pub long_name: &'static str,
    pub short_name: &'static str,
    pub variable_name: &'static str,
    pub description: &'static str,
    pub default_value: &'static str,
    pub value_if_set: &'static str,
    pub requires_input_string: bool,
}

impl BuiltInTemplate {
    pub fn fields(&self) -> ParameterFields {
        ParameterFields {
            long_name: self.long_name.to_string(),
            short_name: self.short_name.to_string(),
            variable_name: self.variable_name.to_string(),
            description: self.description.to_string(),
            default_value: self.default_value.to_string(),
            value_if_set: self.value_if_set.to_string(),
            requires_input_string: self.requires_input_string,
            required_parameter: false,
        }
    }
}

static CATALOG: [BuiltInTemplate; 6] = [
    BuiltInTemplate {
        kind: BuiltInKind::InputFileSupport,
        long_name: "input-file",
        short_name: "i",
        variable_name: "inputFile",
        description: "the name of the input file. pay attention to $PWD when setting this",
        default_value: "",
        value_if_set: NEXT_ARGUMENT,
        requires_input_string: true,
    },
    BuiltInTemplate {
        kind: BuiltInKind::VerboseSupport,
        long_name: "verbose",
        short_name: "b",
        variable_name: "verbose",
        description: "echos script data",
        default_value: "false",
        value_if_set: "true",
        requires_input_string: false,
    },
    BuiltInTemplate {
        kind: BuiltInKind::LoggingSupport,
        long_name: "log-directory",
        short_name: "l",
        variable_name: "logDirectory",
        description: "Directory for the log file. The log file name will be based on the script name.",
        default_value: "\"./\"",
        value_if_set: NEXT_ARGUMENT,
        requires_input_string: true,
    },
    BuiltInTemplate {
        kind: BuiltInKind::Create,
        long_name: "create",
        short_name: "c",
        variable_name: "create",
        description: "calls the onCreate function in the script",
        default_value: "false",
        value_if_set: "true",
        requires_input_string: false,
    },
    BuiltInTemplate {
        kind: BuiltInKind::Verify,
        long_name: "verify",
        short_name: "v",
        variable_name: "verify",
        description: "calls the onVerify function in the script",
        default_value: "false",
        value_if_set: "true",
        requires_input_string: false,
    },
    BuiltInTemplate {
        kind: BuiltInKind::Delete,
        long_name: "delete",
        short_name: "d",
        variable_name: "delete",
        description: "calls the onDelete function in the script",
        default_value: "false",
        value_if_set: "true",
        requires_input_string: false,
    },
];

/// Look up the built-in whose canonical long name is `long_name`.
pub fn find_by_long_name(long_name: &str) -> Option<&'static BuiltInTemplate> {
    CATALOG.iter().find(|t| t.long_name == long_name)
}

/// The sets of built-ins a user can ask for in one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltInGroup {
    InputFile,
    Verbose,
    Logging,
    CreateVerifyDelete,
    All,
}

impl BuiltInGroup {
    pub fn kinds(self) -> &'static [BuiltInKind] {
        match self {
            BuiltInGroup::InputFile => &[BuiltInKind::InputFileSupport],
            BuiltInGroup::Verbose => &[BuiltInKind::VerboseSupport],
            BuiltInGroup::Logging => &[BuiltInKind::LoggingSupport],
            BuiltInGroup::CreateVerifyDelete => {
                &[BuiltInKind::Create, BuiltInKind::Verify, BuiltInKind::Delete]
            }
            BuiltInGroup::All => &BuiltInKind::ALL,
        }
    }

    /// Whether installed records take the selection.
    ///
    /// The create/verify/delete triple is added without selecting anything.
    pub fn selects(self) -> bool {
        !matches!(self, BuiltInGroup::CreateVerifyDelete)
    }
}

#[cfg(test)]
#[path = "builtin_tests.rs"]
mod tests;
