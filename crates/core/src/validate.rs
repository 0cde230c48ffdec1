// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Consistency checks over a script definition.
//!
//! [`validate`] has no side effects; callers decide whether the result is
//! advisory or replaces a stored diagnostics list.

use crate::definition::{ScriptDefinition, FORBIDDEN_NAME_CHARS};
use crate::id::ParamId;
use crate::parameter::NEXT_ARGUMENT;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
            Severity::Info => f.write_str("info"),
        }
    }
}

/// A message about the model, optionally tied to one parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<ParamId>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, parameter: Option<&ParamId>) -> Self {
        Self::new(Severity::Error, message, parameter)
    }

    pub fn warning(message: impl Into<String>, parameter: Option<&ParamId>) -> Self {
        Self::new(Severity::Warning, message, parameter)
    }

    pub fn info(message: impl Into<String>, parameter: Option<&ParamId>) -> Self {
        Self::new(Severity::Info, message, parameter)
    }

    fn new(severity: Severity, message: impl Into<String>, parameter: Option<&ParamId>) -> Self {
        Self {
            severity,
            message: message.into(),
            parameter: parameter.cloned(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Check every parameter, then the script-level fields.
pub fn validate(definition: &ScriptDefinition) -> Vec<Diagnostic> {
    let mut errors = Vec::new();
    // Long and short names share one namespace; variables get their own.
    let mut names: HashSet<&str> = HashSet::new();
    let mut variables: HashSet<&str> = HashSet::new();

    for param in definition.parameters() {
        let id = Some(param.id());
        let long = param.long_name();
        let short = param.short_name();
        let variable = param.variable_name();

        if long.is_empty() && short.is_empty() {
            errors.push(Diagnostic::error(
                "every parameter needs a long name or a short name",
                id,
            ));
        }

        if !long.is_empty() && !names.insert(long) {
            errors.push(Diagnostic::error(
                format!("duplicate long parameter \"{long}\""),
                id,
            ));
        }
        if !short.is_empty() && !names.insert(short) {
            errors.push(Diagnostic::error(
                format!("duplicate short parameter \"{short}\""),
                id,
            ));
        }
        if !variable.is_empty() && !variables.insert(variable) {
            errors.push(Diagnostic::error(
                format!("duplicate variable name \"{variable}\""),
                id,
            ));
        }

        let takes_next = param.value_if_set() == NEXT_ARGUMENT;
        if param.requires_input_string() && !takes_next {
            errors.push(Diagnostic::error(
                format!(
                    "parameter \"{long}\" requires an input string but Value if Set is not $2; \
                     this is an invalid combination"
                ),
                id,
            ));
        }
        if !param.requires_input_string() && takes_next {
            errors.push(Diagnostic::error(
                format!(
                    "parameter \"{long}\" does not require an input string but Value if Set is $2; \
                     this is an invalid combination"
                ),
                id,
            ));
        }
    }

    if has_forbidden_char(definition.script_name()) {
        errors.push(Diagnostic::error(
            format!(
                "the script name contains an illegal character (one of {})",
                forbidden_list()
            ),
            None,
        ));
    }
    if has_forbidden_char(definition.description()) {
        errors.push(Diagnostic::error(
            format!(
                "the description contains an illegal character (one of {})",
                forbidden_list()
            ),
            None,
        ));
    }

    errors
}

fn has_forbidden_char(text: &str) -> bool {
    text.contains(FORBIDDEN_NAME_CHARS)
}

fn forbidden_list() -> String {
    FORBIDDEN_NAME_CHARS.iter().collect()
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
