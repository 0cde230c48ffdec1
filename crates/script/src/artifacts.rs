// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Derived JSON artifacts: the bashdb launch configuration and the
//! input-values file consumed by the input-file section.

use crate::document::to_pretty_json;
use bw_core::ScriptDefinition;
use indexmap::IndexMap;
use serde::Serialize;

/// One bashdb launch entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebugConfig {
    #[serde(rename = "type")]
    pub kind: String,
    pub request: String,
    pub name: String,
    pub cwd: String,
    pub program: String,
    pub args: Vec<String>,
}

impl DebugConfig {
    pub fn new(definition: &ScriptDefinition, script_dir: &str) -> Self {
        let dir = script_dir
            .trim_start_matches(['.', '/'])
            .trim_end_matches(['/', '\\']);
        let script = definition.script_name().trim_start_matches(['/', '\\']);
        let program = if dir.is_empty() {
            format!("${{workspaceFolder}}/{script}")
        } else {
            format!("${{workspaceFolder}}/{dir}/{script}")
        };

        let mut args = Vec::with_capacity(definition.len() * 2);
        for param in definition.parameters() {
            args.push(format!("--{}", param.long_name()));
            args.push(unquote(param.default_value()).to_string());
        }

        Self {
            kind: "bashdb".into(),
            request: "launch".into(),
            name: format!("Debug {}", definition.script_name()),
            cwd: "${workspaceFolder}".into(),
            program,
            args,
        }
    }
}

/// Render the launch configuration; serialization failures become the text.
pub fn debug_config(definition: &ScriptDefinition, script_dir: &str) -> String {
    to_pretty_json(&DebugConfig::new(definition, script_dir))
        .unwrap_or_else(|e| format!("Exception generating config\n\n{e}"))
}

/// `{ "<script>": { "<long>": "<default>" } }`, in parameter order.
pub fn input_values(definition: &ScriptDefinition) -> IndexMap<String, IndexMap<String, String>> {
    let values = definition
        .parameters()
        .iter()
        .map(|p| (p.long_name().to_string(), unquote(p.default_value().trim()).to_string()))
        .collect();
    let mut outer = IndexMap::new();
    outer.insert(definition.script_name().to_string(), values);
    outer
}

pub fn input_json(definition: &ScriptDefinition) -> String {
    to_pretty_json(&input_values(definition))
        .unwrap_or_else(|e| format!("Exception generating input JSON\n\n{e}"))
}

fn unquote(value: &str) -> &str {
    value.trim_matches(['"', '\''])
}

#[cfg(test)]
#[path = "artifacts_tests.rs"]
mod tests;
