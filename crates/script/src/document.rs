// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON document form of a script definition.

use bw_core::{IdGen, ParameterFields, ParameterRecord, ScriptDefinition};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialized definition. Only these fields ever reach the output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScriptDocument {
    #[serde(default)]
    pub script_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parameters: Vec<ParameterDocument>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ParameterDocument {
    pub default: String,
    pub description: String,
    pub long_parameter: String,
    pub requires_input_string: bool,
    pub required_parameter: bool,
    pub short_parameter: String,
    pub variable_name: String,
    pub value_if_set: String,
}

impl From<&ParameterFields> for ParameterDocument {
    fn from(f: &ParameterFields) -> Self {
        Self {
            default: f.default_value.clone(),
            description: f.description.clone(),
            long_parameter: f.long_name.clone(),
            requires_input_string: f.requires_input_string,
            required_parameter: f.required_parameter,
            short_parameter: f.short_name.clone(),
            variable_name: f.variable_name.clone(),
            value_if_set: f.value_if_set.clone(),
        }
    }
}

impl From<ParameterDocument> for ParameterFields {
    fn from(p: ParameterDocument) -> Self {
        Self {
            long_name: p.long_parameter,
            short_name: p.short_parameter,
            variable_name: p.variable_name,
            description: p.description,
            default_value: p.default,
            value_if_set: p.value_if_set,
            requires_input_string: p.requires_input_string,
            required_parameter: p.required_parameter,
        }
    }
}

impl ScriptDocument {
    pub fn from_definition(definition: &ScriptDefinition) -> Self {
        Self {
            script_name: definition.script_name().to_string(),
            description: definition.description().to_string(),
            parameters: definition
                .parameters()
                .iter()
                .map(|p| ParameterDocument::from(p.fields()))
                .collect(),
        }
    }

    /// Build a definition with fresh ids; built-ins are bound by long name.
    ///
    /// The document carries no user code, so the result has none.
    pub fn into_definition(self, ids: &dyn IdGen) -> ScriptDefinition {
        let mut definition = ScriptDefinition::new();
        definition.set_script_name(self.script_name);
        definition.set_description(self.description);
        for param in self.parameters {
            definition.push(ParameterRecord::from_fields(ids.param_id(), param.into()));
        }
        definition.bind_built_ins_by_name(|_| true);
        definition
    }
}

/// Pretty-print with four-space indentation.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer)?;
    // serde_json only ever writes valid UTF-8
    Ok(String::from_utf8_lossy(&out).into_owned())
}

pub fn to_json(definition: &ScriptDefinition) -> Result<String, DocumentError> {
    Ok(to_pretty_json(&ScriptDocument::from_definition(definition))?)
}

pub fn from_json(text: &str, ids: &dyn IdGen) -> Result<ScriptDefinition, DocumentError> {
    let document: ScriptDocument = serde_json::from_str(text)?;
    tracing::debug!(parameters = document.parameters.len(), "read JSON document");
    Ok(document.into_definition(ids))
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
