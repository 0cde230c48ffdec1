// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Script definitions: the model every artifact is derived from.

use crate::builtin::{find_by_long_name, BuiltInKind};
use crate::id::ParamId;
use crate::parameter::{ParameterFields, ParameterRecord};
use std::collections::BTreeMap;

/// Suffix every script name ends with.
pub const SCRIPT_SUFFIX: &str = ".sh";

/// Characters rejected in the script name and description.
///
/// They are special in JSON and break the `jq` lookups of the input file.
pub const FORBIDDEN_NAME_CHARS: &[char] = &[':', '{', '}', '[', ']', '\\', '\'', '"'];

/// Name, description, ordered parameters, user code and built-in bindings.
#[derive(Debug, Default)]
pub struct ScriptDefinition {
    script_name: String,
    description: String,
    parameters: Vec<ParameterRecord>,
    user_code: String,
    built_ins: BTreeMap<BuiltInKind, ParamId>,
}

impl ScriptDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_name(&self) -> &str {
        &self.script_name
    }

    pub fn set_script_name(&mut self, name: impl Into<String>) {
        self.script_name = name.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn user_code(&self) -> &str {
        &self.user_code
    }

    pub fn set_user_code(&mut self, code: impl Into<String>) {
        self.user_code = code.into();
    }

    pub fn parameters(&self) -> &[ParameterRecord] {
        &self.parameters
    }

    pub fn parameters_mut(&mut self) -> impl Iterator<Item = &mut ParameterRecord> {
        self.parameters.iter_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Serialized fields of every parameter, in order.
    pub fn parameter_fields(&self) -> Vec<ParameterFields> {
        self.parameters.iter().map(|p| p.fields().clone()).collect()
    }

    pub fn get(&self, id: &ParamId) -> Option<&ParameterRecord> {
        self.parameters.iter().find(|p| p.id() == id)
    }

    pub fn get_mut(&mut self, id: &ParamId) -> Option<&mut ParameterRecord> {
        self.parameters.iter_mut().find(|p| p.id() == id)
    }

    pub fn position(&self, id: &ParamId) -> Option<usize> {
        self.parameters.iter().position(|p| p.id() == id)
    }

    pub fn find_by_long_name(&self, long_name: &str) -> Option<&ParameterRecord> {
        self.parameters.iter().find(|p| p.long_name() == long_name)
    }

    pub fn short_name_in_use(&self, short_name: &str) -> bool {
        self.parameters.iter().any(|p| p.short_name() == short_name)
    }

    /// Append a record, preserving insertion order.
    pub fn push(&mut self, record: ParameterRecord) -> &mut ParameterRecord {
        self.parameters.push(record);
        let last = self.parameters.len() - 1;
        &mut self.parameters[last]
    }

    /// Detach a record from the sequence and from any built-in binding.
    pub fn remove(&mut self, id: &ParamId) -> Option<ParameterRecord> {
        let index = self.position(id)?;
        self.built_ins.retain(|_, bound| bound != id);
        Some(self.parameters.remove(index))
    }

    /// Drop every parameter, binding and piece of text.
    pub fn clear(&mut self) -> Vec<ParameterRecord> {
        self.script_name.clear();
        self.description.clear();
        self.user_code.clear();
        self.built_ins.clear();
        std::mem::take(&mut self.parameters)
    }

    pub fn built_in(&self, kind: BuiltInKind) -> Option<&ParameterRecord> {
        self.built_ins.get(&kind).and_then(|id| self.get(id))
    }

    pub fn built_in_id(&self, kind: BuiltInKind) -> Option<&ParamId> {
        self.built_ins.get(&kind)
    }

    pub fn is_active(&self, kind: BuiltInKind) -> bool {
        self.built_ins.contains_key(&kind)
    }

    /// Kinds with a bound record, in catalog order.
    pub fn active_built_ins(&self) -> impl Iterator<Item = BuiltInKind> + '_ {
        self.built_ins.keys().copied()
    }

    pub fn built_in_kind_of(&self, id: &ParamId) -> Option<BuiltInKind> {
        self.built_ins
            .iter()
            .find(|(_, bound)| *bound == id)
            .map(|(kind, _)| *kind)
    }

    /// Bind `kind` to an existing record, replacing any previous binding.
    pub fn bind(&mut self, kind: BuiltInKind, id: ParamId) -> bool {
        if self.get(&id).is_none() {
            return false;
        }
        self.built_ins.insert(kind, id);
        true
    }

    /// Replace whatever is bound to `kind` with a fresh canonical record.
    ///
    /// Returns the record that was displaced, if any. Installing the same
    /// kind twice leaves exactly one record with the catalog values.
    pub fn install_built_in(&mut self, kind: BuiltInKind, id: ParamId) -> Option<ParameterRecord> {
        let displaced = self
            .built_ins
            .get(&kind)
            .cloned()
            .and_then(|old| self.remove(&old));
        let record = ParameterRecord::from_fields(id.clone(), kind.template().fields());
        self.parameters.push(record);
        self.built_ins.insert(kind, id);
        tracing::debug!(%kind, "installed built-in parameter");
        displaced
    }

    /// Bind every record whose long name matches a catalog entry.
    ///
    /// `accept` decides per kind whether the name match is enough.
    pub fn bind_built_ins_by_name(&mut self, accept: impl Fn(BuiltInKind) -> bool) {
        let matches: Vec<(BuiltInKind, ParamId)> = self
            .parameters
            .iter()
            .filter_map(|p| {
                let template = find_by_long_name(p.long_name())?;
                accept(template.kind).then(|| (template.kind, p.id().clone()))
            })
            .collect();
        for (kind, id) in matches {
            self.built_ins.entry(kind).or_insert(id);
        }
    }
}

/// Append the `.sh` suffix when a non-empty name lacks it.
pub fn with_script_suffix(name: &str) -> String {
    if name.is_empty() || name.ends_with(SCRIPT_SUFFIX) {
        name.to_string()
    } else {
        format!("{name}{SCRIPT_SUFFIX}")
    }
}

#[cfg(test)]
#[path = "definition_tests.rs"]
mod tests;
