// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The editor controller.
//!
//! [`Editor`] is the single writer of the model. Every record carries a
//! listener that queues `(id, field)` changes; the editor drains that queue
//! inside a cascade, applying the field couplings (which may queue more
//! changes), and re-derives the views once the outermost cascade settles.

use crate::autofill::{camel_case, pick_short_name};
use crate::error::EditorError;
use crate::views::Views;
use bw_core::{
    validate, with_script_suffix, BuiltInGroup, Diagnostic, Field, IdGen, ListenerId,
    ParamId, ParameterFields, ParameterRecord, ScriptDefinition, UuidIdGen, NEXT_ARGUMENT,
    SCRIPT_SUFFIX,
};
use bw_script::{from_json, parse_with, GeneratorConfig};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

type ChangeQueue = Rc<RefCell<VecDeque<(ParamId, Field)>>>;

/// One field write requested by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    LongName(String),
    ShortName(String),
    VariableName(String),
    Description(String),
    Default(String),
    ValueIfSet(String),
    RequiresInputString(bool),
    Required(bool),
    Selected(bool),
    Focus,
}

pub struct Editor {
    definition: ScriptDefinition,
    config: GeneratorConfig,
    ids: Box<dyn IdGen>,
    pending: ChangeQueue,
    listeners: HashMap<ParamId, ListenerId>,
    /// Nesting of open cascades; views regenerate when it returns to zero
    depth: usize,
    /// Set while a parse result is committed
    loading: bool,
    new_requested: bool,
    views: Views,
    diagnostics: Vec<Diagnostic>,
    notices: Vec<Diagnostic>,
    regenerations: u64,
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("definition", &self.definition)
            .field("depth", &self.depth)
            .field("loading", &self.loading)
            .field("regenerations", &self.regenerations)
            .finish_non_exhaustive()
    }
}

impl Editor {
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_ids(config, Box::new(UuidIdGen))
    }

    pub fn with_ids(config: GeneratorConfig, ids: Box<dyn IdGen>) -> Self {
        let definition = ScriptDefinition::new();
        let views = Views::render(&definition, &config);
        Self {
            definition,
            config,
            ids,
            pending: Rc::new(RefCell::new(VecDeque::new())),
            listeners: HashMap::new(),
            depth: 0,
            loading: false,
            new_requested: false,
            views,
            diagnostics: Vec::new(),
            notices: Vec::new(),
            regenerations: 0,
        }
    }

    // ── read access ─────────────────────────────────────────────────────

    pub fn definition(&self) -> &ScriptDefinition {
        &self.definition
    }

    pub fn views(&self) -> &Views {
        &self.views
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// The stored diagnostics list, refreshed on every settle.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// User-facing notices raised since the last call.
    pub fn take_notices(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.notices)
    }

    /// How many times the views have been re-derived.
    pub fn regenerations(&self) -> u64 {
        self.regenerations
    }

    pub fn selected(&self) -> Option<&ParameterRecord> {
        self.definition.parameters().iter().find(|p| p.selected())
    }

    // ── script-level fields ─────────────────────────────────────────────

    pub fn set_script_name(&mut self, name: &str) {
        let named = with_script_suffix(name);
        if named != name {
            self.notices.push(Diagnostic::info(
                format!("added {SCRIPT_SUFFIX} to the script name"),
                None,
            ));
        }
        self.definition.set_script_name(named);
        self.settle();
    }

    pub fn set_description(&mut self, description: &str) {
        self.definition.set_description(description);
        self.settle();
    }

    pub fn set_user_code(&mut self, code: &str) {
        self.definition.set_user_code(code);
        self.settle();
    }

    // ── parameter edits ─────────────────────────────────────────────────

    /// Apply one field write and run its cascade.
    ///
    /// Returns whether the field actually changed.
    pub fn edit(&mut self, id: &ParamId, edit: Edit) -> Result<bool, EditorError> {
        self.cascade(|editor| editor.apply(id, edit))
    }

    /// Run `f` inside a cascade; the outermost one settles the views.
    fn cascade<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.depth += 1;
        let result = f(self);
        self.drain();
        self.depth -= 1;
        if self.depth == 0 {
            self.settle();
        }
        result
    }

    fn apply(&mut self, id: &ParamId, edit: Edit) -> Result<bool, EditorError> {
        let record = self
            .definition
            .get_mut(id)
            .ok_or_else(|| EditorError::UnknownParameter(id.clone()))?;
        let changed = match edit {
            Edit::LongName(v) => record.set_long_name(&v),
            Edit::ShortName(v) => record.set_short_name(&v),
            Edit::VariableName(v) => record.set_variable_name(&v),
            Edit::Description(v) => record.set_description(&v),
            Edit::Default(v) => record.set_default_value(&v),
            Edit::ValueIfSet(v) => record.set_value_if_set(&v),
            Edit::RequiresInputString(v) => record.set_requires_input_string(v),
            Edit::Required(v) => record.set_required_parameter(v),
            Edit::Selected(v) => record.set_selected(v),
            Edit::Focus => {
                record.focus();
                true
            }
        };
        Ok(changed)
    }

    /// Process queued changes until the queue is empty.
    fn drain(&mut self) {
        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some((id, field)) = next else { break };
            if self.loading {
                continue;
            }
            tracing::debug!(param = %id, %field, depth = self.depth, "cascade");
            self.react(&id, field);
        }
    }

    /// Field couplings. Writes here queue further changes.
    fn react(&mut self, id: &ParamId, field: Field) {
        match field {
            Field::LongParameter => self.autofill(id),
            Field::RequiredParameter => {
                let Some(record) = self.definition.get_mut(id) else { return };
                if record.required_parameter() {
                    let default = record.default_value().to_string();
                    record.set_old_default(&default);
                    record.set_default_value("");
                } else if record.default_value().is_empty() {
                    let old = record.old_default().to_string();
                    record.set_default_value(&old);
                }
            }
            Field::RequiresInputString => {
                let Some(record) = self.definition.get_mut(id) else { return };
                if record.requires_input_string() {
                    if record.value_if_set() != NEXT_ARGUMENT {
                        let value = record.value_if_set().to_string();
                        record.set_old_value_if_set(&value);
                        record.set_value_if_set(NEXT_ARGUMENT);
                    }
                } else if record.value_if_set() == NEXT_ARGUMENT {
                    let old = record.old_value_if_set();
                    let restored = if old == NEXT_ARGUMENT { "" } else { old }.to_string();
                    record.set_value_if_set(&restored);
                }
            }
            Field::ValueIfSet => {
                let Some(record) = self.definition.get_mut(id) else { return };
                let takes_next = record.value_if_set() == NEXT_ARGUMENT;
                record.set_requires_input_string(takes_next);
            }
            Field::Default => {
                let Some(record) = self.definition.get_mut(id) else { return };
                if !record.default_value().is_empty() && record.required_parameter() {
                    record.set_required_parameter(false);
                }
            }
            Field::Selected => {
                let now_selected = self.definition.get(id).is_some_and(|r| r.selected());
                if now_selected {
                    for other in self.definition.parameters_mut() {
                        if other.id() != id {
                            other.set_selected(false);
                        }
                    }
                }
            }
            Field::Description | Field::ShortParameter | Field::VariableName | Field::Focus => {}
        }
    }

    fn autofill(&mut self, id: &ParamId) {
        let Some(record) = self.definition.get(id) else { return };
        let long = record.long_name().to_string();
        if long.is_empty() {
            return;
        }

        if record.short_name().is_empty() {
            let picked = pick_short_name(&long, |c| self.definition.short_name_in_use(c));
            match picked {
                Some(short) => {
                    if let Some(record) = self.definition.get_mut(id) {
                        record.set_short_name(&short);
                    }
                }
                None => self.notices.push(Diagnostic::warning(
                    "Unable to auto generate a Short Parameter",
                    Some(id),
                )),
            }
        }

        if let Some(record) = self.definition.get_mut(id) {
            if record.variable_name().is_empty() {
                record.set_variable_name(&camel_case(&long));
            }
        }
    }

    /// Validate and re-derive every view.
    fn settle(&mut self) {
        if self.loading {
            return;
        }
        self.diagnostics = validate(&self.definition);
        self.views = Views::render(&self.definition, &self.config);
        self.regenerations += 1;
        tracing::debug!(
            regenerations = self.regenerations,
            diagnostics = self.diagnostics.len(),
            "views regenerated"
        );
    }

    // ── adding and removing ─────────────────────────────────────────────

    /// Append an empty parameter, selected and focused.
    pub fn add_parameter(&mut self) -> ParamId {
        self.add_parameter_with(ParameterFields::default())
    }

    pub fn add_parameter_with(&mut self, fields: ParameterFields) -> ParamId {
        let id = self.ids.param_id();
        self.attach(ParameterRecord::from_fields(id.clone(), fields));
        self.cascade(|editor| {
            if let Some(record) = editor.definition.get_mut(&id) {
                record.set_selected(true);
                record.focus();
            }
        });
        id
    }

    fn attach(&mut self, record: ParameterRecord) {
        let id = record.id().clone();
        self.definition.push(record);
        self.listen(&id);
    }

    /// Register the change-queue listener on a record already in the model.
    fn listen(&mut self, id: &ParamId) {
        let Some(record) = self.definition.get_mut(id) else { return };
        let queue = Rc::clone(&self.pending);
        let listener = record.subscribe(Box::new(move |id, field| {
            queue.borrow_mut().push_back((id.clone(), field));
        }));
        self.listeners.insert(id.clone(), listener);
    }

    /// Remove a record, its built-in binding and the editor's listener.
    pub fn delete_parameter(&mut self, id: &ParamId) -> Result<ParameterRecord, EditorError> {
        let record = self
            .definition
            .get_mut(id)
            .ok_or_else(|| EditorError::UnknownParameter(id.clone()))?;
        if let Some(listener) = self.listeners.remove(id) {
            record.unsubscribe(listener)?;
        }
        let removed = self
            .definition
            .remove(id)
            .ok_or_else(|| EditorError::UnknownParameter(id.clone()))?;
        self.settle();
        Ok(removed)
    }

    pub fn delete_selected(&mut self) -> Result<ParameterRecord, EditorError> {
        let id = self.selected().map(|r| r.id().clone()).ok_or(EditorError::NoSelection)?;
        self.delete_parameter(&id)
    }

    pub fn delete_by_long_name(&mut self, long_name: &str) -> Result<ParameterRecord, EditorError> {
        let id = self
            .definition
            .find_by_long_name(long_name)
            .map(|r| r.id().clone())
            .ok_or_else(|| EditorError::UnknownLongName(long_name.to_string()))?;
        self.delete_parameter(&id)
    }

    /// Install every kind of `group`, replacing earlier instances.
    pub fn install_builtin(&mut self, group: BuiltInGroup) {
        let mut last = None;
        for &kind in group.kinds() {
            let id = self.ids.param_id();
            if let Some(mut displaced) = self.definition.install_built_in(kind, id.clone()) {
                if let Some(listener) = self.listeners.remove(displaced.id()) {
                    if let Err(e) = displaced.unsubscribe(listener) {
                        tracing::warn!(param = %displaced.id(), error = %e, "stale listener");
                    }
                }
            }
            self.listen(&id);
            last = Some(id);
        }
        tracing::info!(?group, "installed built-in parameters");

        match last.filter(|_| group.selects()) {
            Some(id) => {
                if let Err(e) = self.edit(&id, Edit::Selected(true)) {
                    tracing::warn!(param = %id, error = %e, "could not select built-in");
                }
            }
            None => self.settle(),
        }
    }

    // ── bulk replacement ────────────────────────────────────────────────

    /// Replace the model with the parse of `text`.
    ///
    /// Only a clean parse that found parameters is committed.
    pub fn refresh_from_script(&mut self, text: &str) -> Result<(), EditorError> {
        let outcome = parse_with(text, self.ids.as_ref());
        if !outcome.is_clean() {
            let diagnostics = outcome.to_diagnostics();
            tracing::warn!(count = diagnostics.len(), "script refresh rejected");
            self.notices.extend(diagnostics.iter().cloned());
            let count = diagnostics.len();
            self.diagnostics = diagnostics;
            return Err(EditorError::RefreshRejected { count });
        }
        if outcome.definition.is_empty() {
            tracing::warn!("script refresh found no parameters");
            return Err(EditorError::NoParameters);
        }
        self.commit(outcome.definition);
        Ok(())
    }

    /// Replace the model with a JSON document, keeping the current user code.
    pub fn refresh_from_json(&mut self, text: &str) -> Result<(), EditorError> {
        let mut definition = match from_json(text, self.ids.as_ref()) {
            Ok(definition) => definition,
            Err(e) => {
                tracing::warn!(error = %e, "JSON refresh rejected");
                self.notices.push(Diagnostic::error(e.to_string(), None));
                return Err(e.into());
            }
        };
        if definition.is_empty() {
            return Err(EditorError::NoParameters);
        }
        definition.set_user_code(self.definition.user_code());
        self.commit(definition);
        Ok(())
    }

    fn commit(&mut self, definition: ScriptDefinition) {
        self.loading = true;
        self.detach_all();
        self.definition = definition;
        let ids: Vec<ParamId> = self
            .definition
            .parameters()
            .iter()
            .map(|p| p.id().clone())
            .collect();
        for id in &ids {
            self.listen(id);
        }
        self.pending.borrow_mut().clear();
        self.loading = false;
        tracing::info!(parameters = ids.len(), "model replaced");
        self.settle();
    }

    fn detach_all(&mut self) {
        for record in self.definition.parameters_mut() {
            if let Some(listener) = self.listeners.remove(record.id()) {
                if let Err(e) = record.unsubscribe(listener) {
                    tracing::warn!(param = %record.id(), error = %e, "stale listener");
                }
            }
        }
        self.listeners.clear();
    }

    // ── lifecycle ───────────────────────────────────────────────────────

    /// Ask to start over. Returns whether there is work to lose.
    pub fn request_new(&mut self) -> bool {
        self.new_requested = true;
        !self.definition.is_empty()
            || !self.definition.script_name().is_empty()
            || !self.definition.user_code().is_empty()
    }

    /// Answer a pending [`Editor::request_new`]; resets when confirmed.
    pub fn confirm_new(&mut self, confirmed: bool) -> bool {
        let pending = std::mem::take(&mut self.new_requested);
        if pending && confirmed {
            self.reset();
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.detach_all();
        self.definition.clear();
        self.pending.borrow_mut().clear();
        self.diagnostics.clear();
        tracing::info!("editor reset");
        self.settle();
    }

    // ── validation ──────────────────────────────────────────────────────

    /// Advisory check: nothing stored, nothing raised.
    pub fn validate(&self) -> Vec<Diagnostic> {
        validate(&self.definition)
    }

    /// Authoritative check: replaces the stored list and raises one notice
    /// per diagnostic.
    pub fn revalidate(&mut self) -> &[Diagnostic] {
        self.diagnostics = validate(&self.definition);
        self.notices.extend(self.diagnostics.iter().cloned());
        &self.diagnostics
    }
}

#[cfg(test)]
#[path = "editor_tests.rs"]
mod tests;
