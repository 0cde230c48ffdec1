// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parameter records.
//!
//! A [`ParameterRecord`] is one command-line option of the generated script.
//! Every setter that actually changes a value notifies the record's
//! listeners with the changed [`Field`]; writing the current value is a no-op.

use crate::id::ParamId;
use crate::notify::{Field, Listener, ListenerId, Notifier, NotifyError};

/// The value that marks a parameter as consuming the next argument.
pub const NEXT_ARGUMENT: &str = "$2";

/// The serialized part of a parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ParameterFields {
    pub long_name: String,
    pub short_name: String,
    pub variable_name: String,
    pub description: String,
    pub default_value: String,
    pub value_if_set: String,
    pub requires_input_string: bool,
    pub required_parameter: bool,
}

impl ParameterFields {
    /// An option that takes a value (`--long <value>`).
    pub fn option(long: &str, short: &str, variable: &str) -> Self {
        Self {
            long_name: long.to_string(),
            short_name: short.to_string(),
            variable_name: variable.to_string(),
            value_if_set: NEXT_ARGUMENT.to_string(),
            requires_input_string: true,
            ..Self::default()
        }
    }

    /// A boolean switch that sets its variable to `true`.
    pub fn flag(long: &str, short: &str, variable: &str) -> Self {
        Self {
            long_name: long.to_string(),
            short_name: short.to_string(),
            variable_name: variable.to_string(),
            default_value: "false".to_string(),
            value_if_set: "true".to_string(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_default(mut self, default_value: &str) -> Self {
        self.default_value = default_value.to_string();
        self
    }

    pub fn required(mut self) -> Self {
        self.required_parameter = true;
        self.default_value.clear();
        self
    }
}

/// Strip one leading `--` from a long name.
pub fn strip_long_dashes(value: &str) -> &str {
    value.strip_prefix("--").unwrap_or(value)
}

/// Strip one leading `-` from a short name.
pub fn strip_short_dash(value: &str) -> &str {
    value.strip_prefix('-').unwrap_or(value)
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

/// A parameter plus its non-serialized editing state and listeners.
#[derive(Debug)]
pub struct ParameterRecord {
    id: ParamId,
    fields: ParameterFields,
    selected: bool,
    /// Default remembered while the parameter is required
    old_default: String,
    /// Value-if-set remembered while the parameter takes an input string
    old_value_if_set: String,
    notifier: Notifier,
}

impl ParameterRecord {
    pub fn new(id: ParamId) -> Self {
        Self::from_fields(id, ParameterFields::default())
    }

    /// Build a record from raw fields, normalizing dashed names.
    pub fn from_fields(id: ParamId, mut fields: ParameterFields) -> Self {
        fields.long_name = strip_long_dashes(&fields.long_name).to_string();
        fields.short_name = strip_short_dash(&fields.short_name).to_string();
        Self {
            id,
            fields,
            selected: false,
            old_default: String::new(),
            old_value_if_set: String::new(),
            notifier: Notifier::new(),
        }
    }

    pub fn id(&self) -> &ParamId {
        &self.id
    }

    pub fn fields(&self) -> &ParameterFields {
        &self.fields
    }

    pub fn long_name(&self) -> &str {
        &self.fields.long_name
    }

    pub fn short_name(&self) -> &str {
        &self.fields.short_name
    }

    pub fn variable_name(&self) -> &str {
        &self.fields.variable_name
    }

    pub fn description(&self) -> &str {
        &self.fields.description
    }

    pub fn default_value(&self) -> &str {
        &self.fields.default_value
    }

    pub fn value_if_set(&self) -> &str {
        &self.fields.value_if_set
    }

    pub fn requires_input_string(&self) -> bool {
        self.fields.requires_input_string
    }

    pub fn required_parameter(&self) -> bool {
        self.fields.required_parameter
    }

    pub fn selected(&self) -> bool {
        self.selected
    }

    pub fn old_default(&self) -> &str {
        &self.old_default
    }

    pub fn old_value_if_set(&self) -> &str {
        &self.old_value_if_set
    }

    pub fn set_long_name(&mut self, value: &str) -> bool {
        let value = strip_long_dashes(value).to_string();
        self.update(Field::LongParameter, |f| &mut f.long_name, value)
    }

    pub fn set_short_name(&mut self, value: &str) -> bool {
        let value = strip_short_dash(value).to_string();
        self.update(Field::ShortParameter, |f| &mut f.short_name, value)
    }

    pub fn set_variable_name(&mut self, value: &str) -> bool {
        self.update(Field::VariableName, |f| &mut f.variable_name, value.to_string())
    }

    pub fn set_description(&mut self, value: &str) -> bool {
        self.update(Field::Description, |f| &mut f.description, value.to_string())
    }

    pub fn set_default_value(&mut self, value: &str) -> bool {
        self.update(Field::Default, |f| &mut f.default_value, value.to_string())
    }

    pub fn set_value_if_set(&mut self, value: &str) -> bool {
        self.update(Field::ValueIfSet, |f| &mut f.value_if_set, value.to_string())
    }

    pub fn set_requires_input_string(&mut self, value: bool) -> bool {
        self.update(
            Field::RequiresInputString,
            |f| &mut f.requires_input_string,
            value,
        )
    }

    pub fn set_required_parameter(&mut self, value: bool) -> bool {
        self.update(Field::RequiredParameter, |f| &mut f.required_parameter, value)
    }

    pub fn set_selected(&mut self, value: bool) -> bool {
        let changed = replace_if_changed(&mut self.selected, value);
        if changed {
            self.notifier.notify(&self.id, Field::Selected);
        }
        changed
    }

    // Remembered values are bookkeeping only and never notify.

    pub fn set_old_default(&mut self, value: &str) {
        self.old_default = value.to_string();
    }

    pub fn set_old_value_if_set(&mut self, value: &str) {
        self.old_value_if_set = value.to_string();
    }

    /// Ask observers to bring this record into view.
    pub fn focus(&mut self) {
        self.notifier.notify(&self.id, Field::Focus);
    }

    pub fn subscribe(&mut self, listener: Listener) -> ListenerId {
        self.notifier.register(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> Result<(), NotifyError> {
        self.notifier.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.notifier.len()
    }

    fn update<T: PartialEq>(
        &mut self,
        field: Field,
        slot: impl FnOnce(&mut ParameterFields) -> &mut T,
        value: T,
    ) -> bool {
        let changed = replace_if_changed(slot(&mut self.fields), value);
        if changed {
            self.notifier.notify(&self.id, field);
        }
        changed
    }
}

#[cfg(test)]
#[path = "parameter_tests.rs"]
mod tests;
