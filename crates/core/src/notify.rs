// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Change notification registry for parameter records.

use crate::id::ParamId;
use std::fmt;
use thiserror::Error;

/// Which part of a record changed.
///
/// `Focus` is an action rather than a field: it always notifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Default,
    Description,
    LongParameter,
    ShortParameter,
    RequiresInputString,
    RequiredParameter,
    VariableName,
    ValueIfSet,
    Selected,
    Focus,
}

impl Field {
    /// The discriminator string observers key on.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Default => "default",
            Field::Description => "description",
            Field::LongParameter => "longParameter",
            Field::ShortParameter => "shortParameter",
            Field::RequiresInputString => "requiresInputString",
            Field::RequiredParameter => "requiredParameter",
            Field::VariableName => "variableName",
            Field::ValueIfSet => "valueIfSet",
            Field::Selected => "selected",
            Field::Focus => "focus",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Callback invoked with the record identity and the changed field.
pub type Listener = Box<dyn FnMut(&ParamId, Field)>;

/// Handle returned by [`Notifier::register`], needed to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("{0} is not registered on this record")]
    UnknownListener(ListenerId),
}

/// Ordered set of listeners owned by a single record.
#[derive(Default)]
pub struct Notifier {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub fn remove(&mut self, id: ListenerId) -> Result<(), NotifyError> {
        let index = self
            .listeners
            .iter()
            .position(|(registered, _)| *registered == id)
            .ok_or(NotifyError::UnknownListener(id))?;
        self.listeners.remove(index);
        Ok(())
    }

    /// Invoke every listener in registration order.
    pub fn notify(&mut self, param: &ParamId, field: Field) {
        for (_, listener) in &mut self.listeners {
            listener(param, field);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "notify_tests.rs"]
mod tests;
