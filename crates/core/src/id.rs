// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parameter identity and its allocators

use serde::Serialize;
use std::borrow::Borrow;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Stable identity of a parameter record.
///
/// Correlates records with listeners and diagnostics. It is never written
/// to a script or document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ParamId(String);

impl ParamId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParamId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl PartialEq<&str> for ParamId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Borrow<str> for ParamId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Hands out fresh parameter ids
pub trait IdGen {
    fn param_id(&self) -> ParamId;
}

/// Random v4 UUIDs
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidIdGen;

impl IdGen for UuidIdGen {
    fn param_id(&self) -> ParamId {
        ParamId(uuid::Uuid::new_v4().to_string())
    }
}

/// `<prefix>-1`, `<prefix>-2`, ... for deterministic tests.
///
/// Clones share one counter.
#[derive(Clone, Debug)]
pub struct SequentialIdGen {
    prefix: String,
    counter: Rc<Cell<u64>>,
}

impl SequentialIdGen {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: Rc::new(Cell::new(1)),
        }
    }
}

impl Default for SequentialIdGen {
    fn default() -> Self {
        Self::new("param")
    }
}

impl IdGen for SequentialIdGen {
    fn param_id(&self) -> ParamId {
        let n = self.counter.get();
        self.counter.set(n + 1);
        ParamId(format!("{}-{n}", self.prefix))
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
