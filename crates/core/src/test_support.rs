// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{
    BuiltInKind, IdGen, ParameterFields, ParameterRecord, ScriptDefinition, SequentialIdGen,
};

// ── Definition builders ─────────────────────────────────────────────────────

/// Build a definition from plain fields with sequential ids.
pub fn definition(name: &str, description: &str, fields: &[ParameterFields]) -> ScriptDefinition {
    let ids = SequentialIdGen::new("test");
    let mut def = ScriptDefinition::new();
    def.set_script_name(name);
    def.set_description(description);
    for f in fields {
        def.push(ParameterRecord::from_fields(ids.param_id(), f.clone()));
    }
    def
}

/// Install built-ins on an existing definition, in the order given.
pub fn with_built_ins(mut def: ScriptDefinition, kinds: &[BuiltInKind]) -> ScriptDefinition {
    let ids = SequentialIdGen::new("builtin");
    for kind in kinds {
        def.install_built_in(*kind, ids.param_id());
    }
    def
}

/// A required `--name/-n` option plus an optional `--count/-c`.
pub fn sample_definition() -> ScriptDefinition {
    definition(
        "deploy.sh",
        "deploys the thing",
        &[
            ParameterFields::option("name", "n", "name")
                .with_description("name of the thing")
                .required(),
            ParameterFields::option("count", "c", "count")
                .with_description("how many")
                .with_default("3"),
        ],
    )
}
