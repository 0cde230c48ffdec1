// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::id::{IdGen, SequentialIdGen};

fn definition_with(fields: &[ParameterFields]) -> (ScriptDefinition, Vec<ParamId>) {
    let ids = SequentialIdGen::default();
    let mut def = ScriptDefinition::new();
    let mut added = Vec::new();
    for f in fields {
        let id = ids.param_id();
        def.push(ParameterRecord::from_fields(id.clone(), f.clone()));
        added.push(id);
    }
    (def, added)
}

#[test]
fn push_preserves_insertion_order() {
    let (def, _) = definition_with(&[
        ParameterFields::option("zeta", "z", "zeta"),
        ParameterFields::option("alpha", "a", "alpha"),
    ]);
    let names: Vec<&str> = def.parameters().iter().map(|p| p.long_name()).collect();
    assert_eq!(names, vec!["zeta", "alpha"]);
}

#[test]
fn remove_detaches_built_in_binding() {
    let (mut def, ids) = definition_with(&[ParameterFields::flag("verbose", "b", "verbose")]);
    assert!(def.bind(BuiltInKind::VerboseSupport, ids[0].clone()));

    let removed = def.remove(&ids[0]).unwrap();

    assert_eq!(removed.long_name(), "verbose");
    assert!(!def.is_active(BuiltInKind::VerboseSupport));
    assert!(def.is_empty());
}

#[test]
fn bind_rejects_unknown_record() {
    let mut def = ScriptDefinition::new();
    assert!(!def.bind(BuiltInKind::Create, ParamId::new("missing")));
    assert!(!def.is_active(BuiltInKind::Create));
}

#[test]
fn install_built_in_twice_keeps_one_canonical_record() {
    let ids = SequentialIdGen::default();
    let mut def = ScriptDefinition::new();

    assert!(def
        .install_built_in(BuiltInKind::LoggingSupport, ids.param_id())
        .is_none());
    let first = def.built_in_id(BuiltInKind::LoggingSupport).cloned().unwrap();
    def.get_mut(&first).unwrap().set_default_value("/tmp");

    let displaced = def.install_built_in(BuiltInKind::LoggingSupport, ids.param_id());

    assert_eq!(displaced.map(|r| r.default_value().to_string()), Some("/tmp".into()));
    assert_eq!(def.len(), 1);
    let record = def.built_in(BuiltInKind::LoggingSupport).unwrap();
    assert_eq!(
        record.fields(),
        &BuiltInKind::LoggingSupport.template().fields()
    );
}

#[test]
fn bind_built_ins_by_name_respects_filter() {
    let (mut def, ids) = definition_with(&[
        ParameterFields::flag("create", "c", "create"),
        ParameterFields::flag("verbose", "b", "verbose"),
        ParameterFields::option("name", "n", "name"),
    ]);

    def.bind_built_ins_by_name(|kind| kind != BuiltInKind::VerboseSupport);

    assert_eq!(def.built_in_id(BuiltInKind::Create), Some(&ids[0]));
    assert!(!def.is_active(BuiltInKind::VerboseSupport));
    assert_eq!(def.built_in_kind_of(&ids[0]), Some(BuiltInKind::Create));
    assert_eq!(def.built_in_kind_of(&ids[2]), None);
}

#[test]
fn clear_resets_everything() {
    let (mut def, ids) = definition_with(&[ParameterFields::flag("create", "c", "create")]);
    def.set_script_name("a.sh");
    def.set_description("desc");
    def.set_user_code("echo hi");
    def.bind(BuiltInKind::Create, ids[0].clone());

    let dropped = def.clear();

    assert_eq!(dropped.len(), 1);
    assert!(def.is_empty());
    assert_eq!(def.script_name(), "");
    assert_eq!(def.user_code(), "");
    assert_eq!(def.active_built_ins().count(), 0);
}

#[yare::parameterized(
    empty = { "", "" },
    already_suffixed = { "deploy.sh", "deploy.sh" },
    missing_suffix = { "deploy", "deploy.sh" },
    other_extension = { "deploy.bash", "deploy.bash.sh" },
)]
fn script_suffix_is_appended(input: &str, expected: &str) {
    assert_eq!(with_script_suffix(input), expected);
}
