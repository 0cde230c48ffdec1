//! `bw validate` specs

use crate::prelude::*;

#[test]
fn clean_document_reports_ok() {
    let temp = Project::empty();
    temp.file("doc.json", DEPLOY_DOCUMENT);
    temp.bw()
        .args(&["validate", "doc.json"])
        .passes()
        .stdout_eq("ok: deploy.sh (2 parameters)\n");
}

#[test]
fn clean_script_reports_ok() {
    let temp = Project::empty();
    temp.file("doc.json", DEPLOY_DOCUMENT);
    temp.bw()
        .args(&["generate", "doc.json", "--out", "deploy.sh"])
        .passes();
    temp.bw()
        .args(&["validate", "deploy.sh"])
        .passes()
        .stdout_eq("ok: deploy.sh (2 parameters)\n");
}

#[test]
fn duplicates_exit_with_one() {
    let temp = Project::empty();
    temp.file("doc.json", CLASHING_DOCUMENT);
    temp.bw()
        .args(&["validate", "doc.json"])
        .fails()
        .code(1)
        .stdout_eq("error: duplicate short parameter \"n\"\n");
}

#[test]
fn json_report_lists_diagnostics() {
    let temp = Project::empty();
    temp.file("doc.json", CLASHING_DOCUMENT);
    let run = temp
        .bw()
        .args(&["validate", "doc.json", "-o", "json"])
        .fails()
        .code(1);
    let report = run.json();
    assert_eq!(report["script_name"], "clash.sh");
    assert_eq!(report["parameters"], 2);
    assert_eq!(report["diagnostics"].as_array().unwrap().len(), 1);
}

#[test]
fn invalid_combination_is_reported() {
    let temp = Project::empty();
    temp.file(
        "doc.json",
        r#"{ "ScriptName": "x.sh", "Parameters": [
            { "LongParameter": "name", "ShortParameter": "n", "VariableName": "name",
              "RequiresInputString": true, "ValueIfSet": "yes" } ] }"#,
    );
    temp.bw()
        .args(&["validate", "doc.json"])
        .fails()
        .stdout_has("invalid combination");
}

#[test]
fn illegal_script_name_is_reported() {
    let temp = Project::empty();
    temp.file("doc.json", r#"{ "ScriptName": "bad:name.sh" }"#);
    temp.bw()
        .args(&["validate", "doc.json"])
        .fails()
        .stdout_has("illegal character");
}
