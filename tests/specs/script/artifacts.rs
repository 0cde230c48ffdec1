//! `bw debug-config` and `bw input-json` specs

use crate::prelude::*;
use serde_json::json;

#[test]
fn debug_config_lists_defaults_as_args() {
    let temp = Project::empty();
    temp.file("doc.json", DEPLOY_DOCUMENT);
    let run = temp.bw().args(&["debug-config", "doc.json"]).passes();
    assert_eq!(
        run.json(),
        json!({
            "type": "bashdb",
            "request": "launch",
            "name": "Debug deploy.sh",
            "cwd": "${workspaceFolder}",
            "program": "${workspaceFolder}/BashScripts/deploy.sh",
            "args": ["--name", "", "--dry-run", "false"]
        })
    );
}

#[test]
fn input_json_nests_defaults_under_script() {
    let temp = Project::empty();
    temp.file("doc.json", DEPLOY_DOCUMENT);
    temp.bw()
        .args(&["input-json", "doc.json"])
        .passes()
        .stdout_eq(
            "{\n    \"deploy.sh\": {\n        \"name\": \"\",\n        \"dry-run\": \"false\"\n    }\n}\n",
        );
}

#[test]
fn artifacts_derive_from_scripts_too() {
    let temp = Project::empty();
    temp.file("doc.json", DEPLOY_DOCUMENT);
    temp.bw()
        .args(&["generate", "doc.json", "--out", "deploy.sh"])
        .passes();

    let from_script = temp.bw().args(&["input-json", "deploy.sh"]).passes().json();
    let from_doc = temp.bw().args(&["input-json", "doc.json"]).passes().json();
    assert_eq!(from_script, from_doc);
}

#[test]
fn out_flag_writes_the_file() {
    let temp = Project::empty();
    temp.file("doc.json", DEPLOY_DOCUMENT);
    temp.bw()
        .args(&["debug-config", "doc.json", "--out", "launch.json"])
        .passes()
        .stdout_eq("");
    let written: serde_json::Value = serde_json::from_str(&temp.read("launch.json")).unwrap();
    assert_eq!(written["type"], "bashdb");
}

#[test]
fn unparseable_script_is_rejected() {
    let temp = Project::empty();
    temp.file("plain.sh", "#!/bin/bash\necho hi\n");
    temp.bw()
        .args(&["debug-config", "plain.sh"])
        .fails()
        .code(1)
        .stderr_has("parse error(s)");
}
