//! `bw parse` specs

use crate::prelude::*;

fn generated(temp: &Project) {
    temp.file("doc.json", DEPLOY_DOCUMENT);
    temp.file("body.sh", "echo \"deploying $name\"\n");
    temp.bw()
        .args(&["generate", "doc.json", "--user-code", "body.sh", "--out", "deploy.sh"])
        .passes();
}

#[test]
fn recovers_the_document() {
    let temp = Project::empty();
    generated(&temp);
    let run = temp.bw().args(&["parse", "deploy.sh"]).passes();
    let expected: serde_json::Value = serde_json::from_str(DEPLOY_DOCUMENT).unwrap();
    assert_eq!(run.json(), expected);
}

#[test]
fn prints_document_with_four_space_indent() {
    let temp = Project::empty();
    generated(&temp);
    temp.bw()
        .args(&["parse", "deploy.sh"])
        .passes()
        .stdout_eq(&format!("{DEPLOY_DOCUMENT}\n"));
}

#[test]
fn user_code_flag_prints_only_user_code() {
    let temp = Project::empty();
    generated(&temp);
    temp.bw()
        .args(&["parse", "deploy.sh", "--user-code"])
        .passes()
        .stdout_eq("echo \"deploying $name\"\n");
}

#[test]
fn json_output_reports_version_and_user_code() {
    let temp = Project::empty();
    generated(&temp);
    let run = temp.bw().args(&["-o", "json", "parse", "deploy.sh"]).passes();
    let report = run.json();
    assert_eq!(report["version"], "0.1.0");
    assert_eq!(report["user_code"], "echo \"deploying $name\"");
    assert_eq!(report["document"]["ScriptName"], "deploy.sh");
    assert_eq!(report["diagnostics"], serde_json::json!([]));
}

#[test]
fn hand_written_script_fails_with_stage() {
    let temp = Project::empty();
    temp.file("plain.sh", "#!/bin/bash\necho hi\n");
    temp.bw()
        .args(&["parse", "plain.sh"])
        .fails()
        .code(1)
        .stdout_eq("")
        .stderr_has("error: ")
        .stderr_has("parse error(s)");
}

#[test]
fn json_failure_still_prints_the_report() {
    let temp = Project::empty();
    temp.file("plain.sh", "#!/bin/bash\necho hi\n");
    let run = temp
        .bw()
        .args(&["-o", "json", "parse", "plain.sh"])
        .fails()
        .code(1);
    let report = run.json();
    assert!(!report["diagnostics"].as_array().unwrap().is_empty());
    assert_eq!(report["diagnostics"][0]["severity"], "error");
}

#[test]
fn bare_markers_parse_to_user_code() {
    let temp = Project::empty();
    temp.file("code.sh", "# --- BEGIN USER CODE ---\necho solo\n# --- END USER CODE ---");
    temp.bw()
        .args(&["parse", "code.sh", "--user-code"])
        .passes()
        .stdout_eq("echo solo\n");
}
