//! `bw generate` specs

use crate::prelude::*;

#[test]
fn renders_case_arms_for_each_parameter() {
    let temp = Project::empty();
    temp.file("doc.json", DEPLOY_DOCUMENT);
    temp.bw()
        .args(&["generate", "doc.json"])
        .passes()
        .stdout_has("#!/bin/bash\n")
        .stdout_has("        -n | --name)\n            name=$2\n            shift 2\n            ;;")
        .stdout_has("        -d | --dry-run)\n            dryRun=true\n            shift 1\n            ;;")
        .stdout_has("# --- BEGIN USER CODE ---\n");
}

#[test]
fn writes_to_out_file() {
    let temp = Project::empty();
    temp.file("doc.json", DEPLOY_DOCUMENT);
    temp.bw()
        .args(&["generate", "doc.json", "--out", "deploy.sh"])
        .passes()
        .stdout_eq("");
    assert!(temp.read("deploy.sh").contains("function usage() {"));
}

#[test]
fn embeds_user_code_file() {
    let temp = Project::empty();
    temp.file("doc.json", DEPLOY_DOCUMENT);
    temp.file("body.sh", "echo \"deploying $name\"\n");
    temp.bw()
        .args(&["generate", "doc.json", "--user-code", "body.sh"])
        .passes()
        .stdout_has("# --- BEGIN USER CODE ---\necho \"deploying $name\"\n# --- END USER CODE ---");
}

#[test]
fn keep_code_carries_user_code_across_regeneration() {
    let temp = Project::empty();
    temp.file("doc.json", DEPLOY_DOCUMENT);
    temp.file("body.sh", "echo kept\n");
    temp.bw()
        .args(&["generate", "doc.json", "--user-code", "body.sh", "--out", "deploy.sh"])
        .passes();

    temp.bw()
        .args(&["generate", "doc.json", "--keep-code", "deploy.sh"])
        .passes()
        .stdout_has("# --- BEGIN USER CODE ---\necho kept\n# --- END USER CODE ---");
}

#[test]
fn keep_code_needs_a_user_code_region() {
    let temp = Project::empty();
    temp.file("doc.json", DEPLOY_DOCUMENT);
    temp.file("plain.sh", "#!/bin/bash\necho hi\n");
    temp.bw()
        .args(&["generate", "doc.json", "--keep-code", "plain.sh"])
        .fails()
        .stderr_has("plain.sh has no user code region");
}

#[test]
fn validation_errors_block_generation() {
    let temp = Project::empty();
    temp.file("doc.json", CLASHING_DOCUMENT);
    temp.bw()
        .args(&["generate", "doc.json"])
        .fails()
        .code(1)
        .stdout_eq("")
        .stderr_has("error: duplicate short parameter \"n\"")
        .stderr_has("Error: 1 validation error(s)");
}

#[test]
fn force_renders_despite_errors() {
    let temp = Project::empty();
    temp.file("doc.json", CLASHING_DOCUMENT);
    temp.bw()
        .args(&["generate", "doc.json", "--force"])
        .passes()
        .stdout_has("--number)");
}

#[test]
fn empty_document_renders_bare_markers() {
    let temp = Project::empty();
    temp.file("doc.json", "{}");
    temp.bw()
        .args(&["generate", "doc.json"])
        .passes()
        .stdout_eq("# --- BEGIN USER CODE ---\n\n# --- END USER CODE ---\n");
}

#[test]
fn reads_document_from_stdin() {
    let assert = assert_cmd::Command::new(bw_binary())
        .env_remove("BW_CONFIG")
        .args(["generate", "-"])
        .write_stdin(DEPLOY_DOCUMENT)
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    assert!(stdout.contains("-n | --name)"), "stdout: {stdout}");
}

#[test]
fn json_output_carries_every_view() {
    let temp = Project::empty();
    temp.file("doc.json", DEPLOY_DOCUMENT);
    let run = temp.bw().args(&["-o", "json", "generate", "doc.json"]).passes();
    let views = run.json();
    for key in ["script", "json", "debug_config", "input_json"] {
        assert!(views[key].is_string(), "missing view {key}");
    }
    assert!(views["script"].as_str().unwrap().contains("--dry-run)"));
}
