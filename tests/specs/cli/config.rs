//! Configuration resolution specs
//!
//! BW_CONFIG > $XDG_CONFIG_HOME/bashwiz/config.toml > defaults, with
//! BW_SCRIPT_DIR and --script-dir overriding the script directory.

use crate::prelude::*;

fn program(run: &RunAssert) -> String {
    run.json()["program"].as_str().unwrap().to_string()
}

#[test]
fn defaults_point_into_bash_scripts() {
    let temp = Project::empty();
    temp.file("doc.json", DEPLOY_DOCUMENT);
    let run = temp.bw().args(&["debug-config", "doc.json"]).passes();
    assert_eq!(program(&run), "${workspaceFolder}/BashScripts/deploy.sh");
}

#[test]
fn user_config_sets_script_dir_and_version() {
    let temp = Project::empty();
    temp.config("version = \"9.9.9\"\nscript_dir = \"tools\"\n");
    temp.file("doc.json", DEPLOY_DOCUMENT);

    let run = temp.bw().args(&["debug-config", "doc.json"]).passes();
    assert_eq!(program(&run), "${workspaceFolder}/tools/deploy.sh");

    temp.bw()
        .args(&["generate", "doc.json"])
        .passes()
        .stdout_has("# bashWizard version 9.9.9\n");
}

#[test]
fn env_beats_file_and_flag_beats_env() {
    let temp = Project::empty();
    temp.config("script_dir = \"tools\"\n");
    temp.file("doc.json", DEPLOY_DOCUMENT);

    let run = temp
        .bw()
        .env("BW_SCRIPT_DIR", "from-env")
        .args(&["debug-config", "doc.json"])
        .passes();
    assert_eq!(program(&run), "${workspaceFolder}/from-env/deploy.sh");

    let run = temp
        .bw()
        .env("BW_SCRIPT_DIR", "from-env")
        .args(&["debug-config", "doc.json", "--script-dir", "from-flag"])
        .passes();
    assert_eq!(program(&run), "${workspaceFolder}/from-flag/deploy.sh");
}

#[test]
fn explicit_config_must_exist() {
    let temp = Project::empty();
    temp.file("doc.json", DEPLOY_DOCUMENT);
    temp.bw()
        .env("BW_CONFIG", temp.path().join("missing.toml"))
        .args(&["generate", "doc.json"])
        .fails()
        .stderr_has("cannot use config");
}

#[test]
fn invalid_config_is_reported() {
    let temp = Project::empty();
    temp.file("bw.toml", "script_dir = [");
    temp.file("doc.json", DEPLOY_DOCUMENT);
    temp.bw()
        .env("BW_CONFIG", temp.path().join("bw.toml"))
        .args(&["generate", "doc.json"])
        .fails()
        .stderr_has("invalid config");
}
