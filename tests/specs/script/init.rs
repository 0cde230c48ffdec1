//! `bw init` specs

use crate::prelude::*;

#[test]
fn builds_script_with_autofilled_names() {
    let temp = Project::empty();
    temp.bw()
        .args(&[
            "init",
            "deploy",
            "-b",
            "logging",
            "--option",
            "log-level",
            "--flag",
            "dry-run",
            "--require",
            "log-level",
        ])
        .passes()
        .stdout_has("        -o | --log-level)\n            logLevel=$2\n            shift 2\n            ;;")
        .stdout_has("        -d | --dry-run)\n            dryRun=true\n            shift 1\n            ;;")
        .stdout_has("# logging support")
        .stderr_has("added .sh to the script name");
}

#[test]
fn out_file_is_not_overwritten_without_force() {
    let temp = Project::empty();
    temp.bw()
        .args(&["init", "tool.sh", "--flag", "force", "--out", "tool.sh"])
        .passes();
    temp.bw()
        .args(&["init", "tool.sh", "--out", "tool.sh"])
        .fails()
        .stderr_has("tool.sh already exists");
    temp.bw()
        .args(&["init", "tool.sh", "--flag", "quiet", "--out", "tool.sh", "--force"])
        .passes();
    assert!(temp.read("tool.sh").contains("--quiet)"));
}

#[test]
fn initialized_script_validates_and_parses() {
    let temp = Project::empty();
    temp.bw()
        .args(&["init", "tool.sh", "-b", "all", "--option", "target", "--out", "tool.sh"])
        .passes();
    temp.bw()
        .args(&["validate", "tool.sh"])
        .passes()
        .stdout_eq("ok: tool.sh (7 parameters)\n");
    let document = temp.bw().args(&["parse", "tool.sh"]).passes().json();
    assert_eq!(document["ScriptName"], "tool.sh");
}

#[test]
fn requiring_unknown_parameter_fails() {
    let temp = Project::empty();
    temp.bw()
        .args(&["init", "tool.sh", "--require", "ghost"])
        .fails()
        .stderr_has("no parameter with long name: ghost");
}

#[test]
fn unknown_builtin_is_a_usage_error() {
    cli().args(&["init", "tool.sh", "-b", "colors"]).fails().code(2);
}
