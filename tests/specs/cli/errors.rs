//! CLI error handling specs
//!
//! Verify error messages and exit codes for bad input.

use crate::prelude::*;

#[test]
fn missing_input_file_names_the_path() {
    let temp = Project::empty();
    temp.bw()
        .args(&["validate", "nope.sh"])
        .fails()
        .code(1)
        .stderr_has("Error: failed to read nope.sh");
}

#[test]
fn broken_document_is_reported() {
    let temp = Project::empty();
    temp.file("doc.json", "{ \"ScriptName\": ");
    temp.bw()
        .args(&["generate", "doc.json"])
        .fails()
        .code(1)
        .stderr_has("invalid JSON document");
}

#[test]
fn unknown_subcommand_is_a_usage_error() {
    cli().args(&["frobnicate"]).fails().code(2);
}

#[test]
fn unknown_output_format_is_a_usage_error() {
    cli().args(&["-o", "yaml", "validate", "x.sh"]).fails().code(2);
}
