//! Help and version output specs

use crate::prelude::*;

#[test]
fn no_subcommand_prints_help() {
    cli()
        .passes()
        .stdout_has("Usage: bw")
        .stdout_has("generate")
        .stdout_has("debug-config");
}

#[test]
fn help_lists_every_command() {
    let run = cli().args(&["--help"]).passes();
    for command in ["generate", "parse", "validate", "debug-config", "input-json", "init"] {
        assert!(run.stdout().contains(command), "help lacks {command}");
    }
}

#[test]
fn version_names_the_binary() {
    cli().args(&["--version"]).passes().stdout_has("bw 0.1.0");
}
