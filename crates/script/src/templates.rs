// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Script skeleton and optional section templates.
//!
//! Placeholders are `__UPPER_SNAKE__` tokens. The parser keys on the marker
//! comments and function headers defined here, so both sides share these
//! constants.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use thiserror::Error;

pub const USER_CODE_BEGIN: &str = "# --- BEGIN USER CODE ---";
pub const USER_CODE_END: &str = "# --- END USER CODE ---";

pub const VERSION_PREFIX: &str = "# bashWizard version ";
pub const USAGE_FUNCTION: &str = "function usage() {";
pub const ECHO_INPUT_FUNCTION: &str = "function echoInput() {";
pub const CASE_START: &str = "case \"$1\" in";
pub const CASE_END_ARM: &str = "--)";
pub const DECLARATIONS_MARKER: &str = "# input variables";
pub const INPUT_FILE_MARKER: &str = "# if an input file was passed, read the settings from the file";
pub const LOGGING_MARKER: &str = "# logging support";
pub const VERBOSE_MARKER: &str = "# if verbose is set, echo the input";

/// Placeholder the user code (or the create/verify/delete stub) lands on.
pub const USER_CODE_PLACEHOLDER: &str = "__USER_CODE_1__";

pub const SCRIPT_SKELETON: &str = r##"#!/bin/bash
# bashWizard version __VERSION__
# echoError, echoWarning and echoInfo color their text so it stands out in the log
function echoError() {
    RED=$(tput setaf 1)
    NORMAL=$(tput sgr0)
    echo "${RED}${1}${NORMAL}"
}

function echoWarning() {
    YELLOW=$(tput setaf 3)
    NORMAL=$(tput sgr0)
    echo "${YELLOW}${1}${NORMAL}"
}

function echoInfo() {
    GREEN=$(tput setaf 2)
    NORMAL=$(tput sgr0)
    echo "${GREEN}${1}${NORMAL}"
}

# make sure this version of *nix supports the right getopt
! getopt --test 2>/dev/null
if [[ ${PIPESTATUS[0]} -ne 4 ]]; then
    echoError "'getopt --test' failed in this environment. please install gnu-getopt."
    exit 1
fi
__JQ_DEPENDENCY__

function usage() {
__USAGE_INPUT_STATEMENT__
__USAGE_LINE__ 1>&2
__USAGE__
    echo ""
    exit 1
}

function echoInput() {
    echo __ECHO__
}

function parseInput() {
    OPTIONS=__SHORT_OPTIONS__
    LONGOPTS=__LONG_OPTIONS__

    # -use ! and PIPESTATUS to get exit code with errexit set
    # -temporarily store output to be able to check for errors
    # -activate quoting/enhanced mode (e.g. by writing out "--options")
    # -pass arguments only via   -- "$@"   to separate them correctly
    ! PARSED=$(getopt --options=$OPTIONS --longoptions=$LONGOPTS --name "$0" -- "$@")
    if [[ ${PIPESTATUS[0]} -ne 0 ]]; then
        # getopt has complained about wrong arguments to stdout
        usage
    fi
    # read getopt's output this way to handle the quoting right
    eval set -- "$PARSED"
    while true; do
        case "$1" in
__INPUT_CASE__
        --)
            shift
            break
            ;;
        *)
            echoError "Invalid option $1 $2"
            exit 3
            ;;
        esac
    done
}

# input variables
__INPUT_DECLARATION__

parseInput "$@"

__PARSE_INPUT_FILE__
__REQUIRED_PARAMETERS__
__LOGGING_SUPPORT__
__VERBOSE_ECHO__
# --- BEGIN USER CODE ---
__USER_CODE_1__
# --- END USER CODE ---
__END_LOGGING_SUPPORT__
"##;

pub const JQ_DEPENDENCY: &str = r##"
# jq reads the input file
if ! command -v jq &> /dev/null; then
    echoError "'jq' is needed to parse the input file. please install jq."
    exit 1
fi
"##;

pub const USAGE_INPUT_STATEMENT: &str = "    echoWarning \"Parameters can be passed in the command line or in the input file. The command line overrides the setting in the input file.\"";

pub const PARSE_INPUT_FILE: &str = r##"# if an input file was passed, read the settings from the file
if [ "${__INPUT_FILE_VARIABLE__}" != "" ]; then
    configSection=$(jq . <"${__INPUT_FILE_VARIABLE__}" | jq '."__SCRIPT_NAME__"')
    if [[ -z $configSection ]]; then
        echoError "$__INPUT_FILE_VARIABLE__ or __SCRIPT_NAME__ section not found "
        exit 3
    fi
__FILE_TO_SETTINGS__

    # command line values override the input file
    parseInput "$@"
fi
"##;

pub const REQUIRED_PARAMETERS: &str = r##"# make sure the required parameters were passed
if __REQUIRED_FILES_IF__; then
    echo ""
    echoError "Required parameter missing! "
    echoInput #make it easy to see what is missing
    echo ""
    usage
fi
"##;

pub const LOGGING_SUPPORT: &str = r##"# logging support
declare LOG_FILE="${__LOG_DIRECTORY_VARIABLE__%/}/__LOG_FILE_NAME__"
{
    mkdir -p "${__LOG_DIRECTORY_VARIABLE__}"
    rm -f "${LOG_FILE}"
} 2>>/dev/null
# capture all the output in the log file
{
    time=$(date +"%m/%d/%y @ %r")
    echo "started: $time"
"##;

pub const END_LOGGING_SUPPORT: &str = r##"    time=$(date +"%m/%d/%y @ %r")
    echo "ended: $time"
} | tee -a "${LOG_FILE}"
"##;

pub const VERBOSE_ECHO: &str = r##"# if verbose is set, echo the input
if [[ "$__VERBOSE_VARIABLE__" == "true" ]]; then
    echoInput
fi
"##;

pub const CREATE_VERIFY_DELETE: &str = r##"function onVerify() {
    echo "onVerify"
}

function onDelete() {
    echo "onDelete"
}

function onCreate() {
    echo "onCreate"
}

if [[ $__CREATE_VARIABLE__ == "true" ]]; then
    onCreate
fi
if [[ $__VERIFY_VARIABLE__ == "true" ]]; then
    onVerify
fi
if [[ $__DELETE_VARIABLE__ == "true" ]]; then
    onDelete
fi

__USER_CODE_1__"##;

/// Function names whose presence in user code suppresses the stub.
pub const STUB_FUNCTIONS: [&str; 3] = ["onCreate", "onVerify", "onDelete"];

// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"__[A-Z][A-Z0-9_]*[A-Z0-9]__").expect("constant regex pattern is valid")
});

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("template placeholder {0} has no value")]
    UnknownPlaceholder(String),
    #[error("template has no placeholder {0}")]
    MissingPlaceholder(String),
    #[error("template placeholder {0} appears more than once")]
    DuplicatePlaceholder(String),
}

/// How often each placeholder may occur in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurrence {
    ExactlyOnce,
    AtLeastOnce,
}

/// Substitute every placeholder in `template` in a single left-to-right pass.
///
/// Inserted values are never rescanned, so a value that happens to contain a
/// placeholder-shaped token is copied through untouched.
pub fn fill(
    template: &str,
    values: &[(&str, &str)],
    occurrence: Occurrence,
) -> Result<String, RenderError> {
    let lookup: HashMap<&str, &str> = values.iter().copied().collect();
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let filled: usize = values.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(template.len() + filled);
    let mut last = 0;

    for m in PLACEHOLDER.find_iter(template) {
        let key = m.as_str();
        let value = lookup
            .get(key)
            .ok_or_else(|| RenderError::UnknownPlaceholder(key.to_string()))?;
        let count = seen.entry(key).or_insert(0);
        *count += 1;
        if occurrence == Occurrence::ExactlyOnce && *count > 1 {
            return Err(RenderError::DuplicatePlaceholder(key.to_string()));
        }
        out.push_str(&template[last..m.start()]);
        out.push_str(value);
        last = m.end();
    }
    out.push_str(&template[last..]);

    if let Some((key, _)) = values.iter().find(|(key, _)| !seen.contains_key(key)) {
        return Err(RenderError::MissingPlaceholder(key.to_string()));
    }
    Ok(out)
}

#[cfg(test)]
#[path = "templates_tests.rs"]
mod tests;
