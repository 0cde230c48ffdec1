// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Script generation.
//!
//! One pass over the parameters accumulates every per-parameter fragment,
//! then one substitution pass fills the skeleton. User code goes in last so
//! nothing after it can touch it.

use crate::config::GeneratorConfig;
use crate::templates::{
    fill, Occurrence, RenderError, CREATE_VERIFY_DELETE, END_LOGGING_SUPPORT, JQ_DEPENDENCY,
    LOGGING_SUPPORT, PARSE_INPUT_FILE, REQUIRED_PARAMETERS, SCRIPT_SKELETON, STUB_FUNCTIONS,
    USAGE_INPUT_STATEMENT, USER_CODE_BEGIN, USER_CODE_END, USER_CODE_PLACEHOLDER, VERBOSE_ECHO,
};
use bw_core::{BuiltInKind, ParameterRecord, ScriptDefinition};
use regex::Regex;
use std::sync::LazyLock;

const TAB: &str = "    ";

// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("constant regex pattern is valid"));

/// Render with default settings.
pub fn render(definition: &ScriptDefinition) -> String {
    render_with(definition, &GeneratorConfig::default())
}

/// Render the script; internal failures become the script text itself.
pub fn render_with(definition: &ScriptDefinition, config: &GeneratorConfig) -> String {
    match try_render(definition, config) {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(error = %e, "script generation failed");
            format!("something went wrong. {e}")
        }
    }
}

pub fn try_render(
    definition: &ScriptDefinition,
    config: &GeneratorConfig,
) -> Result<String, RenderError> {
    if definition.is_empty() {
        return Ok(format!(
            "{USER_CODE_BEGIN}\n{}\n{USER_CODE_END}",
            definition.user_code()
        ));
    }

    let fragments = Fragments::accumulate(definition);
    let input_file = definition.built_in(BuiltInKind::InputFileSupport);

    let (jq_dependency, usage_input_statement, parse_input_file) = match input_file {
        Some(record) => (
            JQ_DEPENDENCY.to_string(),
            USAGE_INPUT_STATEMENT.to_string(),
            fill(
                PARSE_INPUT_FILE,
                &[
                    ("__INPUT_FILE_VARIABLE__", record.variable_name()),
                    ("__SCRIPT_NAME__", definition.script_name()),
                    ("__FILE_TO_SETTINGS__", fragments.file_to_settings.as_str()),
                ],
                Occurrence::AtLeastOnce,
            )?,
        ),
        None => (String::new(), String::new(), String::new()),
    };

    let required_parameters = if fragments.required_terms.is_empty() {
        String::new()
    } else {
        fill(
            REQUIRED_PARAMETERS,
            &[("__REQUIRED_FILES_IF__", fragments.required_terms.as_str())],
            Occurrence::ExactlyOnce,
        )?
    };

    let (logging_support, end_logging_support) =
        match definition.built_in(BuiltInKind::LoggingSupport) {
            Some(record) => {
                let log_file = format!("{}.log", definition.script_name());
                let start = fill(
                    LOGGING_SUPPORT,
                    &[
                        ("__LOG_DIRECTORY_VARIABLE__", record.variable_name()),
                        ("__LOG_FILE_NAME__", log_file.as_str()),
                    ],
                    Occurrence::AtLeastOnce,
                )?;
                (start, END_LOGGING_SUPPORT.to_string())
            }
            None => (String::new(), String::new()),
        };

    let verbose_echo = match definition.built_in(BuiltInKind::VerboseSupport) {
        Some(record) => fill(
            VERBOSE_ECHO,
            &[("__VERBOSE_VARIABLE__", record.variable_name())],
            Occurrence::ExactlyOnce,
        )?,
        None => String::new(),
    };

    let user_code_slot = match stub_variables(definition) {
        Some([create, verify, delete]) => fill(
            CREATE_VERIFY_DELETE,
            &[
                ("__CREATE_VARIABLE__", create),
                ("__VERIFY_VARIABLE__", verify),
                ("__DELETE_VARIABLE__", delete),
                (USER_CODE_PLACEHOLDER, USER_CODE_PLACEHOLDER),
            ],
            Occurrence::ExactlyOnce,
        )?,
        None => USER_CODE_PLACEHOLDER.to_string(),
    };

    let filled = fill(
        SCRIPT_SKELETON,
        &[
            ("__VERSION__", config.version.as_str()),
            ("__JQ_DEPENDENCY__", jq_dependency.as_str()),
            ("__USAGE_INPUT_STATEMENT__", usage_input_statement.as_str()),
            ("__USAGE_LINE__", fragments.usage_line.as_str()),
            ("__USAGE__", fragments.usage_info.as_str()),
            ("__ECHO__", fragments.echo_input.as_str()),
            ("__SHORT_OPTIONS__", fragments.short_options.as_str()),
            ("__LONG_OPTIONS__", fragments.long_options.as_str()),
            ("__INPUT_CASE__", fragments.input_case.as_str()),
            ("__INPUT_DECLARATION__", fragments.declarations.as_str()),
            ("__PARSE_INPUT_FILE__", parse_input_file.as_str()),
            ("__REQUIRED_PARAMETERS__", required_parameters.as_str()),
            ("__LOGGING_SUPPORT__", logging_support.as_str()),
            ("__VERBOSE_ECHO__", verbose_echo.as_str()),
            (USER_CODE_PLACEHOLDER, user_code_slot.as_str()),
            ("__END_LOGGING_SUPPORT__", end_logging_support.as_str()),
        ],
        Occurrence::ExactlyOnce,
    )?;

    let collapsed = BLANK_RUN.replace_all(&filled, "\n\n");
    let at = collapsed
        .rfind(USER_CODE_PLACEHOLDER)
        .ok_or_else(|| RenderError::MissingPlaceholder(USER_CODE_PLACEHOLDER.to_string()))?;

    let mut script = String::with_capacity(collapsed.len() + definition.user_code().len());
    script.push_str(&collapsed[..at]);
    script.push_str(definition.user_code());
    script.push_str(&collapsed[at + USER_CODE_PLACEHOLDER.len()..]);

    tracing::debug!(
        parameters = definition.len(),
        bytes = script.len(),
        "rendered script"
    );
    Ok(script)
}

/// Variable names for the create/verify/delete stub, when it should be emitted.
fn stub_variables(definition: &ScriptDefinition) -> Option<[&str; 3]> {
    let create = definition.built_in(BuiltInKind::Create)?;
    let verify = definition.built_in(BuiltInKind::Verify)?;
    let delete = definition.built_in(BuiltInKind::Delete)?;
    let user_code = definition.user_code();
    let already_written = STUB_FUNCTIONS
        .iter()
        .any(|name| user_code.contains(&format!("function {name}()")));
    if already_written {
        return None;
    }
    Some([
        create.variable_name(),
        verify.variable_name(),
        delete.variable_name(),
    ])
}

/// Per-parameter text built in one pass.
#[derive(Debug, Default)]
struct Fragments {
    usage_line: String,
    usage_info: String,
    echo_input: String,
    short_options: String,
    long_options: String,
    input_case: String,
    declarations: String,
    file_to_settings: String,
    required_terms: String,
}

impl Fragments {
    fn accumulate(definition: &ScriptDefinition) -> Self {
        let width = definition
            .parameters()
            .iter()
            .map(|p| p.long_name().chars().count())
            .max()
            .unwrap_or(0)
            + 4;
        let input_file_id = definition.built_in_id(BuiltInKind::InputFileSupport);

        let mut f = Fragments {
            usage_line: format!(
                "{TAB}echo \"{}\"\n{TAB}echo \"\"\n{TAB}echo \"Usage: $0  ",
                definition.description()
            ),
            usage_info: format!("{TAB}echo \"\"\n"),
            echo_input: format!("\"{}:\"\n", definition.script_name()),
            ..Fragments::default()
        };

        for param in definition.parameters() {
            f.push(param, width, input_file_id == Some(param.id()));
        }

        f.usage_line.push('"');
        trim_trailing(&mut f.usage_info, "\n");
        trim_trailing(&mut f.echo_input, "\n");
        trim_trailing(&mut f.long_options, ",");
        trim_trailing(&mut f.input_case, "\n");
        trim_trailing(&mut f.declarations, "\n");
        trim_trailing(&mut f.file_to_settings, "\n");
        trim_trailing(&mut f.required_terms, " || ");
        f
    }

    fn push(&mut self, param: &ParameterRecord, width: usize, is_input_file: bool) {
        let long = param.long_name();
        let short = param.short_name();
        let var = param.variable_name();
        let takes_value = param.requires_input_string();
        let required = if param.required_parameter() {
            "Required    "
        } else {
            "Optional    "
        };

        self.usage_line.push_str(&format!("-{short}|--{long} "));
        self.usage_info.push_str(&format!(
            "{TAB}echo \" -{short} | --{} {required} {}\"\n",
            pad_end(long, width, ' '),
            param.description()
        ));
        self.echo_input.push_str(&format!(
            "{TAB}echo -n \"{TAB}{} \"\n{TAB}echoInfo \"${var}\"\n",
            pad_end(long, width, '.')
        ));

        self.short_options.push_str(short);
        self.long_options.push_str(long);
        if takes_value {
            self.short_options.push(':');
            self.long_options.push(':');
        }
        self.long_options.push(',');

        self.input_case.push_str(&format!(
            "{TAB}{TAB}-{short} | --{long})\n\
             {TAB}{TAB}{TAB}{var}={}\n\
             {TAB}{TAB}{TAB}shift {}\n\
             {TAB}{TAB}{TAB};;\n",
            param.value_if_set(),
            if takes_value { 2 } else { 1 }
        ));
        self.declarations
            .push_str(&format!("declare {var}={}\n", param.default_value()));

        if !is_input_file {
            self.file_to_settings.push_str(&format!(
                "{TAB}{var}=$(echo \"${{configSection}}\" | jq '.[\"{long}\"]' --raw-output)\n"
            ));
        }
        if param.required_parameter() {
            self.required_terms
                .push_str(&format!("[ -z \"${{{var}}}\" ] || "));
        }
    }
}

fn pad_end(text: &str, width: usize, fill: char) -> String {
    let mut out = text.to_string();
    let len = text.chars().count();
    out.extend(std::iter::repeat_n(fill, width.saturating_sub(len)));
    out
}

fn trim_trailing(text: &mut String, separator: &str) {
    if text.ends_with(separator) {
        text.truncate(text.len() - separator.len());
    }
}

#[cfg(test)]
#[path = "generate_tests.rs"]
mod tests;
