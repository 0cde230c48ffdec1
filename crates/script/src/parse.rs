// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Script parsing.
//!
//! A linear scanner that recognizes the text [`crate::generate`] produces,
//! tolerating hand edits that keep its shape. It walks the script once,
//! stage by stage:
//!
//! ```text
//! Start → ScanningHeader → ScanningOptionsSpec → ScanningCaseBlock
//!       → ScanningDeclarations → ScanningUserCode → Done
//! ```
//!
//! The first violated expectation becomes a stage-tagged [`ParseError`],
//! the scan stops and every recovered parameter is dropped. Name and
//! description found before the failure are kept. Parsing never fails to
//! the caller; it always yields a [`ParseOutcome`].

use crate::templates::{
    CASE_END_ARM, CASE_START, DECLARATIONS_MARKER, ECHO_INPUT_FUNCTION, INPUT_FILE_MARKER,
    LOGGING_MARKER, STUB_FUNCTIONS, USAGE_FUNCTION, USER_CODE_BEGIN, USER_CODE_END,
    VERBOSE_MARKER, VERSION_PREFIX,
};
use bw_core::{
    BuiltInGroup, BuiltInKind, Diagnostic, IdGen, ParameterFields, ParameterRecord,
    ScriptDefinition, UuidIdGen,
};
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

// Allow expect here as the regexes are compile-time verified to be valid
#[allow(clippy::expect_used)]
static QUOTED_ECHO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*echo "(.*)"$"#).expect("constant regex pattern is valid"));

#[allow(clippy::expect_used)]
static USAGE_ECHO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*echo "Usage: \$0 .*"(?:\s*1>&2)?$"#).expect("constant regex pattern is valid")
});

#[allow(clippy::expect_used)]
static USAGE_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*echo " -(\S*) \| --(\S*) +(Required|Optional) {5}(.*)"$"#)
        .expect("constant regex pattern is valid")
});

#[allow(clippy::expect_used)]
static SCRIPT_NAME_ECHO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*echo "(.*):"$"#).expect("constant regex pattern is valid"));

#[allow(clippy::expect_used)]
static OPTIONS_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*OPTIONS=(.*)$").expect("constant regex pattern is valid"));

#[allow(clippy::expect_used)]
static LONGOPTS_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*LONGOPTS=(.*)$").expect("constant regex pattern is valid"));

#[allow(clippy::expect_used)]
static ARM_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*-(\S*) \| --(\S*)\)$").expect("constant regex pattern is valid")
});

#[allow(clippy::expect_used)]
static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)=(.*)$").expect("constant regex pattern is valid")
});

#[allow(clippy::expect_used)]
static SHIFT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*shift ([12])$").expect("constant regex pattern is valid"));

#[allow(clippy::expect_used)]
static DECLARE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^declare ([A-Za-z_][A-Za-z0-9_]*)=(.*)$").expect("constant regex pattern is valid")
});

#[allow(clippy::expect_used)]
static INPUT_FILE_TEST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*if \[ "\$\{([A-Za-z_][A-Za-z0-9_]*)\}" != "" \]; then$"#)
        .expect("constant regex pattern is valid")
});

#[allow(clippy::expect_used)]
static LOG_FILE_DECLARE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*declare LOG_FILE="\$\{([A-Za-z_][A-Za-z0-9_]*)%/\}/.*"$"#)
        .expect("constant regex pattern is valid")
});

#[allow(clippy::expect_used)]
static VERBOSE_TEST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*if \[\[ "\$([A-Za-z_][A-Za-z0-9_]*)" == "true" \]\]; then$"#)
        .expect("constant regex pattern is valid")
});

/// Where the scanner is in the script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    ScanningHeader,
    ScanningOptionsSpec,
    ScanningCaseBlock,
    ScanningDeclarations,
    ScanningUserCode,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Start => "start",
            Stage::ScanningHeader => "header",
            Stage::ScanningOptionsSpec => "options spec",
            Stage::ScanningCaseBlock => "case block",
            Stage::ScanningDeclarations => "declarations",
            Stage::ScanningUserCode => "user code",
            Stage::Done => "done",
        };
        f.write_str(s)
    }
}

/// A violated expectation, tagged with the stage and 1-based line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{stage} (from line {line}): expected `{expected}`")]
    MissingMarker {
        stage: Stage,
        line: usize,
        expected: &'static str,
    },
    #[error("{stage}, line {line}: {message}")]
    Malformed {
        stage: Stage,
        line: usize,
        message: String,
    },
    #[error("{stage}, line {line}: {message}")]
    Mismatch {
        stage: Stage,
        line: usize,
        message: String,
    },
}

impl ParseError {
    pub fn stage(&self) -> Stage {
        match self {
            ParseError::MissingMarker { stage, .. }
            | ParseError::Malformed { stage, .. }
            | ParseError::Mismatch { stage, .. } => *stage,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            ParseError::MissingMarker { line, .. }
            | ParseError::Malformed { line, .. }
            | ParseError::Mismatch { line, .. } => *line,
        }
    }
}

/// Everything recovered from one parse.
#[derive(Debug)]
pub struct ParseOutcome {
    pub definition: ScriptDefinition,
    pub diagnostics: Vec<ParseError>,
    /// Version from the header line, when present
    pub version: Option<String>,
}

impl ParseOutcome {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Parse errors as model diagnostics.
    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics
            .iter()
            .map(|e| Diagnostic::error(e.to_string(), None))
            .collect()
    }
}

/// Parse with random parameter ids.
pub fn parse(text: &str) -> ParseOutcome {
    parse_with(text, &UuidIdGen)
}

pub fn parse_with(text: &str, ids: &dyn IdGen) -> ParseOutcome {
    if text.trim().is_empty() {
        return ParseOutcome {
            definition: ScriptDefinition::new(),
            diagnostics: Vec::new(),
            version: None,
        };
    }

    // The no-parameter form is nothing but the marker pair.
    if text.trim_start().starts_with(USER_CODE_BEGIN) {
        return parse_user_code_only(text);
    }

    let mut scanner = Scanner::new(text);
    scanner.run();
    scanner.finish(ids)
}

/// Text strictly between the begin marker line and the last end marker.
pub fn extract_user_code(text: &str) -> Option<&str> {
    let begin = text.find(USER_CODE_BEGIN)?;
    let rest = &text[begin + USER_CODE_BEGIN.len()..];
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;
    let end_marker = format!("\n{USER_CODE_END}");
    match rest.rfind(&end_marker) {
        Some(end) => Some(rest[..end].trim_end_matches('\r')),
        None if rest.starts_with(USER_CODE_END) => Some(""),
        None => None,
    }
}

fn parse_user_code_only(text: &str) -> ParseOutcome {
    let mut definition = ScriptDefinition::new();
    let mut diagnostics = Vec::new();
    match extract_user_code(text) {
        Some(code) => definition.set_user_code(code),
        None => diagnostics.push(ParseError::MissingMarker {
            stage: Stage::ScanningUserCode,
            line: 1,
            expected: USER_CODE_END,
        }),
    }
    ParseOutcome {
        definition,
        diagnostics,
        version: None,
    }
}

#[derive(Debug)]
struct UsageEntry {
    short: String,
    long: String,
    required: bool,
    description: String,
}

#[derive(Debug)]
struct CaseArm {
    line: usize,
    short: String,
    long: String,
    variable: String,
    value: String,
    takes_value: bool,
}

/// Variables named by the optional sections that were found.
#[derive(Debug, Default)]
struct Sections {
    input_file: Option<String>,
    logging: Option<String>,
    verbose: Option<String>,
}

struct Scanner<'a> {
    text: &'a str,
    lines: Vec<&'a str>,
    offsets: Vec<usize>,
    cursor: usize,
    stage: Stage,
    error: Option<ParseError>,
    version: Option<String>,
    script_name: String,
    description: String,
    usage: Vec<UsageEntry>,
    short_spec: String,
    long_spec: String,
    arms: Vec<CaseArm>,
    defaults: HashMap<String, String>,
    sections: Sections,
    user_code: String,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        let lines: Vec<&str> = text.split('\n').collect();
        let mut offsets = Vec::with_capacity(lines.len());
        let mut at = 0;
        for line in &lines {
            offsets.push(at);
            at += line.len() + 1;
        }
        Self {
            text,
            lines,
            offsets,
            cursor: 0,
            stage: Stage::Start,
            error: None,
            version: None,
            script_name: String::new(),
            description: String::new(),
            usage: Vec::new(),
            short_spec: String::new(),
            long_spec: String::new(),
            arms: Vec::new(),
            defaults: HashMap::new(),
            sections: Sections::default(),
            user_code: String::new(),
        }
    }

    fn run(&mut self) {
        while self.stage != Stage::Done {
            let next = match self.stage {
                Stage::Start => Ok(Stage::ScanningHeader),
                Stage::ScanningHeader => self.scan_header(),
                Stage::ScanningOptionsSpec => self.scan_options_spec(),
                Stage::ScanningCaseBlock => self.scan_case_block(),
                Stage::ScanningDeclarations => self.scan_declarations(),
                Stage::ScanningUserCode => self.scan_user_code(),
                Stage::Done => Ok(Stage::Done),
            };
            match next {
                Ok(stage) => {
                    let line = self.cursor + 1;
                    tracing::debug!(from = %self.stage, to = %stage, line, "parser stage");
                    self.stage = stage;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "script parse stopped");
                    self.error = Some(e);
                    self.stage = Stage::Done;
                }
            }
        }
    }

    fn finish(self, ids: &dyn IdGen) -> ParseOutcome {
        let mut definition = ScriptDefinition::new();
        definition.set_script_name(self.script_name);
        definition.set_description(self.description);

        if let Some(error) = self.error {
            return ParseOutcome {
                definition,
                diagnostics: vec![error],
                version: self.version,
            };
        }

        for (arm, entry) in self.arms.into_iter().zip(self.usage) {
            let fields = ParameterFields {
                default_value: self.defaults.get(&arm.variable).cloned().unwrap_or_default(),
                long_name: arm.long,
                short_name: arm.short,
                variable_name: arm.variable,
                description: entry.description,
                value_if_set: arm.value,
                requires_input_string: arm.takes_value,
                required_parameter: entry.required,
            };
            definition.push(ParameterRecord::from_fields(ids.param_id(), fields));
        }
        let sections = [
            (BuiltInKind::InputFileSupport, self.sections.input_file),
            (BuiltInKind::LoggingSupport, self.sections.logging),
            (BuiltInKind::VerboseSupport, self.sections.verbose),
        ];
        for (kind, variable) in sections {
            let Some(variable) = variable else { continue };
            let id = definition
                .parameters()
                .iter()
                .find(|p| p.variable_name() == variable)
                .map(|p| p.id().clone());
            if let Some(id) = id {
                definition.bind(kind, id);
            }
        }

        // A written stub leaves all three functions in the user code.
        let stub_written = STUB_FUNCTIONS
            .iter()
            .all(|name| self.user_code.contains(&format!("function {name}()")));
        let triple = BuiltInGroup::CreateVerifyDelete.kinds();
        definition.bind_built_ins_by_name(|kind| stub_written && triple.contains(&kind));
        definition.set_user_code(self.user_code);

        ParseOutcome {
            definition,
            diagnostics: Vec::new(),
            version: self.version,
        }
    }

    // ── stages ──────────────────────────────────────────────────────────

    fn scan_header(&mut self) -> Result<Stage, ParseError> {
        // Only the lines above usage() can carry the version.
        let header_end = self
            .find(|l| l.trim() == USAGE_FUNCTION)
            .unwrap_or(self.cursor);
        if let Some(i) =
            (self.cursor..header_end).find(|&i| self.line(i).starts_with(VERSION_PREFIX))
        {
            self.version = Some(self.line(i)[VERSION_PREFIX.len()..].trim().to_string());
            self.cursor = i + 1;
        }

        let start = self.seek_marker(USAGE_FUNCTION)?;
        let mut usage_line = None;
        loop {
            let i = self.advance().ok_or_else(|| self.missing("}"))?;
            let line = self.line(i);
            if line.trim() == "}" {
                break;
            }
            if USAGE_ECHO.is_match(line) {
                usage_line = Some(i);
                let above = i.checked_sub(2);
                if let Some(caps) = above.and_then(|d| QUOTED_ECHO.captures(self.line(d))) {
                    self.description = caps[1].to_string();
                }
            } else if let Some(caps) = USAGE_ENTRY.captures(line) {
                self.usage.push(UsageEntry {
                    short: caps[1].to_string(),
                    long: caps[2].to_string(),
                    required: &caps[3] == "Required",
                    description: caps[4].to_string(),
                });
            }
        }
        if usage_line.is_none() {
            return Err(self.malformed(start, "usage() has no `Usage: $0` line"));
        }

        self.seek_marker(ECHO_INPUT_FUNCTION)?;
        let i = self
            .advance_non_blank()
            .ok_or_else(|| self.missing("echo \"<script>:\""))?;
        let caps = SCRIPT_NAME_ECHO
            .captures(self.line(i))
            .ok_or_else(|| self.malformed(i, "echoInput() must start with `echo \"<script>:\"`"))?;
        self.script_name = caps[1].to_string();

        Ok(Stage::ScanningOptionsSpec)
    }

    fn scan_options_spec(&mut self) -> Result<Stage, ParseError> {
        let i = self
            .find(|l| OPTIONS_LINE.is_match(l))
            .ok_or_else(|| self.missing("OPTIONS="))?;
        self.short_spec = capture(&OPTIONS_LINE, self.line(i));
        self.cursor = i + 1;

        let i = self
            .find(|l| LONGOPTS_LINE.is_match(l))
            .ok_or_else(|| self.missing("LONGOPTS="))?;
        self.long_spec = capture(&LONGOPTS_LINE, self.line(i));
        self.cursor = i + 1;

        Ok(Stage::ScanningCaseBlock)
    }

    fn scan_case_block(&mut self) -> Result<Stage, ParseError> {
        self.seek_marker(CASE_START)?;
        loop {
            let i = self
                .advance_non_blank()
                .ok_or_else(|| self.missing(CASE_END_ARM))?;
            let header = self.line(i).trim();
            if header == CASE_END_ARM {
                break;
            }
            let caps = ARM_HEADER.captures(header).ok_or_else(|| {
                self.malformed(i, &format!("expected `-x | --name)`, found `{header}`"))
            })?;
            let (short, long) = (caps[1].to_string(), caps[2].to_string());

            let (variable, value) = {
                let j = self.expect_line(&ASSIGNMENT, "expected `variable=value`")?;
                let caps = ASSIGNMENT
                    .captures(self.line(j))
                    .ok_or_else(|| self.malformed(j, "expected `variable=value`"))?;
                (caps[1].to_string(), caps[2].to_string())
            };
            let j = self.expect_line(&SHIFT, "expected `shift 1` or `shift 2`")?;
            let takes_value = capture(&SHIFT, self.line(j)) == "2";
            let j = self
                .advance_non_blank()
                .ok_or_else(|| self.missing(";;"))?;
            if self.line(j).trim() != ";;" {
                return Err(self.malformed(j, "expected `;;`"));
            }

            self.arms.push(CaseArm {
                line: i + 1,
                short,
                long,
                variable,
                value,
                takes_value,
            });
        }
        self.check_arms()?;
        Ok(Stage::ScanningDeclarations)
    }

    fn scan_declarations(&mut self) -> Result<Stage, ParseError> {
        self.seek_marker(DECLARATIONS_MARKER)?;
        while let Some(line) = self.lines.get(self.cursor) {
            if let Some(caps) = DECLARE.captures(line.trim_end_matches('\r')) {
                self.defaults
                    .entry(caps[1].to_string())
                    .or_insert_with(|| caps[2].to_string());
            } else if !line.trim().is_empty() {
                break;
            }
            self.cursor += 1;
        }

        if let Some(arm) = self.arms.iter().find(|a| !self.defaults.contains_key(&a.variable)) {
            return Err(ParseError::Mismatch {
                stage: self.stage,
                line: arm.line,
                message: format!("no `declare {}=` line for --{}", arm.variable, arm.long),
            });
        }
        Ok(Stage::ScanningUserCode)
    }

    fn scan_user_code(&mut self) -> Result<Stage, ParseError> {
        let from = self.cursor;
        let begin = self.seek_marker(USER_CODE_BEGIN)?;
        for i in from..begin {
            let marker = self.line(i).trim();
            if marker == INPUT_FILE_MARKER {
                self.sections.input_file = Some(self.section_variable(i, &INPUT_FILE_TEST)?);
            } else if marker == LOGGING_MARKER {
                self.sections.logging = Some(self.section_variable(i, &LOG_FILE_DECLARE)?);
            } else if marker == VERBOSE_MARKER {
                self.sections.verbose = Some(self.section_variable(i, &VERBOSE_TEST)?);
            }
        }

        let code = extract_user_code(&self.text[self.offsets[begin]..])
            .ok_or_else(|| self.missing(USER_CODE_END))?;
        self.user_code = code.to_string();
        Ok(Stage::Done)
    }

    /// The variable a section tests, read from the line after its marker.
    ///
    /// It must name one of the parsed parameters.
    fn section_variable(&self, marker: usize, pattern: &Regex) -> Result<String, ParseError> {
        let i = marker + 1;
        let variable = self
            .lines
            .get(i)
            .and_then(|_| pattern.captures(self.line(i)))
            .map(|caps| caps[1].to_string())
            .ok_or_else(|| self.malformed(i, "section does not name its parameter"))?;
        if !self.arms.iter().any(|a| a.variable == variable) {
            let message = format!("section uses ${variable}, which no option sets");
            return Err(self.mismatch(i + 1, message));
        }
        Ok(variable)
    }

    /// Arms must agree with the getopt specs and the usage lines.
    fn check_arms(&self) -> Result<(), ParseError> {
        let mut short_spec = String::new();
        let mut long_specs = Vec::with_capacity(self.arms.len());
        for arm in &self.arms {
            let suffix = if arm.takes_value { ":" } else { "" };
            short_spec.push_str(&arm.short);
            short_spec.push_str(suffix);
            long_specs.push(format!("{}{suffix}", arm.long));
        }
        let long_spec = long_specs.join(",");
        let line = self.cursor;

        if short_spec != self.short_spec {
            return Err(self.mismatch(
                line,
                format!("OPTIONS is `{}` but the case block needs `{short_spec}`", self.short_spec),
            ));
        }
        if long_spec != self.long_spec {
            return Err(self.mismatch(
                line,
                format!("LONGOPTS is `{}` but the case block needs `{long_spec}`", self.long_spec),
            ));
        }
        if self.usage.len() != self.arms.len() {
            return Err(self.mismatch(
                line,
                format!(
                    "usage() lists {} parameters but the case block has {}",
                    self.usage.len(),
                    self.arms.len()
                ),
            ));
        }
        for (arm, entry) in self.arms.iter().zip(&self.usage) {
            if arm.short != entry.short || arm.long != entry.long {
                return Err(ParseError::Mismatch {
                    stage: self.stage,
                    line: arm.line,
                    message: format!(
                        "case arm -{} | --{} does not match usage entry -{} | --{}",
                        arm.short, arm.long, entry.short, entry.long
                    ),
                });
            }
        }
        Ok(())
    }

    // ── cursor helpers ──────────────────────────────────────────────────

    fn line(&self, index: usize) -> &'a str {
        self.lines[index].trim_end_matches('\r')
    }

    fn find(&self, pred: impl Fn(&str) -> bool) -> Option<usize> {
        (self.cursor..self.lines.len()).find(|&i| pred(self.line(i)))
    }

    /// Move past the next line whose trimmed text equals `marker`.
    fn seek_marker(&mut self, marker: &'static str) -> Result<usize, ParseError> {
        let i = self
            .find(|l| l.trim() == marker)
            .ok_or_else(|| self.missing(marker))?;
        self.cursor = i + 1;
        Ok(i)
    }

    fn advance(&mut self) -> Option<usize> {
        let i = self.cursor;
        if i < self.lines.len() {
            self.cursor += 1;
            Some(i)
        } else {
            None
        }
    }

    fn advance_non_blank(&mut self) -> Option<usize> {
        loop {
            let i = self.advance()?;
            if !self.line(i).trim().is_empty() {
                return Some(i);
            }
        }
    }

    fn expect_line(&mut self, pattern: &Regex, message: &str) -> Result<usize, ParseError> {
        let i = self
            .advance_non_blank()
            .ok_or_else(|| self.malformed(self.cursor, message))?;
        if pattern.is_match(self.line(i)) {
            Ok(i)
        } else {
            Err(self.malformed(i, message))
        }
    }

    fn missing(&self, expected: &'static str) -> ParseError {
        ParseError::MissingMarker {
            stage: self.stage,
            line: self.cursor + 1,
            expected,
        }
    }

    fn malformed(&self, index: usize, message: &str) -> ParseError {
        ParseError::Malformed {
            stage: self.stage,
            line: index + 1,
            message: message.to_string(),
        }
    }

    fn mismatch(&self, line: usize, message: String) -> ParseError {
        ParseError::Mismatch {
            stage: self.stage,
            line,
            message,
        }
    }
}

fn capture(pattern: &Regex, line: &str) -> String {
    pattern
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;
