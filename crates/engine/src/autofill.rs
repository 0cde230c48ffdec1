// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Names derived from a parameter's long name.

/// `log-directory` → `logDirectory`, `MyParam` → `myParam`.
pub fn camel_case(long_name: &str) -> String {
    let mut out = String::with_capacity(long_name.len());
    for (i, word) in words(long_name).iter().enumerate() {
        let lower = word.to_lowercase();
        if i == 0 {
            out.push_str(&lower);
            continue;
        }
        let mut chars = lower.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Split on non-alphanumerics and on lower→upper case boundaries.
fn words(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for c in text.chars() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase() || c.is_numeric();
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// First character of `long_name` not already taken as a short name.
pub fn pick_short_name(long_name: &str, in_use: impl Fn(&str) -> bool) -> Option<String> {
    long_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(String::from)
        .find(|candidate| !in_use(candidate))
}

#[cfg(test)]
#[path = "autofill_tests.rs"]
mod tests;
