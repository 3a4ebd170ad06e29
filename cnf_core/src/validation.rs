//! Field checks for the step settings.
//!
//! These mirror what a settings form would show next to each field: an
//! error for a missing value, a warning for a suspiciously short one. They
//! are advisory; [`crate::perform`] runs whatever it is given.

use std::fmt;

use regex::Regex;

/// Outcome of checking one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValidation {
    Ok,
    Warning(String),
    Error(String),
}

impl FormValidation {
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl fmt::Display for FormValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Warning(msg) => write!(f, "warning: {msg}"),
            Self::Error(msg) => write!(f, "error: {msg}"),
        }
    }
}

fn check_length(value: &str, min_chars: usize, missing: &str, short: &str) -> FormValidation {
    match value.chars().count() {
        0 => FormValidation::Error(missing.to_string()),
        n if n < min_chars => FormValidation::Warning(short.to_string()),
        _ => FormValidation::Ok,
    }
}

#[must_use]
pub fn check_facts_url(value: &str) -> FormValidation {
    check_length(value, 4, "Please add URL facts.", "Isn't the URL facts too short?")
}

/// Length rules first, then the pattern has to compile and have a group 1.
#[must_use]
pub fn check_regex_pattern(value: &str) -> FormValidation {
    let by_length = check_length(
        value,
        4,
        "Please add regex pattern.",
        "Isn't the regex pattern too short?",
    );
    if by_length.is_error() {
        return by_length;
    }
    match Regex::new(value) {
        Ok(re) if re.captures_len() < 2 => FormValidation::Warning(
            "The regex pattern has no capture group, no fact can be extracted.".to_string(),
        ),
        Ok(_) => by_length,
        Err(e) => FormValidation::Error(format!("Invalid regex pattern: {e}")),
    }
}

/// Whether `name` can be written as `NAME=value` without changing meaning:
/// no `=`, no whitespace, no control characters.
#[must_use]
pub fn is_valid_var_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c == '=' || c.is_whitespace() || c.is_control())
}

#[must_use]
pub fn check_var_name(value: &str) -> FormValidation {
    if !value.is_empty() && !is_valid_var_name(value) {
        return FormValidation::Error(
            "Variable name must not contain '=', whitespace or control characters.".to_string(),
        );
    }
    check_length(
        value,
        2,
        "Please add variable name.",
        "Isn't the variable name too short?",
    )
}
