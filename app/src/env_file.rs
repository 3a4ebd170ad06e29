//! Hand published variables to later build steps through a dotenv-style file.
//!
//! Single-line values are written as `NAME=value`. A value spanning several
//! lines uses the heredoc form `NAME<<DELIM` ... `DELIM`, with a delimiter
//! that does not occur in the value. A name that could not be read back
//! (containing `=`, whitespace or control characters) is refused before
//! anything is written.

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::Path;

use anyhow::Context;
use cnf_core::{PublishedVariables, is_valid_var_name};

const DELIMITER: &str = "CNF_EOF";

fn delimiter_for(value: &str) -> String {
    let mut delim = DELIMITER.to_string();
    while value.lines().any(|line| line == delim) {
        delim.push('_');
    }
    delim
}

/// Render every variable, one entry per line (or heredoc block).
pub fn render(variables: &PublishedVariables) -> anyhow::Result<String> {
    let mut out = String::new();
    for (name, value) in variables.iter() {
        if !is_valid_var_name(name) {
            anyhow::bail!("Refusing to write variable {name:?}: invalid name");
        }
        if value.contains('\n') {
            let delim = delimiter_for(value);
            let _ = writeln!(out, "{name}<<{delim}\n{value}\n{delim}");
        } else {
            let _ = writeln!(out, "{name}={value}");
        }
    }
    Ok(out)
}

/// Append the rendered variables to `path`, creating it if needed.
pub fn append(path: &Path, variables: &PublishedVariables) -> anyhow::Result<()> {
    let rendered = render(variables)?;
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open env file {}", path.display()))?;
    file.write_all(rendered.as_bytes())
        .with_context(|| format!("Failed to write env file {}", path.display()))?;
    Ok(())
}
