use regex::Regex;
use regex_syntax::hir::{Hir, Look};
use tracing::debug;

use crate::error::ExtractError;

/// Longest body excerpt quoted in a no-match error.
const EXCERPT_CHARS: usize = 200;

/// Pull capture group 1 out of `body`.
///
/// The pattern must match the whole body, not just a piece of it: `a(b)`
/// matches `"ab"` but not `"abc"`. Only group 1 is ever looked at.
pub fn extract(body: &str, pattern: &str) -> Result<String, ExtractError> {
    let bare = Regex::new(pattern)?;
    if bare.captures_len() < 2 {
        return Err(ExtractError::MissingGroup);
    }

    let anchored = Regex::new(&anchor(pattern)?)?;
    let Some(caps) = anchored.captures(body) else {
        debug!("Fact pattern did not match a {} byte body", body.len());
        return Err(ExtractError::NoMatch {
            excerpt: excerpt(body),
        });
    };

    match caps.get(1) {
        Some(m) if !m.as_str().is_empty() => Ok(m.as_str().to_string()),
        _ => Err(ExtractError::EmptyCapture),
    }
}

/// Wrap the parsed pattern between `\A` and `\z`.
///
/// Anchoring happens on the syntax tree rather than the pattern text, so
/// inline flags and `(?x)` comments in the pattern cannot reach the anchors.
/// Capture group numbering is unchanged.
fn anchor(pattern: &str) -> Result<String, ExtractError> {
    let hir = regex_syntax::parse(pattern)?;
    Ok(Hir::concat(vec![Hir::look(Look::Start), hir, Hir::look(Look::End)]).to_string())
}

fn excerpt(body: &str) -> String {
    match body.char_indices().nth(EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
