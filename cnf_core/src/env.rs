//! Build environment and `$NAME` / `${NAME}` expansion.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Variable reference: `${NAME}` (dots allowed) or bare `$NAME`.
static MACRO_PATTERN: OnceLock<Regex> = OnceLock::new();

#[expect(
    clippy::expect_used,
    reason = "Static regex pattern validated at compile time"
)]
fn macro_pattern() -> &'static Regex {
    MACRO_PATTERN.get_or_init(|| {
        Regex::new(r"\$(?:\{([A-Za-z0-9_.]+)\}|([A-Za-z0-9_]+))")
            .expect("Static regex pattern is guaranteed to be valid")
    })
}

/// Variables visible to the build step, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentContext {
    vars: BTreeMap<String, String>,
}

impl EnvironmentContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current process environment. Entries that are not
    /// valid UTF-8 are skipped.
    #[must_use]
    pub fn from_process() -> Self {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Replace every `${NAME}` and `$NAME` whose name is known.
    ///
    /// Unknown references are kept verbatim, so a template with no
    /// matching variables comes back unchanged.
    #[must_use]
    pub fn expand(&self, template: &str) -> String {
        macro_pattern()
            .replace_all(template, |caps: &Captures<'_>| {
                let name = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
                self.get(name).map_or_else(|| caps[0].to_string(), str::to_string)
            })
            .into_owned()
    }
}

impl<K, V> FromIterator<(K, V)> for EnvironmentContext
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> EnvironmentContext {
        [("HOST", "facts.example.com"), ("BUILD_NUMBER", "42"), ("job.name", "nightly")]
            .into_iter()
            .collect()
    }

    #[test]
    fn expands_braced_and_bare_references() {
        let url = env().expand("http://${HOST}/fact?build=$BUILD_NUMBER");
        assert_eq!(url, "http://facts.example.com/fact?build=42");
    }

    #[test]
    fn braced_names_may_contain_dots() {
        assert_eq!(env().expand("/jobs/${job.name}"), "/jobs/nightly");
    }

    #[test]
    fn unknown_references_pass_through() {
        let url = env().expand("http://${MISSING}/x?$ALSO_MISSING");
        assert_eq!(url, "http://${MISSING}/x?$ALSO_MISSING");
    }

    #[test]
    fn lone_dollar_is_left_alone() {
        assert_eq!(env().expand("price: $ and ${}"), "price: $ and ${}");
    }

    #[test]
    fn empty_environment_changes_nothing() {
        let template = "http://${HOST}/";
        assert_eq!(EnvironmentContext::new().expand(template), template);
    }

    #[test]
    fn replacement_values_are_not_reexpanded() {
        let env: EnvironmentContext = [("A", "$B"), ("B", "nope")].into_iter().collect();
        assert_eq!(env.expand("${A}"), "$B");
    }
}
