use std::collections::BTreeMap;

use tracing::debug;

use crate::env::EnvironmentContext;
use crate::{FACT_LOG_PREFIX, FALLBACK_FACT};

/// The fact a step ended up with.
///
/// `present` is only true for a value that was actually extracted from a
/// response. The fallback fact is logged but never published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFact {
    pub value: String,
    pub present: bool,
}

impl ExtractedFact {
    #[must_use]
    pub fn extracted(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            present: true,
        }
    }

    #[must_use]
    pub fn fallback() -> Self {
        Self {
            value: FALLBACK_FACT.to_string(),
            present: false,
        }
    }

    /// Whether this fact may be handed to the build as a variable.
    #[must_use]
    pub fn is_publishable(&self) -> bool {
        self.present && !self.value.is_empty()
    }
}

/// Variables a step contributes to the build environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishedVariables {
    entries: BTreeMap<String, String>,
}

impl PublishedVariables {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copy every entry into `env`, skipping blank keys and values.
    pub fn merge_into(&self, env: &mut EnvironmentContext) {
        for (name, value) in self.iter() {
            if !name.is_empty() && !value.is_empty() {
                env.insert(name, value);
            }
        }
    }
}

/// Turn a fact into the variables to publish.
///
/// Produces `{variable_name: value}` when the fact is publishable and the
/// name is not blank, and nothing otherwise.
#[must_use]
pub fn publish(variable_name: &str, fact: &ExtractedFact) -> PublishedVariables {
    let mut published = PublishedVariables::default();
    if fact.is_publishable() && !variable_name.is_empty() {
        debug!("Publishing fact as {variable_name}");
        published
            .entries
            .insert(variable_name.to_string(), fact.value.clone());
    }
    published
}

/// The build log line announcing the fact.
#[must_use]
pub fn fact_log_line(fact: &ExtractedFact) -> String {
    format!("{FACT_LOG_PREFIX}{}", fact.value)
}
