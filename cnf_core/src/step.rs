//! The build step itself: fetch, extract, publish.

use tracing::{info, warn};

use crate::env::EnvironmentContext;
use crate::error::FactError;
use crate::extract::extract;
use crate::publish::{ExtractedFact, PublishedVariables, fact_log_line, publish};
use crate::source::{FactSource, fetch};

/// Settings of one fact build step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactRequestConfig {
    url_template: String,
    regex_pattern: String,
    variable_name: String,
}

impl FactRequestConfig {
    #[must_use]
    pub fn new(
        url_template: impl Into<String>,
        regex_pattern: impl Into<String>,
        variable_name: impl Into<String>,
    ) -> Self {
        Self {
            url_template: url_template.into(),
            regex_pattern: regex_pattern.into(),
            variable_name: variable_name.into(),
        }
    }

    #[must_use]
    pub fn url_template(&self) -> &str {
        &self.url_template
    }

    #[must_use]
    pub fn regex_pattern(&self) -> &str {
        &self.regex_pattern
    }

    #[must_use]
    pub fn variable_name(&self) -> &str {
        &self.variable_name
    }
}

/// Everything a step run produced. The step itself never fails; a problem
/// shows up as `error` together with the fallback fact.
#[derive(Debug)]
pub struct StepOutcome {
    pub fact: ExtractedFact,
    pub variables: PublishedVariables,
    /// Lines for the build log, in order.
    pub log: Vec<String>,
    pub error: Option<FactError>,
}

impl StepOutcome {
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        self.error.is_some()
    }
}

async fn retrieve<S>(
    source: &S,
    config: &FactRequestConfig,
    env: &EnvironmentContext,
) -> Result<String, FactError>
where
    S: FactSource + ?Sized,
{
    let response = fetch(source, config.url_template(), env).await?;
    extract(&response.body, config.regex_pattern()).map_err(FactError::from)
}

/// Run the step once.
///
/// Fetch and extraction errors are logged and replaced by the fallback
/// fact, which is logged but not published.
pub async fn perform<S>(
    source: &S,
    config: &FactRequestConfig,
    env: &EnvironmentContext,
) -> StepOutcome
where
    S: FactSource + ?Sized,
{
    let mut log = Vec::with_capacity(2);

    let (fact, error) = match retrieve(source, config, env).await {
        Ok(value) => (ExtractedFact::extracted(value), None),
        Err(e) => {
            warn!("Falling back to the holiday fact: {e}");
            log.push(e.to_string());
            (ExtractedFact::fallback(), Some(e))
        }
    };

    let variables = publish(config.variable_name(), &fact);
    if !variables.is_empty() {
        info!("Published fact as {}", config.variable_name());
    }

    log.push(fact_log_line(&fact));

    StepOutcome {
        fact,
        variables,
        log,
        error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ExtractError, FetchError};
    use crate::source::FetchedBody;
    use crate::FALLBACK_FACT;
    use async_trait::async_trait;

    const GIRAFFE: &str = "Chuck Norris once kicked a horse in the chin. \
        Its descendants are known today as the giraffe.";

    enum Stub {
        Respond(u16, &'static str),
        Unreachable,
    }

    #[async_trait]
    impl FactSource for Stub {
        async fn get(&self, _url: &str) -> Result<FetchedBody, FetchError> {
            match self {
                Self::Respond(status, body) => Ok(FetchedBody {
                    body: (*body).to_string(),
                    status: *status,
                }),
                Self::Unreachable => Err(FetchError::Transport("connection refused".to_string())),
            }
        }
    }

    fn config() -> FactRequestConfig {
        FactRequestConfig::new("http://facts.local/today", r"^(.+)\.$", "CNF")
    }

    #[tokio::test]
    async fn publishes_extracted_fact() {
        let outcome = perform(&Stub::Respond(200, GIRAFFE), &config(), &EnvironmentContext::new()).await;

        let expected = GIRAFFE.trim_end_matches('.');
        assert!(outcome.error.is_none());
        assert_eq!(outcome.fact, ExtractedFact::extracted(expected));
        assert_eq!(outcome.variables.len(), 1);
        assert_eq!(outcome.variables.get("CNF"), Some(expected));
        assert_eq!(outcome.log, vec![format!("Chuck Norris Daily Fact: {expected}")]);
    }

    #[tokio::test]
    async fn unreachable_falls_back_without_publishing() {
        let outcome = perform(&Stub::Unreachable, &config(), &EnvironmentContext::new()).await;

        assert!(outcome.is_fallback());
        assert!(matches!(outcome.error, Some(FactError::Fetch(FetchError::Transport(_)))));
        assert_eq!(outcome.fact.value, FALLBACK_FACT);
        assert!(outcome.variables.is_empty());
        assert_eq!(outcome.log.len(), 2);
        assert_eq!(outcome.log[0], "Unable to retrieve the fact: connection refused");
        assert_eq!(outcome.log[1], format!("Chuck Norris Daily Fact: {FALLBACK_FACT}"));
    }

    #[tokio::test]
    async fn bad_status_falls_back() {
        let outcome = perform(&Stub::Respond(404, GIRAFFE), &config(), &EnvironmentContext::new()).await;

        assert!(matches!(
            outcome.error,
            Some(FactError::Fetch(FetchError::Status { status: 404 }))
        ));
        assert_eq!(outcome.fact.value, FALLBACK_FACT);
        assert!(outcome.variables.is_empty());
    }

    #[tokio::test]
    async fn non_matching_body_falls_back() {
        for body in ["", "no trailing period", "Chuck.\nNorris."] {
            let outcome = perform(&Stub::Respond(200, body), &config(), &EnvironmentContext::new()).await;

            assert!(matches!(
                outcome.error,
                Some(FactError::Extract(ExtractError::NoMatch { .. }))
            ));
            assert_eq!(outcome.fact.value, FALLBACK_FACT);
            assert!(outcome.variables.is_empty());
            assert_eq!(outcome.log.last().unwrap(), &format!("Chuck Norris Daily Fact: {FALLBACK_FACT}"));
        }
    }

    #[tokio::test]
    async fn empty_capture_falls_back() {
        let config = FactRequestConfig::new("http://facts.local/", r"fact:(.*)", "CNF");
        let outcome = perform(&Stub::Respond(200, "fact:"), &config, &EnvironmentContext::new()).await;

        assert!(matches!(
            outcome.error,
            Some(FactError::Extract(ExtractError::EmptyCapture))
        ));
        assert!(outcome.variables.is_empty());
    }
}
