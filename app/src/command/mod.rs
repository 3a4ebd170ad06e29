//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy with its own input type, dispatched
//! statically from `main`.

use cnf_config::{Config, StepConfig};
use cnf_core::{FormValidation, check_facts_url, check_regex_pattern, check_var_name};

mod check;
mod info;
mod init;
mod run;
mod version;

pub use check::CheckStrategy;
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use run::{RunInput, RunStrategy};
pub use version::VersionStrategy;

/// Step settings given on the command line. `None` keeps the saved value.
#[derive(Debug, Clone, Default)]
pub struct StepArgs {
    pub url: Option<String>,
    pub regex: Option<String>,
    pub var_name: Option<String>,
}

/// Saved step settings with the command line laid over them.
fn effective_step(config: &Config, args: StepArgs) -> StepConfig {
    config
        .step
        .clone()
        .with_overrides(args.url, args.regex, args.var_name)
}

/// Field checks in display order.
fn validate_step(step: &StepConfig) -> [(&'static str, FormValidation); 3] {
    [
        ("facts_url", check_facts_url(&step.facts_url)),
        ("regex_pattern", check_regex_pattern(&step.regex_pattern)),
        ("var_name", check_var_name(&step.var_name)),
    ]
}

/// Core trait defining the contract for all command strategies.
///
/// # Example
/// ```rust,ignore
/// struct MyStrategy;
///
/// impl CommandStrategy for MyStrategy {
///     type Input = MyInput;
///
///     async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
///         Ok(())
///     }
/// }
/// ```
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_wins_over_saved_settings() {
        let config = Config {
            step: StepConfig {
                facts_url: "http://saved/fact".to_string(),
                regex_pattern: "(.+)".to_string(),
                var_name: "SAVED".to_string(),
            },
            ..Config::default()
        };
        let step = effective_step(
            &config,
            StepArgs {
                url: Some("http://cli/fact".to_string()),
                ..StepArgs::default()
            },
        );
        assert_eq!(step.facts_url, "http://cli/fact");
        assert_eq!(step.var_name, "SAVED");
    }

    #[test]
    fn validation_reports_every_field() {
        let step = StepConfig {
            facts_url: String::new(),
            regex_pattern: "(.)".to_string(),
            var_name: "CNF".to_string(),
        };
        let results = validate_step(&step);
        assert!(results[0].1.is_error());
        assert!(matches!(results[1].1, FormValidation::Warning(_)));
        assert!(results[2].1.is_ok());
    }
}
