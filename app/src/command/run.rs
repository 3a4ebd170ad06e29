use std::io::Write;
use std::path::{Path, PathBuf};

use cnf_config::Config;
use cnf_core::{EnvironmentContext, FormValidation, StepOutcome, perform};
use cnf_fetch::HttpFactSource;
use tracing::{info, warn};

use super::StepArgs;
use crate::env_file;

/// Input parameters for the Run command strategy.
#[derive(Debug, Clone)]
pub struct RunInput {
    pub step: StepArgs,
    /// Where published variables are appended; stdout when absent
    pub env_file: Option<PathBuf>,
}

/// Strategy for running the fact build step.
///
/// Fetch and extraction problems never fail the command: the fallback fact
/// is logged and nothing is published. Only host-side problems (config,
/// HTTP client setup, env file) return an error.
#[derive(Debug, Clone, Copy)]
pub struct RunStrategy;

impl super::CommandStrategy for RunStrategy {
    type Input = RunInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;
        let step = super::effective_step(&config, input.step);

        for (field, result) in super::validate_step(&step) {
            match result {
                FormValidation::Ok => {}
                FormValidation::Warning(msg) | FormValidation::Error(msg) => {
                    warn!("{field}: {msg}");
                }
            }
        }

        let source = HttpFactSource::new(config.http.clone())?;
        let env = EnvironmentContext::from_process();
        let outcome = perform(&source, &step.to_request(), &env).await;

        emit(&outcome, input.env_file.as_deref(), &mut std::io::stdout().lock())
    }
}

/// Write the build log lines to `out`, then hand the published variables
/// to the env file, or to `out` when there is none.
///
/// A fallback outcome publishes nothing, so the env file is left untouched.
fn emit(
    outcome: &StepOutcome,
    env_file: Option<&Path>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    for line in &outcome.log {
        writeln!(out, "{line}")?;
    }

    if outcome.variables.is_empty() {
        return Ok(());
    }

    match env_file {
        Some(path) => {
            env_file::append(path, &outcome.variables)?;
            info!("Wrote {} variable(s) to {}", outcome.variables.len(), path.display());
        }
        None => write!(out, "{}", env_file::render(&outcome.variables)?)?,
    }
    Ok(())
}
