use cnf_config::Config;
use cnf_core::DISPLAY_NAME;

use super::StepArgs;

/// Strategy for validating the step settings.
///
/// Prints one line per field. Warnings are reported but pass; any error
/// makes the command fail.
#[derive(Debug, Clone, Copy)]
pub struct CheckStrategy;

impl super::CommandStrategy for CheckStrategy {
    type Input = StepArgs;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;
        let step = super::effective_step(&config, input);

        println!("=== {DISPLAY_NAME} ===\n");

        let mut errors = 0usize;
        for (field, result) in super::validate_step(&step) {
            if result.is_error() {
                errors += 1;
            }
            println!("  {field}: {result}");
        }

        if errors > 0 {
            anyhow::bail!("{errors} field(s) failed validation");
        }
        Ok(())
    }
}
