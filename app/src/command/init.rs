use cnf_config::Config;

/// Strategy for initializing the configuration.
///
/// Creates the default configuration file at `~/cnf/config.json`.
#[derive(Debug, Clone, Copy)]
pub struct InitStrategy;

impl super::CommandStrategy for InitStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config_path = Config::create_config()?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Point step.facts_url at your fact service");
        println!("   2. Adjust step.regex_pattern so group 1 captures the fact");
        println!("   3. Run 'cnf check', then 'cnf run'");
        println!();
        Ok(())
    }
}
