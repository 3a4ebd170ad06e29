use cnf_config::Config;

/// Strategy for displaying configuration information.
///
/// Prints where the config lives and the effective step and HTTP settings.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config_path = Config::config_path()?;
        let config = Config::load_or_default()?;

        println!("=== cnf Configuration ===\n");

        println!("File:");
        if config_path.exists() {
            println!("  {}", config_path.display());
        } else {
            println!("  {} (not found, using defaults)", config_path.display());
        }
        println!();

        println!("Step:");
        println!("  Facts URL: {}", or_unset(&config.step.facts_url));
        println!("  Regex Pattern: {}", or_unset(&config.step.regex_pattern));
        println!("  Variable: {}", or_unset(&config.step.var_name));
        println!();

        println!("HTTP:");
        println!("  User-Agent: {}", config.http.user_agent);
        println!("  Max Size: {} bytes", config.http.max_size);
        match config.http.timeout {
            Some(secs) => println!("  Timeout: {secs}s"),
            None => println!("  Timeout: (client default)"),
        }
        println!("  System Proxy: {}", config.http.use_system_proxy);

        Ok(())
    }
}

fn or_unset(value: &str) -> &str {
    if value.is_empty() { "(not set)" } else { value }
}
