use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use cnf_core::FactRequestConfig;
use cnf_fetch::FetchConfig;

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub step: StepConfig,
    #[serde(default)]
    pub http: FetchConfig,
}

/// Saved settings of the fact build step. Blank fields are allowed here;
/// the command line may fill them in.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct StepConfig {
    #[serde(default)]
    pub facts_url: String,
    #[serde(default)]
    pub regex_pattern: String,
    #[serde(default)]
    pub var_name: String,
}

impl StepConfig {
    /// Overlay command line values on top of the saved ones.
    #[must_use]
    pub fn with_overrides(
        mut self,
        facts_url: Option<String>,
        regex_pattern: Option<String>,
        var_name: Option<String>,
    ) -> Self {
        if let Some(v) = facts_url {
            self.facts_url = v;
        }
        if let Some(v) = regex_pattern {
            self.regex_pattern = v;
        }
        if let Some(v) = var_name {
            self.var_name = v;
        }
        self
    }

    #[must_use]
    pub fn to_request(&self) -> FactRequestConfig {
        FactRequestConfig::new(&self.facts_url, &self.regex_pattern, &self.var_name)
    }
}

const CONFIG_TEMPLATE: &str = r#"{
  "step": {
    "facts_url": "https://api.chucknorris.io/jokes/random",
    "regex_pattern": "(?s).*\"value\"\\s*:\\s*\"([^\"]*)\".*",
    "var_name": "CNF"
  },
  "http": {
    "user_agent": "cnf/0.1",
    "max_size": 1000000,
    "timeout": null,
    "use_system_proxy": true
  }
}
"#;

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("cnf"))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load `~/cnf/config.json`, or the defaults when there is none.
    pub fn load_or_default() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            debug!("No config at {}, using defaults", config_path.display());
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    /// Write the template to `~/cnf/config.json` and return its path.
    pub fn create_config() -> anyhow::Result<PathBuf> {
        let config_path = Self::ensure_config_dir()?.join("config.json");
        Self::create_config_at(&config_path)?;
        Ok(config_path)
    }

    pub fn create_config_at(config_path: &Path) -> anyhow::Result<()> {
        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        std::fs::write(config_path, CONFIG_TEMPLATE)
            .with_context(|| format!("Failed to write config file {}", config_path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_parses_and_extracts_a_fact() {
        let config: Config = serde_json::from_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.step.var_name, "CNF");
        assert_eq!(config.http.max_size, 1_000_000);
        assert_eq!(config.http.timeout, None);

        let body = r#"{"icon_url":"x","id":"abc","value":"Chuck Norris counted to infinity. Twice."}"#;
        let fact = cnf_core::extract(body, &config.step.regex_pattern).unwrap();
        assert_eq!(fact, "Chuck Norris counted to infinity. Twice.");
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.step.facts_url.is_empty());
    }

    #[test]
    fn overrides_replace_only_given_fields() {
        let step = StepConfig {
            facts_url: "http://saved".to_string(),
            regex_pattern: "(.+)".to_string(),
            var_name: "SAVED".to_string(),
        }
        .with_overrides(None, Some("x(.*)".to_string()), Some("CLI".to_string()));

        let request = step.to_request();
        assert_eq!(request.url_template(), "http://saved");
        assert_eq!(request.regex_pattern(), "x(.*)");
        assert_eq!(request.variable_name(), "CLI");
    }

    #[test]
    fn create_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        Config::create_config_at(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.step.facts_url, "https://api.chucknorris.io/jokes/random");

        let err = Config::create_config_at(&path).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
