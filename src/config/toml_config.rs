use crate::config::{default_season, validate_provider, DEFAULT_OUTPUT_PATH};
use crate::core::fetch::{DEFAULT_BASE_URL, DEFAULT_DELAY_SECS, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::core::index::ALL_LETTERS;
use crate::core::ConfigProvider;
use crate::domain::model::RunMode;
use crate::utils::error::{Result, ScrapeError};
use crate::utils::validation::Validate;
use regex::{Captures, Regex};
use serde::Deserialize;
use std::path::Path;

/// File-based settings. Every table and key is optional; missing values
/// fall back to the same defaults as the command line.
///
/// ```toml
/// [source]
/// delay_seconds = 2.0
///
/// [crawl]
/// season = 2024
/// mode = "index"
/// letters = "abc"
///
/// [output]
/// path = "${DATA_DIR}/raw"
/// timestamped = true
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub crawl: CrawlConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub delay_seconds: f64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            delay_seconds: DEFAULT_DELAY_SECS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    pub season: i32,
    pub mode: RunMode,
    pub letters: String,
    pub with_profiles: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            season: default_season(),
            mode: RunMode::default(),
            letters: ALL_LETTERS.to_string(),
            with_profiles: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: String,
    pub timestamped: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_OUTPUT_PATH.to_string(),
            timestamped: false,
        }
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScrapeError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR}` with the variable's value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScrapeError::ProcessingError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        &self.source.base_url
    }

    fn user_agent(&self) -> &str {
        &self.source.user_agent
    }

    fn timeout_secs(&self) -> u64 {
        self.source.timeout_seconds
    }

    fn delay_secs(&self) -> f64 {
        self.source.delay_seconds
    }

    fn season(&self) -> i32 {
        self.crawl.season
    }

    fn mode(&self) -> RunMode {
        self.crawl.mode
    }

    fn letters(&self) -> &str {
        &self.crawl.letters
    }

    fn with_profiles(&self) -> bool {
        self.crawl.with_profiles
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn timestamped(&self) -> bool {
        self.output.timestamped
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[source]
base_url = "http://127.0.0.1:9000"
delay_seconds = 0.5
timeout_seconds = 10

[crawl]
season = 2023
mode = "index"
letters = "xyz"
with_profiles = true

[output]
path = "./test-output"
timestamped = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.base_url(), "http://127.0.0.1:9000");
        assert_eq!(config.user_agent(), DEFAULT_USER_AGENT);
        assert_eq!(config.delay_secs(), 0.5);
        assert_eq!(config.timeout_secs(), 10);
        assert_eq!(config.season(), 2023);
        assert_eq!(config.mode(), RunMode::Index);
        assert_eq!(config.letters(), "xyz");
        assert!(config.with_profiles());
        assert_eq!(config.output_path(), "./test-output");
        assert!(config.timestamped());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.season(), default_season());
        assert_eq!(config.mode(), RunMode::Listing);
        assert_eq!(config.letters(), ALL_LETTERS);
        assert_eq!(config.output_path(), DEFAULT_OUTPUT_PATH);
        assert!(!config.timestamped());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FANTASY_DRAFTER_TEST_OUT", "/tmp/drafts");

        let toml_content = r#"
[output]
path = "${FANTASY_DRAFTER_TEST_OUT}/raw"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.output_path(), "/tmp/drafts/raw");

        std::env::remove_var("FANTASY_DRAFTER_TEST_OUT");
    }

    #[test]
    fn test_unknown_mode_is_a_parse_error() {
        let err = TomlConfig::from_toml_str("[crawl]\nmode = \"everything\"\n").unwrap_err();
        assert!(matches!(err, ScrapeError::TomlError(_)));
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str("[source]\ndelay_seconds = -1.0\n").unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str("[crawl]\nseason = 1850\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[crawl]\nseason = 2022\n\n[output]\npath = \"./out\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.season(), 2022);
        assert_eq!(config.output_path(), "./out");
    }
}
