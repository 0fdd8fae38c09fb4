pub mod cli;
pub mod toml_config;

use crate::core::fetch::{DEFAULT_BASE_URL, DEFAULT_DELAY_SECS, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::core::index::ALL_LETTERS;
use crate::core::ConfigProvider;
use crate::domain::model::RunMode;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_delay, validate_letters, validate_path, validate_range, validate_url, Validate,
};
use chrono::Datelike;

pub const DEFAULT_OUTPUT_PATH: &str = "data/raw";
pub const MIN_SEASON: i32 = 1920;
pub const MAX_SEASON: i32 = 2100;

/// The most recent season with games played: the current year from
/// September on, the previous one before that.
pub fn default_season() -> i32 {
    let today = chrono::Local::now().date_naive();
    if today.month() >= 9 {
        today.year()
    } else {
        today.year() - 1
    }
}

/// Checks shared by every [`ConfigProvider`].
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_url("base_url", config.base_url())?;
    validate_range("season", config.season(), MIN_SEASON, MAX_SEASON)?;
    validate_delay("delay", config.delay_secs())?;
    validate_range("timeout", config.timeout_secs(), 1, 600)?;
    validate_path("output_path", config.output_path())?;
    if config.mode() == RunMode::Index {
        validate_letters("letters", config.letters())?;
    }
    Ok(())
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "fantasy-drafter")]
#[command(about = "Scrape NFL player and fantasy stats into CSV for draft prep")]
pub struct CliConfig {
    /// Season to scrape
    #[arg(long, default_value_t = default_season())]
    pub season: i32,

    #[arg(long, value_enum, default_value_t = RunMode::Listing)]
    pub mode: RunMode,

    /// Index letters to walk in `index` mode
    #[arg(long, default_value = ALL_LETTERS)]
    pub letters: String,

    /// Seconds to wait before every request
    #[arg(long, default_value_t = DEFAULT_DELAY_SECS)]
    pub delay: f64,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output_path: String,

    /// Append a timestamp to the output filename
    #[arg(long)]
    pub timestamped: bool,

    /// In `index` mode, fetch each player's profile page for season stats
    #[arg(long)]
    pub with_profiles: bool,

    /// Load settings from a TOML file instead of flags
    #[arg(short, long)]
    pub config: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn timeout_secs(&self) -> u64 {
        self.timeout
    }

    fn delay_secs(&self) -> f64 {
        self.delay
    }

    fn season(&self) -> i32 {
        self.season
    }

    fn mode(&self) -> RunMode {
        self.mode
    }

    fn letters(&self) -> &str {
        &self.letters
    }

    fn with_profiles(&self) -> bool {
        self.with_profiles
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn timestamped(&self) -> bool {
        self.timestamped
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_defaults() {
        let config = CliConfig::parse_from(["fantasy-drafter"]);

        assert_eq!(config.season, default_season());
        assert_eq!(config.mode, RunMode::Listing);
        assert_eq!(config.letters, ALL_LETTERS);
        assert_eq!(config.delay, 1.0);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.output_path, DEFAULT_OUTPUT_PATH);
        assert!(!config.timestamped);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_flags() {
        let config = CliConfig::parse_from([
            "fantasy-drafter",
            "--season",
            "2023",
            "--mode",
            "index",
            "--letters",
            "abc",
            "--delay",
            "2.5",
            "--with-profiles",
        ]);

        assert_eq!(config.season(), 2023);
        assert_eq!(config.mode(), RunMode::Index);
        assert_eq!(config.letters(), "abc");
        assert_eq!(config.delay_secs(), 2.5);
        assert!(config.with_profiles());
    }

    #[test]
    fn test_cli_validation_rejects_bad_values() {
        let config = CliConfig::parse_from(["fantasy-drafter", "--season", "1800"]);
        assert!(config.validate().is_err());

        let config = CliConfig::parse_from(["fantasy-drafter", "--mode", "index", "--letters", "a1"]);
        assert!(config.validate().is_err());

        let config = CliConfig::parse_from(["fantasy-drafter", "--base-url", "not a url"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_season_is_recent() {
        let year = chrono::Local::now().year();
        let season = default_season();
        assert!(season == year || season == year - 1);
    }
}
