use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatusError { url: String, status: u16 },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Expected element '{selector}' not found in {context}")]
    MissingElementError { selector: String, context: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("No player data was scraped for season {season}")]
    EmptyResult { season: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Markup,
    Configuration,
    Output,
    NoData,
}

impl ScrapeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScrapeError::HttpError(_) | ScrapeError::HttpStatusError { .. } => {
                ErrorCategory::Network
            }
            ScrapeError::MissingElementError { .. } | ScrapeError::ProcessingError { .. } => {
                ErrorCategory::Markup
            }
            ScrapeError::TomlError(_) | ScrapeError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            ScrapeError::CsvError(_) | ScrapeError::IoError(_) => ErrorCategory::Output,
            ScrapeError::EmptyResult { .. } => ErrorCategory::NoData,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach the stats site: {}", self),
            ErrorCategory::Markup => format!("The page layout was not what we expected: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Output => format!("Could not write output: {}", self),
            ErrorCategory::NoData => format!("{}. Nothing was written.", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => {
                "Check your connection, or raise --delay if the site is throttling requests"
            }
            ErrorCategory::Markup => "The site markup may have changed; run with --verbose to see which rows failed",
            ErrorCategory::Configuration => "Fix the flagged setting and run again",
            ErrorCategory::Output => "Make sure the output directory is writable",
            ErrorCategory::NoData => {
                "Check that the season exists on the site and that the letters cover some players"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
