use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Browser session failed: {0}")]
    BrowserError(#[from] thirtyfour::error::WebDriverError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid pattern: {0}")]
    PatternError(#[from] regex::Error),

    #[error("Invalid selector '{selector}': {message}")]
    SelectorError { selector: String, message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Field '{field}' has {actual} cells but {expected} players were found")]
    AlignmentError {
        field: String,
        expected: usize,
        actual: usize,
    },

    #[error("Row {row} has no player name after cleanup")]
    EmptyNameError { row: usize },

    #[error("Photo not found at {url}")]
    PhotoNotFound { url: String },

    #[error("Photo download from {url} failed with status {status}")]
    PhotoFetchError { url: String, status: u16 },

    #[error("Cannot derive a photo id or file name from link '{link}'")]
    InvalidPhotoLink { link: String },

    #[error("No players found after {attempts} attempts")]
    EmptyResult { attempts: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Parsing,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScrapeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScrapeError::ApiError(_)
            | ScrapeError::BrowserError(_)
            | ScrapeError::PhotoNotFound { .. }
            | ScrapeError::PhotoFetchError { .. } => ErrorCategory::Network,
            ScrapeError::SelectorError { .. } | ScrapeError::PatternError(_) => {
                ErrorCategory::Parsing
            }
            ScrapeError::AlignmentError { .. }
            | ScrapeError::EmptyNameError { .. }
            | ScrapeError::InvalidPhotoLink { .. }
            | ScrapeError::EmptyResult { .. } => ErrorCategory::Data,
            ScrapeError::ConfigValidationError { .. }
            | ScrapeError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ScrapeError::CsvError(_) | ScrapeError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ScrapeError::PhotoNotFound { .. } => ErrorSeverity::Low,
            ScrapeError::ApiError(_)
            | ScrapeError::BrowserError(_)
            | ScrapeError::PhotoFetchError { .. }
            | ScrapeError::EmptyResult { .. } => ErrorSeverity::Medium,
            ScrapeError::AlignmentError { .. }
            | ScrapeError::EmptyNameError { .. }
            | ScrapeError::InvalidPhotoLink { .. }
            | ScrapeError::SelectorError { .. }
            | ScrapeError::PatternError(_)
            | ScrapeError::ConfigValidationError { .. }
            | ScrapeError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            ScrapeError::CsvError(_) | ScrapeError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// Errors that warrant another full attempt with a fresh page fetch.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ScrapeError::EmptyResult { .. })
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => match self {
                ScrapeError::BrowserError(_) => {
                    "Check that ChromeDriver is running and listening at the WebDriver URL"
                }
                _ => "Check the network connection and that the photo and page URLs are reachable",
            },
            ErrorCategory::Parsing => "Check the cell class template and selectors in the configuration",
            ErrorCategory::Data => match self {
                ScrapeError::EmptyResult { .. } => {
                    "The page may not have finished rendering; render it with --webdriver-url or use a saved snapshot with --page-file"
                }
                _ => "The page layout may have changed; inspect the rendered HTML for the stats table",
            },
            ErrorCategory::Configuration => "Review the command line flags or the TOML configuration file",
            ErrorCategory::System => "Check that the output directory exists and is writable",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ScrapeError::EmptyResult { attempts } => {
                format!("Could not retrieve data after {} attempts.", attempts)
            }
            ScrapeError::AlignmentError { field, .. } => {
                format!("The stats table is inconsistent: column '{}' does not line up with the player names.", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
