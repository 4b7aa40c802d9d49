use crate::config::{DEFAULT_OUTPUT_PATH, DEFAULT_SOURCE_URL};
use crate::core::engine::DEFAULT_MAX_ATTEMPTS;
use crate::core::exporter::DEFAULT_REPORT_FILENAME;
use crate::core::extractor::DEFAULT_CELL_CLASS_TEMPLATE;
use crate::core::normalizer::DEFAULT_NAME_ARTIFACT;
use crate::core::photo::{DEFAULT_PHOTO_BASE_URL, DEFAULT_PHOTO_DIR, DEFAULT_PHOTO_URL};
use crate::core::ConfigProvider;
use crate::utils::error::{Result, ScrapeError};
use crate::utils::validation::{
    validate_class_template, validate_path, validate_positive_number, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub extract: ExtractConfig,
    pub photos: PhotoConfig,
    pub report: ReportConfig,
    pub retry: RetryConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub url: String,
    pub page_file: Option<String>,
    pub webdriver_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub cell_class_template: String,
    pub name_artifacts: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoConfig {
    pub directory: String,
    pub base_url: String,
    pub default_url: String,
    pub fallback_on_fetch_error: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub output_path: String,
    pub filename: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            page_file: None,
            webdriver_url: None,
            timeout_seconds: None,
        }
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            cell_class_template: DEFAULT_CELL_CLASS_TEMPLATE.to_string(),
            name_artifacts: vec![DEFAULT_NAME_ARTIFACT.to_string()],
        }
    }
}

impl Default for PhotoConfig {
    fn default() -> Self {
        Self {
            directory: DEFAULT_PHOTO_DIR.to_string(),
            base_url: DEFAULT_PHOTO_BASE_URL.to_string(),
            default_url: DEFAULT_PHOTO_URL.to_string(),
            fallback_on_fetch_error: false,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            filename: DEFAULT_REPORT_FILENAME.to_string(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ScrapeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are
    /// left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.enabled
    }
}

impl ConfigProvider for TomlConfig {
    fn source_url(&self) -> &str {
        &self.source.url
    }

    fn page_file(&self) -> Option<&str> {
        self.source.page_file.as_deref()
    }

    fn webdriver_url(&self) -> Option<&str> {
        self.source.webdriver_url.as_deref()
    }

    fn output_path(&self) -> &str {
        &self.report.output_path
    }

    fn report_filename(&self) -> &str {
        &self.report.filename
    }

    fn photo_dir(&self) -> &str {
        &self.photos.directory
    }

    fn photo_base_url(&self) -> &str {
        &self.photos.base_url
    }

    fn default_photo_url(&self) -> &str {
        &self.photos.default_url
    }

    fn cell_class_template(&self) -> &str {
        &self.extract.cell_class_template
    }

    fn name_artifacts(&self) -> &[String] {
        &self.extract.name_artifacts
    }

    fn max_attempts(&self) -> u32 {
        self.retry.max_attempts
    }

    fn fallback_on_fetch_error(&self) -> bool {
        self.photos.fallback_on_fetch_error
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.source.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        match &self.source.page_file {
            Some(page_file) => validate_path("source.page_file", page_file)?,
            None => validate_url("source.url", &self.source.url)?,
        }
        if let Some(webdriver_url) = &self.source.webdriver_url {
            validate_url("source.webdriver_url", webdriver_url)?;
        }
        validate_class_template("extract.cell_class_template", &self.extract.cell_class_template)?;
        validate_path("photos.directory", &self.photos.directory)?;
        validate_url("photos.base_url", &self.photos.base_url)?;
        validate_url("photos.default_url", &self.photos.default_url)?;
        validate_path("report.output_path", &self.report.output_path)?;
        validate_path("report.filename", &self.report.filename)?;
        validate_positive_number("retry.max_attempts", self.retry.max_attempts, 1)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.source_url(), DEFAULT_SOURCE_URL);
        assert_eq!(config.report_filename(), "PlayerStats.csv");
        assert_eq!(config.photo_dir(), "player_photos");
        assert_eq!(config.max_attempts(), 10);
        assert_eq!(config.cell_class_template(), "{} ng-binding ng-scope");
        assert!(!config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[source]
url = "https://stats.example.com/skaters"
webdriver_url = "http://localhost:9515"
timeout_seconds = 30

[extract]
cell_class_template = "{} ng-binding"
name_artifacts = ["(total)", " +"]

[photos]
directory = "photos"
base_url = "https://img.example.com/240x240"
default_url = "https://img.example.com/default.jpg"
fallback_on_fetch_error = true

[report]
output_path = "./out"
filename = "skaters.csv"

[retry]
max_attempts = 3

[monitoring]
enabled = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.source_url(), "https://stats.example.com/skaters");
        assert_eq!(config.webdriver_url(), Some("http://localhost:9515"));
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.name_artifacts().len(), 2);
        assert_eq!(config.photo_dir(), "photos");
        assert!(config.fallback_on_fetch_error());
        assert_eq!(config.output_path(), "./out");
        assert_eq!(config.report_filename(), "skaters.csv");
        assert_eq!(config.max_attempts(), 3);
        assert!(config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PLAYER_STATS_TEST_URL", "https://env.example.com/stats");

        let toml_content = r#"
[source]
url = "${PLAYER_STATS_TEST_URL}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.source.url, "https://env.example.com/stats");

        std::env::remove_var("PLAYER_STATS_TEST_URL");
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[source]
url = "invalid-url"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str("[retry]\nmax_attempts = 0\n").unwrap();
        assert!(config.validate().is_err());

        let config =
            TomlConfig::from_toml_str("[source]\nwebdriver_url = \"localhost\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_page_file_skips_url_check() {
        let config = TomlConfig::from_toml_str(
            r#"
[source]
url = ""
page_file = "snapshot.html"
"#,
        )
        .unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            TomlConfig::from_toml_str("[source\nurl ="),
            Err(ScrapeError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[report]\nfilename = \"file-test.csv\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.report_filename(), "file-test.csv");
    }
}
