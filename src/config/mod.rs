pub mod toml_config;

pub use toml_config::TomlConfig;

pub const DEFAULT_SOURCE_URL: &str = "https://www.humboldtbroncos.com/stats/player-stats/16/41?playertype=skater&position=skaters&rookie=no&sort=points&statstype=standard&page=1&league=3";
pub const DEFAULT_OUTPUT_PATH: &str = ".";

#[cfg(feature = "cli")]
pub use cli_config::CliConfig;

#[cfg(feature = "cli")]
mod cli_config {
    use super::{DEFAULT_OUTPUT_PATH, DEFAULT_SOURCE_URL};
    use crate::core::engine::DEFAULT_MAX_ATTEMPTS;
    use crate::core::exporter::DEFAULT_REPORT_FILENAME;
    use crate::core::extractor::DEFAULT_CELL_CLASS_TEMPLATE;
    use crate::core::normalizer::DEFAULT_NAME_ARTIFACT;
    use crate::core::photo::{DEFAULT_PHOTO_BASE_URL, DEFAULT_PHOTO_DIR, DEFAULT_PHOTO_URL};
    use crate::core::ConfigProvider;
    use crate::utils::error::Result;
    use crate::utils::validation::{
        validate_class_template, validate_path, validate_positive_number, validate_url, Validate,
    };
    use clap::Parser;
    use std::time::Duration;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "player-stats-scraper")]
    #[command(about = "Scrape a team's player stats page into a CSV report with player photos")]
    pub struct CliConfig {
        /// Stats listing page to scrape
        #[arg(long, default_value = DEFAULT_SOURCE_URL)]
        pub source_url: String,

        /// Read a saved, already rendered page instead of fetching the URL
        #[arg(long)]
        pub page_file: Option<String>,

        /// Render the page in headless Chrome through this ChromeDriver endpoint
        #[arg(long)]
        pub webdriver_url: Option<String>,

        #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
        pub output_path: String,

        #[arg(long, default_value = DEFAULT_REPORT_FILENAME)]
        pub report_filename: String,

        /// Photo directory, relative to the output path
        #[arg(long, default_value = DEFAULT_PHOTO_DIR)]
        pub photo_dir: String,

        #[arg(long, default_value = DEFAULT_PHOTO_BASE_URL)]
        pub photo_base_url: String,

        #[arg(long, default_value = DEFAULT_PHOTO_URL)]
        pub default_photo_url: String,

        #[arg(long, default_value = DEFAULT_CELL_CLASS_TEMPLATE)]
        pub cell_class_template: String,

        /// Text removed from player names; repeatable
        #[arg(long = "name-artifact", default_value = DEFAULT_NAME_ARTIFACT)]
        pub name_artifacts: Vec<String>,

        #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
        pub max_attempts: u32,

        /// Use the default photo on any download failure, not only 404
        #[arg(long)]
        pub fallback_on_fetch_error: bool,

        #[arg(long)]
        pub timeout_seconds: Option<u64>,

        /// TOML configuration file; replaces the scrape settings above
        #[arg(short, long)]
        pub config: Option<String>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub json_logs: bool,

        #[arg(long, help = "Log process CPU and memory per phase")]
        pub monitor: bool,
    }

    impl ConfigProvider for CliConfig {
        fn source_url(&self) -> &str {
            &self.source_url
        }

        fn page_file(&self) -> Option<&str> {
            self.page_file.as_deref()
        }

        fn webdriver_url(&self) -> Option<&str> {
            self.webdriver_url.as_deref()
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn report_filename(&self) -> &str {
            &self.report_filename
        }

        fn photo_dir(&self) -> &str {
            &self.photo_dir
        }

        fn photo_base_url(&self) -> &str {
            &self.photo_base_url
        }

        fn default_photo_url(&self) -> &str {
            &self.default_photo_url
        }

        fn cell_class_template(&self) -> &str {
            &self.cell_class_template
        }

        fn name_artifacts(&self) -> &[String] {
            &self.name_artifacts
        }

        fn max_attempts(&self) -> u32 {
            self.max_attempts
        }

        fn fallback_on_fetch_error(&self) -> bool {
            self.fallback_on_fetch_error
        }

        fn request_timeout(&self) -> Option<Duration> {
            self.timeout_seconds.map(Duration::from_secs)
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            match &self.page_file {
                Some(page_file) => validate_path("page_file", page_file)?,
                None => validate_url("source_url", &self.source_url)?,
            }
            if let Some(webdriver_url) = &self.webdriver_url {
                validate_url("webdriver_url", webdriver_url)?;
            }
            validate_path("output_path", &self.output_path)?;
            validate_path("report_filename", &self.report_filename)?;
            validate_path("photo_dir", &self.photo_dir)?;
            validate_url("photo_base_url", &self.photo_base_url)?;
            validate_url("default_photo_url", &self.default_photo_url)?;
            validate_class_template("cell_class_template", &self.cell_class_template)?;
            validate_positive_number("max_attempts", self.max_attempts, 1)?;
            Ok(())
        }
    }

}
