use anyhow::Context;
use clap::Parser;
use player_stats_scraper::adapters::build_client;
use player_stats_scraper::core::{ConfigProvider, PageSource};
use player_stats_scraper::utils::error::ErrorSeverity;
use player_stats_scraper::utils::{logger, validation::Validate};
use player_stats_scraper::{
    CliConfig, FilePageSource, HttpPageSource, HttpPhotoFetcher, LocalStorage, ScrapeEngine,
    StatsPipeline, TomlConfig, WebDriverPageSource,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose, cli.json_logs);
    tracing::info!("Starting player-stats-scraper");

    if let Some(path) = cli.config.clone() {
        tracing::info!("📁 Loading configuration from: {}", path);
        let config = TomlConfig::from_file(&path)
            .with_context(|| format!("Failed to load config file '{}'", path))?;
        let monitor = cli.monitor || config.monitoring_enabled();
        run(config, monitor).await
    } else {
        let monitor = cli.monitor;
        run(cli, monitor).await
    }
}

async fn run<C>(config: C, monitor: bool) -> anyhow::Result<()>
where
    C: ConfigProvider + Validate + std::fmt::Debug,
{
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }
    tracing::debug!("Config: {:?}", config);

    let client = build_client(config.request_timeout())?;
    let source: Box<dyn PageSource> = match (config.page_file(), config.webdriver_url()) {
        (Some(path), _) => {
            tracing::info!("Reading rendered page from {}", path);
            Box::new(FilePageSource::new(path))
        }
        (None, Some(webdriver_url)) => {
            tracing::info!("Rendering page through WebDriver at {}", webdriver_url);
            Box::new(WebDriverPageSource::new(webdriver_url, config.source_url()))
        }
        (None, None) => Box::new(HttpPageSource::new(client.clone(), config.source_url())),
    };

    let storage = LocalStorage::new(config.output_path());
    let pipeline = StatsPipeline::new(storage, source, HttpPhotoFetcher::new(client), &config)?;
    let engine = ScrapeEngine::new_with_monitoring(pipeline, monitor)
        .with_max_attempts(config.max_attempts());

    match engine.run().await {
        Ok(report) => {
            tracing::info!(
                "✅ Wrote {} players after {} attempt(s)",
                report.players,
                report.attempts
            );
            println!("Finished! {} players saved to {}", report.players, report.output_path);
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ Scrape failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }
    }
}
