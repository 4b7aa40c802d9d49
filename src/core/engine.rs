use crate::core::Pipeline;
use crate::utils::error::{Result, ScrapeError};
use crate::utils::monitor::SystemMonitor;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub attempts: u32,
    pub players: usize,
    pub output_path: String,
}

/// Drives extract → transform → load, retrying the whole run (including a
/// fresh page fetch) while the page yields no players.
pub struct ScrapeEngine<P: Pipeline> {
    pipeline: P,
    max_attempts: u32,
    monitor: SystemMonitor,
}

impl<P: Pipeline> ScrapeEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<RunReport> {
        tracing::info!("Starting scrape (up to {} attempts)", self.max_attempts);

        for attempt in 1..=self.max_attempts {
            match self.attempt(attempt).await {
                Err(e) if e.is_retryable() => {
                    tracing::warn!(
                        "Error getting data. Trying again... ({}/{})",
                        attempt,
                        self.max_attempts
                    );
                }
                result => {
                    self.monitor.log_final_stats();
                    return result;
                }
            }
        }

        self.monitor.log_final_stats();
        Err(ScrapeError::EmptyResult {
            attempts: self.max_attempts,
        })
    }

    async fn attempt(&self, attempt: u32) -> Result<RunReport> {
        tracing::debug!("Attempt {}/{}", attempt, self.max_attempts);

        let bundles = self.pipeline.extract().await?;
        self.monitor.log_stats("Extract");
        if bundles.is_empty() {
            return Err(ScrapeError::EmptyResult { attempts: attempt });
        }
        tracing::info!("Extracted {} player rows", bundles.len());

        let records = self.pipeline.transform(bundles).await?;
        self.monitor.log_stats("Transform");
        tracing::info!("Normalized {} players", records.len());

        let players = records.len();
        let output_path = self.pipeline.load(records).await?;
        self.monitor.log_stats("Load");
        tracing::info!("Report saved to: {}", output_path);

        Ok(RunReport {
            attempts: attempt,
            players,
            output_path,
        })
    }
}
