pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{
    FilePageSource, HttpPageSource, HttpPhotoFetcher, LocalStorage, WebDriverPageSource,
};
pub use config::TomlConfig;
pub use core::{engine::RunReport, engine::ScrapeEngine, pipeline::StatsPipeline};
pub use domain::model::PlayerRecord;
pub use utils::error::{Result, ScrapeError};
