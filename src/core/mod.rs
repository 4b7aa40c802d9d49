pub mod builder;
pub mod engine;
pub mod exporter;
pub mod extractor;
pub mod normalizer;
pub mod photo;
pub mod pipeline;

pub use crate::domain::model::{PlayerRecord, RawFieldBundle};
pub use crate::domain::ports::{ConfigProvider, PageSource, PhotoFetcher, Pipeline, Storage};
pub use crate::utils::error::Result;
