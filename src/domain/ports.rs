use crate::domain::model::{PlayerRecord, RawFieldBundle};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Produces the rendered markup of the stats page.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self) -> Result<String>;
}

#[async_trait]
impl PageSource for Box<dyn PageSource> {
    async fn fetch_page(&self) -> Result<String> {
        (**self).fetch_page().await
    }
}

/// Downloads an image to `dest`. A missing image must surface as
/// `ScrapeError::PhotoNotFound`.
#[async_trait]
pub trait PhotoFetcher: Send + Sync {
    async fn download(&self, url: &str, dest: &Path) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn source_url(&self) -> &str;
    fn page_file(&self) -> Option<&str>;
    /// ChromeDriver endpoint used to render the source URL, if any.
    fn webdriver_url(&self) -> Option<&str>;
    fn output_path(&self) -> &str;
    fn report_filename(&self) -> &str;
    fn photo_dir(&self) -> &str;
    fn photo_base_url(&self) -> &str;
    fn default_photo_url(&self) -> &str;
    fn cell_class_template(&self) -> &str;
    fn name_artifacts(&self) -> &[String];
    fn max_attempts(&self) -> u32;
    fn fallback_on_fetch_error(&self) -> bool;
    fn request_timeout(&self) -> Option<Duration>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<RawFieldBundle>>;
    async fn transform(&self, bundles: Vec<RawFieldBundle>) -> Result<Vec<PlayerRecord>>;
    async fn load(&self, records: Vec<PlayerRecord>) -> Result<String>;
}
