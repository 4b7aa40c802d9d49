use crate::core::PageSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Reads a rendered page saved by a browser (e.g. `document.documentElement.outerHTML`).
pub struct FilePageSource {
    path: PathBuf,
}

impl FilePageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PageSource for FilePageSource {
    async fn fetch_page(&self) -> Result<String> {
        tracing::debug!("Reading page snapshot: {}", self.path.display());
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ScrapeError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_reads_snapshot() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"<table></table>").unwrap();

        let source = FilePageSource::new(file.path());
        assert_eq!(source.fetch_page().await.unwrap(), "<table></table>");
    }

    #[tokio::test]
    async fn test_missing_snapshot_is_io_error() {
        let source = FilePageSource::new("/nonexistent/page.html");
        assert!(matches!(
            source.fetch_page().await,
            Err(ScrapeError::IoError(_))
        ));
    }
}
