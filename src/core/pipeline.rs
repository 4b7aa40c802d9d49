use crate::core::builder::build_bundles;
use crate::core::exporter::ReportExporter;
use crate::core::extractor::FieldExtractor;
use crate::core::normalizer::Normalizer;
use crate::core::photo::{PhotoResolver, PhotoSettings};
use crate::core::{ConfigProvider, PageSource, PhotoFetcher, Pipeline, Storage};
use crate::domain::model::{PlayerRecord, PlayerRoster, RawFieldBundle};
use crate::utils::error::Result;
use std::path::PathBuf;

pub struct StatsPipeline<S: Storage, P: PageSource, F: PhotoFetcher> {
    storage: S,
    source: P,
    extractor: FieldExtractor,
    normalizer: Normalizer,
    photos: PhotoResolver<F>,
    exporter: ReportExporter,
    output_path: PathBuf,
}

impl<S: Storage, P: PageSource, F: PhotoFetcher> StatsPipeline<S, P, F> {
    pub fn new<C: ConfigProvider>(storage: S, source: P, fetcher: F, config: &C) -> Result<Self> {
        let photo_settings = PhotoSettings {
            output_root: PathBuf::from(config.output_path()),
            photo_dir: config.photo_dir().to_string(),
            base_url: config.photo_base_url().to_string(),
            default_url: config.default_photo_url().to_string(),
            fallback_on_fetch_error: config.fallback_on_fetch_error(),
        };

        Ok(Self {
            storage,
            source,
            extractor: FieldExtractor::new(config.cell_class_template())?,
            normalizer: Normalizer::new(config.name_artifacts())?,
            photos: PhotoResolver::new(fetcher, photo_settings)?,
            exporter: ReportExporter::new(config.report_filename()),
            output_path: PathBuf::from(config.output_path()),
        })
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_path.join(self.exporter.filename())
    }
}

#[async_trait::async_trait]
impl<S: Storage, P: PageSource, F: PhotoFetcher> Pipeline for StatsPipeline<S, P, F> {
    async fn extract(&self) -> Result<Vec<RawFieldBundle>> {
        let markup = self.source.fetch_page().await?;
        tracing::debug!("Fetched page ({} bytes)", markup.len());

        let fields = self.extractor.extract(&markup);
        // Players are counted from the name column; a partial render is an empty attempt
        if fields.is_empty() {
            tracing::debug!("No player name cells in page");
            return Ok(Vec::new());
        }
        build_bundles(fields)
    }

    async fn transform(&self, bundles: Vec<RawFieldBundle>) -> Result<Vec<PlayerRecord>> {
        let mut roster = PlayerRoster::new();

        // One photo download at a time
        for bundle in &bundles {
            let record = self.normalizer.normalize(bundle, &self.photos).await?;
            tracing::debug!("Row {}: {} ({})", bundle.row, record.name, record.photo_path);

            if let Some(previous) = roster.insert(record) {
                tracing::warn!(
                    "Duplicate player name '{}' at row {}; keeping the later row",
                    previous.name,
                    bundle.row
                );
            }
        }

        Ok(roster.into_records())
    }

    async fn load(&self, records: Vec<PlayerRecord>) -> Result<String> {
        self.exporter.export(&self.storage, &records).await?;
        Ok(self.report_path().display().to_string())
    }
}
