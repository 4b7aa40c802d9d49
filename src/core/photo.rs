use crate::domain::ports::PhotoFetcher;
use crate::utils::error::{Result, ScrapeError};
use regex::Regex;
use std::path::{Path, PathBuf};

pub const DEFAULT_PHOTO_DIR: &str = "player_photos";
pub const DEFAULT_PHOTO_BASE_URL: &str = "http://assets.leaguestat.com/sjhl/240x240";
pub const DEFAULT_PHOTO_URL: &str = "http://assets.leaguestat.com/sjhl/logos/16.jpg";

/// Where a player's photo should come from and where it goes. Derived from
/// the player link alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoPlan {
    /// `None` when the link carries no player id; only the default image applies.
    pub candidate_url: Option<String>,
    pub file_name: String,
    /// Path written to the report, relative to the output directory.
    pub report_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoOutcome {
    Fetched(String),
    Fallback(String),
}

impl PhotoOutcome {
    pub fn path(&self) -> &str {
        match self {
            PhotoOutcome::Fetched(path) | PhotoOutcome::Fallback(path) => path,
        }
    }

    pub fn into_path(self) -> String {
        match self {
            PhotoOutcome::Fetched(path) | PhotoOutcome::Fallback(path) => path,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, PhotoOutcome::Fallback(_))
    }
}

#[derive(Debug, Clone)]
pub struct PhotoSettings {
    pub output_root: PathBuf,
    pub photo_dir: String,
    pub base_url: String,
    pub default_url: String,
    pub fallback_on_fetch_error: bool,
}

impl Default for PhotoSettings {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from("."),
            photo_dir: DEFAULT_PHOTO_DIR.to_string(),
            base_url: DEFAULT_PHOTO_BASE_URL.to_string(),
            default_url: DEFAULT_PHOTO_URL.to_string(),
            fallback_on_fetch_error: false,
        }
    }
}

pub struct PhotoResolver<F: PhotoFetcher> {
    fetcher: F,
    settings: PhotoSettings,
    id_pattern: Regex,
    name_pattern: Regex,
}

impl<F: PhotoFetcher> PhotoResolver<F> {
    pub fn new(fetcher: F, settings: PhotoSettings) -> Result<Self> {
        Ok(Self {
            fetcher,
            settings,
            id_pattern: Regex::new(r"\d{4}")?,
            name_pattern: Regex::new(r"\w+-\w+")?,
        })
    }

    pub fn plan(&self, link: &str) -> Result<PhotoPlan> {
        let id = self.id_pattern.find(link).map(|m| m.as_str());
        let slug = self.name_pattern.find(link).map(|m| m.as_str());

        let stem = slug.or(id).ok_or_else(|| ScrapeError::InvalidPhotoLink {
            link: link.to_string(),
        })?;
        let file_name = format!("{}.jpg", stem);

        let candidate_url = id.map(|id| {
            format!("{}/{}.jpg", self.settings.base_url.trim_end_matches('/'), id)
        });

        let report_path = format!(
            "{}/{}",
            self.settings.photo_dir.trim_end_matches('/'),
            file_name
        );

        Ok(PhotoPlan {
            candidate_url,
            file_name,
            report_path,
        })
    }

    pub fn destination(&self, plan: &PhotoPlan) -> PathBuf {
        self.settings
            .output_root
            .join(&self.settings.photo_dir)
            .join(&plan.file_name)
    }

    /// Downloads the player's photo, or the default image when the player
    /// has none. Failures other than a missing photo propagate unless
    /// `fallback_on_fetch_error` is set.
    pub async fn resolve(&self, link: &str) -> Result<PhotoOutcome> {
        let plan = self.plan(link)?;
        let dest = self.destination(&plan);

        let Some(candidate) = plan.candidate_url.as_deref() else {
            tracing::warn!("No player id in link '{}'. Using default image.", link);
            return self.fallback(&plan, &dest).await;
        };

        match self.fetcher.download(candidate, &dest).await {
            Ok(()) => {
                tracing::debug!("Saved photo {} -> {}", candidate, dest.display());
                Ok(PhotoOutcome::Fetched(plan.report_path))
            }
            Err(ScrapeError::PhotoNotFound { .. }) => {
                tracing::warn!(
                    "{} picture not found. Using default image.",
                    plan.file_name.trim_end_matches(".jpg")
                );
                self.fallback(&plan, &dest).await
            }
            Err(e) if self.settings.fallback_on_fetch_error => {
                tracing::warn!("Photo download failed ({}). Using default image.", e);
                self.fallback(&plan, &dest).await
            }
            Err(e) => Err(e),
        }
    }

    async fn fallback(&self, plan: &PhotoPlan, dest: &Path) -> Result<PhotoOutcome> {
        self.fetcher
            .download(&self.settings.default_url, dest)
            .await?;
        Ok(PhotoOutcome::Fallback(plan.report_path.clone()))
    }
}
