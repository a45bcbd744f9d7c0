//! Retrieval of raw household records.
//!
//! A [`DataFetcher`] tries its primary source once and, only after that
//! attempt has failed, its fallback source once. Failures are logged and
//! folded into [`FetchOutcome`]; nothing is propagated to the caller.

use std::fmt;
use std::path::{Path, PathBuf};

use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::domain::{Envelope, RawRecord};

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode records: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Where a set of records can be loaded from.
#[derive(Debug, Clone)]
pub enum Source {
    Http { client: Client, url: String },
    File(PathBuf),
}

impl Source {
    pub fn http(client: Client, url: impl Into<String>) -> Self {
        Self::Http {
            client,
            url: url.into(),
        }
    }

    pub fn file(path: impl AsRef<Path>) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }

    pub async fn load(&self) -> Result<Vec<RawRecord>, FetchError> {
        let envelope: Envelope = match self {
            Self::Http { client, url } => {
                client
                    .get(url)
                    .send()
                    .await?
                    .error_for_status()?
                    .json()
                    .await?
            }
            Self::File(path) => {
                let contents = tokio::fs::read_to_string(path).await?;
                serde_json::from_str(&contents)?
            }
        };

        Ok(envelope.into_records())
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http { url, .. } => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataOrigin {
    Primary,
    Fallback,
}

impl DataOrigin {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Primary => "Live API",
            Self::Fallback => "Bundled snapshot",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Primary(Vec<RawRecord>),
    Fallback(Vec<RawRecord>),
    Failed,
}

impl FetchOutcome {
    pub const fn origin(&self) -> Option<DataOrigin> {
        match self {
            Self::Primary(_) => Some(DataOrigin::Primary),
            Self::Fallback(_) => Some(DataOrigin::Fallback),
            Self::Failed => None,
        }
    }

    pub fn into_records(self) -> Option<Vec<RawRecord>> {
        match self {
            Self::Primary(records) | Self::Fallback(records) => Some(records),
            Self::Failed => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DataFetcher {
    primary: Source,
    fallback: Source,
}

impl DataFetcher {
    pub const fn new(primary: Source, fallback: Source) -> Self {
        Self { primary, fallback }
    }

    /// Remote endpoint first, bundled snapshot second.
    pub fn from_config(config: &AppConfig) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self::new(
            Source::http(client, config.api_url.clone()),
            Source::file(&config.fallback_path),
        ))
    }

    pub async fn fetch(&self) -> FetchOutcome {
        match self.primary.load().await {
            Ok(records) => {
                info!(source = %self.primary, records = records.len(), "Loaded primary source");
                return FetchOutcome::Primary(records);
            }
            Err(e) => {
                warn!(source = %self.primary, error = %e, "Primary source failed, trying fallback");
            }
        }

        match self.fallback.load().await {
            Ok(records) => {
                info!(source = %self.fallback, records = records.len(), "Loaded fallback source");
                FetchOutcome::Fallback(records)
            }
            Err(e) => {
                error!(source = %self.fallback, error = %e, "All data sources failed");
                FetchOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn snapshot(records: Vec<RawRecord>) -> Result<tempfile::NamedTempFile, Box<dyn std::error::Error>> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(serde_json::to_string(&Envelope::new(records))?.as_bytes())?;
        Ok(file)
    }

    fn missing_path(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join("missing.json")
    }

    #[tokio::test]
    async fn primary_success_skips_fallback() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let primary = snapshot(vec![RawRecord::new("臺北市中山區", ["1", "2", "3", "4"])])?;
        let fetcher = DataFetcher::new(Source::file(primary.path()), Source::file(missing_path(&dir)));

        let outcome = fetcher.fetch().await;
        assert_eq!(outcome.origin(), Some(DataOrigin::Primary));
        assert_eq!(outcome.into_records().map(|records| records.len()), Some(1));
        Ok(())
    }

    #[tokio::test]
    async fn primary_failure_uses_fallback() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let fallback = snapshot(vec![RawRecord::new("臺北市內湖區", ["1", "2", "3", "4"])])?;
        let fetcher = DataFetcher::new(Source::file(missing_path(&dir)), Source::file(fallback.path()));

        let outcome = fetcher.fetch().await;
        assert_eq!(outcome.origin(), Some(DataOrigin::Fallback));
        Ok(())
    }

    #[tokio::test]
    async fn undecodable_primary_counts_as_failure() -> Result<(), Box<dyn std::error::Error>> {
        let mut garbage = tempfile::NamedTempFile::new()?;
        garbage.write_all(b"<html>maintenance</html>")?;
        let fallback = snapshot(Vec::new())?;
        let fetcher = DataFetcher::new(Source::file(garbage.path()), Source::file(fallback.path()));

        assert_eq!(fetcher.fetch().await, FetchOutcome::Fallback(Vec::new()));
        Ok(())
    }

    #[tokio::test]
    async fn both_failing_yields_failed() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let fetcher = DataFetcher::new(
            Source::file(dir.path().join("a.json")),
            Source::file(dir.path().join("b.json")),
        );

        let outcome = fetcher.fetch().await;
        assert_eq!(outcome, FetchOutcome::Failed);
        assert_eq!(outcome.origin(), None);
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_endpoint_falls_back() -> Result<(), Box<dyn std::error::Error>> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(2))
            .build()?;
        let fallback = snapshot(vec![RawRecord::new("臺北市北投區", ["1", "1", "1", "1"])])?;
        let fetcher = DataFetcher::new(
            Source::http(client, "http://127.0.0.1:9/api/v1/rest/datastore"),
            Source::file(fallback.path()),
        );

        assert_eq!(fetcher.fetch().await.origin(), Some(DataOrigin::Fallback));
        Ok(())
    }

    #[test]
    fn source_display_names_location() {
        assert_eq!(Source::file("/srv/apiData.json").to_string(), "/srv/apiData.json");
    }
}
