//! Dataset loading
//!
//! Reads the usage/support document from a local file or an `http(s)` URL and
//! turns it into a [`StatsEngine`]. Loading happens once, before any query;
//! there is no retry or caching.

mod dataset;

pub use dataset::{AgentFilter, Dataset};

use crate::engine::StatsEngine;
use crate::utils::{LoadError, Result, StatsError};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Where a dataset document lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Url(Url),
}

impl FromStr for DataSource {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Err(StatsError::InvalidSource("empty source".to_string()));
        }

        match Url::parse(s) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(Self::Url(url)),
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map(Self::File)
                .map_err(|_| StatsError::InvalidSource(s.to_string())),
            // Anything else, including Windows drive letters parsed as schemes
            _ => Ok(Self::File(PathBuf::from(s))),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Configuration for the dataset loader
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Which agents to keep
    pub filter: AgentFilter,
    /// HTTP request timeout
    pub timeout: Duration,
    /// User-Agent header for HTTP sources
    pub user_agent: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            filter: AgentFilter::All,
            timeout: Duration::from_secs(30),
            user_agent: format!("{}/{}", crate::NAME, crate::VERSION),
        }
    }
}

/// Loads dataset documents and builds engines from them
#[derive(Debug, Clone, Default)]
pub struct DatasetLoader {
    config: LoaderConfig,
}

impl DatasetLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load a source and build an engine (blocking)
    pub fn load(&self, source: &DataSource) -> Result<StatsEngine> {
        log::info!("Loading dataset from {}", source);
        let bytes = match source {
            DataSource::File(path) => std::fs::read(path)?,
            DataSource::Url(url) => self.fetch_blocking(url)?,
        };
        self.build(&bytes)
    }

    /// Load a source and build an engine
    pub async fn load_async(&self, source: &DataSource) -> Result<StatsEngine> {
        log::info!("Loading dataset from {}", source);
        let bytes = match source {
            DataSource::File(path) => tokio::fs::read(path).await?,
            DataSource::Url(url) => self.fetch(url).await?,
        };
        self.build(&bytes)
    }

    fn build(&self, bytes: &[u8]) -> Result<StatsEngine> {
        let dataset = Dataset::from_slice(bytes)?;
        Ok(dataset.into_engine(&self.config.filter))
    }

    fn fetch_blocking(&self, url: &Url) -> Result<Vec<u8>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.config.timeout)
            .user_agent(self.config.user_agent.as_str())
            .build()
            .map_err(|e| LoadError::Client(e.to_string()))?;

        let response = client
            .get(url.clone())
            .send()
            .map_err(|e| request_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(url, status.as_u16()));
        }

        let body = response.bytes().map_err(|e| request_error(url, e))?;
        Ok(body.to_vec())
    }

    async fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
        let client = reqwest::Client::builder()
            .timeout(self.config.timeout)
            .user_agent(self.config.user_agent.as_str())
            .build()
            .map_err(|e| LoadError::Client(e.to_string()))?;

        let response = client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| request_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(url, status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| request_error(url, e))?;
        Ok(body.to_vec())
    }
}

fn request_error(url: &Url, err: reqwest::Error) -> StatsError {
    log::warn!("Fetch of {} failed: {}", url, err);
    LoadError::Request {
        url: url.to_string(),
        message: err.to_string(),
    }
    .into()
}

fn status_error(url: &Url, status: u16) -> StatsError {
    log::warn!("Fetch of {} returned HTTP {}", url, status);
    LoadError::Status {
        url: url.to_string(),
        status,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::SupportState;
    use std::io::Write;

    const DOCUMENT: &str = r#"{
        "agents": {
            "chrome": {"browser": "Chrome", "type": "desktop", "share": 0.5,
                       "versions": ["90"], "usage_global": {"90": 0.5}},
            "ios_saf": {"browser": "Safari on iOS", "type": "mobile", "share": 0.2,
                        "versions": ["15.2-15.3"], "usage_global": {"15.2-15.3": 0.2}}
        },
        "data": {
            "grid": {"stats": {"chrome": {"90": "y"}, "ios_saf": {"15.2-15.3": "y"}}}
        }
    }"#;

    fn document_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DOCUMENT.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_source_parse() {
        assert!(matches!(
            "https://example.com/data.json".parse::<DataSource>().unwrap(),
            DataSource::Url(_)
        ));
        assert_eq!(
            "data.json".parse::<DataSource>().unwrap(),
            DataSource::File(PathBuf::from("data.json"))
        );
        assert!("  ".parse::<DataSource>().is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_source_parse_file_url() {
        assert_eq!(
            "file:///tmp/data.json".parse::<DataSource>().unwrap(),
            DataSource::File(PathBuf::from("/tmp/data.json"))
        );
    }

    #[test]
    fn test_default_config() {
        let config = LoaderConfig::default();
        assert_eq!(config.filter, AgentFilter::All);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("browserstats/"));
    }

    #[test]
    fn test_load_file() {
        let file = document_file();
        let source = DataSource::File(file.path().to_path_buf());

        let engine = DatasetLoader::default().load(&source).unwrap();
        assert_eq!(engine.agents().len(), 2);

        let browsers = engine
            .browsers_by_feature(&["grid"], &[SupportState::Supported])
            .unwrap();
        assert_eq!(browsers.len(), 2);
    }

    #[test]
    fn test_load_file_with_filter() {
        let file = document_file();
        let source = DataSource::File(file.path().to_path_buf());
        let loader = DatasetLoader::new(LoaderConfig {
            filter: AgentFilter::Type("mobile".into()),
            ..Default::default()
        });

        let engine = loader.load(&source).unwrap();
        let matches = engine.query(&["grid"], &[SupportState::Supported]).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].version, "15.2-15.3");
    }

    #[test]
    fn test_load_missing_file() {
        let source = DataSource::File(PathBuf::from("/nonexistent/browserstats/data.json"));
        let err = DatasetLoader::default().load(&source).unwrap_err();
        assert!(matches!(err, StatsError::Io(_)));
    }

    #[tokio::test]
    async fn test_load_async_file() {
        let file = document_file();
        let source = DataSource::File(file.path().to_path_buf());

        let engine = DatasetLoader::default().load_async(&source).await.unwrap();
        assert_eq!(engine.list_features(), vec!["grid"]);
    }
}
