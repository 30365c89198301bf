/// JSON document sources.
///
/// A source is either a local file or an HTTP(S) URL. Fetches are single
/// attempts with a timeout; there is no retry.
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::CommonError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Path(PathBuf),
    Url(String),
}

impl DataSource {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            DataSource::Url(raw.to_string())
        } else {
            DataSource::Path(PathBuf::from(raw))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Path(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => f.write_str(url),
        }
    }
}

#[derive(Clone)]
pub struct JsonFetcher {
    http: reqwest::Client,
    timeout: Duration,
}

impl JsonFetcher {
    pub fn new(timeout: Duration) -> Result<Self, CommonError> {
        let http = reqwest::Client::builder()
            .user_agent("vision-explorer")
            .build()?;
        Ok(Self { http, timeout })
    }

    /// Load and decode a JSON document.
    pub async fn fetch<T: DeserializeOwned>(&self, source: &DataSource) -> Result<T, CommonError> {
        let bytes = match source {
            DataSource::Path(path) => tokio::fs::read(path).await.map_err(|error| CommonError::Io {
                path: path.display().to_string(),
                error,
            })?,
            DataSource::Url(url) => {
                let resp = self.http.get(url).timeout(self.timeout).send().await?;
                let status = resp.status();
                if !status.is_success() {
                    return Err(CommonError::Status {
                        location: url.clone(),
                        status: status.as_u16(),
                    });
                }
                resp.bytes().await?.to_vec()
            }
        };
        debug!(source = %source, bytes = bytes.len(), "document fetched");

        serde_json::from_slice(&bytes).map_err(|error| CommonError::Json {
            location: source.to_string(),
            error,
        })
    }

    /// Load an optional document. Any failure degrades to `T::default()`.
    pub async fn fetch_or_default<T: DeserializeOwned + Default>(&self, source: &DataSource) -> T {
        self.fetch(source)
            .await
            .inspect_err(|e| warn!(error = %e, source = %source, "optional document unavailable, using empty"))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::model::Seed;

    fn fetcher() -> JsonFetcher {
        JsonFetcher::new(Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_parse_source_kinds() {
        assert_eq!(
            DataSource::parse("https://example.org/data/visions.json"),
            DataSource::Url("https://example.org/data/visions.json".to_string())
        );
        assert_eq!(
            DataSource::parse(" data/visions.json "),
            DataSource::Path(PathBuf::from("data/visions.json"))
        );
        assert_eq!(DataSource::parse("data/seeds.json").to_string(), "data/seeds.json");
    }

    #[tokio::test]
    async fn test_fetch_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": "s1", "title_en": "Seed", "domain": "water"}}]"#).unwrap();

        let source = DataSource::Path(file.path().to_path_buf());
        let seeds: Vec<Seed> = fetcher().fetch(&source).await.unwrap();
        assert_eq!(seeds.len(), 1);
        assert_eq!(seeds[0].domain.as_deref(), Some("water"));
    }

    #[tokio::test]
    async fn test_fetch_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = DataSource::Path(dir.path().join("missing.json"));
        let err = fetcher().fetch::<Vec<Seed>>(&source).await.unwrap_err();
        assert!(matches!(err, CommonError::Io { .. }), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn test_fetch_invalid_json_names_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let source = DataSource::Path(file.path().to_path_buf());
        let err = fetcher().fetch::<Vec<Seed>>(&source).await.unwrap_err();
        assert!(matches!(err, CommonError::Json { .. }));
        assert!(err.to_string().contains(&source.to_string()));
    }

    #[tokio::test]
    async fn test_fetch_or_default_degrades() {
        let dir = tempfile::tempdir().unwrap();
        let source = DataSource::Path(dir.path().join("stories.json"));
        let seeds: Vec<Seed> = fetcher().fetch_or_default(&source).await;
        assert!(seeds.is_empty());
    }
}
