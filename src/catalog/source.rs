//! Dataset loading from a local file or an HTTP(S) URL.
//!
//! Loading is the only suspension point of the browser: everything downstream
//! of a successful load runs synchronously.

use futures::StreamExt;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

use super::index::CatalogIndex;
use super::types::CatalogError;

/// Upper bound on dataset size, for both files and HTTP bodies.
pub const MAX_DATASET_SIZE: usize = 10 * 1024 * 1024; // 10MB

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur while fetching and indexing a dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    #[error("Request timed out")]
    Timeout,
    #[error("Skill data too large (exceeds {0} bytes)")]
    TooLarge(usize),
    #[error("Unsupported dataset scheme: {0} (only http/https or a file path)")]
    UnsupportedScheme(String),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Where the dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Remote(Url),
}

impl DataSource {
    /// Interpret a configured dataset location.
    ///
    /// `http://` and `https://` URLs are fetched, `file://` URLs and anything
    /// that does not parse as a URL are treated as local paths.
    pub fn parse(location: &str) -> Result<Self, LoadError> {
        match Url::parse(location) {
            Ok(url) => match url.scheme() {
                "http" | "https" => Ok(DataSource::Remote(url)),
                "file" => url
                    .to_file_path()
                    .map(DataSource::File)
                    .map_err(|_| LoadError::UnsupportedScheme("file".to_owned())),
                // Windows drive letters parse as one-letter schemes
                scheme if scheme.len() == 1 => Ok(DataSource::File(PathBuf::from(location))),
                scheme => Err(LoadError::UnsupportedScheme(scheme.to_owned())),
            },
            Err(_) => Ok(DataSource::File(PathBuf::from(location))),
        }
    }

    /// Fetch the raw bytes and build a fresh index from them.
    pub async fn load(&self, client: &reqwest::Client) -> Result<CatalogIndex, LoadError> {
        let bytes = match self {
            DataSource::File(path) => read_file(path).await?,
            DataSource::Remote(url) => fetch_remote(client, url).await?,
        };
        tracing::debug!(source = %self, bytes = bytes.len(), "Dataset fetched");
        Ok(CatalogIndex::load(&bytes)?)
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Remote(url) => write!(f, "{}", url),
        }
    }
}

async fn read_file(path: &Path) -> Result<Vec<u8>, LoadError> {
    let io_err = |source: std::io::Error| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };

    let meta = tokio::fs::metadata(path).await.map_err(io_err)?;
    if meta.len() > MAX_DATASET_SIZE as u64 {
        return Err(LoadError::TooLarge(MAX_DATASET_SIZE));
    }
    tokio::fs::read(path).await.map_err(io_err)
}

async fn fetch_remote(client: &reqwest::Client, url: &Url) -> Result<Vec<u8>, LoadError> {
    let response = tokio::time::timeout(FETCH_TIMEOUT, client.get(url.clone()).send())
        .await
        .map_err(|_| LoadError::Timeout)??;

    if !response.status().is_success() {
        tracing::warn!(url = %url, status = %response.status(), "Dataset request rejected");
        return Err(LoadError::HttpStatus(response.status().as_u16()));
    }

    read_limited_bytes(response, MAX_DATASET_SIZE).await
}

async fn read_limited_bytes(response: reqwest::Response, limit: usize) -> Result<Vec<u8>, LoadError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if len > limit as u64 {
            return Err(LoadError::TooLarge(limit));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(LoadError::TooLarge(limit));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}
