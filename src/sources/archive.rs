//! Archive Sources
//!
//! Where raw archive bytes come from. A missing archive and a transport
//! failure are both reported as [`CacheError::ArchiveFetch`].

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{CacheError, Result};

/// Retrieves an archive's raw bytes by resource name (e.g. `Mob.img`).
#[async_trait]
pub trait ArchiveSource: Send + Sync {
    async fn fetch(&self, archive: &str) -> Result<Vec<u8>>;
}

// == HTTP Source ==
/// Fetches `{base_url}/{archive}` over HTTP. Non-2xx responses are errors.
#[derive(Debug, Clone)]
pub struct HttpArchiveSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpArchiveSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn url_for(&self, archive: &str) -> String {
        format!("{}/{}", self.base_url, archive)
    }
}

#[async_trait]
impl ArchiveSource for HttpArchiveSource {
    async fn fetch(&self, archive: &str) -> Result<Vec<u8>> {
        let url = self.url_for(archive);
        debug!("Fetching archive {} from {}", archive, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| CacheError::fetch(archive, e))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| CacheError::fetch(archive, e))?;

        Ok(bytes.to_vec())
    }
}

// == Directory Source ==
/// Reads archives from a local directory.
#[derive(Debug, Clone)]
pub struct DirArchiveSource {
    root: PathBuf,
}

impl DirArchiveSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ArchiveSource for DirArchiveSource {
    async fn fetch(&self, archive: &str) -> Result<Vec<u8>> {
        let path = self.root.join(archive);
        debug!("Reading archive {} from {}", archive, path.display());

        tokio::fs::read(&path)
            .await
            .map_err(|e| CacheError::fetch(archive, format!("{}: {}", path.display(), e)))
    }
}
