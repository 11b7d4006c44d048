//! Time-bounded local copy of remote metadata
//!
//! Every metadata source is fetched through [`MetadataCache::fetch`]. When a
//! cache directory is configured and the cached file is younger than the
//! freshness window it is decoded instead of issuing a request. A stale or
//! undecodable file is a plain miss. Once a request has been made there is
//! no fallback to the cached copy.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::config::{APP_NAME, CACHE_FRESHNESS};
use crate::meta::error::{CacheError, FetchError};

/// Wire format of a metadata source, used for both the response and the cache file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Xml,
}

impl Format {
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Xml => "xml",
        }
    }

    pub fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, String> {
        match self {
            Format::Json => serde_json::from_slice(bytes).map_err(|e| e.to_string()),
            Format::Xml => {
                let text = std::str::from_utf8(bytes).map_err(|e| e.to_string())?;
                quick_xml::de::from_str(text).map_err(|e| e.to_string())
            }
        }
    }

    pub fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, String> {
        match self {
            Format::Json => serde_json::to_vec(value).map_err(|e| e.to_string()),
            Format::Xml => quick_xml::se::to_string(value)
                .map(String::into_bytes)
                .map_err(|e| e.to_string()),
        }
    }
}

pub struct MetadataCache {
    client: reqwest::Client,
    cache_dir: Option<PathBuf>,
    freshness: Duration,
}

impl MetadataCache {
    /// Creates a cache rooted at `cache_dir`; `None` disables persistence.
    pub fn new(cache_dir: Option<PathBuf>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(APP_NAME)
                .build()
                .expect("Failed to create HTTP client"),
            cache_dir,
            freshness: CACHE_FRESHNESS,
        }
    }

    pub fn with_freshness(mut self, freshness: Duration) -> Self {
        self.freshness = freshness;
        self
    }

    /// Location of a cache file, if caching is enabled
    pub fn cache_path(&self, cache_file: &str) -> Option<PathBuf> {
        self.cache_dir.as_ref().map(|dir| dir.join(cache_file))
    }

    /// Fetches and decodes `url`, preferring a fresh copy of `cache_file`.
    ///
    /// A failure to persist the fetched value is logged and does not fail the fetch.
    pub async fn fetch<T>(&self, url: &str, cache_file: &str, format: Format) -> Result<T, FetchError>
    where
        T: DeserializeOwned + Serialize,
    {
        let cache_path = self.cache_path(cache_file);

        if let Some(path) = &cache_path
            && let Some(value) = self.load_cached(path, format)
        {
            debug!("Using cached metadata {:?}", path);
            return Ok(value);
        }

        info!("Fetching {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Metadata source returned status {}: {}", status, url);
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await?;
        let value: T = format.decode(&body).map_err(|message| {
            warn!("Failed to decode metadata from {}: {}", url, message);
            FetchError::Decode {
                url: url.to_string(),
                message,
            }
        })?;

        if let Some(path) = &cache_path
            && let Err(e) = save_cached(path, format, &value)
        {
            warn!("Failed to update metadata cache: {}", e);
        }

        Ok(value)
    }

    fn load_cached<T: DeserializeOwned>(&self, path: &Path, format: Format) -> Option<T> {
        let modified = std::fs::metadata(path).and_then(|m| m.modified()).ok()?;
        if !self.is_fresh(modified) {
            debug!("Cached metadata {:?} is stale", path);
            return None;
        }

        let bytes = std::fs::read(path).ok()?;
        match format.decode(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!("Ignoring undecodable cache file {:?}: {}", path, e);
                None
            }
        }
    }

    fn is_fresh(&self, modified: SystemTime) -> bool {
        let modified: DateTime<Utc> = modified.into();
        let now = Utc::now();
        let age = if now >= modified {
            now - modified
        } else {
            modified - now
        };
        age.to_std().is_ok_and(|age| age <= self.freshness)
    }
}

fn save_cached<T: Serialize>(path: &Path, format: Format, value: &T) -> Result<(), CacheError> {
    let io_err = |source| CacheError::Io {
        path: path.to_path_buf(),
        source,
    };

    let encoded = format.encode(value).map_err(|message| CacheError::Encode {
        path: path.to_path_buf(),
        message,
    })?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, encoded).map_err(io_err)
}
