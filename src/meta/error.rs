use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Invalid response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("{platform} has no metadata source {job}")]
    UnsupportedJob {
        platform: &'static str,
        job: String,
    },
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to encode cache file {path:?}: {message}")]
    Encode { path: PathBuf, message: String },
}
