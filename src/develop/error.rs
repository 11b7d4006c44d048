use std::path::PathBuf;

use thiserror::Error;

use crate::develop::properties::PropertiesError;

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("Cannot find a valid platform")]
    NoPlatform,

    #[error("Architectury project has no recognised sub-platform")]
    NoSubPlatforms,
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path:?}: {source}")]
    Properties {
        path: PathBuf,
        source: PropertiesError,
    },

    #[error("Failed to parse version catalog: {0}")]
    Catalog(String),
}
