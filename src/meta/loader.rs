//! Loader version listing served by Fabric and Quilt meta

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoaderVersion {
    pub separator: String,
    pub build: i64,
    pub maven: String,
    pub version: String,
    pub stable: bool,
}

/// The feed is sorted newest first, so the head entry is the latest loader.
pub fn latest_loader(loaders: &[LoaderVersion]) -> Option<&str> {
    loaders.first().map(|loader| loader.version.as_str())
}
