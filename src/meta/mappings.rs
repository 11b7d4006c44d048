//! Yarn and Quilt mappings listings

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MappingsVersion {
    pub game_version: String,
    pub separator: String,
    pub build: i64,
    pub maven: String,
    pub version: String,
    pub stable: bool,
}

/// First entry built for exactly `game_version`
pub fn latest_mappings<'a>(
    mappings: &'a [MappingsVersion],
    game_version: &str,
) -> Option<&'a str> {
    mappings
        .iter()
        .find(|m| m.game_version == game_version)
        .map(|m| m.version.as_str())
}
