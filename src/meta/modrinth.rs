//! Modrinth project version listing

use semver::{BuildMetadata, Prerelease, Version};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ModrinthVersion {
    pub game_versions: Vec<String>,
    pub loaders: Vec<String>,
    pub version_number: String,
}

/// Highest release compatible with `game_version`.
///
/// Pre-release and build metadata are ignored when ordering; among equal
/// versions the later listing wins. The returned string has build metadata
/// removed, so `9.2.14+fabric` is reported as `9.2.14`.
pub fn latest_release(versions: &[ModrinthVersion], game_version: &str) -> Option<String> {
    versions
        .iter()
        .filter(|v| v.game_versions.iter().any(|g| g == game_version))
        .filter_map(|v| parse_lenient(&v.version_number))
        .max_by(|a, b| core_version(a).cmp(&core_version(b)))
        .map(|mut version| {
            version.build = BuildMetadata::EMPTY;
            version.to_string()
        })
}

/// Parses a version number, padding partial versions like "9" or "9.2".
fn parse_lenient(version: &str) -> Option<Version> {
    let version = version.strip_prefix('v').unwrap_or(version);
    let split_at = version.find(['-', '+']).unwrap_or(version.len());
    let (core, suffix) = version.split_at(split_at);

    let padded = match core.split('.').count() {
        1 => format!("{}.0.0{}", core, suffix),
        2 => format!("{}.0{}", core, suffix),
        _ => version.to_string(),
    };
    Version::parse(&padded).ok()
}

fn core_version(version: &Version) -> Version {
    let mut core = version.clone();
    core.pre = Prerelease::EMPTY;
    core.build = BuildMetadata::EMPTY;
    core
}
