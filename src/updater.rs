//! Platform detection and version resolution

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::config::DevelopConfig;
use crate::develop::error::DetectError;
use crate::develop::platform::Platform;
use crate::develop::platforms::{Architectury, simple_platforms};
use crate::develop::tree::ProjectTree;
use crate::develop::version_key::VersionKey;
use crate::error::UpdateError;
use crate::meta::cache::MetadataCache;

/// Keys reported as-is; they have no upstream "latest" version
const PINNED_KEYS: [VersionKey; 2] = [VersionKey::ModVersion, VersionKey::MinecraftVersion];

/// The detected platform and the version pins read from the project
pub struct PropertyVersions {
    pub platform: Box<dyn Platform>,
    pub versions: HashMap<VersionKey, String>,
}

impl PropertyVersions {
    pub fn game_version(&self) -> Option<&str> {
        self.versions
            .get(&VersionKey::MinecraftVersion)
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionUpdateItem {
    pub key: VersionKey,
    pub current: String,
    /// `None` when the current version is already the latest, or the latest is unknown
    pub latest: Option<String>,
}

/// Resolved pins in canonical [`VersionKey::ALL`] order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionUpdateList(pub Vec<VersionUpdateItem>);

impl VersionUpdateList {
    pub fn iter(&self) -> impl Iterator<Item = &VersionUpdateItem> {
        self.0.iter()
    }

    pub fn has_updates(&self) -> bool {
        self.0.iter().any(|item| item.latest.is_some())
    }

    /// Only the pins with a resolved update, mapped to their latest value
    pub fn updates(&self) -> HashMap<VersionKey, String> {
        self.0
            .iter()
            .filter_map(|item| Some((item.key, item.latest.clone()?)))
            .collect()
    }

    /// Value each key should hold after the update: the latest if changed, else the current
    pub fn change_to_latest(&self) -> HashMap<VersionKey, String> {
        self.0
            .iter()
            .map(|item| {
                let value = item.latest.as_ref().unwrap_or(&item.current);
                (item.key, value.clone())
            })
            .collect()
    }
}

pub struct McModUpdater {
    config: DevelopConfig,
}

impl McModUpdater {
    pub fn new(config: &DevelopConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Detects the project's platform and reads its current version pins.
    ///
    /// Architectury is checked first. Otherwise the last matching platform of
    /// [`simple_platforms`] wins.
    pub fn load_tree(&self, tree: &ProjectTree) -> Result<PropertyVersions, UpdateError> {
        let platform = self.detect_platform(tree)?;
        info!("Detected {} project", platform.descriptor());

        let versions = platform.read_current_versions(tree)?;
        debug!("Current versions: {:?}", versions);

        Ok(PropertyVersions { platform, versions })
    }

    fn detect_platform(&self, tree: &ProjectTree) -> Result<Box<dyn Platform>, DetectError> {
        let mut architectury = Architectury::new(&self.config.architectury);
        if architectury.matches(tree) {
            architectury.attach_sub_platforms(tree, simple_platforms(&self.config));
            if architectury.constituents().is_empty() {
                return Err(DetectError::NoSubPlatforms);
            }
            return Ok(Box::new(architectury));
        }

        let mut detected: Option<Box<dyn Platform>> = None;
        for platform in simple_platforms(&self.config) {
            if platform.matches(tree) {
                if let Some(previous) = &detected {
                    warn!(
                        "Project matches both {} and {}, using {}",
                        previous.descriptor(),
                        platform.descriptor(),
                        platform.descriptor()
                    );
                }
                detected = Some(platform);
            }
        }

        detected.ok_or(DetectError::NoPlatform)
    }
}

/// Runs every fetch job of the detected platform, in order
pub async fn fetch_metadata(
    info: &mut PropertyVersions,
    cache: &MetadataCache,
) -> Result<(), UpdateError> {
    info.platform.fetch_all(cache).await?;
    Ok(())
}

/// Computes the update list for every pin present in the project.
///
/// Latest versions are looked up for `target_game_version` when given,
/// otherwise for the project's current `minecraft_version`.
pub fn version_update_list(
    info: &PropertyVersions,
    target_game_version: Option<&str>,
) -> VersionUpdateList {
    let game_version = target_game_version
        .or(info.game_version())
        .unwrap_or_default();

    let items = VersionKey::ALL
        .iter()
        .filter_map(|key| {
            let current = info.versions.get(key)?;
            let latest = match key {
                VersionKey::MinecraftVersion => target_game_version.map(str::to_string),
                key if PINNED_KEYS.contains(key) => None,
                key => info.platform.latest_version(*key, game_version),
            }
            .filter(|latest| latest != current);

            Some(VersionUpdateItem {
                key: *key,
                current: current.clone(),
                latest,
            })
        })
        .collect();

    VersionUpdateList(items)
}
