//! Platform contract shared by every supported mod loader ecosystem

use std::collections::HashMap;
use std::fmt;

#[cfg(test)]
use mockall::automock;
use tracing::info;

use crate::develop::error::ParseError;
use crate::develop::properties;
use crate::develop::tree::ProjectTree;
use crate::develop::version_key::VersionKey;
use crate::meta::cache::MetadataCache;
use crate::meta::error::FetchError;

/// Name of the properties file holding the version pins
pub const PROPERTIES_FILE: &str = "gradle.properties";

/// Identifies a platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlatformDescriptor {
    /// Display name
    pub name: &'static str,
    /// Sub-directory holding this platform's module inside an Architectury project
    pub sub: &'static str,
}

impl fmt::Display for PlatformDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// One remote metadata source of a platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchJob {
    pub label: &'static str,
    pub source: MetadataSource,
}

/// Every remote metadata source known to the updater
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataSource {
    ArchitecturyApi,
    FabricYarn,
    FabricLoader,
    FabricApi,
    ForgeMaven,
    NeoForgeMaven,
    QuiltMappings,
    QuiltLoader,
    QuiltedFabricApi,
}

/// Contract implemented by each mod loader ecosystem.
///
/// Fetched metadata lives inside the platform instance. Instances are created
/// per run by [`crate::updater::McModUpdater`], so nothing fetched outlives the run.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Platform: Send + Sync {
    fn descriptor(&self) -> PlatformDescriptor;

    /// Metadata sources this platform needs, in fetch order
    fn fetch_jobs(&self) -> Vec<FetchJob>;

    /// Fetches one source into this platform's metadata
    async fn fetch(&mut self, job: FetchJob, cache: &MetadataCache) -> Result<(), FetchError>;

    /// Runs every fetch job in order, stopping at the first failure
    async fn fetch_all(&mut self, cache: &MetadataCache) -> Result<(), FetchError> {
        for job in self.fetch_jobs() {
            info!("Fetching {} {}", self.descriptor(), job.label);
            self.fetch(job, cache).await?;
        }
        Ok(())
    }

    /// True if the tree contains one of this platform's marker files
    fn matches(&self, tree: &ProjectTree) -> bool;

    /// Version keys this platform reads from `gradle.properties`, besides
    /// `mod_version` and `minecraft_version`
    fn property_keys(&self) -> &'static [VersionKey];

    /// Reads the current version pins this platform recognises
    fn read_current_versions(
        &self,
        tree: &ProjectTree,
    ) -> Result<HashMap<VersionKey, String>, ParseError>;

    /// Latest version of `key` compatible with `game_version`, from already fetched metadata
    fn latest_version(&self, key: VersionKey, game_version: &str) -> Option<String>;

    /// Platforms whose metadata is also needed, for composite platforms
    fn constituents(&self) -> Vec<PlatformDescriptor> {
        Vec::new()
    }
}

/// Reads `gradle.properties` from the tree root
pub fn read_properties(tree: &ProjectTree) -> Result<HashMap<String, String>, ParseError> {
    let path = tree.path(PROPERTIES_FILE);
    let content = tree
        .read_to_string(PROPERTIES_FILE)
        .map_err(|source| ParseError::Io {
            path: path.clone(),
            source,
        })?;

    properties::parse(&content)
        .map(|props| props.into_iter().collect())
        .map_err(|source| ParseError::Properties { path, source })
}

/// Copies `keys` present in `props` into `out`
pub fn map_keys(
    out: &mut HashMap<VersionKey, String>,
    keys: &[VersionKey],
    props: &HashMap<String, String>,
) {
    for key in keys {
        if let Some(value) = props.get(key.key()) {
            out.insert(*key, value.clone());
        }
    }
}

/// Reads the common keys plus the platform's own keys from `gradle.properties`
pub fn read_property_versions(
    tree: &ProjectTree,
    keys: &[VersionKey],
) -> Result<HashMap<VersionKey, String>, ParseError> {
    let props = read_properties(tree)?;
    let mut versions = HashMap::new();
    map_keys(
        &mut versions,
        &[VersionKey::ModVersion, VersionKey::MinecraftVersion],
        &props,
    );
    map_keys(&mut versions, keys, &props);
    Ok(versions)
}
