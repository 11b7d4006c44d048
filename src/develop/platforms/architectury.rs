//! Architectury multi-loader platform
//!
//! An Architectury project is a multi-module Gradle build with a `common`
//! module and one module per loader, each in the directory named after the
//! loader's [`PlatformDescriptor::sub`]. Loader-specific pins are resolved by
//! the sub-platforms detected in those directories.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::config::ArchitecturyConfig;
use crate::develop::error::ParseError;
use crate::develop::platform::{
    FetchJob, MetadataSource, Platform, PlatformDescriptor, map_keys, read_properties,
};
use crate::develop::tree::ProjectTree;
use crate::develop::version_key::VersionKey;
use crate::meta::cache::{Format, MetadataCache};
use crate::meta::error::FetchError;
use crate::meta::modrinth::{ModrinthVersion, latest_release};

pub const PLATFORM_ARCHITECTURY: PlatformDescriptor = PlatformDescriptor {
    name: "Architectury",
    sub: "",
};

const SETTINGS_PATHS: &[&str] = &["settings.gradle", "settings.gradle.kts"];
const COMMON_PATHS: &[&str] = &["common/build.gradle", "common/build.gradle.kts"];

const KEYS: &[VersionKey] = &[VersionKey::ArchitecturyVersion];

pub struct Architectury {
    config: ArchitecturyConfig,
    api: Option<Vec<ModrinthVersion>>,
    sub_platforms: IndexMap<PlatformDescriptor, Box<dyn Platform>>,
}

impl Architectury {
    pub fn new(config: &ArchitecturyConfig) -> Self {
        Self {
            config: config.clone(),
            api: None,
            sub_platforms: IndexMap::new(),
        }
    }

    /// Keeps every candidate whose own marker check passes inside its module directory.
    ///
    /// Candidates keep their order, which is the order sub-platforms are asked
    /// for latest versions.
    pub fn attach_sub_platforms(&mut self, tree: &ProjectTree, candidates: Vec<Box<dyn Platform>>) {
        self.sub_platforms.clear();
        for platform in candidates {
            let descriptor = platform.descriptor();
            if descriptor.sub.is_empty() {
                continue;
            }
            if platform.matches(&tree.sub(descriptor.sub)) {
                debug!("Detected Architectury sub-platform {}", descriptor);
                self.sub_platforms.insert(descriptor, platform);
            }
        }
    }

    pub fn sub_platforms(&self) -> impl Iterator<Item = &PlatformDescriptor> {
        self.sub_platforms.keys()
    }
}

#[async_trait::async_trait]
impl Platform for Architectury {
    fn descriptor(&self) -> PlatformDescriptor {
        PLATFORM_ARCHITECTURY
    }

    fn fetch_jobs(&self) -> Vec<FetchJob> {
        vec![FetchJob {
            label: "API",
            source: MetadataSource::ArchitecturyApi,
        }]
    }

    async fn fetch(&mut self, job: FetchJob, cache: &MetadataCache) -> Result<(), FetchError> {
        if job.source != MetadataSource::ArchitecturyApi {
            return Err(FetchError::UnsupportedJob {
                platform: PLATFORM_ARCHITECTURY.name,
                job: format!("{:?}", job.source),
            });
        }
        self.api = Some(
            cache
                .fetch(&self.config.api, "architectury/api.json", Format::Json)
                .await?,
        );
        Ok(())
    }

    /// Fetches Architectury's own sources, then every sub-platform's
    async fn fetch_all(&mut self, cache: &MetadataCache) -> Result<(), FetchError> {
        for job in self.fetch_jobs() {
            info!("Fetching {} {}", PLATFORM_ARCHITECTURY, job.label);
            self.fetch(job, cache).await?;
        }
        for platform in self.sub_platforms.values_mut() {
            platform.fetch_all(cache).await?;
        }
        Ok(())
    }

    fn matches(&self, tree: &ProjectTree) -> bool {
        tree.first_existing(SETTINGS_PATHS).is_some() && tree.first_existing(COMMON_PATHS).is_some()
    }

    fn property_keys(&self) -> &'static [VersionKey] {
        KEYS
    }

    fn read_current_versions(
        &self,
        tree: &ProjectTree,
    ) -> Result<HashMap<VersionKey, String>, ParseError> {
        let props = read_properties(tree)?;
        let mut versions = HashMap::new();
        map_keys(
            &mut versions,
            &[VersionKey::ModVersion, VersionKey::MinecraftVersion],
            &props,
        );
        map_keys(&mut versions, KEYS, &props);
        for platform in self.sub_platforms.values() {
            map_keys(&mut versions, platform.property_keys(), &props);
        }
        Ok(versions)
    }

    fn latest_version(&self, key: VersionKey, game_version: &str) -> Option<String> {
        if key == VersionKey::ArchitecturyVersion {
            return latest_release(self.api.as_deref()?, game_version);
        }
        self.sub_platforms
            .values()
            .find_map(|platform| platform.latest_version(key, game_version))
    }

    fn constituents(&self) -> Vec<PlatformDescriptor> {
        self.sub_platforms.keys().copied().collect()
    }
}
