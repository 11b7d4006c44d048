//! Quilt platform
//!
//! Standalone Quilt projects keep most of their pins in the Gradle version
//! catalog rather than `gradle.properties`.

use std::collections::HashMap;

use crate::config::QuiltConfig;
use crate::develop::catalog::{CATALOG_FILE, VersionCatalog};
use crate::develop::error::ParseError;
use crate::develop::platform::{
    FetchJob, MetadataSource, Platform, PlatformDescriptor, map_keys, read_properties,
};
use crate::develop::tree::ProjectTree;
use crate::develop::version_key::VersionKey;
use crate::meta::cache::{Format, MetadataCache};
use crate::meta::error::FetchError;
use crate::meta::loader::{LoaderVersion, latest_loader};
use crate::meta::mappings::{MappingsVersion, latest_mappings};
use crate::meta::maven::MavenMetadata;

pub const PLATFORM_QUILT: PlatformDescriptor = PlatformDescriptor {
    name: "Quilt",
    sub: "quilt",
};

const MARKER_PATHS: &[&str] = &[
    "src/main/resources/quilt.mod.json",
    "resources/quilt.mod.json",
];

const KEYS: &[VersionKey] = &[
    VersionKey::QuiltLoaderVersion,
    VersionKey::QuiltFabricApiVersion,
    VersionKey::QuiltMappingsVersion,
];

/// Catalog names used by the Quilt template mod
const CATALOG_ALIASES: &[(&str, VersionKey)] = &[
    ("minecraft", VersionKey::MinecraftVersion),
    ("quilt_mappings", VersionKey::QuiltMappingsVersion),
    ("quilt_loader", VersionKey::QuiltLoaderVersion),
    ("quilted_fabric_api", VersionKey::QuiltFabricApiVersion),
];

/// Maps a `[versions]` entry name of the catalog to the version key it pins
pub fn catalog_key(name: &str) -> Option<VersionKey> {
    CATALOG_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, key)| *key)
        .or_else(|| {
            VersionKey::from_key(name)
                .filter(|key| *key == VersionKey::MinecraftVersion || KEYS.contains(key))
        })
}

#[derive(Debug, Default)]
struct QuiltMeta {
    mappings: Option<Vec<MappingsVersion>>,
    loader: Option<Vec<LoaderVersion>>,
    quilted_fabric_api: Option<MavenMetadata>,
}

pub struct Quilt {
    config: QuiltConfig,
    meta: QuiltMeta,
}

impl Quilt {
    pub fn new(config: &QuiltConfig) -> Self {
        Self {
            config: config.clone(),
            meta: QuiltMeta::default(),
        }
    }
}

#[async_trait::async_trait]
impl Platform for Quilt {
    fn descriptor(&self) -> PlatformDescriptor {
        PLATFORM_QUILT
    }

    fn fetch_jobs(&self) -> Vec<FetchJob> {
        vec![
            FetchJob {
                label: "Mappings",
                source: MetadataSource::QuiltMappings,
            },
            FetchJob {
                label: "Loader",
                source: MetadataSource::QuiltLoader,
            },
            FetchJob {
                label: "Fabric API",
                source: MetadataSource::QuiltedFabricApi,
            },
        ]
    }

    async fn fetch(&mut self, job: FetchJob, cache: &MetadataCache) -> Result<(), FetchError> {
        match job.source {
            MetadataSource::QuiltMappings => {
                self.meta.mappings = Some(
                    cache
                        .fetch(
                            &self.config.quilt_mappings,
                            "quilt/quilt-mappings.json",
                            Format::Json,
                        )
                        .await?,
                );
            }
            MetadataSource::QuiltLoader => {
                self.meta.loader = Some(
                    cache
                        .fetch(&self.config.loader, "quilt/loader.json", Format::Json)
                        .await?,
                );
            }
            MetadataSource::QuiltedFabricApi => {
                self.meta.quilted_fabric_api = Some(
                    cache
                        .fetch(&self.config.quilted_fabric_api, "quilt/qfapi.xml", Format::Xml)
                        .await?,
                );
            }
            _ => {
                return Err(FetchError::UnsupportedJob {
                    platform: PLATFORM_QUILT.name,
                    job: format!("{:?}", job.source),
                });
            }
        }
        Ok(())
    }

    fn matches(&self, tree: &ProjectTree) -> bool {
        tree.first_existing(MARKER_PATHS).is_some()
    }

    fn property_keys(&self) -> &'static [VersionKey] {
        KEYS
    }

    /// Values from `gradle.properties` win; the catalog fills in the rest.
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

        let content = tree
            .read_to_string(CATALOG_FILE)
            .map_err(|source| ParseError::Io {
                path: tree.path(CATALOG_FILE),
                source,
            })?;
        let catalog = VersionCatalog::parse(&content)?;
        for entry in catalog.entries() {
            if let Some(key) = catalog_key(&entry.name) {
                versions.entry(key).or_insert_with(|| entry.value.clone());
            }
        }

        Ok(versions)
    }

    fn latest_version(&self, key: VersionKey, game_version: &str) -> Option<String> {
        match key {
            VersionKey::QuiltLoaderVersion => latest_loader(self.meta.loader.as_deref()?),
            VersionKey::QuiltFabricApiVersion => self
                .meta
                .quilted_fabric_api
                .as_ref()?
                .latest_with_game_suffix(game_version),
            VersionKey::QuiltMappingsVersion => {
                latest_mappings(self.meta.mappings.as_deref()?, game_version)
            }
            _ => None,
        }
        .map(str::to_string)
    }
}
