//! Fabric platform

use std::collections::HashMap;

use crate::config::FabricConfig;
use crate::develop::error::ParseError;
use crate::develop::platform::{
    FetchJob, MetadataSource, Platform, PlatformDescriptor, read_property_versions,
};
use crate::develop::tree::ProjectTree;
use crate::develop::version_key::VersionKey;
use crate::meta::cache::{Format, MetadataCache};
use crate::meta::error::FetchError;
use crate::meta::loader::{LoaderVersion, latest_loader};
use crate::meta::mappings::{MappingsVersion, latest_mappings};
use crate::meta::maven::MavenMetadata;

pub const PLATFORM_FABRIC: PlatformDescriptor = PlatformDescriptor {
    name: "Fabric",
    sub: "fabric",
};

const MARKER_PATHS: &[&str] = &[
    "src/main/resources/fabric.mod.json",
    "resources/fabric.mod.json",
];

const KEYS: &[VersionKey] = &[
    VersionKey::FabricLoaderVersion,
    VersionKey::FabricApiVersion,
    VersionKey::YarnMappingsVersion,
];

#[derive(Debug, Default)]
struct FabricMeta {
    yarn: Option<Vec<MappingsVersion>>,
    loader: Option<Vec<LoaderVersion>>,
    api: Option<MavenMetadata>,
}

pub struct Fabric {
    config: FabricConfig,
    meta: FabricMeta,
}

impl Fabric {
    pub fn new(config: &FabricConfig) -> Self {
        Self {
            config: config.clone(),
            meta: FabricMeta::default(),
        }
    }
}

#[async_trait::async_trait]
impl Platform for Fabric {
    fn descriptor(&self) -> PlatformDescriptor {
        PLATFORM_FABRIC
    }

    fn fetch_jobs(&self) -> Vec<FetchJob> {
        vec![
            FetchJob {
                label: "Yarn",
                source: MetadataSource::FabricYarn,
            },
            FetchJob {
                label: "Loader",
                source: MetadataSource::FabricLoader,
            },
            FetchJob {
                label: "API",
                source: MetadataSource::FabricApi,
            },
        ]
    }

    async fn fetch(&mut self, job: FetchJob, cache: &MetadataCache) -> Result<(), FetchError> {
        match job.source {
            MetadataSource::FabricYarn => {
                self.meta.yarn = Some(
                    cache
                        .fetch(&self.config.yarn, "fabric/yarn.json", Format::Json)
                        .await?,
                );
            }
            MetadataSource::FabricLoader => {
                self.meta.loader = Some(
                    cache
                        .fetch(&self.config.loader, "fabric/loader.json", Format::Json)
                        .await?,
                );
            }
            MetadataSource::FabricApi => {
                self.meta.api = Some(
                    cache
                        .fetch(&self.config.api, "fabric/api.xml", Format::Xml)
                        .await?,
                );
            }
            _ => {
                return Err(FetchError::UnsupportedJob {
                    platform: PLATFORM_FABRIC.name,
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

    fn read_current_versions(
        &self,
        tree: &ProjectTree,
    ) -> Result<HashMap<VersionKey, String>, ParseError> {
        read_property_versions(tree, KEYS)
    }

    fn latest_version(&self, key: VersionKey, game_version: &str) -> Option<String> {
        match key {
            VersionKey::FabricLoaderVersion => latest_loader(self.meta.loader.as_deref()?),
            VersionKey::FabricApiVersion => {
                self.meta.api.as_ref()?.latest_with_game_suffix(game_version)
            }
            VersionKey::YarnMappingsVersion => {
                latest_mappings(self.meta.yarn.as_deref()?, game_version)
            }
            _ => None,
        }
        .map(str::to_string)
    }
}
