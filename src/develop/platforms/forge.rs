//! Forge platform

use std::collections::HashMap;

use crate::config::ForgeConfig;
use crate::develop::error::ParseError;
use crate::develop::platform::{
    FetchJob, MetadataSource, Platform, PlatformDescriptor, read_property_versions,
};
use crate::develop::tree::ProjectTree;
use crate::develop::version_key::VersionKey;
use crate::meta::cache::{Format, MetadataCache};
use crate::meta::error::FetchError;
use crate::meta::maven::MavenMetadata;

pub const PLATFORM_FORGE: PlatformDescriptor = PlatformDescriptor {
    name: "Forge",
    sub: "forge",
};

const MARKER_PATHS: &[&str] = &[
    "src/main/resources/META-INF/mods.toml",
    "resources/META-INF/mods.toml",
];

const KEYS: &[VersionKey] = &[VersionKey::ForgeVersion, VersionKey::ForgeMappingsVersion];

pub struct Forge {
    config: ForgeConfig,
    api: Option<MavenMetadata>,
}

impl Forge {
    pub fn new(config: &ForgeConfig) -> Self {
        Self {
            config: config.clone(),
            api: None,
        }
    }
}

#[async_trait::async_trait]
impl Platform for Forge {
    fn descriptor(&self) -> PlatformDescriptor {
        PLATFORM_FORGE
    }

    fn fetch_jobs(&self) -> Vec<FetchJob> {
        vec![FetchJob {
            label: "API",
            source: MetadataSource::ForgeMaven,
        }]
    }

    async fn fetch(&mut self, job: FetchJob, cache: &MetadataCache) -> Result<(), FetchError> {
        if job.source != MetadataSource::ForgeMaven {
            return Err(FetchError::UnsupportedJob {
                platform: PLATFORM_FORGE.name,
                job: format!("{:?}", job.source),
            });
        }
        self.api = Some(
            cache
                .fetch(&self.config.api, "forge/api.xml", Format::Xml)
                .await?,
        );
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
            VersionKey::ForgeVersion => self
                .api
                .as_ref()?
                .latest_with_game_prefix(game_version)
                .map(str::to_string),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::develop::platforms::test_support::write_file;
    use mockito::Server;
    use tempfile::TempDir;

    #[test]
    fn matches_mods_toml_marker() {
        let temp_dir = TempDir::new().unwrap();
        let forge = Forge::new(&ForgeConfig::default());
        assert!(!forge.matches(&ProjectTree::new(temp_dir.path())));

        write_file(
            temp_dir.path(),
            "src/main/resources/META-INF/mods.toml",
            "modLoader=\"javafml\"",
        );
        assert!(forge.matches(&ProjectTree::new(temp_dir.path())));
    }

    #[tokio::test]
    async fn latest_version_takes_first_prefixed_entry() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/forge.xml")
            .with_status(200)
            .with_body(
                "<metadata><versioning><versions>\
                 <version>1.20.2-48.0.1</version>\
                 <version>1.20.1-47.2.0</version>\
                 <version>1.20.1-47.1.0</version>\
                 </versions></versioning></metadata>",
            )
            .create_async()
            .await;

        let mut forge = Forge::new(&ForgeConfig {
            api: format!("{}/forge.xml", server.url()),
        });
        forge.fetch_all(&MetadataCache::new(None)).await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            forge.latest_version(VersionKey::ForgeVersion, "1.20.1"),
            Some("1.20.1-47.2.0".to_string())
        );
        assert_eq!(
            forge.latest_version(VersionKey::ForgeMappingsVersion, "1.20.1"),
            None
        );
    }
}
