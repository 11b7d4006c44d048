//! NeoForge platform

use std::collections::HashMap;

use crate::config::NeoForgeConfig;
use crate::develop::error::ParseError;
use crate::develop::platform::{
    FetchJob, MetadataSource, Platform, PlatformDescriptor, read_property_versions,
};
use crate::develop::tree::ProjectTree;
use crate::develop::version_key::VersionKey;
use crate::meta::cache::{Format, MetadataCache};
use crate::meta::error::FetchError;
use crate::meta::maven::MavenMetadata;

pub const PLATFORM_NEOFORGE: PlatformDescriptor = PlatformDescriptor {
    name: "NeoForge",
    sub: "neoforge",
};

// Plain mods.toml belongs to Forge; NeoForge is only recognised by its own manifest.
const MARKER_PATHS: &[&str] = &[
    "src/main/resources/META-INF/neoforge.mods.toml",
    "resources/META-INF/neoforge.mods.toml",
];

const KEYS: &[VersionKey] = &[VersionKey::NeoForgeVersion];

pub struct NeoForge {
    config: NeoForgeConfig,
    api: Option<MavenMetadata>,
}

impl NeoForge {
    pub fn new(config: &NeoForgeConfig) -> Self {
        Self {
            config: config.clone(),
            api: None,
        }
    }
}

#[async_trait::async_trait]
impl Platform for NeoForge {
    fn descriptor(&self) -> PlatformDescriptor {
        PLATFORM_NEOFORGE
    }

    fn fetch_jobs(&self) -> Vec<FetchJob> {
        vec![FetchJob {
            label: "API",
            source: MetadataSource::NeoForgeMaven,
        }]
    }

    async fn fetch(&mut self, job: FetchJob, cache: &MetadataCache) -> Result<(), FetchError> {
        if job.source != MetadataSource::NeoForgeMaven {
            return Err(FetchError::UnsupportedJob {
                platform: PLATFORM_NEOFORGE.name,
                job: format!("{:?}", job.source),
            });
        }
        self.api = Some(
            cache
                .fetch(&self.config.api, "neoforge/api.xml", Format::Xml)
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
            VersionKey::NeoForgeVersion => self
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
    fn matches_only_neoforge_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let neoforge = NeoForge::new(&NeoForgeConfig::default());

        write_file(temp_dir.path(), "src/main/resources/META-INF/mods.toml", "");
        assert!(!neoforge.matches(&ProjectTree::new(temp_dir.path())));

        write_file(
            temp_dir.path(),
            "src/main/resources/META-INF/neoforge.mods.toml",
            "",
        );
        assert!(neoforge.matches(&ProjectTree::new(temp_dir.path())));
    }

    #[test]
    fn read_current_versions_reads_neoforge_version() {
        let temp_dir = TempDir::new().unwrap();
        write_file(
            temp_dir.path(),
            "gradle.properties",
            "minecraft_version=1.20.4\nneoforge_version=20.4.80-beta\n",
        );

        let versions = NeoForge::new(&NeoForgeConfig::default())
            .read_current_versions(&ProjectTree::new(temp_dir.path()))
            .unwrap();

        assert_eq!(versions[&VersionKey::NeoForgeVersion], "20.4.80-beta");
        assert_eq!(versions[&VersionKey::MinecraftVersion], "1.20.4");
    }

    #[tokio::test]
    async fn latest_version_takes_first_entry_with_game_version_prefix() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/neoforge.xml")
            .with_status(200)
            .with_body(
                "<metadata><versioning><versions>\
                 <version>20.2.86</version>\
                 <version>1.20.4-20.4.80-beta</version>\
                 <version>1.20.4-20.4.70-beta</version>\
                 <version>1.20.5-20.5.0-beta</version>\
                 </versions></versioning></metadata>",
            )
            .create_async()
            .await;

        let mut neoforge = NeoForge::new(&NeoForgeConfig {
            api: format!("{}/neoforge.xml", server.url()),
        });
        neoforge.fetch_all(&MetadataCache::new(None)).await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            neoforge.latest_version(VersionKey::NeoForgeVersion, "1.20.4"),
            Some("1.20.4-20.4.80-beta".to_string())
        );
        assert_eq!(
            neoforge.latest_version(VersionKey::NeoForgeVersion, "1.21"),
            None
        );
        assert_eq!(
            neoforge.latest_version(VersionKey::ForgeVersion, "1.20.4"),
            None
        );
    }

    #[tokio::test]
    async fn fetch_fails_on_error_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/neoforge.xml")
            .with_status(404)
            .create_async()
            .await;

        let mut neoforge = NeoForge::new(&NeoForgeConfig {
            api: format!("{}/neoforge.xml", server.url()),
        });
        let result = neoforge.fetch_all(&MetadataCache::new(None)).await;

        assert!(matches!(result, Err(FetchError::Status { .. })));
        assert_eq!(
            neoforge.latest_version(VersionKey::NeoForgeVersion, "1.20.4"),
            None
        );
    }
}
