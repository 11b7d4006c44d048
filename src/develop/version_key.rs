//! Version properties understood by the updater

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// A named version pin stored in `gradle.properties`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VersionKey {
    ModVersion,
    MinecraftVersion,
    ArchitecturyVersion,
    FabricLoaderVersion,
    FabricApiVersion,
    YarnMappingsVersion,
    ForgeVersion,
    ForgeMappingsVersion,
    NeoForgeVersion,
    QuiltLoaderVersion,
    QuiltFabricApiVersion,
    QuiltMappingsVersion,
}

static KEYS_BY_NAME: LazyLock<HashMap<&'static str, VersionKey>> =
    LazyLock::new(|| VersionKey::ALL.iter().map(|k| (k.key(), *k)).collect());

impl VersionKey {
    /// Every key in canonical order; update listings follow this order.
    pub const ALL: [VersionKey; 12] = [
        VersionKey::ModVersion,
        VersionKey::MinecraftVersion,
        VersionKey::ArchitecturyVersion,
        VersionKey::FabricLoaderVersion,
        VersionKey::FabricApiVersion,
        VersionKey::YarnMappingsVersion,
        VersionKey::ForgeVersion,
        VersionKey::ForgeMappingsVersion,
        VersionKey::NeoForgeVersion,
        VersionKey::QuiltLoaderVersion,
        VersionKey::QuiltFabricApiVersion,
        VersionKey::QuiltMappingsVersion,
    ];

    /// Returns the properties-file key
    pub fn key(&self) -> &'static str {
        match self {
            VersionKey::ModVersion => "mod_version",
            VersionKey::MinecraftVersion => "minecraft_version",
            VersionKey::ArchitecturyVersion => "architectury_version",
            VersionKey::FabricLoaderVersion => "fabric_loader_version",
            VersionKey::FabricApiVersion => "fabric_api_version",
            VersionKey::YarnMappingsVersion => "yarn_mappings",
            VersionKey::ForgeVersion => "forge_version",
            VersionKey::ForgeMappingsVersion => "forge_mappings_version",
            VersionKey::NeoForgeVersion => "neoforge_version",
            VersionKey::QuiltLoaderVersion => "quilt_loader_version",
            VersionKey::QuiltFabricApiVersion => "quilt_fabric_api_version",
            VersionKey::QuiltMappingsVersion => "quilt_mappings",
        }
    }

    /// Looks up a key by its properties-file name
    pub fn from_key(key: &str) -> Option<VersionKey> {
        KEYS_BY_NAME.get(key).copied()
    }

    /// Human readable label used in update listings
    pub fn label(&self) -> &'static str {
        match self {
            VersionKey::ModVersion => "Version",
            VersionKey::MinecraftVersion => "Minecraft",
            VersionKey::ArchitecturyVersion => "Architectury",
            VersionKey::FabricLoaderVersion => "Fabric Loader",
            VersionKey::FabricApiVersion => "Fabric API",
            VersionKey::YarnMappingsVersion => "Yarn Mappings",
            VersionKey::ForgeVersion => "Forge",
            VersionKey::ForgeMappingsVersion => "Forge Mappings",
            VersionKey::NeoForgeVersion => "NeoForge",
            VersionKey::QuiltLoaderVersion => "Quilt Loader",
            VersionKey::QuiltFabricApiVersion => "Quilted Fabric API",
            VersionKey::QuiltMappingsVersion => "Quilt Mappings",
        }
    }
}

impl fmt::Display for VersionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for VersionKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VersionKey::from_key(s).ok_or(())
    }
}
