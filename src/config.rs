use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

// =============================================================================
// Cache-related constants
// =============================================================================

/// Maximum age of a cached metadata file before it is fetched again (1 hour)
pub const CACHE_FRESHNESS: Duration = Duration::from_secs(60 * 60);

/// Name used for the config, cache and user agent
pub const APP_NAME: &str = "mcmodupdater";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub develop: DevelopConfig,
    /// Keep fetched metadata on disk for [`CACHE_FRESHNESS`]
    pub cache: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            develop: DevelopConfig::default(),
            cache: true,
        }
    }
}

/// Metadata source URLs grouped by platform
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DevelopConfig {
    pub architectury: ArchitecturyConfig,
    pub fabric: FabricConfig,
    pub forge: ForgeConfig,
    pub quilt: QuiltConfig,
    pub neoforge: NeoForgeConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ArchitecturyConfig {
    pub api: String,
}

impl Default for ArchitecturyConfig {
    fn default() -> Self {
        Self {
            api: "https://api.modrinth.com/v2/project/architectury-api/version".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FabricConfig {
    pub yarn: String,
    pub loader: String,
    pub api: String,
}

impl Default for FabricConfig {
    fn default() -> Self {
        Self {
            yarn: "https://meta.fabricmc.net/v2/versions/yarn".to_string(),
            loader: "https://meta.fabricmc.net/v2/versions/loader".to_string(),
            api: "https://maven.fabricmc.net/net/fabricmc/fabric-api/fabric-api/maven-metadata.xml"
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ForgeConfig {
    pub api: String,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            api: "https://maven.minecraftforge.net/net/minecraftforge/forge/maven-metadata.xml"
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct QuiltConfig {
    pub quilt_mappings: String,
    pub loader: String,
    pub quilted_fabric_api: String,
}

impl Default for QuiltConfig {
    fn default() -> Self {
        Self {
            quilt_mappings: "https://meta.quiltmc.org/v3/versions/quilt-mappings".to_string(),
            loader: "https://meta.quiltmc.org/v3/versions/loader".to_string(),
            quilted_fabric_api: "https://maven.quiltmc.org/repository/release/org/quiltmc/quilted-fabric-api/quilted-fabric-api/maven-metadata.xml".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct NeoForgeConfig {
    pub api: String,
}

impl Default for NeoForgeConfig {
    fn default() -> Self {
        Self {
            api: "https://maven.neoforged.net/net/neoforged/neoforge/maven-metadata.xml"
                .to_string(),
        }
    }
}

impl Config {
    /// Loads the config at `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_str(&content).map_err(|source| ConfigError::Invalid {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Writes the config as pretty JSON, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Invalid {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, content + "\n").map_err(io_err)
    }
}

/// Returns the path to the config directory for mcmodupdater.
/// Uses $XDG_CONFIG_HOME/mcmodupdater if XDG_CONFIG_HOME is set,
/// otherwise the platform config dir, or ./mcmodupdater if neither is available.
pub fn config_dir() -> PathBuf {
    app_dir_with_env(std::env::var("XDG_CONFIG_HOME").ok(), dirs::config_dir())
}

/// Returns the path to the cache directory for mcmodupdater.
pub fn cache_dir() -> PathBuf {
    app_dir_with_env(std::env::var("XDG_CACHE_HOME").ok(), dirs::cache_dir())
}

/// Returns the path to the config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

/// Returns the root under which per-platform metadata is cached.
pub fn platform_cache_dir() -> PathBuf {
    cache_dir().join("platforms")
}

fn app_dir_with_env(xdg_home: Option<String>, fallback: Option<PathBuf>) -> PathBuf {
    let base = xdg_home
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or(fallback)
        .unwrap_or_else(|| PathBuf::from("."));

    base.join(APP_NAME)
}
