//! Project side of the updater
//!
//! - version_key.rs: version properties and their `gradle.properties` keys
//! - platform.rs: Platform trait shared by every mod loader
//! - platforms/: Fabric, Forge, Quilt, NeoForge and Architectury
//! - tree.rs: read-only view of the project directory
//! - properties.rs: `.properties` reader
//! - catalog.rs: Gradle version catalog reader

pub mod catalog;
pub mod error;
pub mod platform;
pub mod platforms;
pub mod properties;
pub mod tree;
pub mod version_key;

pub use error::{DetectError, ParseError};
pub use platform::{Platform, PlatformDescriptor};
pub use tree::ProjectTree;
pub use version_key::VersionKey;
