//! Remote metadata layer
//!
//! - cache.rs: fetch-or-serve-from-disk primitive used by every platform
//! - maven.rs: `maven-metadata.xml` model and version selection
//! - loader.rs: Fabric/Quilt loader listings
//! - mappings.rs: Yarn/Quilt mappings listings
//! - modrinth.rs: Modrinth version listings
//! - error.rs: fetch and cache errors

pub mod cache;
pub mod error;
pub mod loader;
pub mod mappings;
pub mod maven;
pub mod modrinth;
