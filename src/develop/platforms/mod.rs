//! Platform implementations

pub mod architectury;
pub mod fabric;
pub mod forge;
pub mod neoforge;
pub mod quilt;

pub use architectury::{Architectury, PLATFORM_ARCHITECTURY};
pub use fabric::{Fabric, PLATFORM_FABRIC};
pub use forge::{Forge, PLATFORM_FORGE};
pub use neoforge::{NeoForge, PLATFORM_NEOFORGE};
pub use quilt::{PLATFORM_QUILT, Quilt};

use crate::config::DevelopConfig;
use crate::develop::platform::Platform;

/// Creates a fresh instance of every single-loader platform, in detection order.
///
/// When more than one matches a tree the last one wins, so more specific
/// platforms come after the ones they could be mistaken for.
pub fn simple_platforms(config: &DevelopConfig) -> Vec<Box<dyn Platform>> {
    vec![
        Box::new(Fabric::new(&config.fabric)),
        Box::new(Forge::new(&config.forge)),
        Box::new(Quilt::new(&config.quilt)),
        Box::new(NeoForge::new(&config.neoforge)),
    ]
}
