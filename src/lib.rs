//! Keeps the version pins of a Minecraft mod project up to date.
//!
//! - [`develop`]: platform detection and project files
//! - [`meta`]: remote metadata and its on-disk cache
//! - [`updater`]: detection and version resolution
//! - [`rewriter`]: line-preserving rewrite of the version files

pub mod cli;
pub mod config;
pub mod develop;
pub mod error;
pub mod meta;
pub mod rewriter;
pub mod updater;
