//! Read-only view of a project directory

use std::path::{Path, PathBuf};

/// Path-addressable, read-only handle to a project tree.
///
/// All lookups take `/`-separated paths relative to the tree root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTree {
    root: PathBuf,
}

impl ProjectTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a tree-relative path
    pub fn path(&self, relative: &str) -> PathBuf {
        relative
            .split('/')
            .filter(|part| !part.is_empty())
            .fold(self.root.clone(), |path, part| path.join(part))
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.path(relative).is_file()
    }

    /// Returns the first candidate that exists, in candidate order
    pub fn first_existing<'a>(&self, candidates: &[&'a str]) -> Option<&'a str> {
        candidates
            .iter()
            .copied()
            .find(|candidate| self.exists(candidate))
    }

    pub fn read_to_string(&self, relative: &str) -> std::io::Result<String> {
        std::fs::read_to_string(self.path(relative))
    }

    /// View of a sub-directory, rooted at `dir`
    pub fn sub(&self, dir: &str) -> ProjectTree {
        ProjectTree::new(self.path(dir))
    }
}
