//! Filesystem access for the include-graph engine
//!
//! The engine never touches `std::fs` directly. Everything goes through a
//! [`SourceTree`], so a run works against a single snapshot and tests can
//! use an in-memory tree.

mod disk;
mod memory;

pub use disk::DiskTree;
pub use memory::MemoryTree;

use crate::error::Result;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// One directory visited by a walk, with the plain files it directly contains
pub type DirListing = (PathBuf, Vec<OsString>);

/// Read-only view of a source tree
pub trait SourceTree {
    /// Walk `root` top-down, returning each visited directory with the
    /// names of the files it contains (sorted).
    ///
    /// Directories matching `rules` are not descended into. The root
    /// itself is always visited.
    fn walk(&self, root: &Path, rules: &PruneRules) -> Result<Vec<DirListing>>;

    /// Whether `path` names an existing regular file
    fn is_file(&self, path: &Path) -> bool;

    /// Read a whole file. Invalid UTF-8 is replaced, not rejected.
    fn read_to_string(&self, path: &Path) -> Result<String>;
}

/// Which directories a walk skips
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneRules {
    /// Base names that are never descended into
    pub prune_dirs: Vec<String>,
    /// Skip directories whose base name starts with an uppercase letter
    /// (the convention for generated or vendored subtrees)
    pub skip_uppercase: bool,
}

impl Default for PruneRules {
    fn default() -> Self {
        Self {
            prune_dirs: Vec::new(),
            skip_uppercase: true,
        }
    }
}

impl PruneRules {
    /// Whether a directory with this base name is skipped
    pub fn prunes(&self, dir_name: &str) -> bool {
        if self.prune_dirs.iter().any(|d| d == dir_name) {
            return true;
        }
        self.skip_uppercase && dir_name.chars().next().is_some_and(char::is_uppercase)
    }
}
