//! Path interning for the include graph
//!
//! Every file the engine touches gets a small [`FileId`]. Memo tables are
//! then plain vectors indexed by that id instead of maps keyed by path.

use lasso::{Key, Rodeo, Spur};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// A file key - small (4 bytes) reference to an interned path
pub type FileId = Spur;

/// Dense index for a [`FileId`], usable as a vector offset
#[inline]
pub fn slot(id: FileId) -> usize {
    id.into_usize()
}

/// Interner for normalized absolute paths
#[derive(Debug, Default)]
pub struct PathInterner {
    inner: Rodeo,
    paths: Vec<PathBuf>,
}

impl PathInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a path, returning its key.
    /// If the path was already interned, returns the existing key.
    pub fn intern(&mut self, path: &Path) -> FileId {
        let key = self.inner.get_or_intern(intern_key(path));
        if slot(key) == self.paths.len() {
            self.paths.push(path.to_path_buf());
        }
        key
    }

    /// Get the path for a key
    #[inline]
    pub fn resolve(&self, id: FileId) -> &Path {
        &self.paths[slot(id)]
    }

    /// Try to get a key for an already-interned path
    #[inline]
    pub fn get(&self, path: &Path) -> Option<FileId> {
        self.inner.get(intern_key(path))
    }

    /// Number of unique paths interned
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Lossless string key for a path. Non-UTF-8 paths get an escaped form
/// behind a NUL, which no real path contains.
fn intern_key(path: &Path) -> Cow<'_, str> {
    match path.to_str() {
        Some(s) => Cow::Borrowed(s),
        None => Cow::Owned(format!("\0{:?}", path.as_os_str())),
    }
}
