//! In-memory tree snapshot

use super::{DirListing, PruneRules, SourceTree};
use crate::error::{DepError, Result};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// [`SourceTree`] holding file contents in memory.
///
/// Directories exist implicitly as ancestors of the stored files.
#[derive(Debug, Clone, Default)]
pub struct MemoryTree {
    files: BTreeMap<PathBuf, String>,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.insert(path, contents);
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into());
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl SourceTree for MemoryTree {
    fn walk(&self, root: &Path, rules: &PruneRules) -> Result<Vec<DirListing>> {
        let mut dirs: BTreeMap<PathBuf, Vec<OsString>> = BTreeMap::new();
        let mut root_exists = false;

        'files: for path in self.files.keys() {
            let Ok(rel) = path.strip_prefix(root) else {
                continue;
            };
            root_exists = true;

            let components: Vec<_> = rel.components().collect();
            let Some((file_name, parents)) = components.split_last() else {
                continue;
            };

            let mut dir = root.to_path_buf();
            for component in parents {
                let name = component.as_os_str().to_string_lossy();
                if rules.prunes(&name) {
                    continue 'files;
                }
                dir.push(component);
                dirs.entry(dir.clone()).or_default();
            }

            dirs.entry(dir)
                .or_default()
                .push(file_name.as_os_str().to_os_string());
        }

        if !root_exists {
            return Err(DepError::NotADirectory(root.to_path_buf()));
        }

        dirs.entry(root.to_path_buf()).or_default();
        Ok(dirs.into_iter().collect())
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            DepError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such file in tree"),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_groups_files_by_dir() {
        let tree = MemoryTree::new()
            .with_file("/p/a.cc", "")
            .with_file("/p/sub/b.cc", "")
            .with_file("/p/sub/c.h", "")
            .with_file("/other/x.cc", "");

        let listing = tree.walk(Path::new("/p"), &PruneRules::default()).unwrap();
        assert_eq!(
            listing,
            vec![
                (PathBuf::from("/p"), vec![OsString::from("a.cc")]),
                (
                    PathBuf::from("/p/sub"),
                    vec![OsString::from("b.cc"), OsString::from("c.h")]
                ),
            ]
        );
    }

    #[test]
    fn test_walk_prunes_uppercase() {
        let tree = MemoryTree::new()
            .with_file("/p/src/a.cc", "")
            .with_file("/p/Generated/b.cc", "")
            .with_file("/p/Generated/deep/c.cc", "");

        let listing = tree.walk(Path::new("/p"), &PruneRules::default()).unwrap();
        let dirs: Vec<PathBuf> = listing.into_iter().map(|(d, _)| d).collect();
        assert_eq!(dirs, vec![PathBuf::from("/p"), PathBuf::from("/p/src")]);
    }

    #[test]
    fn test_missing_root() {
        let tree = MemoryTree::new().with_file("/p/a.cc", "");
        assert!(matches!(
            tree.walk(Path::new("/q"), &PruneRules::default()),
            Err(DepError::NotADirectory(_))
        ));
    }
}
