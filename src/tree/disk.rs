//! Real filesystem tree

use super::{DirListing, PruneRules, SourceTree};
use crate::error::{DepError, Result};
use ignore::WalkBuilder;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

/// [`SourceTree`] backed by the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskTree;

impl DiskTree {
    pub fn new() -> Self {
        Self
    }
}

impl SourceTree for DiskTree {
    fn walk(&self, root: &Path, rules: &PruneRules) -> Result<Vec<DirListing>> {
        if !root.is_dir() {
            return Err(DepError::NotADirectory(root.to_path_buf()));
        }

        let filter_rules = rules.clone();
        let mut builder = WalkBuilder::new(root);
        builder
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                if entry.depth() == 0 {
                    return true;
                }
                let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
                if !is_dir {
                    return true;
                }
                let name = entry.file_name().to_string_lossy();
                let pruned = filter_rules.prunes(&name);
                if pruned {
                    debug!("Pruning directory {}", entry.path().display());
                }
                !pruned
            });

        let mut dirs: BTreeMap<PathBuf, Vec<OsString>> = BTreeMap::new();

        for entry in builder.build() {
            let entry = entry.map_err(|e| walk_error(root, e))?;

            let Some(file_type) = entry.file_type() else {
                continue;
            };

            // Links are not followed, but a link to a regular file is listed
            let is_file = file_type.is_file()
                || (file_type.is_symlink() && entry.path().is_file());

            if file_type.is_dir() {
                dirs.entry(entry.path().to_path_buf()).or_default();
            } else if is_file {
                let Some(parent) = entry.path().parent() else {
                    continue;
                };
                dirs.entry(parent.to_path_buf())
                    .or_default()
                    .push(entry.file_name().to_os_string());
            }
        }

        Ok(dirs.into_iter().collect())
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path).map_err(|e| DepError::io(path, e))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Path an `ignore` error is about, looking through its wrappers
fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        ignore::Error::Loop { child, .. } => Some(child.as_path()),
        _ => None,
    }
}

/// A walk failure, blamed on the entry that failed rather than the root
fn walk_error(root: &Path, err: ignore::Error) -> DepError {
    let path = error_path(&err).unwrap_or(root).to_path_buf();
    let kind = err
        .io_error()
        .map(|io| io.kind())
        .unwrap_or(std::io::ErrorKind::Other);
    DepError::io(path, std::io::Error::new(kind, err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_skips_pruned_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("src/util")).unwrap();
        std::fs::create_dir_all(root.join("Generated")).unwrap();
        std::fs::write(root.join("src/a.cc"), "").unwrap();
        std::fs::write(root.join("src/util/b.h"), "").unwrap();
        std::fs::write(root.join("Generated/c.cc"), "").unwrap();

        let listing = DiskTree::new()
            .walk(root, &PruneRules::default())
            .unwrap();

        let dirs: Vec<&PathBuf> = listing.iter().map(|(d, _)| d).collect();
        assert!(dirs.contains(&&root.join("src")));
        assert!(dirs.contains(&&root.join("src/util")));
        assert!(!dirs.iter().any(|d| d.ends_with("Generated")));

        let src_files = &listing
            .iter()
            .find(|(d, _)| d == &root.join("src"))
            .unwrap()
            .1;
        assert_eq!(src_files, &vec![OsString::from("a.cc")]);
    }

    #[test]
    fn test_walk_rejects_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = DiskTree::new()
            .walk(&missing, &PruneRules::default())
            .unwrap_err();
        assert!(matches!(err, DepError::NotADirectory(_)));
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DiskTree::new()
            .read_to_string(&dir.path().join("gone.h"))
            .unwrap_err();
        assert!(matches!(err, DepError::Io { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_lists_symlinked_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("real")).unwrap();
        std::fs::write(root.join("a.cc"), "").unwrap();
        std::fs::write(root.join("real/x.txt"), "").unwrap();
        std::os::unix::fs::symlink(root.join("real/x.txt"), root.join("linked.cc")).unwrap();
        std::os::unix::fs::symlink(root.join("gone.txt"), root.join("dangling.cc")).unwrap();

        let listing = DiskTree::new()
            .walk(root, &PruneRules::default())
            .unwrap();
        let top = &listing.iter().find(|(d, _)| d == root).unwrap().1;
        assert_eq!(top, &vec![OsString::from("a.cc"), OsString::from("linked.cc")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_source_is_discovered() {
        use crate::graph::{DepGraph, GraphOptions};

        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        std::fs::create_dir_all(root.join("real")).unwrap();
        std::fs::write(root.join("a.cc"), "").unwrap();
        std::fs::write(root.join("real/x.txt"), "").unwrap();
        std::os::unix::fs::symlink(root.join("real/x.txt"), root.join("linked.cc")).unwrap();

        let tree = DiskTree::new();
        let mut graph = DepGraph::new(&tree, GraphOptions::new(&root));
        let found = graph.discover().unwrap();
        let paths: Vec<PathBuf> = found.iter().map(|id| graph.path(*id).to_path_buf()).collect();
        assert_eq!(paths, vec![root.join("a.cc"), root.join("linked.cc")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_source_name_is_readable() {
        use crate::graph::{DepGraph, GraphOptions};
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let name = std::ffi::OsStr::from_bytes(b"caf\xe9.cc");
        if std::fs::write(root.join(name), "#include \"b.h\"\n").is_err() {
            // Filesystem rejects non-UTF-8 names
            return;
        }
        std::fs::write(root.join("b.h"), "").unwrap();

        let tree = DiskTree::new();
        let mut graph = DepGraph::new(&tree, GraphOptions::new(&root));
        let found = graph.discover().unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(graph.path(found[0]), root.join(name));
        assert_eq!(graph.closure(found[0]).unwrap().len(), 2);
    }

    #[test]
    fn test_walk_error_names_failing_entry() {
        let denied = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
        let err = ignore::Error::WithDepth {
            depth: 2,
            err: Box::new(ignore::Error::WithPath {
                path: PathBuf::from("/proj/src/locked"),
                err: Box::new(ignore::Error::Io(denied)),
            }),
        };

        match walk_error(Path::new("/proj"), err) {
            DepError::Io { path, source } => {
                assert_eq!(path, PathBuf::from("/proj/src/locked"));
                assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);
            }
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn test_walk_error_without_path_blames_root() {
        let err = ignore::Error::Io(std::io::Error::other("boom"));
        match walk_error(Path::new("/proj"), err) {
            DepError::Io { path, .. } => assert_eq!(path, PathBuf::from("/proj")),
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
