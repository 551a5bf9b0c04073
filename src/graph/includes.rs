//! `#include "..."` extraction and resolution

use super::{DepGraph, FileId};
use crate::error::Result;
use crate::models::Diagnostic;
use crate::tree::SourceTree;
use regex::Regex;
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;
use tracing::trace;

static INCLUDE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn include_pattern() -> &'static Regex {
    // One directive per physical line; `<...>` includes never match.
    INCLUDE_PATTERN.get_or_init(|| {
        Regex::new(r#"(?m)^[ \t]*#[ \t]*include[ \t]*"([^"\r\n]*)""#)
            .expect("include pattern is a valid regex")
    })
}

/// Raw targets of every quoted include in `text`, in directive order
pub fn extract_includes(text: &str) -> Vec<&str> {
    include_pattern()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// Lexically normalize a path: drop `.` components and fold `..` into
/// the preceding component. Symlinks are not consulted.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let last = out.components().next_back();
                match last {
                    Some(Component::Normal(_)) => {
                        out.pop();
                    }
                    Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                    _ => out.push(".."),
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Maps a raw include string to an existing file.
///
/// Search roots are tried in order; the including file's own directory
/// is the last resort.
#[derive(Debug, Clone)]
pub struct IncludeResolver {
    search_roots: Vec<PathBuf>,
}

impl IncludeResolver {
    pub fn new(search_roots: Vec<PathBuf>) -> Self {
        Self { search_roots }
    }

    pub fn search_roots(&self) -> &[PathBuf] {
        &self.search_roots
    }

    /// Resolve `raw` against the search roots, then `ego_dir`.
    /// Returns the normalized path of the first existing candidate.
    pub fn resolve(&self, tree: &dyn SourceTree, raw: &str, ego_dir: &Path) -> Option<PathBuf> {
        self.search_roots
            .iter()
            .map(PathBuf::as_path)
            .chain(std::iter::once(ego_dir))
            .map(|dir| normalize_path(&dir.join(raw)))
            .find(|candidate| tree.is_file(candidate))
    }
}

impl DepGraph<'_> {
    /// Resolved direct includes of `id`, in directive order.
    ///
    /// The file is read on first request only. Unresolvable directives
    /// are dropped and reported as [`Diagnostic::UnresolvedInclude`].
    pub fn direct_includes(&mut self, id: FileId) -> Result<Vec<FileId>> {
        if let Some(direct) = &self.node(id).direct {
            return Ok(direct.clone());
        }

        let path = self.path(id).to_path_buf();
        let text = self.tree.read_to_string(&path)?;
        let ego_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

        let mut resolved = Vec::new();
        for raw in extract_includes(&text) {
            match self.resolver.resolve(self.tree, raw, &ego_dir) {
                Some(target) => {
                    trace!("{} includes {}", path.display(), target.display());
                    resolved.push(self.id(&target));
                }
                None => self.report(Diagnostic::UnresolvedInclude {
                    file: path.clone(),
                    include: raw.to_string(),
                    search_roots: self.resolver.search_roots().to_vec(),
                }),
            }
        }

        self.node_mut(id).direct = Some(resolved.clone());
        Ok(resolved)
    }
}
