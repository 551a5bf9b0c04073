//! Source discovery

use super::{DepGraph, FileId};
use crate::error::{DepError, Result};
use rustc_hash::FxHashSet;
use std::ffi::OsStr;
use tracing::{debug, info};

impl DepGraph<'_> {
    /// Walk the project root and record every translation unit.
    ///
    /// A file is a translation unit when its name ends with one of the
    /// configured source extensions. Finding the same path twice is an
    /// invariant violation and aborts the run.
    pub fn discover(&mut self) -> Result<Vec<FileId>> {
        let root = self.options.root.clone();
        let listing = self.tree.walk(&root, &self.options.prune)?;

        let mut seen: FxHashSet<FileId> = FxHashSet::default();
        let mut sources = Vec::new();

        for (dir, files) in listing {
            for name in files {
                if !self.is_source_name(&name) {
                    continue;
                }
                let full = dir.join(&name);
                let id = self.id(&full);
                if !seen.insert(id) {
                    return Err(DepError::DuplicateSource(full));
                }
                debug!("Discovered {}", full.display());
                sources.push(id);
            }
        }

        self.sort_by_path(&mut sources);
        info!("Discovered {} source files under {}", sources.len(), root.display());
        self.sources = sources.clone();
        Ok(sources)
    }

    fn is_source_name(&self, name: &OsStr) -> bool {
        let name = name.as_encoded_bytes();
        self.options
            .source_exts
            .iter()
            .any(|ext| name.len() > ext.len() && name.ends_with(ext.as_bytes()))
    }
}
