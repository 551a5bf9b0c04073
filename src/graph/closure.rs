//! Transitive include closures

use super::{DepGraph, FileId};
use crate::error::Result;
use rustc_hash::FxHashSet;

impl DepGraph<'_> {
    /// Every file reachable from `id` through direct includes, `id`
    /// included, sorted by path.
    ///
    /// Nodes are marked before they are expanded and never expanded
    /// twice, so a cyclic include graph still terminates.
    pub fn closure(&mut self, id: FileId) -> Result<Vec<FileId>> {
        if let Some(closure) = &self.node(id).closure {
            return Ok(closure.clone());
        }

        let mut marks: FxHashSet<FileId> = FxHashSet::default();
        let mut reached = vec![id];
        let mut stack = vec![id];
        marks.insert(id);

        while let Some(current) = stack.pop() {
            for dep in self.direct_includes(current)? {
                if marks.insert(dep) {
                    reached.push(dep);
                    stack.push(dep);
                }
            }
        }

        self.sort_by_path(&mut reached);
        self.node_mut(id).closure = Some(reached.clone());
        Ok(reached)
    }
}
