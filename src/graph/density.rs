//! Coupling counts and aggregate density metrics

use super::{DepGraph, FileId};
use crate::error::Result;
use crate::models::DensitySummary;
use rustc_hash::FxHashSet;

impl DepGraph<'_> {
    /// Translation units reachable from `id` through link edges, itself included
    pub fn link_reach(&mut self, id: FileId) -> Result<Vec<FileId>> {
        let mut marks: FxHashSet<FileId> = FxHashSet::default();
        let mut reached = vec![id];
        let mut stack = vec![id];
        marks.insert(id);

        while let Some(current) = stack.pop() {
            for dep in self.link_edges(current)? {
                if marks.insert(dep) {
                    reached.push(dep);
                    stack.push(dep);
                }
            }
        }

        self.sort_by_path(&mut reached);
        Ok(reached)
    }

    /// Coupling count (CD) of a translation unit: the size of its link reach
    pub fn coupling(&mut self, id: FileId) -> Result<usize> {
        if let Some(count) = self.node(id).coupling {
            return Ok(count);
        }
        let count = self.link_reach(id)?.len();
        self.node_mut(id).coupling = Some(count);
        Ok(count)
    }

    /// CCD, ACD and NCCD over every discovered translation unit
    pub fn density_summary(&mut self) -> Result<DensitySummary> {
        let mut ccd = 0;
        for id in self.sources.clone() {
            ccd += self.coupling(id)?;
        }
        Ok(DensitySummary::from_counts(self.sources.len(), ccd))
    }
}
