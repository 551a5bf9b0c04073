//! Cyclic link groups
//!
//! Link levels only cut cycles approximately. This finds them exactly:
//! every strongly connected component of the link graph with more than
//! one unit is a group of translation units that cannot be linked in
//! layers.

use super::{DepGraph, FileId};
use crate::error::Result;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::FxHashMap;

impl DepGraph<'_> {
    /// Cyclic link groups among the discovered units and every unit they
    /// reach. Members are sorted by path; groups by their first member.
    pub fn link_groups(&mut self) -> Result<Vec<Vec<FileId>>> {
        let mut graph: DiGraph<FileId, ()> = DiGraph::new();
        let mut indices: FxHashMap<FileId, NodeIndex> = FxHashMap::default();
        let mut pending = Vec::new();

        for id in self.sources.clone() {
            indices.entry(id).or_insert_with(|| {
                pending.push(id);
                graph.add_node(id)
            });
        }

        while let Some(unit) = pending.pop() {
            let from = indices[&unit];
            for dep in self.link_edges(unit)? {
                let to = *indices.entry(dep).or_insert_with(|| {
                    pending.push(dep);
                    graph.add_node(dep)
                });
                graph.add_edge(from, to, ());
            }
        }

        let mut groups: Vec<Vec<FileId>> = tarjan_scc(&graph)
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .map(|scc| scc.into_iter().map(|idx| graph[idx]).collect())
            .collect();

        for group in &mut groups {
            self.sort_by_path(group);
        }
        groups.sort_by(|a, b| self.path(a[0]).as_os_str().cmp(self.path(b[0]).as_os_str()));
        Ok(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use crate::tree::MemoryTree;

    #[test]
    fn test_finds_cyclic_group() {
        let tree = MemoryTree::new()
            .with_file("/p/a.cc", "#include \"b.h\"\n")
            .with_file("/p/a.h", "")
            .with_file("/p/b.cc", "#include \"c.h\"\n")
            .with_file("/p/b.h", "")
            .with_file("/p/c.cc", "#include \"a.h\"\n")
            .with_file("/p/c.h", "")
            .with_file("/p/main.cc", "#include \"a.h\"\n");
        let mut g = graph(&tree);
        g.discover().unwrap();
        let groups = g.link_groups().unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(paths(&g, &groups[0]), vec!["/p/a.cc", "/p/b.cc", "/p/c.cc"]);
    }

    #[test]
    fn test_acyclic_has_no_groups() {
        let tree = chain_tree();
        let mut g = graph(&tree);
        g.discover().unwrap();
        assert!(g.link_groups().unwrap().is_empty());
    }
}
