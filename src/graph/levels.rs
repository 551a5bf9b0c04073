//! Compile-time and link-time levels
//!
//! A level is the length of the longest dependency chain starting at a
//! file. Compile-time levels follow direct includes. Link-time levels
//! follow link edges: each header in a unit's closure is mapped to the
//! translation unit with the same stem and the link extension.
//!
//! Link levels are memoized per file regardless of which antecedent
//! path first reached it. When the link graph has cycles, a level
//! computed while one edge of the cycle was cut is reused even when a
//! later query would have cut a different edge. Levels are therefore
//! approximate (possibly underestimated) on cyclic link graphs, not an
//! exact longest-acyclic-path.

use super::{DepGraph, FileId};
use crate::error::Result;
use crate::models::Diagnostic;
use rustc_hash::FxHashSet;

/// One in-progress node of an iterative longest-path DFS
struct Frame {
    node: FileId,
    deps: Vec<FileId>,
    next: usize,
    best: u32,
}

impl Frame {
    fn new(node: FileId, deps: Vec<FileId>) -> Self {
        Self {
            node,
            deps,
            next: 0,
            best: 0,
        }
    }
}

#[derive(Clone, Copy)]
enum LevelSpace {
    Compile,
    Link,
}

impl DepGraph<'_> {
    /// Longest include chain from `id`; 0 for a file with no includes
    pub fn compile_level(&mut self, id: FileId) -> Result<u32> {
        self.longest_chain(id, LevelSpace::Compile)
    }

    /// Longest link-edge chain from `id`, cutting edges that close a cycle.
    ///
    /// Each cut edge is reported once as [`Diagnostic::LinkCycle`].
    pub fn link_level(&mut self, id: FileId) -> Result<u32> {
        self.longest_chain(id, LevelSpace::Link)
    }

    /// Translation units one link step away from `id`, sorted by path.
    ///
    /// Every file in the closure of `id` is mapped to its stem plus the
    /// link extension. The mapped unit counts when it exists and is not
    /// `id` itself.
    pub fn link_edges(&mut self, id: FileId) -> Result<Vec<FileId>> {
        if let Some(edges) = &self.node(id).link_edges {
            return Ok(edges.clone());
        }

        let own = self.path(id).to_path_buf();
        let ext = self.options.link_ext.trim_start_matches('.').to_string();

        let mut seen: FxHashSet<FileId> = FxHashSet::default();
        let mut edges = Vec::new();
        for member in self.closure(id)? {
            let unit = self.path(member).with_extension(&ext);
            if unit == own || !self.tree.is_file(&unit) {
                continue;
            }
            let unit_id = self.id(&unit);
            if seen.insert(unit_id) {
                edges.push(unit_id);
            }
        }

        self.sort_by_path(&mut edges);
        self.node_mut(id).link_edges = Some(edges.clone());
        Ok(edges)
    }

    fn memo_level(&self, id: FileId, space: LevelSpace) -> Option<u32> {
        match space {
            LevelSpace::Compile => self.node(id).compile_level,
            LevelSpace::Link => self.node(id).link_level,
        }
    }

    fn store_level(&mut self, id: FileId, space: LevelSpace, level: u32) {
        let node = self.node_mut(id);
        match space {
            LevelSpace::Compile => node.compile_level = Some(level),
            LevelSpace::Link => node.link_level = Some(level),
        }
    }

    fn edges(&mut self, id: FileId, space: LevelSpace) -> Result<Vec<FileId>> {
        match space {
            LevelSpace::Compile => self.direct_includes(id),
            LevelSpace::Link => self.link_edges(id),
        }
    }

    fn cycle(&mut self, from: FileId, to: FileId, space: LevelSpace) {
        let from = self.path(from).to_path_buf();
        let to = self.path(to).to_path_buf();
        match space {
            LevelSpace::Compile => self.report(Diagnostic::IncludeCycle { from, to }),
            LevelSpace::Link => self.report(Diagnostic::LinkCycle { from, to }),
        }
    }

    /// Iterative longest-path DFS. The frame stack doubles as the
    /// antecedent list: an edge back into it closes a cycle and is skipped.
    fn longest_chain(&mut self, id: FileId, space: LevelSpace) -> Result<u32> {
        if let Some(level) = self.memo_level(id, space) {
            return Ok(level);
        }

        let mut on_stack: FxHashSet<FileId> = FxHashSet::default();
        let mut stack = vec![Frame::new(id, self.edges(id, space)?)];
        on_stack.insert(id);

        while let Some(frame) = stack.last_mut() {
            let next = frame.deps.get(frame.next).copied();
            let Some(dep) = next else {
                let done = stack.pop().map(|f| (f.node, f.best));
                if let Some((node, level)) = done {
                    self.store_level(node, space, level);
                    on_stack.remove(&node);
                    if let Some(parent) = stack.last_mut() {
                        parent.best = parent.best.max(level + 1);
                    }
                }
                continue;
            };

            frame.next += 1;
            let node = frame.node;

            if let Some(level) = self.memo_level(dep, space) {
                frame.best = frame.best.max(level + 1);
            } else if on_stack.contains(&dep) {
                self.cycle(node, dep, space);
            } else {
                let deps = self.edges(dep, space)?;
                on_stack.insert(dep);
                stack.push(Frame::new(dep, deps));
            }
        }

        Ok(self.memo_level(id, space).unwrap_or_default())
    }
}
