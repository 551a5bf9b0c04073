//! Include dependency graph
//!
//! [`DepGraph`] owns every memo table for one run: direct includes,
//! transitive closures, compile/link levels and coupling counts. Each
//! table is filled lazily, at most once per file, and never changes
//! afterwards.
//!
//! Nodes are interned paths ([`FileId`]); edges are id lists. All
//! traversals use explicit stacks, so deep include chains cannot
//! overflow the call stack.

mod closure;
mod density;
mod discovery;
mod groups;
mod includes;
pub mod interner;
mod levels;

pub use includes::{extract_includes, normalize_path, IncludeResolver};
pub use interner::{FileId, PathInterner};

use crate::models::Diagnostic;
use crate::tree::{PruneRules, SourceTree};
use interner::slot;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Everything the engine needs to know about the project layout
#[derive(Debug, Clone)]
pub struct GraphOptions {
    /// Primary root: walked for sources, first search root, and the
    /// prefix stripped when deriving object stems
    pub root: PathBuf,
    /// Additional include search roots, tried after `root`
    pub include_dirs: Vec<PathBuf>,
    /// File-name suffixes of translation units (".cc", ".C", ".c")
    pub source_exts: Vec<String>,
    /// Extension a header is mapped to when looking for its translation unit
    pub link_ext: String,
    pub prune: PruneRules,
}

impl GraphOptions {
    /// Options with the canonical defaults for a project root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            include_dirs: Vec::new(),
            source_exts: vec![".cc".to_string(), ".C".to_string(), ".c".to_string()],
            link_ext: ".cc".to_string(),
            prune: PruneRules::default(),
        }
    }

    /// Ordered include search roots: the project root, then extra dirs
    pub fn search_roots(&self) -> Vec<PathBuf> {
        std::iter::once(&self.root)
            .chain(self.include_dirs.iter())
            .map(|p| normalize_path(p))
            .collect()
    }
}

/// Per-file memo slots
#[derive(Debug, Default)]
struct Node {
    direct: Option<Vec<FileId>>,
    closure: Option<Vec<FileId>>,
    compile_level: Option<u32>,
    link_edges: Option<Vec<FileId>>,
    link_level: Option<u32>,
    coupling: Option<usize>,
}

/// The dependency-graph builder for one invocation
pub struct DepGraph<'t> {
    tree: &'t dyn SourceTree,
    options: GraphOptions,
    resolver: IncludeResolver,
    interner: PathInterner,
    nodes: Vec<Node>,
    sources: Vec<FileId>,
    diagnostics: Vec<Diagnostic>,
}

impl<'t> DepGraph<'t> {
    pub fn new(tree: &'t dyn SourceTree, options: GraphOptions) -> Self {
        let resolver = IncludeResolver::new(options.search_roots());
        Self {
            tree,
            options,
            resolver,
            interner: PathInterner::new(),
            nodes: Vec::new(),
            sources: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn options(&self) -> &GraphOptions {
        &self.options
    }

    /// Intern a path (normalized first) and return its id
    pub fn id(&mut self, path: impl AsRef<Path>) -> FileId {
        let normalized = normalize_path(path.as_ref());
        let id = self.interner.intern(&normalized);
        if self.nodes.len() < self.interner.len() {
            self.nodes.resize_with(self.interner.len(), Node::default);
        }
        id
    }

    /// Path of an interned file
    pub fn path(&self, id: FileId) -> &Path {
        self.interner.resolve(id)
    }

    /// Discovered translation units, sorted by path. Empty until
    /// [`DepGraph::discover`] has run.
    pub fn sources(&self) -> &[FileId] {
        &self.sources
    }

    /// Recoverable problems seen so far, in detection order
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Sort ids by their path's byte string
    pub fn sort_by_path(&self, ids: &mut [FileId]) {
        ids.sort_by(|a, b| self.path(*a).as_os_str().cmp(self.path(*b).as_os_str()));
    }

    fn node(&self, id: FileId) -> &Node {
        &self.nodes[slot(id)]
    }

    fn node_mut(&mut self, id: FileId) -> &mut Node {
        &mut self.nodes[slot(id)]
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }
}
