//! Compile-time level forest
//!
//! Sources are grouped by compile level, lowest first. Each source
//! starts a fresh tree (blank line, then the file) and its direct
//! includes are printed below it, one tab deeper per level. A file is
//! printed at most once per tree.

use super::indent;
use crate::error::Result;
use crate::graph::{DepGraph, FileId};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeMap;

pub(super) fn render(graph: &mut DepGraph<'_>, max_indent: Option<usize>) -> Result<String> {
    let mut by_level: BTreeMap<u32, Vec<FileId>> = BTreeMap::new();
    for id in graph.sources().to_vec() {
        let level = graph.compile_level(id)?;
        by_level.entry(level).or_default().push(id);
    }

    let mut out = String::new();
    for files in by_level.values() {
        for &file in files {
            out.push_str("\n\n");
            print_tree(graph, file, max_indent, &mut out)?;
        }
    }

    out.push('\n');
    Ok(out)
}

fn print_tree(
    graph: &mut DepGraph<'_>,
    root: FileId,
    max_indent: Option<usize>,
    out: &mut String,
) -> Result<()> {
    let mut printed: FxHashSet<FileId> = FxHashSet::default();
    // Shallowest indent each file was expanded at; a deeper revisit can
    // reach nothing new.
    let mut expanded: FxHashMap<FileId, usize> = FxHashMap::default();
    let mut stack = vec![(root, 0usize)];

    while let Some((file, depth)) = stack.pop() {
        if printed.insert(file) {
            let level = graph.compile_level(file)?;
            out.push_str(&format!(
                "{}{} ({})\n",
                indent(depth),
                graph.path(file).display(),
                level
            ));
        }

        if max_indent.is_some_and(|max| depth >= max) {
            continue;
        }
        if expanded.get(&file).is_some_and(|&seen| seen <= depth) {
            continue;
        }
        expanded.insert(file, depth);

        let mut deps = graph.direct_includes(file)?;
        graph.sort_by_path(&mut deps);
        deps.dedup();
        for dep in deps.into_iter().rev() {
            stack.push((dep, depth + 1));
        }
    }

    Ok(())
}
