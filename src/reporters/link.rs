//! Link-time level forest grouped by coupling
//!
//! Every coupling count is computed before any link level, so cycle
//! diagnostics come out in group print order. Each source starts a
//! `<density>` header followed by its link tree; the summary metrics
//! close the report.

use super::{indent, summary_lines};
use crate::error::Result;
use crate::graph::{DepGraph, FileId};
use crate::models::DensitySummary;
use rustc_hash::FxHashSet;
use std::collections::BTreeMap;

pub(super) fn render(graph: &mut DepGraph<'_>, max_level: Option<usize>) -> Result<String> {
    let sources = graph.sources().to_vec();

    let mut by_density: BTreeMap<usize, Vec<FileId>> = BTreeMap::new();
    for &id in &sources {
        let density = graph.coupling(id)?;
        by_density.entry(density).or_default().push(id);
    }

    let mut out = String::new();
    let mut ccd = 0;
    for (&density, files) in &by_density {
        for &file in files {
            out.push_str(&format!("\n<{}> ", density));
            print_tree(graph, file, max_level, &mut out)?;
            ccd += density;
        }
    }

    out.push('\n');
    out.push_str(&summary_lines(&DensitySummary::from_counts(sources.len(), ccd)));
    Ok(out)
}

fn print_tree(
    graph: &mut DepGraph<'_>,
    root: FileId,
    max_level: Option<usize>,
    out: &mut String,
) -> Result<()> {
    let mut marks: FxHashSet<FileId> = FxHashSet::default();
    let mut stack = vec![(root, 0usize)];

    while let Some((unit, depth)) = stack.pop() {
        if !marks.insert(unit) {
            continue;
        }

        let level = graph.link_level(unit)?;
        out.push_str(&format!(
            "{}{} ({})\n",
            indent(depth),
            graph.path(unit).display(),
            level
        ));

        if max_level.is_some_and(|max| depth >= max) {
            continue;
        }
        for dep in graph.link_edges(unit)?.into_iter().rev() {
            stack.push((dep, depth + 1));
        }
    }

    Ok(())
}
