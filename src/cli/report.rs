//! Report commands - discover sources, build the graph and render one report

use crate::config::DepConfig;
use crate::graph::DepGraph;
use crate::reporters::{self, Report};
use crate::tree::DiskTree;
use anyhow::{Context, Result};
use console::style;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Run one report over the project rooted at `root`
pub fn run(root: &Path, config: &DepConfig, report: &Report, output: Option<&Path>) -> Result<()> {
    let options = config.graph_options(root);
    debug!("Search roots: {:?}", options.search_roots());

    let tree = DiskTree::new();
    let mut graph = DepGraph::new(&tree, options);
    graph
        .discover()
        .with_context(|| format!("Failed to scan {}", root.display()))?;

    let rendered = reporters::render(&mut graph, report)?;

    let diagnostics = graph.diagnostics().len();
    if diagnostics > 0 {
        info!("{} diagnostic(s) reported", diagnostics);
    }

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Report written to: {}", style(path.display()).cyan());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .context("Failed to write report")?;
            stdout.flush().context("Failed to write report")?;
        }
    }

    Ok(())
}
