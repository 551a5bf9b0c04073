//! JSON reporter
//!
//! Per-file levels and coupling counts plus the density summary, as
//! pretty-printed JSON for piping to jq or further processing.

use crate::error::Result;
use crate::graph::DepGraph;
use crate::models::{FileMetrics, MetricsReport};

/// Collect the metrics report for every discovered translation unit
pub fn metrics_report(graph: &mut DepGraph<'_>) -> Result<MetricsReport> {
    let mut files = Vec::with_capacity(graph.sources().len());
    for id in graph.sources().to_vec() {
        files.push(FileMetrics {
            path: graph.path(id).to_path_buf(),
            compile_level: graph.compile_level(id)?,
            link_level: graph.link_level(id)?,
            coupling: graph.coupling(id)?,
        });
    }

    Ok(MetricsReport {
        files,
        summary: graph.density_summary()?,
    })
}

pub(super) fn render(graph: &mut DepGraph<'_>) -> Result<String> {
    let report = metrics_report(graph)?;
    let mut out = serde_json::to_string_pretty(&report)?;
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::fixtures::*;
    use crate::tree::MemoryTree;

    #[test]
    fn test_json_render_valid() {
        let tree = chain_tree();
        let mut g = graph(&tree);
        g.discover().unwrap();
        let json_str = render(&mut g).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");

        let files = parsed["files"].as_array().expect("files array");
        assert_eq!(files.len(), 1);
        assert_eq!(files[0]["path"], "/p/a.cc");
        assert_eq!(files[0]["compile_level"], 2);
        assert_eq!(files[0]["link_level"], 0);
        assert_eq!(files[0]["coupling"], 1);
        assert_eq!(parsed["summary"]["n"], 1);
        assert_eq!(parsed["summary"]["ccd"], 1);
    }

    #[test]
    fn test_json_empty_project() {
        let tree = MemoryTree::new().with_file("/p/readme.txt", "");
        let mut g = graph(&tree);
        g.discover().unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(&render(&mut g).unwrap()).expect("parse JSON");
        assert_eq!(parsed["files"].as_array().expect("files array").len(), 0);
        assert_eq!(parsed["summary"]["n"], 0);
        assert_eq!(parsed["summary"]["nccd"], 0.0);
    }
}
