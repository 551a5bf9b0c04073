//! Output reporters for cdeps
//!
//! Every report renders to a `String` destined for the primary output
//! stream. Diagnostics never appear here; they go through `tracing` to
//! stderr.
//!
//! - `makefile` - Makefile dependency rules (the default)
//! - `direct` - direct includes per source file
//! - `compile` - compile-time level forest
//! - `link` - link-time level forest grouped by coupling, plus metrics
//! - `link_deps` - raw translation-unit reachability pairs
//! - `groups` - cyclic link groups
//! - `json` - per-file metrics and summary as JSON

mod compile;
mod direct;
mod groups;
mod json;
mod link;
mod link_deps;
mod makefile;

pub use makefile::{MakeOptions, MAKEFILE_HEADER};

use crate::error::Result;
use crate::graph::DepGraph;
use crate::models::DensitySummary;
use std::str::FromStr;

/// Output format for the metrics report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Which report to render
#[derive(Debug, Clone)]
pub enum Report {
    Makefile(MakeOptions),
    Direct,
    /// `None` means no indent cutoff
    CompileLevels { max_indent: Option<usize> },
    /// `None` means no depth cutoff
    LinkLevels { max_level: Option<usize> },
    LinkDeps,
    LinkGroups,
    Metrics(OutputFormat),
}

/// Render a report over the discovered sources of `graph`.
///
/// Memo tables are filled lazily while rendering, so the graph is
/// borrowed mutably; diagnostics found along the way are recorded on it.
pub fn render(graph: &mut DepGraph<'_>, report: &Report) -> Result<String> {
    match report {
        Report::Makefile(options) => makefile::render(graph, options),
        Report::Direct => direct::render(graph),
        Report::CompileLevels { max_indent } => compile::render(graph, *max_indent),
        Report::LinkLevels { max_level } => link::render(graph, *max_level),
        Report::LinkDeps => link_deps::render(graph),
        Report::LinkGroups => groups::render(graph),
        Report::Metrics(OutputFormat::Text) => Ok(summary_lines(&graph.density_summary()?)),
        Report::Metrics(OutputFormat::Json) => json::render(graph),
    }
}

/// The trailing summary block of the link/density report
pub fn summary_lines(summary: &DensitySummary) -> String {
    format!(
        "N == {}\nCCD == {}\nACD == {:.6}\nCCD(tree) == {:.6}\nNCCD == {:.6}\n",
        summary.n, summary.ccd, summary.acd, summary.ccd_tree, summary.nccd
    )
}

/// `count` tab characters
fn indent(count: usize) -> String {
    "\t".repeat(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("TEXT".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert!("sarif".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_summary_lines() {
        let summary = DensitySummary::from_counts(3, 5);
        assert_eq!(
            summary_lines(&summary),
            "N == 3\nCCD == 5\nACD == 1.666667\nCCD(tree) == 5.000000\nNCCD == 1.000000\n"
        );
    }
}
