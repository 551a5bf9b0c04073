//! Core data models shared by the graph engine and the reporters

use serde::Serialize;
use std::path::PathBuf;

/// A recoverable problem found while building the graph.
///
/// Diagnostics never abort a run; the affected edge is dropped and the
/// computation continues with a smaller graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// `#include "..."` could not be found in any search root or the
    /// including file's own directory
    UnresolvedInclude {
        file: PathBuf,
        include: String,
        search_roots: Vec<PathBuf>,
    },
    /// A translation unit reached itself through header -> source mapping.
    /// `from` is the unit being expanded, `to` the antecedent it pointed back at.
    LinkCycle { from: PathBuf, to: PathBuf },
    /// A header includes itself, directly or transitively
    IncludeCycle { from: PathBuf, to: PathBuf },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::UnresolvedInclude {
                file,
                include,
                search_roots,
            } => {
                let roots: Vec<String> = search_roots
                    .iter()
                    .map(|r| r.display().to_string())
                    .collect();
                write!(
                    f,
                    "missing dependency in file {}: '{}' (search path: [{}])",
                    file.display(),
                    include,
                    roots.join(", ")
                )
            }
            Diagnostic::LinkCycle { from, to } => {
                write!(f, "CYCLE! {} <--> {}", to.display(), from.display())
            }
            Diagnostic::IncludeCycle { from, to } => {
                write!(f, "include cycle: {} -> {}", from.display(), to.display())
            }
        }
    }
}

/// Per-file numbers for a discovered translation unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileMetrics {
    pub path: PathBuf,
    pub compile_level: u32,
    pub link_level: u32,
    pub coupling: usize,
}

/// Aggregate coupling-density metrics over all discovered translation units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct DensitySummary {
    /// Number of translation units
    pub n: usize,
    /// Cumulative component dependency, the sum of all coupling counts
    pub ccd: usize,
    /// Average component dependency
    pub acd: f64,
    /// CCD of a balanced binary tree with `n` nodes
    pub ccd_tree: f64,
    /// Normalized CCD; 1.0 means tree-like layering
    pub nccd: f64,
}

impl DensitySummary {
    /// Build the summary from a cumulative count over `n` units
    pub fn from_counts(n: usize, ccd: usize) -> Self {
        let ccd_tree = balanced_ccd(n);
        let acd = if n == 0 { 0.0 } else { ccd as f64 / n as f64 };
        let nccd = if ccd_tree > 0.0 { ccd as f64 / ccd_tree } else { 0.0 };
        Self {
            n,
            ccd,
            acd,
            ccd_tree,
            nccd,
        }
    }
}

/// CCD of a balanced binary dependency tree with `n` nodes:
/// `(n+1) * (log2(n+1) - 1) + 1`
pub fn balanced_ccd(n: usize) -> f64 {
    let n1 = (n + 1) as f64;
    n1 * (n1.log2() - 1.0) + 1.0
}

/// Full metrics document, rendered by the JSON reporter
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub files: Vec<FileMetrics>,
    pub summary: DensitySummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_balanced_ccd_small_trees() {
        assert!((balanced_ccd(1) - 1.0).abs() < EPSILON);
        assert!((balanced_ccd(3) - 5.0).abs() < EPSILON);
        assert!((balanced_ccd(7) - 17.0).abs() < EPSILON);
    }

    #[test]
    fn test_summary_of_balanced_tree_is_one() {
        // 15-node balanced tree: 1x15 + 2x7 + 4x3 + 8x1
        let summary = DensitySummary::from_counts(15, 15 + 14 + 12 + 8);
        assert!((summary.nccd - 1.0).abs() < EPSILON);
        assert!((summary.acd - 49.0 / 15.0).abs() < EPSILON);
    }

    #[test]
    fn test_summary_empty_project() {
        let summary = DensitySummary::from_counts(0, 0);
        assert_eq!(summary.n, 0);
        assert_eq!(summary.acd, 0.0);
        assert_eq!(summary.nccd, 0.0);
        assert!(summary.ccd_tree.abs() < EPSILON);
    }

    #[test]
    fn test_link_cycle_display_names_both_ends() {
        let diag = Diagnostic::LinkCycle {
            from: PathBuf::from("/p/b.cc"),
            to: PathBuf::from("/p/a.cc"),
        };
        assert_eq!(diag.to_string(), "CYCLE! /p/a.cc <--> /p/b.cc");
    }
}
