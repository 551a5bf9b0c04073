//! Raw link dependencies: one `unit dep` pair per reachable translation unit

use crate::error::Result;
use crate::graph::DepGraph;

pub(super) fn render(graph: &mut DepGraph<'_>) -> Result<String> {
    let mut out = String::new();
    for id in graph.sources().to_vec() {
        let file = graph.path(id).display().to_string();
        for dep in graph.link_reach(id)? {
            if dep == id {
                continue;
            }
            out.push_str(&format!("{:<35} {}\n", file, graph.path(dep).display()));
        }
    }
    Ok(out)
}
