//! Direct includes per source file: `<file> --> dep dep ...`

use crate::error::Result;
use crate::graph::DepGraph;

pub(super) fn render(graph: &mut DepGraph<'_>) -> Result<String> {
    let mut out = String::new();
    for id in graph.sources().to_vec() {
        out.push_str(&format!("{} -->", graph.path(id).display()));
        for dep in graph.direct_includes(id)? {
            out.push_str(&format!(" {}", graph.path(dep).display()));
        }
        out.push('\n');
    }
    Ok(out)
}
