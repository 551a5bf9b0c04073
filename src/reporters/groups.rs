//! Cyclic link groups: `size  member member ...` per group

use crate::error::Result;
use crate::graph::DepGraph;
use tracing::info;

pub(super) fn render(graph: &mut DepGraph<'_>) -> Result<String> {
    let groups = graph.link_groups()?;
    if groups.is_empty() {
        info!("no cyclic link groups");
        return Ok(String::new());
    }

    let mut out = String::new();
    for group in &groups {
        let members: Vec<String> = group
            .iter()
            .map(|id| graph.path(*id).display().to_string())
            .collect();
        out.push_str(&format!("{:4}  {}\n", group.len(), members.join(" ")));
    }
    Ok(out)
}
