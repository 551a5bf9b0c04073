//! Makefile dependency rules
//!
//! One rule per discovered source file, listing its whole include
//! closure:
//!
//! ```text
//! obj/src/a.o obj/src/a.do: \
//!     /proj/src/a.cc \
//!     /proj/src/b.h
//! ```

use crate::error::Result;
use crate::graph::DepGraph;
use std::path::Path;

pub const MAKEFILE_HEADER: &str =
    "# Do not edit this file! It is automatically generated. Changes will be lost.";

/// How object-file targets are named
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MakeOptions {
    /// Prefix for every target, e.g. `obj/i686/`
    pub objdir: String,
    /// One target per extension, e.g. `.o` and `.do`
    pub obj_exts: Vec<String>,
}

impl Default for MakeOptions {
    fn default() -> Self {
        Self {
            objdir: "obj/".to_string(),
            obj_exts: vec![".o".to_string(), ".do".to_string()],
        }
    }
}

/// Object stem of a source file: project-root prefix and source
/// extension stripped, object directory prepended
pub fn object_stem(path: &Path, root: &Path, source_exts: &[String], objdir: &str) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let relative = relative.to_string_lossy();

    let stem = source_exts
        .iter()
        .filter(|ext| relative.ends_with(ext.as_str()))
        .max_by_key(|ext| ext.len())
        .map(|ext| &relative[..relative.len() - ext.len()])
        .unwrap_or(&relative);

    format!("{objdir}{stem}")
}

pub(super) fn render(graph: &mut DepGraph<'_>, options: &MakeOptions) -> Result<String> {
    let root = graph.options().root.clone();
    let source_exts = graph.options().source_exts.clone();

    let mut out = String::from(MAKEFILE_HEADER);

    for id in graph.sources().to_vec() {
        let stem = object_stem(graph.path(id), &root, &source_exts, &options.objdir);
        let targets: Vec<String> = options
            .obj_exts
            .iter()
            .map(|ext| format!("{stem}{ext}"))
            .collect();

        out.push_str(&format!("\n\n{}:", targets.join(" ")));
        for dep in graph.closure(id)? {
            out.push_str(&format!(" \\\n\t{}", graph.path(dep).display()));
        }
    }

    out.push('\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::fixtures::*;
    use std::path::PathBuf;

    fn exts() -> Vec<String> {
        vec![".cc".to_string(), ".C".to_string(), ".c".to_string()]
    }

    #[test]
    fn test_object_stem() {
        assert_eq!(
            object_stem(Path::new("/p/src/a.cc"), Path::new("/p"), &exts(), "obj/x86/"),
            "obj/x86/src/a"
        );
        assert_eq!(
            object_stem(Path::new("/p/b.C"), Path::new("/p"), &exts(), ""),
            "b"
        );
    }

    #[test]
    fn test_object_stem_outside_root_keeps_path() {
        let stem = object_stem(&PathBuf::from("/elsewhere/c.c"), Path::new("/p"), &exts(), "o/");
        assert_eq!(stem, "o//elsewhere/c");
    }

    #[test]
    fn test_render_chain() {
        let tree = chain_tree();
        let mut g = graph(&tree);
        g.discover().unwrap();
        let out = render(&mut g, &MakeOptions::default()).unwrap();
        assert_eq!(
            out,
            format!(
                "{MAKEFILE_HEADER}\n\nobj/a.o obj/a.do: \\\n\t/p/a.cc \\\n\t/p/b.h \\\n\t/p/c.h\n"
            )
        );
    }

    #[test]
    fn test_render_excludes_unresolved() {
        let tree = crate::tree::MemoryTree::new()
            .with_file("/p/a.cc", "#include \"missing.h\"\n");
        let mut g = graph(&tree);
        g.discover().unwrap();
        let options = MakeOptions {
            objdir: String::new(),
            obj_exts: vec![".o".to_string()],
        };
        let out = render(&mut g, &options).unwrap();
        assert!(out.ends_with("\n\na.o: \\\n\t/p/a.cc\n"));
        assert!(!out.contains("missing.h"));
        assert_eq!(g.diagnostics().len(), 1);
    }
}
