//! Project-level configuration support
//!
//! Loads per-project configuration from `cdeps.toml` or `.cdepsrc.json`
//! in the project root. Command-line flags override these values.
//!
//! # Configuration Format
//!
//! ```toml
//! # cdeps.toml
//!
//! # Extra include search roots, tried after the project root
//! include_dirs = ["../shared/include"]
//!
//! # Prefix for object-file targets (default: obj/$ARCH/)
//! objdir = "build/obj/"
//!
//! # One makefile target per extension
//! obj_exts = [".o", ".do"]
//!
//! source_exts = [".cc", ".C", ".c"]
//! link_ext = ".cc"
//!
//! prune_dirs = [".git", ".svn"]
//! skip_uppercase_dirs = true
//! ```

use crate::error::{DepError, Result};
use crate::graph::GraphOptions;
use crate::tree::PruneRules;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Config file names, in lookup order
pub const CONFIG_FILE_NAMES: &[&str] = &["cdeps.toml", ".cdepsrc.json"];

/// Example written by `cdeps init`
pub const EXAMPLE_CONFIG: &str = r#"# cdeps configuration
#
# Command-line flags override every setting here.

# Extra include search roots, tried after the project root.
# Relative paths are taken from the project root.
include_dirs = []

# Prefix for object-file targets in makefile rules.
# Default: "obj/$ARCH/" when ARCH is set, otherwise "obj/".
# objdir = "obj/"

# One makefile target per extension, in this order.
obj_exts = [".o", ".do"]

# File-name suffixes treated as translation units.
source_exts = [".cc", ".C", ".c"]

# Extension a header maps to when looking for its translation unit.
link_ext = ".cc"

# Directory names never searched for sources.
prune_dirs = [".git", ".svn"]

# Skip directories whose name starts with an uppercase letter
# (generated or vendored subtrees).
skip_uppercase_dirs = true
"#;

/// Project-level configuration loaded from cdeps.toml or .cdepsrc.json
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DepConfig {
    /// Extra include search roots
    #[serde(default)]
    pub include_dirs: Vec<PathBuf>,

    /// Object-file prefix override
    #[serde(default)]
    pub objdir: Option<String>,

    /// Makefile target extensions
    #[serde(default = "default_obj_exts")]
    pub obj_exts: Vec<String>,

    /// Translation-unit suffixes (case-sensitive)
    #[serde(default = "default_source_exts")]
    pub source_exts: Vec<String>,

    /// Header -> translation unit mapping extension
    #[serde(default = "default_link_ext")]
    pub link_ext: String,

    /// Directory base names never descended into
    #[serde(default = "default_prune_dirs")]
    pub prune_dirs: Vec<String>,

    /// Skip directories starting with an uppercase letter
    #[serde(default = "default_true")]
    pub skip_uppercase_dirs: bool,
}

impl Default for DepConfig {
    fn default() -> Self {
        Self {
            include_dirs: Vec::new(),
            objdir: None,
            obj_exts: default_obj_exts(),
            source_exts: default_source_exts(),
            link_ext: default_link_ext(),
            prune_dirs: default_prune_dirs(),
            skip_uppercase_dirs: true,
        }
    }
}

fn default_obj_exts() -> Vec<String> {
    vec![".o".to_string(), ".do".to_string()]
}

fn default_source_exts() -> Vec<String> {
    vec![".cc".to_string(), ".C".to_string(), ".c".to_string()]
}

fn default_link_ext() -> String {
    ".cc".to_string()
}

fn default_prune_dirs() -> Vec<String> {
    vec![".git".to_string(), ".svn".to_string()]
}

fn default_true() -> bool {
    true
}

impl DepConfig {
    /// Object-file prefix: the configured objdir, else `obj/<arch>/`,
    /// else `obj/`. Always ends with `/` unless empty.
    pub fn objdir_for_arch(&self, arch: Option<&str>) -> String {
        let mut objdir = match (&self.objdir, arch) {
            (Some(dir), _) => dir.clone(),
            (None, Some(arch)) if !arch.is_empty() => format!("obj/{arch}/"),
            (None, _) => "obj/".to_string(),
        };
        if !objdir.is_empty() && !objdir.ends_with('/') {
            objdir.push('/');
        }
        objdir
    }

    /// Object-file prefix using the `ARCH` environment variable
    pub fn effective_objdir(&self) -> String {
        let arch = std::env::var("ARCH").ok();
        self.objdir_for_arch(arch.as_deref())
    }

    /// Engine options for a project rooted at `root`.
    /// Relative include dirs are taken from `root`.
    pub fn graph_options(&self, root: &Path) -> GraphOptions {
        let include_dirs = self
            .include_dirs
            .iter()
            .map(|dir| {
                if dir.is_absolute() {
                    dir.clone()
                } else {
                    root.join(dir)
                }
            })
            .collect();

        GraphOptions {
            root: root.to_path_buf(),
            include_dirs,
            source_exts: self.source_exts.clone(),
            link_ext: self.link_ext.clone(),
            prune: PruneRules {
                prune_dirs: self.prune_dirs.clone(),
                skip_uppercase: self.skip_uppercase_dirs,
            },
        }
    }
}

/// Load project configuration from the project root.
///
/// Searches for `cdeps.toml`, then `.cdepsrc.json`. Returns defaults if
/// no config file is found or the one found cannot be parsed.
pub fn load_project_config(root: &Path) -> DepConfig {
    for name in CONFIG_FILE_NAMES {
        let path = root.join(name);
        if !path.exists() {
            continue;
        }
        match load_config_file(&path) {
            Ok(config) => {
                debug!("Loaded project config from {}", path.display());
                return config;
            }
            Err(e) => {
                warn!("{}", e);
            }
        }
    }

    debug!("No project config found, using defaults");
    DepConfig::default()
}

/// Load one config file; `.json` files are parsed as JSON, anything else as TOML
pub fn load_config_file(path: &Path) -> Result<DepConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| DepError::io(path, e))?;

    let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
    let parsed = if is_json {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    } else {
        toml::from_str(&content).map_err(|e| e.to_string())
    };

    parsed.map_err(|message| DepError::Config {
        path: path.to_path_buf(),
        message,
    })
}

#[cfg(test)]
mod tests;
