//! Configuration module for cdeps
//!
//! This module handles:
//! - Project-level configuration (cdeps.toml / .cdepsrc.json)
//! - Defaults for object prefixes, extensions and pruned directories

mod project_config;

pub use project_config::{
    load_config_file, load_project_config, DepConfig, CONFIG_FILE_NAMES, EXAMPLE_CONFIG,
};
