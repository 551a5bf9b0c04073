//! CLI command definitions and handlers

mod init;
mod report;

use crate::config::{load_config_file, load_project_config, DepConfig};
use crate::reporters::{MakeOptions, OutputFormat, Report};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// cdeps - include dependency analysis for C and C++ trees
#[derive(Parser, Debug)]
#[command(name = "cdeps")]
#[command(
    version,
    about = "Include dependency analysis for C/C++ source trees: Makefile rules, levels and coupling metrics",
    long_about = "cdeps scans a source tree for translation units, resolves their \
#include \"...\" directives and reports on the resulting graph.\n\n\
Run without a subcommand to emit Makefile dependency rules for the current directory:\n  \
cdeps . > Makefile.dep\n\n\
Diagnostics (missing includes, link cycles) go to stderr; reports go to stdout.",
    after_help = "\
Examples:
  cdeps .                              Makefile rules for the current directory
  cdeps src -I ../shared/include       Extra include search root
  cdeps . compile-levels --max-indent 2
  cdeps . link-levels                  Levels grouped by coupling, with CCD/ACD/NCCD
  cdeps . metrics --format json        Per-file metrics for scripting
  cdeps . link-groups                  Translation units that link in a cycle"
)]
pub struct Cli {
    /// Project root (default: current directory)
    #[arg(global = true, default_value = ".")]
    pub path: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Config file (default: cdeps.toml or .cdepsrc.json in the project root)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Extra include search root, tried after the project root (repeatable).
    /// Relative paths are taken from the current directory.
    #[arg(long = "include", short = 'I', global = true, value_name = "DIR")]
    pub include: Vec<PathBuf>,

    /// Prefix for object-file targets (default: obj/$ARCH/ or obj/)
    #[arg(long, global = true, env = "CDEPS_OBJDIR")]
    pub objdir: Option<String>,

    /// Translation-unit suffix (repeatable, replaces the configured list)
    #[arg(long = "source-ext", global = true, value_name = "EXT")]
    pub source_ext: Vec<String>,

    /// Extension a header maps to when looking for its translation unit
    #[arg(long = "link-ext", global = true, value_name = "EXT")]
    pub link_ext: Option<String>,

    /// Directory name never searched for sources (repeatable)
    #[arg(long = "prune-dir", global = true, value_name = "NAME")]
    pub prune_dir: Vec<String>,

    /// Output file path (default: stdout)
    #[arg(long, short = 'o', global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write an example cdeps.toml to the project root
    Init,

    /// Makefile dependency rules, one per translation unit (default)
    Make,

    /// Direct includes of every translation unit
    Direct,

    /// Compile-time level forest, grouped by level
    CompileLevels {
        /// Stop expanding below this indent (default: unlimited)
        #[arg(long)]
        max_indent: Option<usize>,
    },

    /// Link-time level forest grouped by coupling, followed by CCD/ACD/NCCD
    LinkLevels {
        /// Stop expanding below this depth (default: unlimited)
        #[arg(long)]
        max_level: Option<usize>,
    },

    /// Every translation unit each unit needs at link time
    LinkDeps,

    /// Translation units that depend on each other in a cycle
    LinkGroups,

    /// Coupling-density summary
    Metrics {
        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
}

/// Run the CLI
pub fn run(cli: Cli) -> Result<()> {
    let root = cli
        .path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", cli.path.display()))?;

    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let config = effective_config(&cli, &root, &cwd)?;

    let report = match &cli.command {
        Some(Commands::Init) => return init::run(&root),
        None | Some(Commands::Make) => Report::Makefile(MakeOptions {
            objdir: config.effective_objdir(),
            obj_exts: config.obj_exts.clone(),
        }),
        Some(Commands::Direct) => Report::Direct,
        Some(Commands::CompileLevels { max_indent }) => Report::CompileLevels {
            max_indent: *max_indent,
        },
        Some(Commands::LinkLevels { max_level }) => Report::LinkLevels {
            max_level: *max_level,
        },
        Some(Commands::LinkDeps) => Report::LinkDeps,
        Some(Commands::LinkGroups) => Report::LinkGroups,
        Some(Commands::Metrics { format }) => {
            let format: OutputFormat = format.parse().map_err(anyhow::Error::msg)?;
            Report::Metrics(format)
        }
    };

    report::run(&root, &config, &report, cli.output.as_deref())
}

/// Config file values with command-line flags applied on top.
///
/// Config-file include dirs stay relative to the project root; `-I`
/// dirs are made absolute against `cwd`, like a compiler's.
fn effective_config(cli: &Cli, root: &Path, cwd: &Path) -> Result<DepConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config_file(path)?,
        None => load_project_config(root),
    };

    config
        .include_dirs
        .extend(cli.include.iter().map(|dir| cwd.join(dir)));
    if let Some(objdir) = &cli.objdir {
        config.objdir = Some(objdir.clone());
    }
    if !cli.source_ext.is_empty() {
        config.source_exts = cli.source_ext.clone();
    }
    if let Some(link_ext) = &cli.link_ext {
        config.link_ext = link_ext.clone();
    }
    config.prune_dirs.extend(cli.prune_dir.iter().cloned());

    Ok(config)
}
