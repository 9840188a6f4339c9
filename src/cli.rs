//! CLI struct definitions for the `symload` command-line interface.
//!
//! All clap-derived types live here. Dispatch logic lives in `lib.rs`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "symload",
    version = env!("CARGO_PKG_VERSION"),
    about = "Resolve namespaced symbol names to source files and inspect the loader's search order.",
    disable_version_flag = true
)]
pub(crate) struct Cli {
    /// Installation root holding the core, plugins and vendor directories (default: current dir).
    #[clap(long, global = true)]
    pub root: Option<PathBuf>,
    /// Config file (default: <root>/symload.toml when present).
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,
    /// Log loader decisions to stderr (overridden by RUST_LOG).
    #[clap(long, short = 'v', global = true)]
    pub verbose: bool,
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

#[derive(clap::Args, Debug)]
pub(crate) struct FormatArgs {
    /// Output format: 'text' or 'json'.
    #[clap(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Print the candidate path for each symbol name
    #[clap(name = "resolve", visible_alias = "r")]
    Resolve {
        #[clap(required = true)]
        names: Vec<String>,
        #[clap(flatten)]
        format: FormatArgs,
    },

    /// Print the family of each symbol name
    #[clap(name = "classify", visible_alias = "c")]
    Classify {
        #[clap(required = true)]
        names: Vec<String>,
        #[clap(flatten)]
        format: FormatArgs,
    },

    /// List every include attempt the loader would make, in order
    #[clap(name = "plan", visible_alias = "p")]
    Plan {
        name: String,
        #[clap(flatten)]
        format: FormatArgs,
    },

    /// Print the first existing file the loader would include
    #[clap(name = "locate", visible_alias = "l")]
    Locate {
        name: String,
        #[clap(flatten)]
        format: FormatArgs,
    },

    /// Show version information
    #[clap(name = "version")]
    Version,
}
