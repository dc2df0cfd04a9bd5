//! CLI argument definitions for the `inspector` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use inspector_cli::commands::InputFiles;

#[derive(Parser)]
#[command(
    name = "inspector",
    version,
    about = "Inspect an app builder runtime-state snapshot",
    long_about = "Project a runtime-state snapshot into the inspector tree.\n\n\
                  Prints the normalized tree, resolved icons, and the actions\n\
                  available on a node, or copies a node's value to stdout."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the normalized tree as JSON.
    Tree(InputArgs),

    /// List the icon resolved for each component and query.
    Icons(InputArgs),

    /// List the actions available on a node.
    Actions(PathArgs),

    /// Copy a node's value to stdout.
    Copy(PathArgs),
}

#[derive(Args)]
pub struct InputArgs {
    /// Runtime-state snapshot (JSON object keyed by category).
    #[arg(long = "state", value_name = "FILE")]
    pub state: PathBuf,

    /// App definition with components, data queries, and the selection.
    #[arg(long = "app", value_name = "FILE")]
    pub app: Option<PathBuf>,

    /// Plugin data sources (JSON array).
    #[arg(long = "data-sources", value_name = "FILE")]
    pub data_sources: Option<PathBuf>,

    /// Inspector options (TOML).
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl InputArgs {
    pub fn files(&self) -> InputFiles {
        InputFiles {
            state: self.state.clone(),
            app: self.app.clone(),
            data_sources: self.data_sources.clone(),
            config: self.config.clone(),
        }
    }
}

#[derive(Args)]
pub struct PathArgs {
    /// Dotted node path, e.g. `components.button1`; write `\.` for a dot inside a name.
    #[arg(value_name = "PATH")]
    pub path: String,

    #[command(flatten)]
    pub inputs: InputArgs,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
