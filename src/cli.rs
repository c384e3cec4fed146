use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::export::model::ExportFormat;

/// Module-level import cross-reference for Python projects.
///
/// py-xref reads import statements as text (it never imports or runs the
/// inspected code), resolves relative imports to dotted module names, and
/// reports which project modules each module depends on.
#[derive(Parser, Debug)]
#[command(
    name = "py-xref",
    version,
    about,
    long_about = None,
    propagate_version = true,
)]
pub struct Cli {
    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan one project and write its cross-reference reports.
    Scan {
        /// Project root; module names are relative to it.
        root: PathBuf,

        /// Module files and package directories to include, in report order.
        #[arg(required = true)]
        sources: Vec<String>,

        /// Project name used in report filenames (default: root directory name).
        #[arg(short, long)]
        name: Option<String>,

        /// Directory receiving the reports (default: `reports_dir` from
        /// py-xref.toml, else the current directory).
        #[arg(short = 'o', long)]
        reports_dir: Option<PathBuf>,

        /// Reports to write.
        #[arg(long, value_enum, default_value_t = ExportFormat::All)]
        format: ExportFormat,

        /// Report every import, not only those between project modules.
        #[arg(long)]
        unscoped: bool,

        /// Print the JSON report to stdout instead of writing files.
        #[arg(long, conflicts_with = "format")]
        stdout: bool,

        /// Print the scan summary as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Scan every `[[projects]]` entry of a configuration file.
    Batch {
        /// Configuration file listing the projects.
        #[arg(short, long, default_value = "py-xref.toml")]
        config: PathBuf,

        /// Print each scan summary as JSON.
        #[arg(long)]
        json: bool,
    },
}
