use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "netlinx-rpc")]
#[command(about = "Generate RPC dispatch code for NetLinx projects", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the list of source files comes from.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Workspace file (.apw); searched for from the root upwards if omitted
    #[arg(short, long)]
    pub workspace: Option<PathBuf>,

    /// Project root for output paths and the audit listing
    /// (defaults to the workspace directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Scan these files, in this order, instead of reading a workspace
    #[arg(long = "file", value_name = "PATH", conflicts_with = "workspace")]
    pub files: Vec<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the RPC dispatch include file
    Generate {
        #[command(flatten)]
        sources: SourceArgs,

        /// Output file (defaults to the configured path under the root)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a listing of every function and its doc comment
    List {
        #[command(flatten)]
        sources: SourceArgs,

        /// Output file (defaults to the configured listing path under the root)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Initialize a .netlinx-rpc.toml configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
