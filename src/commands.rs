//! CLI command definitions
//!
//! Defines the clap commands for the jest-debug CLI.

use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Workspace root (default: nearest folder with .vscode/launch.json or package.json)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Launch profile name, when launch.json holds several
    #[arg(long, short, global = true)]
    pub profile: Option<String>,

    /// Verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Debug a test file under the node inspector
    #[command(alias = "d")]
    Debug {
        /// Test file to debug
        file: PathBuf,
    },

    /// Run a test file in the terminal
    #[command(alias = "r")]
    Run {
        /// Test file to run
        file: PathBuf,
    },

    /// Print the resolved configuration without launching
    Resolve {
        /// Test file to resolve for
        file: PathBuf,

        /// Print the merged launch.json configuration as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the Jest profiles found in launch.json
    Profiles,

    /// Compare the node version with the workspace's .nvmrc
    CheckVersion,
}
