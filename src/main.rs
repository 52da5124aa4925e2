//! jest-debug - resolve and launch Jest debug/run sessions
//!
//! Reads the Jest profiles from the workspace's launch.json, picks the
//! config and working directory for the given test file and starts jest
//! under the node inspector or in the terminal.

use clap::Parser;
use jest_debug::commands::{Commands, GlobalOptions};
use jest_debug::{cli, common, Error};

#[derive(Parser)]
#[command(name = "jest-debug", about = "Debug or run a Jest test file")]
#[command(version, long_about = None)]
struct Cli {
    #[command(flatten)]
    options: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    common::logging::init_cli(cli.options.verbose);

    if let Err(e) = cli::dispatch(cli.command, cli.options).await {
        eprintln!("Error: {e}");
        let code = match e {
            Error::RunnerExited(code) => code,
            _ => 1,
        };
        std::process::exit(code);
    }
}
