//! CLI module for the `html2pptx` binary.

pub mod commands;
pub mod parser;

pub use commands::{BuildCommand, ConvertCommand};
pub use parser::{Cli, Commands};

use crate::exc::Result;
use clap::Parser;

/// Run the selected subcommand from an already-parsed [`Cli`].
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Convert { input, output, title, tmp_dir } => {
            ConvertCommand { input, output, title, tmp_dir }.execute()
        }
        Commands::Build { output, inputs, title, tmp_dir } => {
            BuildCommand { output, inputs, title, tmp_dir }.execute()
        }
    }
}

/// Parse the real process `argv` and execute. The thin `src/bin/html2pptx.rs`
/// entry point calls only this.
pub fn main() -> Result<()> {
    run(Cli::parse())
}
