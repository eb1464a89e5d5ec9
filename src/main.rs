//! Tilesmith - batch image tools for game-asset pipelines.

mod cli;
mod logger;
mod ops;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    logger::set_verbose(cli.verbose);

    let result = match &cli.command {
        Commands::Recolor { args } => cli::recolor::run(args),
        Commands::Convert { args } => cli::convert::run(args),
        Commands::Pack { args } => cli::pack::run(args),
    };

    // Interactive sessions pause before the terminal window closes
    cli::prompt::pause_if_interactive();

    result
}
