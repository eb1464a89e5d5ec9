//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Tilesmith batch image tools CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Replace an exact background color with magenta in one image
    #[command(visible_alias = "r")]
    Recolor {
        #[command(flatten)]
        args: RecolorArgs,
    },

    /// Convert every PNG under a directory tree to 24-bit BMP
    #[command(visible_alias = "c")]
    Convert {
        #[command(flatten)]
        args: ConvertArgs,
    },

    /// Pack images from a directory into a grid tile sheet
    #[command(visible_alias = "p")]
    Pack {
        #[command(flatten)]
        args: PackArgs,
    },
}

/// Recolor command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct RecolorArgs {
    /// Input image path (prompted when omitted)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Background color to replace, as `R,G,B` (default: 0,0,0)
    #[arg(short = 'c', long, value_name = "R,G,B")]
    pub old_color: Option<String>,

    /// Output path (default: `<input_stem>_magenta<ext>`)
    #[arg(short, long, value_hint = clap::ValueHint::AnyPath)]
    pub output: Option<PathBuf>,

    /// Delete the original file after a successful save
    #[arg(short, long)]
    pub delete_original: bool,

    /// Skip confirmation prompts for destructive actions
    #[arg(short, long)]
    pub yes: bool,
}

/// Convert command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Directory tree containing PNG files (prompted when omitted)
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub source: Option<PathBuf>,

    /// Destination root for BMP output (default: same as source)
    #[arg(short = 'o', long, value_hint = clap::ValueHint::DirPath)]
    pub dest: Option<PathBuf>,

    /// Delete each source PNG after its successful conversion
    #[arg(short, long)]
    pub delete_original: bool,

    /// Skip confirmation prompts for destructive actions
    #[arg(short, long)]
    pub yes: bool,
}

/// Pack command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct PackArgs {
    /// Directory containing source images (prompted when omitted)
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub source: Option<PathBuf>,

    /// Search subdirectories for images too
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub recursive: Option<bool>,

    /// Output tile sheet path (format by extension; default: BMP)
    #[arg(short, long, value_hint = clap::ValueHint::AnyPath)]
    pub output: Option<PathBuf>,

    /// Width of each tile in pixels
    #[arg(short = 'w', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub tile_width: Option<u32>,

    /// Height of each tile in pixels
    #[arg(short = 'H', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub tile_height: Option<u32>,

    /// Explicit sheet width in tiles (omit to auto-compute)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub sheet_width: Option<u32>,

    /// Explicit sheet height in tiles (omit to auto-compute)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub sheet_height: Option<u32>,
}
