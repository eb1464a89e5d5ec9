//! Pack command front-end.

use anyhow::Result;
use std::path::PathBuf;

use super::args::PackArgs;
use super::prompt;
use crate::log;
use crate::ops::pack::{PackOptions, pack_sheet};
use crate::utils::plural_s;

/// Run the pack command
pub fn run(args: &PackArgs) -> Result<()> {
    let source = match &args.source {
        Some(path) => path.clone(),
        None => prompt::path("Directory containing source images")?,
    };
    if !source.exists() {
        log!("error"; "source directory does not exist: {}", source.display());
        anyhow::bail!("missing source: {}", source.display());
    }
    if !source.is_dir() {
        log!("error"; "not a directory: {}", source.display());
        anyhow::bail!("not a directory: {}", source.display());
    }

    let recursive = match args.recursive {
        Some(value) => value,
        None if prompt::was_prompted() => prompt::yes_no("Search subdirectories too?")?,
        None => false,
    };

    let output = match &args.output {
        Some(path) => path.clone(),
        None => prompt::path("Output tile sheet path (e.g. sheet.bmp)")?,
    };

    let (tile_width, tile_height) = resolve_tile_size(args)?;
    let (sheet_columns, sheet_rows) = resolve_sheet_layout(args)?;

    let options = PackOptions {
        tile_width,
        tile_height,
        sheet_columns,
        sheet_rows,
        recursive,
    };

    let stats = pack_sheet(&source, &output, &options)?;

    log!(
        "pack";
        "done, {} image{} discovered, {} placed",
        stats.discovered,
        plural_s(stats.discovered),
        stats.placed
    );
    if stats.failed > 0 {
        log!("warn"; "{} image{} failed to decode", stats.failed, plural_s(stats.failed));
    }
    if stats.skipped_overflow > 0 {
        log!(
            "warn";
            "{} image{} skipped (sheet capacity)",
            stats.skipped_overflow,
            plural_s(stats.skipped_overflow)
        );
    }
    Ok(())
}

/// Tile dimensions from flags or prompts; non-numeric prompt input aborts.
fn resolve_tile_size(args: &PackArgs) -> Result<(u32, u32)> {
    let width = match args.tile_width {
        Some(width) => width,
        None => prompt::required_u32("Tile width in pixels")?,
    };
    let height = match args.tile_height {
        Some(height) => height,
        None => prompt::required_u32("Tile height in pixels")?,
    };
    Ok((width, height))
}

/// Explicit sheet layout from flags, or prompts in interactive sessions.
///
/// Blank prompt answers auto-compute; non-numeric answers warn and
/// auto-compute.
fn resolve_sheet_layout(args: &PackArgs) -> Result<(Option<u32>, Option<u32>)> {
    if args.sheet_width.is_some() || args.sheet_height.is_some() {
        return Ok((args.sheet_width, args.sheet_height));
    }
    if !prompt::was_prompted() {
        return Ok((None, None));
    }
    if !prompt::yes_no("Specify the sheet layout explicitly?")? {
        return Ok((None, None));
    }
    let columns = prompt::optional_u32("Sheet width in tiles")?;
    let rows = prompt::optional_u32("Sheet height in tiles")?;
    Ok((columns, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: PackArgs,
    }

    #[test]
    fn flag_driven_args_need_no_prompts() {
        let harness = Harness::parse_from([
            "pack",
            "tiles",
            "--recursive",
            "-o",
            "sheet.png",
            "-w",
            "16",
            "-H",
            "16",
        ]);
        let args = harness.args;

        assert_eq!(args.source, Some(PathBuf::from("tiles")));
        assert_eq!(args.recursive, Some(true));
        assert_eq!(resolve_tile_size(&args).unwrap(), (16, 16));
        assert_eq!(resolve_sheet_layout(&args).unwrap(), (None, None));
    }

    #[test]
    fn explicit_layout_flags_pass_through() {
        let harness = Harness::parse_from([
            "pack",
            "tiles",
            "-o",
            "sheet.png",
            "-w",
            "8",
            "-H",
            "8",
            "--sheet-width",
            "4",
        ]);

        assert_eq!(
            resolve_sheet_layout(&harness.args).unwrap(),
            (Some(4), None)
        );
    }

    #[test]
    fn zero_tile_size_is_rejected_by_the_parser() {
        let result = Harness::try_parse_from(["pack", "tiles", "-w", "0"]);
        assert!(result.is_err());
    }
}
