//! Recolor command front-end.

use anyhow::Result;
use image::Rgb;
use std::fs;
use std::path::{Path, PathBuf};

use super::args::RecolorArgs;
use super::prompt;
use crate::log;
use crate::ops::recolor::{MAGENTA, recolor_file};

const DEFAULT_OLD_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// Run the recolor command
pub fn run(args: &RecolorArgs) -> Result<()> {
    let input = match &args.input {
        Some(path) => path.clone(),
        None => prompt::path("Input image path")?,
    };
    if !input.is_file() {
        log!("error"; "input file does not exist or is not a regular file: {}", input.display());
        anyhow::bail!("missing input: {}", input.display());
    }

    let old_color = resolve_old_color(args)?;
    let output = resolve_output(args, &input)?;
    let delete_original = resolve_delete(args)?;

    let outcome = match recolor_file(&input, &output, old_color, MAGENTA) {
        Ok(outcome) => outcome,
        Err(e) => {
            log!(
                "error";
                "recolor failed: {e} (input: {}, output: {})",
                input.display(),
                output.display()
            );
            return Err(e);
        }
    };

    log!(
        "recolor";
        "replaced {} pixel(s) of {},{},{} with magenta -> {}",
        outcome.replaced,
        old_color[0],
        old_color[1],
        old_color[2],
        outcome.output.display()
    );

    if delete_original {
        delete_input(&input, &outcome.output);
    }
    Ok(())
}

// =============================================================================
// Input resolution
// =============================================================================

/// Old color from flag or prompt; invalid entries warn and use the default.
fn resolve_old_color(args: &RecolorArgs) -> Result<Rgb<u8>> {
    let entry = match &args.old_color {
        Some(value) => value.clone(),
        None if prompt::was_prompted() => {
            prompt::line("Background color to replace, as R,G,B (Enter = 0,0,0)")?
        }
        None => return Ok(DEFAULT_OLD_COLOR),
    };

    if entry.is_empty() {
        return Ok(DEFAULT_OLD_COLOR);
    }
    match parse_rgb(&entry) {
        Some(color) => Ok(color),
        None => {
            log!("warn"; "invalid color {entry:?} (expected R,G,B with 0-255 channels), using 0,0,0");
            Ok(DEFAULT_OLD_COLOR)
        }
    }
}

/// Output path from flag or prompt; blank answers take the derived default.
fn resolve_output(args: &RecolorArgs, input: &Path) -> Result<PathBuf> {
    if let Some(path) = &args.output {
        return Ok(path.clone());
    }
    let default = default_output(input);
    if !prompt::was_prompted() {
        return Ok(default);
    }
    let answer = prompt::line(&format!("Output path (Enter = {})", default.display()))?;
    Ok(if answer.is_empty() {
        default
    } else {
        PathBuf::from(answer)
    })
}

/// Deletion intent from flag or prompt, double-confirmed either way.
fn resolve_delete(args: &RecolorArgs) -> Result<bool> {
    let wanted = if args.delete_original {
        true
    } else if prompt::was_prompted() {
        prompt::yes_no("Delete the original file after saving?")?
    } else {
        false
    };
    if !wanted {
        return Ok(false);
    }
    prompt::confirm_delete("the original file", args.yes)
}

// =============================================================================
// Helpers (pure functions)
// =============================================================================

/// Parse `R,G,B` with each channel in 0-255.
fn parse_rgb(entry: &str) -> Option<Rgb<u8>> {
    let mut channels = entry.split(',').map(|part| part.trim().parse::<u8>());
    let r = channels.next()?.ok()?;
    let g = channels.next()?.ok()?;
    let b = channels.next()?.ok()?;
    if channels.next().is_some() {
        return None;
    }
    Some(Rgb([r, g, b]))
}

/// Default output path: `<input_stem>_magenta<ext>`, `.bmp` when extensionless.
fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let name = match input.extension() {
        Some(ext) => format!("{stem}_magenta.{}", ext.to_string_lossy()),
        None => format!("{stem}_magenta.bmp"),
    };
    input.with_file_name(name)
}

// =============================================================================
// IO (side effects)
// =============================================================================

/// Delete the original input, unless it is the file just written.
fn delete_input(input: &Path, output: &Path) {
    let same = match (input.canonicalize(), output.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => input == output,
    };
    if same {
        log!("warn"; "output path equals input path, original not deleted");
        return;
    }
    match fs::remove_file(input) {
        Ok(()) => log!("recolor"; "deleted original {}", input.display()),
        Err(e) => log!("warn"; "failed to delete original {}: {e}", input.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgb() {
        assert_eq!(parse_rgb("0,0,0"), Some(Rgb([0, 0, 0])));
        assert_eq!(parse_rgb("255, 128, 7"), Some(Rgb([255, 128, 7])));
        assert_eq!(parse_rgb("256,0,0"), None);
        assert_eq!(parse_rgb("1,2"), None);
        assert_eq!(parse_rgb("1,2,3,4"), None);
        assert_eq!(parse_rgb("red,green,blue"), None);
        assert_eq!(parse_rgb(""), None);
    }

    #[test]
    fn test_default_output_keeps_extension() {
        assert_eq!(
            default_output(Path::new("sprites/tile.png")),
            PathBuf::from("sprites/tile_magenta.png")
        );
    }

    #[test]
    fn test_default_output_extensionless_gets_bmp() {
        assert_eq!(
            default_output(Path::new("sprites/tile")),
            PathBuf::from("sprites/tile_magenta.bmp")
        );
    }
}
