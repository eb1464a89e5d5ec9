//! Convert command front-end.

use anyhow::Result;
use std::path::{Path, PathBuf};

use super::args::ConvertArgs;
use super::prompt;
use crate::log;
use crate::ops::convert::convert_tree;
use crate::utils::plural_s;

/// Run the convert command
pub fn run(args: &ConvertArgs) -> Result<()> {
    let source = match &args.source {
        Some(path) => path.clone(),
        None => prompt::path("Directory tree containing PNG files")?,
    };
    if !source.exists() {
        log!("error"; "source directory does not exist: {}", source.display());
        anyhow::bail!("missing source: {}", source.display());
    }

    let dest = resolve_dest(args, &source)?;
    let delete_original = resolve_delete(args)?;

    log!("convert"; "converting PNG files under {} to BMP", source.display());
    let stats = convert_tree(&source, &dest, delete_original)?;

    log!(
        "convert";
        "done, {} file{} converted",
        stats.converted,
        plural_s(stats.converted)
    );
    if stats.failed > 0 {
        log!("warn"; "{} file{} failed to convert", stats.failed, plural_s(stats.failed));
    }
    if delete_original {
        log!(
            "convert";
            "{} original PNG file{} deleted",
            stats.deleted,
            plural_s(stats.deleted)
        );
    }
    Ok(())
}

/// Destination from flag or prompt; blank answers mirror in place.
fn resolve_dest(args: &ConvertArgs, source: &Path) -> Result<PathBuf> {
    if let Some(dest) = &args.dest {
        return Ok(dest.clone());
    }
    if !prompt::was_prompted() {
        return Ok(source.to_path_buf());
    }
    let answer = prompt::line("Destination directory (Enter = same as source)")?;
    Ok(if answer.is_empty() {
        source.to_path_buf()
    } else {
        PathBuf::from(answer)
    })
}

/// Deletion intent from flag or prompt.
///
/// Unlike recolor, a declined confirmation cancels the whole run.
fn resolve_delete(args: &ConvertArgs) -> Result<bool> {
    let wanted = if args.delete_original {
        true
    } else if prompt::was_prompted() {
        prompt::yes_no("Delete original PNG files after conversion?")?
    } else {
        false
    };
    if !wanted {
        return Ok(false);
    }
    if !prompt::confirm_delete("the original PNG files", args.yes)? {
        anyhow::bail!("cancelled");
    }
    Ok(true)
}
