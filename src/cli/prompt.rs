//! Interactive stdin prompts used when inputs are not given as flags.

use anyhow::Result;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::log;
use crate::utils::strip_quotes;

/// Whether any stdin prompt was used during this run.
static PROMPTED: AtomicBool = AtomicBool::new(false);

/// True once any prompt has read from stdin.
pub fn was_prompted() -> bool {
    PROMPTED.load(Ordering::SeqCst)
}

/// Pause before exit so a double-clicked terminal window stays readable.
///
/// Only triggers after an interactive session; flag-driven runs exit
/// immediately and stay scriptable.
pub fn pause_if_interactive() {
    if !was_prompted() {
        return;
    }
    eprint!("\nPress Enter to exit...");
    io::stderr().flush().ok();
    let mut line = String::new();
    io::stdin().read_line(&mut line).ok();
}

/// Read one trimmed, quote-stripped line from stdin.
pub fn line(label: &str) -> Result<String> {
    PROMPTED.store(true, Ordering::SeqCst);
    eprint!("{label}: ");
    io::stderr().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(strip_quotes(&input).to_string())
}

/// Prompt for a path; an empty answer is an error.
pub fn path(label: &str) -> Result<PathBuf> {
    let answer = line(label)?;
    if answer.is_empty() {
        anyhow::bail!("no path given");
    }
    Ok(PathBuf::from(answer))
}

/// Prompt for y/n; anything but `y`/`yes` (case-insensitive) is no.
pub fn yes_no(label: &str) -> Result<bool> {
    let answer = line(&format!("{label} [y/N]"))?.to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Prompt for a required integer; non-numeric input is an error.
pub fn required_u32(label: &str) -> Result<u32> {
    let answer = line(label)?;
    answer
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| anyhow::anyhow!("expected a positive number, got {answer:?}"))
}

/// Prompt for an optional integer; blank means none, invalid input warns
/// and falls back to none.
pub fn optional_u32(label: &str) -> Result<Option<u32>> {
    let answer = line(&format!("{label} (Enter = auto)"))?;
    if answer.is_empty() {
        return Ok(None);
    }
    match answer.parse::<u32>() {
        Ok(n) if n > 0 => Ok(Some(n)),
        _ => {
            log!("warn"; "not a positive number: {answer:?}, auto-computing instead");
            Ok(None)
        }
    }
}

/// Double-confirm an irreversible deletion.
///
/// `skip_confirm` (from `--yes`) answers the confirmation without prompting.
pub fn confirm_delete(what: &str, skip_confirm: bool) -> Result<bool> {
    if skip_confirm {
        return Ok(true);
    }
    let confirmed = yes_no(&format!(
        "Warning: {what} will be permanently deleted. Continue?"
    ))?;
    if !confirmed {
        log!("warn"; "deletion cancelled");
    }
    Ok(confirmed)
}
