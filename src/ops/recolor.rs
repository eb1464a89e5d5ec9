//! Exact-match background recoloring.
//!
//! A pixel is replaced only when all three channels equal the old color;
//! partial matches are never touched.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use image::{Rgb, RgbImage};

use super::OpError;
use super::format::resolve_output_format;

/// The fixed replacement color used by the CLI front-end.
pub const MAGENTA: Rgb<u8> = Rgb([255, 0, 255]);

/// Result of a successful file-level recolor.
#[derive(Debug)]
pub struct RecolorOutcome {
    /// Output path actually written (directory/extension rules applied).
    pub output: PathBuf,
    /// Number of pixels replaced.
    pub replaced: u64,
}

/// Replace every exact match of `old` with `new`. Returns the replaced count.
pub fn recolor_pixels(img: &mut RgbImage, old: Rgb<u8>, new: Rgb<u8>) -> u64 {
    let mut replaced = 0;
    for pixel in img.pixels_mut() {
        if *pixel == old {
            *pixel = new;
            replaced += 1;
        }
    }
    replaced
}

/// Resolve the effective output path for a recolor run.
///
/// - An existing directory gets the input's base name prefixed with `magenta_`.
/// - A missing extension defaults the file to BMP (`.bmp` appended).
pub fn resolve_output_path(input: &Path, output: &Path) -> PathBuf {
    let output = if output.is_dir() {
        let base = input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        output.join(format!("magenta_{base}"))
    } else {
        output.to_path_buf()
    };

    resolve_output_format(&output).0
}

/// Recolor one image file, replacing exact matches of `old` with `new`.
///
/// The input must be an existing regular file. Missing output directories
/// are created. No partial output is written on failure.
pub fn recolor_file(
    input: &Path,
    output: &Path,
    old: Rgb<u8>,
    new: Rgb<u8>,
) -> Result<RecolorOutcome> {
    if !input.is_file() {
        return Err(OpError::MissingInput(input.to_path_buf()).into());
    }

    let output = resolve_output_path(input, output);
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut img = image::open(input)?.to_rgb8();
    let replaced = recolor_pixels(&mut img, old, new);

    let (output, format) = resolve_output_format(&output);
    img.save_with_format(&output, format)?;

    Ok(RecolorOutcome { output, replaced })
}
