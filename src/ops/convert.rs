//! Recursive PNG to BMP tree conversion.
//!
//! Walks a source tree, mirrors its directory structure under a destination
//! root, and re-encodes every PNG as 24-bit RGB BMP at the mirrored path.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use image::ImageFormat;
use jwalk::WalkDir;

use super::OpError;
use super::format::has_extension;
use crate::logger::ProgressLine;
use crate::{debug, log};

/// Counts reported after a conversion run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ConvertStats {
    pub converted: usize,
    pub deleted: usize,
    pub failed: usize,
}

/// Convert every PNG under `source` to a BMP at the mirrored path under `dest`.
///
/// Every visited directory gets its mirrored destination directory created
/// before any file in it is converted. A decode/encode failure for one file
/// is logged and counted; the batch continues. With `delete_original`, each
/// source PNG is removed right after its successful conversion.
pub fn convert_tree(source: &Path, dest: &Path, delete_original: bool) -> Result<ConvertStats> {
    if !source.exists() {
        return Err(OpError::MissingSource(source.to_path_buf()).into());
    }
    if !source.is_dir() {
        return Err(OpError::NotADirectory(source.to_path_buf()).into());
    }

    let (dirs, files) = scan_tree(source);

    // Mirror the directory tree before converting anything under it
    for dir in &dirs {
        let rel = dir.strip_prefix(source).unwrap_or(dir);
        fs::create_dir_all(dest.join(rel))?;
    }

    let mut stats = ConvertStats::default();
    let progress =
        (!files.is_empty()).then(|| ProgressLine::new("convert", &[("converted", files.len())]));

    for input in &files {
        let rel = input.strip_prefix(source).unwrap_or(input);
        let output = dest.join(rel).with_extension("bmp");

        match convert_file(input, &output) {
            Ok(()) => {
                stats.converted += 1;
                if let Some(progress) = &progress {
                    progress.inc("converted");
                }
                debug!("convert"; "{} -> {}", input.display(), output.display());

                if delete_original {
                    match fs::remove_file(input) {
                        Ok(()) => stats.deleted += 1,
                        Err(e) => log!("warn"; "failed to delete {}: {e}", input.display()),
                    }
                }
            }
            Err(e) => {
                stats.failed += 1;
                log!("error"; "conversion failed for {}: {e}", input.display());
            }
        }
    }

    if let Some(progress) = progress {
        progress.finish();
    }
    Ok(stats)
}

/// Collect directories and PNG files under `source`, sorted for determinism.
fn scan_tree(source: &Path) -> (Vec<PathBuf>, Vec<PathBuf>) {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    for entry in WalkDir::new(source).sort(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log!("warn"; "skipping unreadable entry: {e}");
                continue;
            }
        };
        let path = entry.path();
        if entry.file_type().is_dir() {
            dirs.push(path);
        } else if has_extension(&path, &["png"]) {
            files.push(path);
        }
    }

    dirs.sort();
    files.sort();
    (dirs, files)
}

/// Decode one PNG, force 24-bit RGB and write it as BMP.
fn convert_file(input: &Path, output: &Path) -> Result<()> {
    let img = image::open(input)?.to_rgb8();
    img.save_with_format(output, ImageFormat::Bmp)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use tempfile::TempDir;

    fn write_png(path: &Path, color: Rgb<u8>) {
        RgbImage::from_pixel(2, 2, color).save(path).unwrap();
    }

    #[test]
    fn converts_nested_tree_at_mirrored_paths() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src");
        let dest = dir.path().join("out");
        fs::create_dir_all(source.join("a/b")).unwrap();

        write_png(&source.join("top.png"), Rgb([1, 2, 3]));
        write_png(&source.join("a/mid.png"), Rgb([4, 5, 6]));
        write_png(&source.join("a/b/leaf.png"), Rgb([7, 8, 9]));
        fs::write(source.join("a/notes.txt"), "not an image").unwrap();

        let stats = convert_tree(&source, &dest, false).unwrap();

        assert_eq!(stats.converted, 3);
        assert_eq!(stats.failed, 0);
        assert!(dest.join("top.bmp").is_file());
        assert!(dest.join("a/mid.bmp").is_file());
        assert!(dest.join("a/b/leaf.bmp").is_file());
        // Non-PNG files are untouched and not mirrored
        assert!(!dest.join("a/notes.txt").exists());
        assert!(source.join("a/notes.txt").is_file());
    }

    #[test]
    fn uppercase_extension_is_converted() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src");
        fs::create_dir_all(&source).unwrap();
        write_png(&source.join("SHOUT.PNG"), Rgb([1, 1, 1]));

        let stats = convert_tree(&source, &source, false).unwrap();

        assert_eq!(stats.converted, 1);
        assert!(source.join("SHOUT.bmp").is_file());
    }

    #[test]
    fn dest_defaults_to_source_in_place() {
        let dir = TempDir::new().unwrap();
        write_png(&dir.path().join("tile.png"), Rgb([0, 0, 0]));

        let stats = convert_tree(dir.path(), dir.path(), false).unwrap();

        assert_eq!(stats.converted, 1);
        assert!(dir.path().join("tile.bmp").is_file());
        assert!(dir.path().join("tile.png").is_file());
    }

    #[test]
    fn delete_original_removes_sources() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src");
        fs::create_dir_all(source.join("sub")).unwrap();
        write_png(&source.join("a.png"), Rgb([1, 1, 1]));
        write_png(&source.join("sub/b.png"), Rgb([2, 2, 2]));

        let stats = convert_tree(&source, &source, true).unwrap();

        assert_eq!(stats.converted, 2);
        assert_eq!(stats.deleted, 2);
        assert!(!source.join("a.png").exists());
        assert!(!source.join("sub/b.png").exists());
        assert!(source.join("a.bmp").is_file());
        assert!(source.join("sub/b.bmp").is_file());
    }

    #[test]
    fn one_bad_file_never_aborts_the_batch() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src");
        fs::create_dir_all(&source).unwrap();
        write_png(&source.join("good.png"), Rgb([1, 1, 1]));
        fs::write(source.join("broken.png"), b"not a png at all").unwrap();

        let stats = convert_tree(&source, &source, false).unwrap();

        assert_eq!(stats.converted, 1);
        assert_eq!(stats.failed, 1);
        assert!(source.join("good.bmp").is_file());
        assert!(!source.join("broken.bmp").exists());
    }

    #[test]
    fn empty_tree_converts_nothing() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src");
        let dest = dir.path().join("out");
        fs::create_dir_all(source.join("empty/nested")).unwrap();

        let stats = convert_tree(&source, &dest, false).unwrap();

        assert_eq!(stats, ConvertStats::default());
        // Directory structure is still mirrored
        assert!(dest.join("empty/nested").is_dir());
    }

    #[test]
    fn missing_source_aborts() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        assert!(convert_tree(&missing, &missing, false).is_err());
    }

    #[test]
    fn output_is_24bit_rgb() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src");
        fs::create_dir_all(&source).unwrap();

        // RGBA input with alpha, must be flattened to RGB
        let rgba = image::RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 128]));
        rgba.save(source.join("alpha.png")).unwrap();

        convert_tree(&source, &source, false).unwrap();

        let out = image::open(source.join("alpha.bmp")).unwrap();
        assert_eq!(out.color(), image::ColorType::Rgb8);
        assert_eq!(*out.to_rgb8().get_pixel(0, 0), Rgb([10, 20, 30]));
    }
}
