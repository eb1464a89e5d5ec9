//! Tile sheet packing: manifest discovery, grid layout and placement.
//!
//! Discovered images are sorted lexicographically by full path, giving a
//! stable left-to-right, top-to-bottom placement order for identical inputs.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::Result;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbImage};
use jwalk::WalkDir;

use super::OpError;
use super::format::{JPEG_QUALITY, has_extension, resolve_output_format};
use crate::logger::ProgressLine;
use crate::{debug, log};

/// Extensions accepted as sheet source images.
const SOURCE_EXTENSIONS: &[&str] = &["png", "bmp"];

/// Grid dimensions of a tile sheet, in tile units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    pub columns: u32,
    pub rows: u32,
}

impl SheetLayout {
    /// Resolve the grid for `count` images from optionally explicit dimensions.
    ///
    /// - Neither given: `columns = ceil(sqrt(count))`, rows fill up.
    /// - One given: the other is the minimal count that fits every image.
    /// - Both given: used as-is, even when smaller than `count` (overflow is
    ///   handled leniently at placement time).
    pub fn resolve(count: usize, columns: Option<u32>, rows: Option<u32>) -> Self {
        let count = count.max(1) as u32;
        match (columns, rows) {
            (Some(columns), Some(rows)) => Self { columns, rows },
            (Some(columns), None) => {
                let columns = columns.max(1);
                Self {
                    columns,
                    rows: count.div_ceil(columns),
                }
            }
            (None, Some(rows)) => {
                let rows = rows.max(1);
                Self {
                    columns: count.div_ceil(rows),
                    rows,
                }
            }
            (None, None) => {
                let columns = (f64::from(count).sqrt().ceil() as u32).max(1);
                Self {
                    columns,
                    rows: count.div_ceil(columns),
                }
            }
        }
    }

    /// Number of cells in the grid.
    pub const fn capacity(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Grid cell `(column, row)` for a manifest index.
    pub const fn cell(&self, index: usize) -> (u32, u32) {
        let index = index as u32;
        (index % self.columns, index / self.columns)
    }

    /// Pixel offset of a manifest index for the given tile size.
    pub const fn pixel_offset(&self, index: usize, tile_width: u32, tile_height: u32) -> (u32, u32) {
        let (column, row) = self.cell(index);
        (column * tile_width, row * tile_height)
    }
}

/// Packing parameters resolved by the front-end.
#[derive(Debug, Clone)]
pub struct PackOptions {
    pub tile_width: u32,
    pub tile_height: u32,
    /// Explicit sheet width in tile units; `None` auto-computes.
    pub sheet_columns: Option<u32>,
    /// Explicit sheet height in tile units; `None` auto-computes.
    pub sheet_rows: Option<u32>,
    pub recursive: bool,
}

/// Counts reported after a packing run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PackStats {
    pub discovered: usize,
    pub placed: usize,
    pub skipped_overflow: usize,
    pub failed: usize,
}

/// Collect source image paths, sorted lexicographically by full path.
///
/// Recursive discovery takes every `.png`/`.bmp` anywhere under `source`;
/// otherwise only direct children of `source` are considered.
pub fn collect_manifest(source: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    if !source.exists() {
        return Err(OpError::MissingSource(source.to_path_buf()).into());
    }
    if !source.is_dir() {
        return Err(OpError::NotADirectory(source.to_path_buf()).into());
    }

    let mut manifest = Vec::new();
    if recursive {
        for entry in WalkDir::new(source).sort(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log!("warn"; "skipping unreadable entry: {e}");
                    continue;
                }
            };
            let path = entry.path();
            if entry.file_type().is_file() && has_extension(&path, SOURCE_EXTENSIONS) {
                manifest.push(path);
            }
        }
    } else {
        for entry in fs::read_dir(source)? {
            let path = entry?.path();
            if path.is_file() && has_extension(&path, SOURCE_EXTENSIONS) {
                manifest.push(path);
            }
        }
    }

    // Full-path byte order, matching placement order across runs
    manifest.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    Ok(manifest)
}

/// Pack every discovered image under `source` into a single grid sheet.
///
/// Aborts before processing when no image matches or when the output
/// directory cannot be created. A decode/resize failure for one image leaves
/// its cell background-colored and the loop continues; images past the grid
/// capacity are skipped with a warning, never an error.
pub fn pack_sheet(source: &Path, output: &Path, options: &PackOptions) -> Result<PackStats> {
    let manifest = collect_manifest(source, options.recursive)?;
    if manifest.is_empty() {
        return Err(OpError::EmptyManifest(source.to_path_buf()).into());
    }

    let layout = SheetLayout::resolve(manifest.len(), options.sheet_columns, options.sheet_rows);
    let capacity = layout.capacity();

    // Output directory trouble aborts before any image is decoded
    let (output, format) = resolve_output_format(output);
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    // Zero-initialized buffer: the background stays black
    let mut canvas = RgbImage::new(
        layout.columns * options.tile_width,
        layout.rows * options.tile_height,
    );
    log!(
        "pack";
        "packing {} image(s) into {}x{} tiles ({}x{} px)",
        manifest.len(),
        layout.columns,
        layout.rows,
        canvas.width(),
        canvas.height()
    );

    let mut stats = PackStats {
        discovered: manifest.len(),
        ..PackStats::default()
    };
    let progress = ProgressLine::new("pack", &[("placed", manifest.len().min(capacity))]);

    for (index, path) in manifest.iter().enumerate() {
        if index >= capacity {
            stats.skipped_overflow = manifest.len() - index;
            log!(
                "warn";
                "sheet capacity exceeded; {} image(s) not included",
                stats.skipped_overflow
            );
            break;
        }

        match place_tile(&mut canvas, layout, index, path, options) {
            Ok(()) => {
                stats.placed += 1;
                progress.inc("placed");
            }
            Err(e) => {
                stats.failed += 1;
                log!("error"; "failed to place {}: {e}", path.display());
            }
        }
    }
    progress.finish();

    save_canvas(&canvas, &output, format)?;
    log!("pack"; "tile sheet written to {}", output.display());
    Ok(stats)
}

/// Decode one image, resize to tile dimensions when needed and paste it.
fn place_tile(
    canvas: &mut RgbImage,
    layout: SheetLayout,
    index: usize,
    path: &Path,
    options: &PackOptions,
) -> Result<()> {
    let mut tile = image::open(path)?.to_rgb8();

    if tile.width() != options.tile_width || tile.height() != options.tile_height {
        debug!(
            "pack";
            "resizing {} ({}x{} -> {}x{})",
            path.display(),
            tile.width(),
            tile.height(),
            options.tile_width,
            options.tile_height
        );
        tile = imageops::resize(
            &tile,
            options.tile_width,
            options.tile_height,
            FilterType::Lanczos3,
        );
    }

    let (x, y) = layout.pixel_offset(index, options.tile_width, options.tile_height);
    imageops::replace(canvas, &tile, i64::from(x), i64::from(y));
    Ok(())
}

/// Write the canvas in the resolved format (JPEG uses a fixed quality).
fn save_canvas(canvas: &RgbImage, output: &Path, format: ImageFormat) -> Result<()> {
    if format == ImageFormat::Jpeg {
        let file = BufWriter::new(File::create(output)?);
        let mut encoder = JpegEncoder::new_with_quality(file, JPEG_QUALITY);
        encoder.encode_image(canvas)?;
    } else {
        canvas.save_with_format(output, format)?;
    }
    Ok(())
}
