//! Output format selection by file extension.

use image::ImageFormat;
use std::path::{Path, PathBuf};

/// JPEG encode quality for tile sheets (matches typical asset-pipeline output).
pub const JPEG_QUALITY: u8 = 95;

/// Resolve the output format from a path's extension (case-insensitive).
///
/// Unknown or missing extensions fall back to BMP; a missing extension also
/// gets `.bmp` appended to the returned path. An unknown extension is kept
/// as-is, so a name like `out.tga` ends up holding BMP-encoded bytes - the
/// file name and payload disagree for anything outside PNG/BMP/JPEG.
pub fn resolve_output_format(path: &Path) -> (PathBuf, ImageFormat) {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase());

    match ext.as_deref() {
        Some("bmp") => (path.to_path_buf(), ImageFormat::Bmp),
        Some("jpg") | Some("jpeg") => (path.to_path_buf(), ImageFormat::Jpeg),
        Some("png") => (path.to_path_buf(), ImageFormat::Png),
        Some(_) => (path.to_path_buf(), ImageFormat::Bmp),
        None => {
            let mut with_ext = path.as_os_str().to_os_string();
            with_ext.push(".bmp");
            (PathBuf::from(with_ext), ImageFormat::Bmp)
        }
    }
}

/// Check whether a path has one of the given extensions, case-insensitively.
pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .map(|e| {
            extensions
                .iter()
                .any(|candidate| e.eq_ignore_ascii_case(candidate))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmp_extension() {
        let (path, format) = resolve_output_format(Path::new("out/sheet.bmp"));
        assert_eq!(path, Path::new("out/sheet.bmp"));
        assert_eq!(format, ImageFormat::Bmp);
    }

    #[test]
    fn test_jpeg_extensions_case_insensitive() {
        let (_, format) = resolve_output_format(Path::new("sheet.JPG"));
        assert_eq!(format, ImageFormat::Jpeg);
        let (_, format) = resolve_output_format(Path::new("sheet.jpeg"));
        assert_eq!(format, ImageFormat::Jpeg);
    }

    #[test]
    fn test_png_extension() {
        let (_, format) = resolve_output_format(Path::new("sheet.png"));
        assert_eq!(format, ImageFormat::Png);
    }

    #[test]
    fn test_unknown_extension_defaults_to_bmp() {
        let (path, format) = resolve_output_format(Path::new("sheet.tga"));
        // Unknown extension keeps the name but writes BMP data
        assert_eq!(path, Path::new("sheet.tga"));
        assert_eq!(format, ImageFormat::Bmp);
    }

    #[test]
    fn test_missing_extension_appends_bmp() {
        let (path, format) = resolve_output_format(Path::new("out/sheet"));
        assert_eq!(path, Path::new("out/sheet.bmp"));
        assert_eq!(format, ImageFormat::Bmp);
    }

    #[test]
    fn test_has_extension() {
        assert!(has_extension(Path::new("a.PNG"), &["png", "bmp"]));
        assert!(has_extension(Path::new("a.bmp"), &["png", "bmp"]));
        assert!(!has_extension(Path::new("a.txt"), &["png", "bmp"]));
        assert!(!has_extension(Path::new("noext"), &["png", "bmp"]));
    }
}
