//! Meet photo gallery discovery.
//!
//! Lists the gallery directory into the ordered set of images the report's
//! gallery grid will show. Listing is flat (one directory per meet) and
//! ordering is lexicographic by filename, which matches how cameras and
//! phones name exports.
//!
//! Dimensions are probed from file headers only — nothing is decoded or
//! re-encoded — so the renderer can emit width/height attributes and the
//! grid doesn't reflow while images load. Probing runs across the rayon
//! pool; a file that fails to probe still appears in the gallery, just
//! without dimensions.

use rayon::prelude::*;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::types::GalleryImage;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// List gallery images, sorted lexicographically by filename.
///
/// A missing gallery directory is not an error: meets get written up before
/// the photos are sorted, and the report simply omits the gallery section.
pub fn scan_gallery(dir: &Path) -> Result<Vec<GalleryImage>, GalleryError> {
    if !dir.is_dir() {
        info!(dir = %dir.display(), "no gallery directory; skipping gallery");
        return Ok(Vec::new());
    }

    let mut filenames: Vec<String> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|name| !name.starts_with('.') && is_image(name))
        .collect();

    filenames.sort();
    debug!(count = filenames.len(), "gallery listing complete");

    let images = filenames
        .into_par_iter()
        .map(|filename| {
            let dimensions = probe_dimensions(&dir.join(&filename));
            GalleryImage {
                filename,
                dimensions,
            }
        })
        .collect();

    Ok(images)
}

fn is_image(name: &str) -> bool {
    Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Read pixel dimensions from the image header. Best effort: corrupt or
/// unsupported files degrade to `None` rather than failing the run.
fn probe_dimensions(path: &Path) -> Option<(u32, u32)> {
    match image::image_dimensions(path) {
        Ok(dims) => Some(dims),
        Err(err) => {
            warn!(file = %path.display(), %err, "could not read image dimensions");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// The canonical 67-byte 1x1 transparent PNG.
    const TINY_PNG: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
        0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x62, 0x00,
        0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
        0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];

    #[test]
    fn listing_is_sorted_and_filtered() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("b.jpg"), "fake").unwrap();
        fs::write(tmp.path().join("a.png"), "fake").unwrap();
        fs::write(tmp.path().join("c.webp"), "fake").unwrap();
        fs::write(tmp.path().join("notes.txt"), "not an image").unwrap();
        fs::write(tmp.path().join(".hidden.jpg"), "fake").unwrap();

        let images = scan_gallery(tmp.path()).unwrap();
        let names: Vec<&str> = images.iter().map(|i| i.filename.as_str()).collect();
        assert_eq!(names, vec!["a.png", "b.jpg", "c.webp"]);
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("finish.JPG"), "fake").unwrap();

        let images = scan_gallery(tmp.path()).unwrap();
        assert_eq!(images.len(), 1);
    }

    #[test]
    fn missing_directory_yields_empty_gallery() {
        let tmp = TempDir::new().unwrap();
        let images = scan_gallery(&tmp.path().join("no-such-dir")).unwrap();
        assert!(images.is_empty());
    }

    #[test]
    fn dimensions_probed_from_header() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("pixel.png"), TINY_PNG).unwrap();

        let images = scan_gallery(tmp.path()).unwrap();
        assert_eq!(images[0].dimensions, Some((1, 1)));
    }

    #[test]
    fn unreadable_image_degrades_to_no_dimensions() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("broken.jpg"), "not a jpeg").unwrap();

        let images = scan_gallery(tmp.path()).unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].dimensions, None);
    }

    #[test]
    fn subdirectories_are_ignored() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("raw.jpg")).unwrap();
        fs::write(tmp.path().join("keep.png"), "fake").unwrap();

        let images = scan_gallery(tmp.path()).unwrap();
        let names: Vec<&str> = images.iter().map(|i| i.filename.as_str()).collect();
        assert_eq!(names, vec!["keep.png"]);
    }
}
