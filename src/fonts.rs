use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PlateMapError, PlateMapResult};

/// Common locations of a plain sans-serif face on Linux, macOS and Windows.
const SEARCH_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// First existing font file from the search list, if any.
pub fn find_system_font() -> Option<PathBuf> {
    SEARCH_PATHS.iter().map(PathBuf::from).find(|p| p.is_file())
}

/// Load font bytes from an explicit path, or fall back to the system search.
pub fn load_font(explicit: Option<&Path>) -> PlateMapResult<Vec<u8>> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => find_system_font().ok_or_else(|| {
            PlateMapError::render(
                "no usable font found in the standard locations; pass --font <path-to-ttf>",
            )
        })?,
    };
    tracing::debug!(path = %path.display(), "loading font");
    fs::read(&path).map_err(|e| PlateMapError::io(format!("read font '{}': {e}", path.display())))
}
