//! Utility functions

use crate::constants::APP_NAME;
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use tracing::warn;

// Square card back, also used for the window icon
pub const CARD_BACK_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 200"><defs><pattern id="p" width="20" height="20" patternUnits="userSpaceOnUse" patternTransform="rotate(45)"><rect width="20" height="20" fill="#18181b"/><rect width="10" height="20" fill="#1f1f22"/></pattern></defs><rect width="200" height="200" rx="14" fill="url(#p)"/><rect x="8" y="8" width="184" height="184" rx="10" fill="none" stroke="#2dd4bf" stroke-opacity="0.45" stroke-width="3"/><circle cx="100" cy="100" r="38" fill="#09090b" stroke="#2dd4bf" stroke-width="4"/><text x="100" y="116" font-size="46" font-family="sans-serif" font-weight="bold" text-anchor="middle" fill="#2dd4bf">?</text></svg>"##;

/// Rasterize the card back to a square RGBA image.
pub fn rasterize_card_back(size: u32) -> Option<(Vec<u8>, u32, u32)> {
    let mut options = resvg::usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = match resvg::usvg::Tree::from_str(CARD_BACK_SVG, &options) {
        Ok(tree) => tree,
        Err(e) => {
            warn!(error = %e, "Failed to parse card back SVG");
            return None;
        }
    };
    let scale = size as f32 / tree.size().width();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size, size)?;
    resvg::render(
        &tree,
        resvg::usvg::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Some((premul_to_straight(&pixmap), size, size))
}

fn premul_to_straight(pixmap: &resvg::tiny_skia::Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let a = p.alpha();
            if a == 0 {
                [0, 0, 0, 0]
            } else {
                let r = (p.red() as u16 * 255 / a as u16) as u8;
                let g = (p.green() as u16 * 255 / a as u16) as u8;
                let b = (p.blue() as u16 * 255 / a as u16) as u8;
                [r, g, b, a]
            }
        })
        .collect()
}

/// Get the app data directory (settings, logs)
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Get the cache directory path
pub fn get_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// File name for a cached card image.
///
/// Slugs come from the network: bytes outside `[A-Za-z0-9-]` are written as
/// `_xx` hex escapes, so distinct slugs never share a file. The image URL
/// hash is appended so a changed remote image gets a fresh entry.
pub fn cache_file_name(identifier: &str, url: &str) -> String {
    let mut name = String::with_capacity(identifier.len() + 21);
    for byte in identifier.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            name.push(byte as char);
        } else {
            name.push_str(&format!("_{:02x}", byte));
        }
    }
    let mut hasher = FxHasher::default();
    url.hash(&mut hasher);
    format!("{}.{:016x}.img", name, hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_file_name() {
        let url = "https://img.example/a.jpg";
        let name = cache_file_name("red-panda", url);
        assert!(name.starts_with("red-panda."));
        assert!(name.ends_with(".img"));
        assert!(cache_file_name("../etc/passwd", url).starts_with("_2e_2e_2fetc_2fpasswd."));
        assert!(cache_file_name("búho", url).starts_with("b_c3_baho."));
        assert_eq!(name, cache_file_name("red-panda", url));
    }

    #[test]
    fn test_cache_file_name_distinct_slugs() {
        let url = "https://img.example/a.jpg";
        assert_ne!(cache_file_name("snow.owl", url), cache_file_name("snow_owl", url));
        assert_ne!(cache_file_name("búho", url), cache_file_name("bého", url));
        assert_ne!(cache_file_name("a_2e", url), cache_file_name("a.", url));
    }

    #[test]
    fn test_cache_file_name_tracks_url() {
        assert_ne!(
            cache_file_name("otter", "https://img.example/otter-v1.jpg"),
            cache_file_name("otter", "https://img.example/otter-v2.jpg")
        );
    }

    #[test]
    fn test_rasterize_card_back() {
        let (pixels, w, h) = rasterize_card_back(64).unwrap();
        assert_eq!((w, h), (64, 64));
        assert_eq!(pixels.len(), 64 * 64 * 4);
        // Centre of the card is opaque
        let centre = ((32 * 64 + 32) * 4 + 3) as usize;
        assert_eq!(pixels[centre], 255);
    }
}
