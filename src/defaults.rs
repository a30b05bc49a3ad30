//! Compiled-in default tiles.
//!
//! Used to seed the store on first launch, before any user tiles exist.

use image::DynamicImage;
use log::error;

/// Bundled default tile assets, in seeding order.
const DEFAULT_TILES: [(&str, &[u8]); 2] = [
    ("tile1", include_bytes!("../assets/tile1.png")),
    ("tile2", include_bytes!("../assets/tile2.png")),
];

/// Decodes the bundled default tiles.
///
/// Assets that fail to decode are logged and skipped, so a corrupted build
/// may yield fewer than two images.
pub fn load_default_tiles() -> Vec<DynamicImage> {
    DEFAULT_TILES
        .iter()
        .filter_map(|(name, bytes)| match image::load_from_memory(bytes) {
            Ok(image) => Some(image),
            Err(e) => {
                error!("Failed to decode bundled tile {:?}: {}", name, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_tiles_decode() {
        let tiles = load_default_tiles();
        assert_eq!(tiles.len(), 2);
        for tile in &tiles {
            assert!(tile.width() > 0);
            assert!(tile.height() > 0);
        }
    }

    #[test]
    fn bundled_tiles_are_distinct() {
        let tiles = load_default_tiles();
        assert_ne!(tiles[0].as_bytes(), tiles[1].as_bytes());
    }
}
