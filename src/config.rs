//! Store configuration constants.

/// Subdirectory under the storage root that holds persisted tile files.
pub const IMAGES_SUBDIR: &str = "Images";

/// Filename stem for primary-list tiles (`image{N}.png`).
pub const PRIMARY_STEM: &str = "image";

/// Filename stem for pagination-list tiles (`pagination{N}.png`).
pub const PAGINATION_STEM: &str = "pagination";

/// File extension for persisted tiles (lossless raster format).
pub const TILE_EXTENSION: &str = "png";

/// Per-app directory name under the platform data/config directories.
pub const APP_DIR_NAME: &str = "ar-tile-store";

/// Filename of the JSON preferences file.
pub const PREFERENCES_FILE: &str = "preferences.json";
