//! The tile store: two ordered tile lists mirrored to durable storage.
//!
//! `TileStore` owns a primary list (the tiles shown to the user) and a
//! pagination list (paging/preview indicators). Every mutation triggers a
//! full resync of the storage directory: stale files are deleted on the
//! calling thread, then the current lists are re-encoded and written on a
//! background worker.

use crate::config::{APP_DIR_NAME, IMAGES_SUBDIR};
use crate::defaults;
use crate::file_utils::{self, ListKind};
use crate::preferences::Preferences;
use image::{DynamicImage, ImageFormat};
use log::{debug, error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};

/// Completion signal for an in-flight background persist.
///
/// Dropping the handle is fine; the write pass finishes regardless. Waiting
/// is only needed when durable state must be observed, e.g. in tests or
/// before process exit.
pub struct PersistHandle {
    rx: Receiver<()>,
}

impl PersistHandle {
    /// Blocks until the background write pass has finished.
    pub fn wait(self) {
        // A disconnected sender also means the pass is over.
        let _ = self.rx.recv();
    }

    /// A handle whose write pass never started (nothing to wait for).
    fn completed() -> Self {
        let (tx, rx) = mpsc::channel();
        drop(tx);
        Self { rx }
    }
}

/// Persistent store for AR marker tiles.
///
/// The store performs no internal locking: it is a single-owner state object
/// and all mutations must be serialized by the caller (expected to be the
/// UI thread). Background write passes operate on snapshots of the lists,
/// so overlapping passes are last-write-wins on the storage directory.
pub struct TileStore {
    primary: Vec<DynamicImage>,
    pagination: Vec<DynamicImage>,
    storage_root: PathBuf,
    preferences: Preferences,
}

impl TileStore {
    /// Creates a store with explicit storage and preferences locations.
    ///
    /// Both lists start empty and no I/O happens until [`TileStore::load`]
    /// is called.
    pub fn new(storage_root: PathBuf, preferences: Preferences) -> Self {
        Self {
            primary: Vec::new(),
            pagination: Vec::new(),
            storage_root,
            preferences,
        }
    }

    /// Opens and loads the store rooted at the platform per-app data
    /// directory:
    ///
    /// - Linux: `~/.local/share/ar-tile-store`
    /// - macOS: `~/Library/Application Support/ar-tile-store`
    /// - Windows: `%APPDATA%\ar-tile-store`
    pub fn open_default() -> Self {
        let mut root = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        root.push(APP_DIR_NAME);

        let mut store = Self::new(root, Preferences::open_default());
        // App startup is fire-and-forget; the seed persist completes in the
        // background.
        let _ = store.load();
        store
    }

    /// Loads tiles from durable storage, falling back to the bundled
    /// defaults when no durable state exists.
    ///
    /// Returns the persist handle of the seeding write pass when defaults
    /// were loaded, `None` when durable tiles were found.
    pub fn load(&mut self) -> Option<PersistHandle> {
        if self.load_from_storage() {
            None
        } else {
            Some(self.load_defaults())
        }
    }

    /// Tiles in the primary list, most recently inserted first.
    pub fn primary(&self) -> &[DynamicImage] {
        &self.primary
    }

    /// Tiles in the pagination list, most recently inserted first.
    pub fn pagination(&self) -> &[DynamicImage] {
        &self.pagination
    }

    /// The storage root resolved at construction.
    pub fn storage_root(&self) -> &Path {
        &self.storage_root
    }

    /// The directory holding persisted tile files.
    pub fn images_dir(&self) -> PathBuf {
        self.storage_root.join(IMAGES_SUBDIR)
    }

    /// The preferences handle used by this store.
    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Prepends a tile to the primary list and persists both lists.
    pub fn insert_primary(&mut self, tile: DynamicImage) -> PersistHandle {
        self.primary.insert(0, tile);
        self.persist()
    }

    /// Prepends a tile to the pagination list and persists both lists.
    pub fn insert_pagination(&mut self, tile: DynamicImage) -> PersistHandle {
        self.pagination.insert(0, tile);
        self.persist()
    }

    /// Removes the primary tile at `index` and persists both lists.
    ///
    /// Out-of-range indices are ignored and return `None`.
    pub fn delete_primary(&mut self, index: usize) -> Option<PersistHandle> {
        if index >= self.primary.len() {
            debug!("Ignoring delete of out-of-range primary index {}", index);
            return None;
        }
        self.primary.remove(index);
        self.delete_entry_file(ListKind::Primary, index);
        Some(self.persist())
    }

    /// Removes the pagination tile at `index` and persists both lists.
    ///
    /// Out-of-range indices are ignored and return `None`.
    pub fn delete_pagination(&mut self, index: usize) -> Option<PersistHandle> {
        if index >= self.pagination.len() {
            debug!(
                "Ignoring delete of out-of-range pagination index {}",
                index
            );
            return None;
        }
        self.pagination.remove(index);
        self.delete_entry_file(ListKind::Pagination, index);
        Some(self.persist())
    }

    /// Stores the preferred on-screen tile size. Failures are logged and
    /// otherwise ignored.
    pub fn persist_preferred_size(&self, width: f64, height: f64) {
        if let Err(e) = self.preferences.set_preferred_size(width, height) {
            error!("Failed to save preferred tile size: {}", e);
        }
    }

    /// Mirrors both in-memory lists to durable storage.
    ///
    /// The storage directory is created and cleared synchronously, then each
    /// tile is encoded and written on a background worker from a snapshot of
    /// the lists. Per-file failures are logged and do not abort the pass.
    pub fn persist(&self) -> PersistHandle {
        let dir = self.images_dir();
        if let Err(e) = fs::create_dir_all(&dir) {
            error!(
                "Failed to create storage directory {}: {}",
                dir.display(),
                e
            );
            return PersistHandle::completed();
        }
        self.clear_storage_dir(&dir);

        let primary = self.primary.clone();
        let pagination = self.pagination.clone();
        let (tx, rx) = mpsc::channel();
        rayon::spawn(move || {
            write_list(&dir, ListKind::Primary, &primary);
            write_list(&dir, ListKind::Pagination, &pagination);
            let _ = tx.send(());
        });
        PersistHandle { rx }
    }

    /// Loads both lists from the storage directory.
    ///
    /// Returns `false` when no durable state exists (missing directory or
    /// enumeration failure), leaving the lists untouched for the defaults
    /// fallback.
    fn load_from_storage(&mut self) -> bool {
        let dir = self.images_dir();
        if !dir.exists() {
            return false;
        }

        let entries = match file_utils::scan_storage_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                error!("Failed to enumerate storage directory: {}", e);
                return false;
            }
        };

        self.primary.clear();
        self.pagination.clear();
        for entry in entries {
            let tile = match image::open(&entry.path) {
                Ok(tile) => tile,
                Err(e) => {
                    warn!(
                        "Skipping undecodable tile {}: {}",
                        entry.path.display(),
                        e
                    );
                    continue;
                }
            };
            match entry.kind {
                ListKind::Primary => self.primary.push(tile),
                ListKind::Pagination => self.pagination.push(tile),
            }
        }

        self.seed_pagination_if_empty();
        true
    }

    /// Seeds the primary list with the bundled default tiles and persists
    /// them, creating durable state for the next run.
    fn load_defaults(&mut self) -> PersistHandle {
        info!("No durable tiles found, seeding bundled defaults");
        self.primary = defaults::load_default_tiles();
        self.pagination.clear();
        self.seed_pagination_if_empty();
        self.persist()
    }

    /// An empty pagination list alongside a non-empty primary list is
    /// healed with a copy of the first primary tile.
    fn seed_pagination_if_empty(&mut self) {
        if self.pagination.is_empty() {
            if let Some(first) = self.primary.first() {
                self.pagination.push(first.clone());
            }
        }
    }

    /// Deletes every file in the storage directory, best effort.
    fn clear_storage_dir(&self, dir: &Path) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                error!(
                    "Failed to clear storage directory {}: {}",
                    dir.display(),
                    e
                );
                return;
            }
        };
        for entry in entries.filter_map(|e| e.ok()) {
            let path = entry.path();
            if let Err(e) = fs::remove_file(&path) {
                error!("Failed to delete stale tile {}: {}", path.display(), e);
            }
        }
    }

    /// Deletes the durable file for a removed tile, named by its
    /// pre-removal index. The subsequent full persist rewrites the
    /// survivors at their new positions.
    fn delete_entry_file(&self, kind: ListKind, index: usize) {
        let path = self
            .images_dir()
            .join(file_utils::entry_file_name(kind, index));
        if let Err(e) = fs::remove_file(&path) {
            warn!("Failed to delete tile file {}: {}", path.display(), e);
        }
    }
}

/// Writes each tile of a list to its durable file, in index order.
fn write_list(dir: &Path, kind: ListKind, tiles: &[DynamicImage]) {
    for (index, tile) in tiles.iter().enumerate() {
        let path = dir.join(file_utils::entry_file_name(kind, index));
        if let Err(e) = tile.save_with_format(&path, ImageFormat::Png) {
            error!("Failed to write tile {}: {}", path.display(), e);
        }
    }
}
