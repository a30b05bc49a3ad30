//! Persistent image tile store for AR marker applications.
//!
//! Maintains two ordered lists of decoded tiles — a primary list of AR
//! marker images and a pagination list of paging indicators — mirrored to a
//! durable per-app directory on every mutation. On first launch the store
//! seeds itself with two bundled default tiles; afterwards it reloads the
//! persisted tiles at startup. A small JSON preferences file records the
//! preferred on-screen tile size.
//!
//! ```no_run
//! use ar_tile_store::TileStore;
//!
//! let mut store = TileStore::open_default();
//! if let Some(first) = store.primary().first().cloned() {
//!     store.insert_pagination(first);
//! }
//! ```

pub mod config;
pub mod defaults;
pub mod error;
pub mod file_utils;
pub mod preferences;
pub mod store;

pub use error::{Result, StoreError};
pub use file_utils::ListKind;
pub use preferences::{Preferences, PreferredSize};
pub use store::{PersistHandle, TileStore};
