//! Durable filename scheme for persisted tiles.
//!
//! Each tile file is named `{stem}{index}.png` where the stem identifies the
//! owning list and the index is the tile's position at the time of the last
//! persist. Files that do not match the scheme are never classified by
//! guesswork; they are skipped with a warning.

use crate::config::{PAGINATION_STEM, PRIMARY_STEM, TILE_EXTENSION};
use crate::error::Result;
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Which in-memory list a durable tile file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Primary,
    Pagination,
}

impl ListKind {
    /// Returns the filename stem used for this list.
    pub fn stem(&self) -> &'static str {
        match self {
            ListKind::Primary => PRIMARY_STEM,
            ListKind::Pagination => PAGINATION_STEM,
        }
    }
}

static ENTRY_NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^({}|{})(\d+)\.{}$",
        PRIMARY_STEM, PAGINATION_STEM, TILE_EXTENSION
    ))
    .expect("entry name pattern must compile")
});

/// Builds the durable filename for a list entry at the given index.
pub fn entry_file_name(kind: ListKind, index: usize) -> String {
    format!("{}{}.{}", kind.stem(), index, TILE_EXTENSION)
}

/// Parses a durable filename into its list kind and index.
///
/// Returns `None` for filenames outside the naming scheme.
pub fn parse_entry_name(name: &str) -> Option<(ListKind, usize)> {
    let caps = ENTRY_NAME_PATTERN.captures(name)?;
    let kind = if &caps[1] == PRIMARY_STEM {
        ListKind::Primary
    } else {
        ListKind::Pagination
    };
    let index = caps[2].parse().ok()?;
    Some((kind, index))
}

/// A durable tile file discovered during a storage scan.
#[derive(Debug)]
pub struct StorageEntry {
    pub kind: ListKind,
    pub index: usize,
    pub path: PathBuf,
}

/// Enumerates tile files in the storage directory, sorted by list kind and
/// ascending numeric index.
pub fn scan_storage_dir(dir: &Path) -> Result<Vec<StorageEntry>> {
    let mut entries: Vec<StorageEntry> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let path = entry.path();
            let parsed = path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(parse_entry_name);
            match parsed {
                Some((kind, index)) => Some(StorageEntry { kind, index, path }),
                None => {
                    warn!("Skipping unrecognized storage file: {}", path.display());
                    None
                }
            }
        })
        .collect();

    entries.sort_by_key(|entry| (entry.kind.stem(), entry.index));
    Ok(entries)
}
