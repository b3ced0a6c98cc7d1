use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use crate::domain::model::{CityRecord, LoadReport};

struct CacheEntry {
    modified: SystemTime,
    cities: Arc<Vec<CityRecord>>,
    report: LoadReport,
}

/// Cache of parsed city datasets, keyed by file path and modification time.
///
/// An entry is only served while the file's mtime still matches the one
/// recorded at store time; a changed or unreadable file evicts the entry.
/// Invalidation is explicit (`invalidate` / `clear`), never ambient.
#[derive(Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, CacheEntry>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached dataset, checking the file on disk for staleness.
    pub fn fetch(&mut self, path: &Path) -> Option<(Arc<Vec<CityRecord>>, LoadReport)> {
        let current = match file_mtime(path) {
            Some(mtime) => mtime,
            None => {
                self.entries.remove(path);
                return None;
            }
        };

        match self.entries.get(path) {
            Some(entry) if entry.modified == current => {
                Some((Arc::clone(&entry.cities), entry.report))
            }
            Some(_) => {
                tracing::debug!("dataset changed on disk, evicting: {}", path.display());
                self.entries.remove(path);
                None
            }
            None => None,
        }
    }

    /// Store a parsed dataset under the file's current mtime.
    /// Skipped when the file cannot be stat'ed.
    pub fn store(&mut self, path: &Path, cities: Arc<Vec<CityRecord>>, report: LoadReport) {
        if let Some(modified) = file_mtime(path) {
            self.insert(path, modified, cities, report);
        }
    }

    pub fn invalidate(&mut self, path: &Path) {
        self.entries.remove(path);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(
        &mut self,
        path: &Path,
        modified: SystemTime,
        cities: Arc<Vec<CityRecord>>,
        report: LoadReport,
    ) {
        self.entries.insert(
            path.to_path_buf(),
            CacheEntry {
                modified,
                cities,
                report,
            },
        );
    }
}

fn file_mtime(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}
