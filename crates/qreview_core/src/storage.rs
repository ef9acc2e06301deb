//! Durable client-side key/value storage and the typed filter store on top of it.

use crate::browser::LastImageLocation;
use crate::constants::{
    FILTER_ALL, STORAGE_KEY_CORRECTION_MODE, STORAGE_KEY_FILTERS, STORAGE_KEY_LAST_FILE_FILTER,
    STORAGE_KEY_LAST_IMAGE_FILE, STORAGE_KEY_LAST_IMAGE_PAGE,
};
use crate::error::AppError;
use crate::filter::FilterState;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;

/// String key/value store with `localStorage`-like semantics.
pub trait Storage: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError>;
    fn remove(&mut self, key: &str) -> Result<(), AppError>;
}

/// Volatile storage for tests and for runs where the state file is unusable.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: BTreeMap<String, String>,
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), AppError> {
        self.values.remove(key);
        Ok(())
    }
}

/// JSON object file holding every key. Rewritten in full on each change.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStorage {
    /// Open `path`, treating a missing file as empty and a corrupt one as empty
    /// with a warning.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();
        let values = match fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(values) => values,
                Err(err) => {
                    warn!(
                        "ignoring unreadable state file {}: {}",
                        path.display(),
                        err
                    );
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let bytes = serde_json::to_vec_pretty(&self.values)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        if self.values.get(key).map(String::as_str) == Some(value) {
            return Ok(());
        }
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), AppError> {
        if self.values.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Typed accessors for the dashboard's persisted preferences.
pub struct FilterStore {
    storage: Box<dyn Storage>,
}

impl FilterStore {
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStorage::default()))
    }

    /// Open the state file at `path`, falling back to memory if it cannot be read.
    pub fn open_or_memory(path: &Path) -> Self {
        match FileStorage::open(path) {
            Ok(storage) => Self::new(Box::new(storage)),
            Err(err) => {
                warn!(
                    "state file {} unavailable, preferences will not persist: {}",
                    path.display(),
                    err
                );
                Self::in_memory()
            }
        }
    }

    fn write(&mut self, key: &str, value: &str) {
        if let Err(err) = self.storage.set(key, value) {
            warn!("failed to persist {}: {}", key, err);
        }
    }

    /// Saved filter snapshot; absent or malformed snapshots yield defaults.
    pub fn load_filters(&self) -> FilterState {
        let Some(raw) = self.storage.get(STORAGE_KEY_FILTERS) else {
            return FilterState::default();
        };
        serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!("discarding malformed saved filters: {}", err);
            FilterState::default()
        })
    }

    /// Persist the snapshot and the file filter.
    pub fn save_filters(&mut self, filters: &FilterState) {
        match serde_json::to_string(filters) {
            Ok(json) => self.write(STORAGE_KEY_FILTERS, &json),
            Err(err) => warn!("failed to encode filters: {}", err),
        }
        self.set_last_file_filter(filters.file_path.as_deref());
    }

    pub fn last_file_filter(&self) -> Option<String> {
        self.storage
            .get(STORAGE_KEY_LAST_FILE_FILTER)
            .filter(|value| !value.is_empty() && value != FILTER_ALL)
    }

    pub fn set_last_file_filter(&mut self, file_path: Option<&str>) {
        self.write(STORAGE_KEY_LAST_FILE_FILTER, file_path.unwrap_or(FILTER_ALL));
    }

    pub fn correction_mode(&self) -> bool {
        self.storage
            .get(STORAGE_KEY_CORRECTION_MODE)
            .map(|value| value == "true")
            .unwrap_or(false)
    }

    pub fn set_correction_mode(&mut self, enabled: bool) {
        self.write(
            STORAGE_KEY_CORRECTION_MODE,
            if enabled { "true" } else { "false" },
        );
    }

    pub fn last_image_location(&self) -> Option<LastImageLocation> {
        let file = self
            .storage
            .get(STORAGE_KEY_LAST_IMAGE_FILE)
            .filter(|file| !file.is_empty())?;
        let page = self
            .storage
            .get(STORAGE_KEY_LAST_IMAGE_PAGE)?
            .trim()
            .parse::<i64>()
            .ok()?;
        Some(LastImageLocation { file, page })
    }

    pub fn set_last_image_location(&mut self, location: &LastImageLocation) {
        self.write(STORAGE_KEY_LAST_IMAGE_PAGE, &location.page.to_string());
        self.write(STORAGE_KEY_LAST_IMAGE_FILE, &location.file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::RequiresImage;
    use tempfile::TempDir;

    #[test]
    fn file_storage_persists_across_reopen() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("nested").join("state.json");
        {
            let mut storage = FileStorage::open(&path).expect("open");
            storage.set("k", "v").expect("set");
            storage.set("gone", "x").expect("set");
            storage.remove("gone").expect("remove");
        }
        let storage = FileStorage::open(&path).expect("reopen");
        assert_eq!(storage.get("k").as_deref(), Some("v"));
        assert_eq!(storage.get("gone"), None);
    }

    #[test]
    fn corrupt_state_file_opens_empty() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("state.json");
        fs::write(&path, b"{not json").expect("write");
        let storage = FileStorage::open(&path).expect("open");
        assert_eq!(storage.get("anything"), None);
    }

    #[test]
    fn filters_round_trip_through_store() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("state.json");
        let filters = FilterState {
            category: Some("math".to_string()),
            search: "gas".to_string(),
            requires_image: RequiresImage::Yes,
            file_path: Some("exams/a.pdf".to_string()),
            ..FilterState::default()
        };
        {
            let mut store = FilterStore::open_or_memory(&path);
            store.save_filters(&filters);
            store.set_correction_mode(true);
            store.set_last_image_location(&LastImageLocation {
                file: "exams/a.pdf".to_string(),
                page: 3,
            });
        }
        let store = FilterStore::open_or_memory(&path);
        assert_eq!(store.load_filters(), filters);
        assert_eq!(store.last_file_filter().as_deref(), Some("exams/a.pdf"));
        assert!(store.correction_mode());
        assert_eq!(
            store.last_image_location(),
            Some(LastImageLocation {
                file: "exams/a.pdf".to_string(),
                page: 3
            })
        );
    }

    #[test]
    fn all_sentinel_reads_as_no_file_filter() {
        let mut store = FilterStore::in_memory();
        store.save_filters(&FilterState::default());
        assert_eq!(store.last_file_filter(), None);
        assert!(!store.correction_mode());
        assert_eq!(store.last_image_location(), None);
    }

    #[test]
    fn malformed_snapshot_yields_defaults() {
        let mut storage = MemoryStorage::default();
        storage.set(STORAGE_KEY_FILTERS, "[1,2]").expect("set");
        let store = FilterStore::new(Box::new(storage));
        assert_eq!(store.load_filters(), FilterState::default());
    }
}
