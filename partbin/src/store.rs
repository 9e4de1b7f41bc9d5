//! Container persistence: one pretty-printed JSON file per container.

use crate::error::{InventoryError, Result};
use crate::types::{ContainerRecord, ItemKind};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Storage backend for container records
pub trait ContainerStore {
    /// Every readable record, sorted by container name
    fn load_all(&self) -> Result<Vec<ContainerRecord>>;

    /// One record by container name
    fn load(&self, name: &str) -> Result<ContainerRecord>;

    /// Write a record, replacing any previous version. Returns where it went.
    fn save(&self, record: &ContainerRecord) -> Result<PathBuf>;

    /// Delete a record by name. Returns false if there was nothing to delete.
    fn delete(&self, name: &str) -> Result<bool>;

    /// True if a record with this name is stored
    fn exists(&self, name: &str) -> bool;
}

/// Filesystem store: `<root>/<file stem>.json`
#[derive(Debug, Clone)]
pub struct JsonContainerStore {
    root: PathBuf,
}

impl JsonContainerStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the container files
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file for a container name
    pub fn container_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.json", file_stem(name)))
    }

    fn read_record(path: &Path) -> Result<ContainerRecord> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| InventoryError::CorruptRecord {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// The record at `name`'s path, if that file belongs to `name`.
    /// Two names can share a stem after sanitizing.
    fn read_owned(&self, name: &str) -> Result<Option<(PathBuf, ContainerRecord)>> {
        let path = self.container_path(name);
        if !path.is_file() {
            return Ok(None);
        }
        let record = Self::read_record(&path)?;
        if record.name != name {
            return Ok(None);
        }
        Ok(Some((path, record)))
    }
}

impl ContainerStore for JsonContainerStore {
    fn load_all(&self) -> Result<Vec<ContainerRecord>> {
        if !self.root.is_dir() {
            debug!(root = %self.root.display(), "data directory does not exist yet");
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                trace!(path = %path.display(), "skipping non-container file");
                continue;
            }
            match Self::read_record(&path) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!("Failed to load container from {}: {}", path.display(), e);
                }
            }
        }

        records.sort_by(|a, b| a.name.cmp(&b.name));
        debug!(count = records.len(), "loaded container records");
        Ok(records)
    }

    fn load(&self, name: &str) -> Result<ContainerRecord> {
        match self.read_owned(name)? {
            Some((_, record)) => Ok(record),
            None => Err(InventoryError::ContainerNotFound {
                name: name.to_string(),
            }),
        }
    }

    fn save(&self, record: &ContainerRecord) -> Result<PathBuf> {
        let path = self.container_path(&record.name);
        if path.is_file() {
            if let Ok(existing) = Self::read_record(&path) {
                if existing.name != record.name {
                    return Err(InventoryError::duplicate_name(
                        ItemKind::Container,
                        &record.name,
                        self.root.display().to_string(),
                    ));
                }
            }
        }

        let content = serde_json::to_string_pretty(record)?;
        atomic_write(&path, content.as_bytes())?;
        debug!(container = %record.name, path = %path.display(), "saved container");
        Ok(path)
    }

    fn delete(&self, name: &str) -> Result<bool> {
        match self.read_owned(name)? {
            Some((path, _)) => {
                fs::remove_file(&path)?;
                debug!(container = %name, path = %path.display(), "deleted container file");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn exists(&self, name: &str) -> bool {
        matches!(self.read_owned(name), Ok(Some(_)))
    }
}

/// File stem for a container name: path separators, control characters
/// and other characters unsafe in file names become `_`.
pub fn file_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let stem = stem.trim_start_matches('.');
    if stem.is_empty() {
        "_".to_string()
    } else {
        stem.to_string()
    }
}

/// Atomic write via temp file and rename
fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Write to temp file in same directory
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, content)?;

    // Rename (atomic on same filesystem)
    fs::rename(&temp_path, path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Container, DrawerSpec};
    use tempfile::TempDir;

    fn setup() -> (TempDir, JsonContainerStore) {
        let temp = TempDir::new().unwrap();
        let store = JsonContainerStore::new(temp.path().join("containers"));
        (temp, store)
    }

    fn record(name: &str) -> ContainerRecord {
        let mut container = Container::new(name, 1, 2, 3).unwrap();
        container.add_drawer(DrawerSpec::new("top")).unwrap();
        container.to_snapshot()
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("cabinet"), "cabinet");
        assert_eq!(file_stem("a/b\\c"), "a_b_c");
        assert_eq!(file_stem("../etc"), "_etc");
        assert_eq!(file_stem("..."), "_");
        assert_eq!(file_stem("  shelf 2 "), "shelf 2");
    }

    #[test]
    fn test_load_all_missing_dir_is_empty() {
        let (_temp, store) = setup();
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_save_load_delete() {
        let (_temp, store) = setup();
        let original = record("cabinet");

        let path = store.save(&original).unwrap();
        assert!(path.ends_with("cabinet.json"));
        assert!(store.exists("cabinet"));
        assert_eq!(store.load("cabinet").unwrap(), original);

        assert!(store.delete("cabinet").unwrap());
        assert!(!store.exists("cabinet"));
        assert!(!store.delete("cabinet").unwrap());
        assert!(matches!(
            store.load("cabinet"),
            Err(InventoryError::ContainerNotFound { .. })
        ));
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let (_temp, store) = setup();
        store.save(&record("cabinet")).unwrap();
        let files: Vec<_> = fs::read_dir(store.root())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(files, vec!["cabinet.json".to_string()]);
    }

    #[test_log::test]
    fn test_load_all_sorted_and_skips_junk() {
        let (_temp, store) = setup();
        store.save(&record("zeta")).unwrap();
        store.save(&record("alpha")).unwrap();
        fs::write(store.root().join("notes.txt"), "not a container").unwrap();
        fs::write(store.root().join("broken.json"), "{ nope").unwrap();

        let names: Vec<_> = store
            .load_all()
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_stem_collision_is_rejected() {
        let (_temp, store) = setup();
        store.save(&record("a/b")).unwrap();
        assert!(matches!(
            store.save(&record("a_b")),
            Err(InventoryError::DuplicateName { .. })
        ));
        assert!(!store.exists("a_b"));
        assert!(store.exists("a/b"));
    }
}
