use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::sync::broadcast;

use super::{change_channel, check_quota, notify, KeyValueStore};
use crate::diag;

/// Store keeping one `<key>.json` file per entry in a directory.
///
/// Writes go through atomic-write-file so an entry is never left half written.
pub struct FileStore {
    dir: PathBuf,
    quota: Option<u64>,
    changes: broadcast::Sender<String>,
}

impl FileStore {
    pub fn new(dir: PathBuf, quota: Option<u64>) -> Self {
        Self {
            dir,
            quota,
            changes: change_channel(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing a key. Characters outside `[A-Za-z0-9._-]` become `_`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        check_quota(key, value, self.quota)?;
        crate::config::ensure_dir(&self.dir)?;

        let path = self.path_for(key);
        let mut file = AtomicWriteFile::open(&path)
            .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
        file.write_all(value.as_bytes())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        file.commit()
            .with_context(|| format!("Failed to save {}", path.display()))?;

        diag!("Stored '{}' ({} bytes) at {}", key, value.len(), path.display());
        notify(&self.changes, key);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let path = self.path_for(key);
        let existed = match fs::remove_file(&path) {
            Ok(()) => true,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to remove {}", path.display()))
            }
        };
        if existed {
            notify(&self.changes, key);
        }
        Ok(existed)
    }

    fn subscribe(&self) -> broadcast::Receiver<String> {
        self.changes.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::is_quota_exceeded;

    #[test]
    fn test_get_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf(), None);
        assert_eq!(store.get("portfolioData").unwrap(), None);
    }

    #[test]
    fn test_set_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested/store"), None);

        store.set("portfolioData", r##"{"colors":{"primary":"#111111"}}"##).unwrap();
        assert_eq!(
            store.get("portfolioData").unwrap().as_deref(),
            Some(r##"{"colors":{"primary":"#111111"}}"##)
        );

        assert!(store.remove("portfolioData").unwrap());
        assert!(!store.remove("portfolioData").unwrap());
        assert_eq!(store.get("portfolioData").unwrap(), None);
    }

    #[test]
    fn test_quota_exceeded_keeps_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf(), Some(8));

        store.set("k", "small").unwrap();
        let err = store.set("k", "far too large").unwrap_err();
        assert!(is_quota_exceeded(&err));
        assert_eq!(store.get("k").unwrap().as_deref(), Some("small"));
    }

    #[test]
    fn test_key_sanitized_into_file_name() {
        let store = FileStore::new(PathBuf::from("/tmp/store"), None);
        assert_eq!(
            store.path_for("../portfolio data"),
            PathBuf::from("/tmp/store/.._portfolio_data.json")
        );
    }

    #[test]
    fn test_set_notifies_subscribers() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf(), None);
        let mut changes = store.subscribe();

        store.set("portfolioData", "{}").unwrap();
        assert_eq!(changes.try_recv().unwrap(), "portfolioData");
    }
}
