use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::broadcast;

use super::{change_channel, check_quota, notify, KeyValueStore};

/// In-process store, used for previews and tests
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    quota: Option<u64>,
    changes: broadcast::Sender<String>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(None)
    }
}

impl MemoryStore {
    pub fn new(quota: Option<u64>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            quota,
            changes: change_channel(),
        }
    }

    /// Store pre-populated with one entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::default();
        if let Ok(mut entries) = store.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        store
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| anyhow!("Memory store lock poisoned"))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        check_quota(key, value, self.quota)?;
        self.lock()?.insert(key.to_string(), value.to_string());
        notify(&self.changes, key);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let existed = self.lock()?.remove(key).is_some();
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
    use crate::store::{is_quota_exceeded, QuotaExceeded};

    #[test]
    fn test_round_trip() {
        let store = MemoryStore::default();
        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        assert!(store.remove("a").unwrap());
        assert_eq!(store.get("a").unwrap(), None);
    }

    #[test]
    fn test_quota_error_details() {
        let store = MemoryStore::new(Some(3));
        let err = store.set("a", "1234").unwrap_err();
        assert!(is_quota_exceeded(&err));
        let quota = err.downcast_ref::<QuotaExceeded>().unwrap();
        assert_eq!(quota.size, 4);
        assert_eq!(quota.quota, 3);
    }

    #[test]
    fn test_remove_missing_does_not_notify() {
        let store = MemoryStore::default();
        let mut changes = store.subscribe();
        assert!(!store.remove("a").unwrap());
        assert!(changes.try_recv().is_err());
    }

    #[test]
    fn test_with_entry() {
        let store = MemoryStore::with_entry("portfolioData", "{}");
        assert_eq!(store.get("portfolioData").unwrap().as_deref(), Some("{}"));
    }
}
