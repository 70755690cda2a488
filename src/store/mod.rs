//! Key-value persistence for the serialized configuration.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use anyhow::Result;
use std::fmt;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Capacity of the change notification channel
const CHANGE_CHANNEL_CAPACITY: usize = 16;

/// String key -> string value store, in the shape of browser local storage.
///
/// Writers notify subscribers with the changed key so readers can re-resolve
/// instead of polling and diffing.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a value. Fails with [`QuotaExceeded`] when the value is too large.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value. Returns true if the key existed.
    fn remove(&self, key: &str) -> Result<bool>;

    /// Receive the key of every subsequent `set`/`remove`
    fn subscribe(&self) -> broadcast::Receiver<String>;
}

/// Shared handles, so one store can back a dashboard and a watcher
impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<bool> {
        (**self).remove(key)
    }

    fn subscribe(&self) -> broadcast::Receiver<String> {
        (**self).subscribe()
    }
}

/// A write was refused because it would exceed the store quota
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaExceeded {
    pub key: String,
    pub size: u64,
    pub quota: u64,
}

impl fmt::Display for QuotaExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Storage quota exceeded for '{}': {} bytes (limit {} bytes)",
            self.key, self.size, self.quota
        )
    }
}

impl std::error::Error for QuotaExceeded {}

/// True if the error chain contains a [`QuotaExceeded`]
pub fn is_quota_exceeded(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| cause.is::<QuotaExceeded>())
}

fn check_quota(key: &str, value: &str, quota: Option<u64>) -> Result<()> {
    if let Some(quota) = quota {
        let size = value.len() as u64;
        if size > quota {
            return Err(QuotaExceeded {
                key: key.to_string(),
                size,
                quota,
            }
            .into());
        }
    }
    Ok(())
}

fn change_channel() -> broadcast::Sender<String> {
    broadcast::channel(CHANGE_CHANNEL_CAPACITY).0
}

/// Send a change notification; having no subscribers is fine
fn notify(sender: &broadcast::Sender<String>, key: &str) {
    let _ = sender.send(key.to_string());
}
