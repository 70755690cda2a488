use serde_json::Value;
use std::fmt;

use super::DocumentSource;
use crate::model::PortfolioConfig;
use crate::resolve::resolve;
use crate::store::KeyValueStore;
use crate::{diag, diag_warn};

/// Where a loaded configuration came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    Storage,
    Document,
    Defaults,
}

impl fmt::Display for LoadOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadOrigin::Storage => f.write_str("local storage"),
            LoadOrigin::Document => f.write_str("static document"),
            LoadOrigin::Defaults => f.write_str("built-in defaults"),
        }
    }
}

/// A resolved configuration together with its origin
#[derive(Debug, Clone)]
pub struct Loaded {
    pub config: PortfolioConfig,
    pub origin: LoadOrigin,
}

/// Parse text as a JSON object, logging why it was rejected otherwise
fn parse_object(text: &str, what: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(text) {
        Ok(value @ Value::Object(_)) => Some(value),
        Ok(_) => {
            diag_warn!("Ignoring {}: not a JSON object", what);
            None
        }
        Err(e) => {
            diag_warn!("Ignoring {}: invalid JSON ({})", what, e);
            None
        }
    }
}

/// Resolve the configuration stored under `key`.
/// Returns None when the entry is missing, unreadable or not a JSON object.
pub fn load_from_store<S>(store: &S, key: &str) -> Option<PortfolioConfig>
where
    S: KeyValueStore + ?Sized,
{
    match store.get(key) {
        Ok(Some(text)) => {
            let value = parse_object(&text, "stored configuration")?;
            diag!("Loaded configuration from storage key '{}'", key);
            Some(resolve(Some(&value)))
        }
        Ok(None) => {
            diag!("No stored configuration under '{}'", key);
            None
        }
        Err(e) => {
            diag_warn!("Failed to read stored configuration: {:#}", e);
            None
        }
    }
}

/// Load and resolve the configuration.
///
/// Tries, in order: the store entry under `key`, the static document, and
/// finally the built-in defaults. Malformed data, read failures and transport
/// errors are logged and treated as a missing source, so this always
/// produces a complete configuration.
pub async fn load_from_source<S, D>(store: &S, key: &str, document: &D) -> Loaded
where
    S: KeyValueStore + ?Sized,
    D: DocumentSource,
{
    if let Some(config) = load_from_store(store, key) {
        return Loaded {
            config,
            origin: LoadOrigin::Storage,
        };
    }

    match document.fetch().await {
        Ok(Some(text)) => {
            let what = format!("document {}", document.describe());
            if let Some(value) = parse_object(&text, &what) {
                diag!("Loaded configuration from {}", document.describe());
                return Loaded {
                    config: resolve(Some(&value)),
                    origin: LoadOrigin::Document,
                };
            }
        }
        Ok(None) => diag!("No configuration document at {}", document.describe()),
        Err(e) => diag_warn!("Failed to fetch {}: {:#}", document.describe(), e),
    }

    diag!("Using built-in defaults");
    Loaded {
        config: resolve(None),
        origin: LoadOrigin::Defaults,
    }
}
