use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Settings for the dashboard CLI itself.
///
/// Example YAML:
/// ```yaml
/// storage_key: portfolioData
/// quota_bytes: 5242880
/// document_url: https://example.com/portfolio-complete.json
/// fetch_timeout: 10s
/// site_url: https://example.com/
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Key-value entry holding the JSON configuration (default: "portfolioData")
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Directory for stored entries (default: <data dir>/folio-dash/store)
    #[serde(default)]
    pub store_dir: Option<PathBuf>,

    /// Maximum size of a stored entry in bytes; larger writes fail
    #[serde(default)]
    pub quota_bytes: Option<u64>,

    /// Static JSON document fetched over HTTP when storage is empty
    #[serde(default)]
    pub document_url: Option<String>,

    /// Static JSON document read from disk when storage is empty
    #[serde(default)]
    pub document_path: Option<PathBuf>,

    /// Timeout for fetching `document_url`, humantime format (default: "10s")
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout: String,

    /// Page opened by `preview --open`
    #[serde(default)]
    pub site_url: Option<String>,

    /// Where exports are written (default: current directory)
    #[serde(default)]
    pub export_dir: Option<PathBuf>,
}

fn default_storage_key() -> String {
    "portfolioData".to_string()
}

fn default_fetch_timeout() -> String {
    "10s".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            store_dir: None,
            quota_bytes: None,
            document_url: None,
            document_path: None,
            fetch_timeout: default_fetch_timeout(),
            site_url: None,
            export_dir: None,
        }
    }
}

impl Settings {
    pub fn fetch_timeout(&self) -> Result<Duration> {
        humantime::parse_duration(&self.fetch_timeout)
            .with_context(|| format!("Invalid fetch_timeout '{}'", self.fetch_timeout))
    }

    pub fn store_dir(&self) -> PathBuf {
        self.store_dir.clone().unwrap_or_else(super::get_store_dir)
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Validate settings at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_settings(settings: &Settings) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if settings.storage_key.trim().is_empty() {
        errors.push("storage_key: must not be empty".to_string());
    }

    if let Err(e) = humantime::parse_duration(&settings.fetch_timeout) {
        errors.push(format!(
            "fetch_timeout: invalid '{}' - {}",
            settings.fetch_timeout, e
        ));
    }

    if let Some(ref url) = settings.document_url {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            errors.push(format!("document_url: must be an http(s) URL, got '{}'", url));
        }
        if settings.document_path.is_some() {
            errors.push("document_url and document_path: set only one".to_string());
        }
    }

    if settings.quota_bytes == Some(0) {
        errors.push("quota_bytes: must be greater than zero".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
