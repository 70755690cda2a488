//! Static JSON documents used when local storage holds no configuration.

pub mod file;
pub mod http;
pub mod loader;

pub use file::FileDocument;
pub use http::HttpDocument;
pub use loader::{load_from_source, load_from_store, LoadOrigin, Loaded};

use anyhow::Result;
use std::future::Future;
use std::path::PathBuf;

use crate::config::Settings;
use crate::transfer::export_file_name;

/// A read-only JSON document holding a full (or partial) configuration
pub trait DocumentSource: Send + Sync {
    /// Short description for diagnostics (URL or path)
    fn describe(&self) -> String;

    /// Fetch the raw document text. `Ok(None)` means the document does not exist.
    fn fetch(&self) -> impl Future<Output = Result<Option<String>>> + Send;
}

/// The document configured in settings, if any
pub enum ConfiguredDocument {
    Http(HttpDocument),
    File(FileDocument),
    None,
}

impl ConfiguredDocument {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        if let Some(ref url) = settings.document_url {
            return Ok(Self::Http(HttpDocument::new(
                url.clone(),
                settings.fetch_timeout()?,
            )?));
        }
        if let Some(ref path) = settings.document_path {
            return Ok(Self::File(FileDocument::new(path.clone())));
        }
        // A full export left in the working directory
        let fallback = PathBuf::from(export_file_name(None));
        if fallback.is_file() {
            return Ok(Self::File(FileDocument::new(fallback)));
        }
        Ok(Self::None)
    }
}

impl DocumentSource for ConfiguredDocument {
    fn describe(&self) -> String {
        match self {
            Self::Http(doc) => doc.describe(),
            Self::File(doc) => doc.describe(),
            Self::None => "no document".to_string(),
        }
    }

    async fn fetch(&self) -> Result<Option<String>> {
        match self {
            Self::Http(doc) => doc.fetch().await,
            Self::File(doc) => doc.fetch().await,
            Self::None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings_prefers_url() {
        let settings = Settings {
            document_url: Some("https://example.com/portfolio-complete.json".to_string()),
            ..Settings::default()
        };
        let doc = ConfiguredDocument::from_settings(&settings).unwrap();
        assert!(matches!(doc, ConfiguredDocument::Http(_)));
        assert_eq!(doc.describe(), "https://example.com/portfolio-complete.json");
    }

    #[test]
    fn test_from_settings_file_and_none() {
        let settings = Settings {
            document_path: Some(PathBuf::from("portfolio-complete.json")),
            ..Settings::default()
        };
        let doc = ConfiguredDocument::from_settings(&settings).unwrap();
        assert!(matches!(doc, ConfiguredDocument::File(_)));

        let doc = ConfiguredDocument::from_settings(&Settings::default()).unwrap();
        assert!(matches!(doc, ConfiguredDocument::None));
    }

    #[tokio::test]
    async fn test_none_fetches_nothing() {
        assert_eq!(ConfiguredDocument::None.fetch().await.unwrap(), None);
    }
}
