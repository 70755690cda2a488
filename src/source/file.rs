use anyhow::{Context, Result};
use std::path::PathBuf;

use super::DocumentSource;

/// JSON document read from the local filesystem
pub struct FileDocument {
    path: PathBuf,
}

impl FileDocument {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl DocumentSource for FileDocument {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", self.path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let doc = FileDocument::new(dir.path().join("portfolio-complete.json"));
        assert_eq!(doc.fetch().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portfolio-complete.json");
        std::fs::write(&path, "{}").unwrap();
        let doc = FileDocument::new(path);
        assert_eq!(doc.fetch().await.unwrap().as_deref(), Some("{}"));
    }
}
