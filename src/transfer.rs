//! JSON export and import of whole configurations or single sections.

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde_json::Value;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::edit::{apply_section_edit, validate_config};
use crate::model::{PortfolioConfig, Section};
use crate::resolve::resolve;

/// File stem used for full exports
pub const FULL_EXPORT_NAME: &str = "portfolio-complete";

/// `<section>.json`, or `portfolio-complete.json` for a full export
pub fn export_file_name(section: Option<Section>) -> String {
    let stem = section.map(|s| s.key()).unwrap_or(FULL_EXPORT_NAME);
    format!("{}.json", stem)
}

/// Pretty-printed JSON for the full config or one section
pub fn export_json(config: &PortfolioConfig, section: Option<Section>) -> Result<String> {
    let value = match section {
        Some(section) => config.section_value(section),
        None => serde_json::to_value(config).context("Failed to serialize configuration")?,
    };
    serde_json::to_string_pretty(&value).context("Failed to serialize configuration")
}

/// Write an export into `dir` atomically. Returns the written path.
pub fn export_to_dir(
    config: &PortfolioConfig,
    section: Option<Section>,
    dir: &Path,
) -> Result<PathBuf> {
    crate::config::ensure_dir(dir)?;
    let path = dir.join(export_file_name(section));
    let json = export_json(config, section)?;

    let mut file = AtomicWriteFile::open(&path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(json.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    file.write_all(b"\n")
        .with_context(|| format!("Failed to write {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save export to {}", path.display()))?;

    Ok(path)
}

/// What an import replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportScope {
    /// The document had both `colors` and `personal`: everything was replaced
    Full,
    /// Only the selected section was replaced
    Section(Section),
}

/// Why an import changed nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// The file could not be read or is not JSON
    Unreadable(String),
    /// The document parsed but failed validation
    Invalid(Vec<String>),
}

impl ImportError {
    pub fn messages(&self) -> Vec<String> {
        match self {
            ImportError::Unreadable(message) => vec![message.clone()],
            ImportError::Invalid(errors) => errors.clone(),
        }
    }
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::Unreadable(message) => f.write_str(message),
            ImportError::Invalid(errors) => write!(f, "{} validation error(s)", errors.len()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Imported {
    pub config: PortfolioConfig,
    pub scope: ImportScope,
}

/// True if a document looks like a complete portfolio rather than one section
pub fn is_full_document(value: &Value) -> bool {
    value.get("colors").is_some() && value.get("personal").is_some()
}

/// Import JSON text.
///
/// A full document (has `colors` and `personal`) is resolved against the
/// defaults, upgrading legacy visibility keys, and replaces the entire
/// config. Anything else replaces only `current`. The result is validated
/// as a whole; on failure every problem is returned and `config` is left as
/// it was.
pub fn import_json(
    config: &PortfolioConfig,
    text: &str,
    current: Section,
) -> Result<Imported, ImportError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| ImportError::Unreadable(format!("Invalid JSON format: {}", e)))?;

    if is_full_document(&value) {
        let imported = resolve(Some(&value));
        validate_config(&imported).map_err(ImportError::Invalid)?;
        return Ok(Imported {
            config: imported,
            scope: ImportScope::Full,
        });
    }

    let updated = apply_section_edit(config, current, &value).map_err(ImportError::Invalid)?;
    Ok(Imported {
        config: updated,
        scope: ImportScope::Section(current),
    })
}

/// Read and import a JSON file
pub fn import_file(
    config: &PortfolioConfig,
    path: &Path,
    current: Section,
) -> Result<Imported, ImportError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        ImportError::Unreadable(format!("Failed to read {}: {}", path.display(), e))
    })?;
    import_json(config, &text, current)
}
