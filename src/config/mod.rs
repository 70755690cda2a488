mod schema;

pub use schema::{validate_settings, Settings};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.config/folio-dash/)
pub fn get_config_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".config"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("folio-dash")
}

/// Get the default settings file path (~/.config/folio-dash/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Get the default directory for stored entries
pub fn get_store_dir() -> PathBuf {
    dirs::data_dir()
        .map(|p| p.join("folio-dash/store"))
        .unwrap_or_else(|| get_config_dir().join("store"))
}

/// Ensure a directory exists
pub fn ensure_dir(dir: &std::path::Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory at {}", dir.display()))?;
    }
    Ok(())
}

/// Load CLI settings from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to the settings file. If None, uses the default
///   path (~/.config/folio-dash/config.yaml), and a missing default file
///   yields the default settings.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given settings file does not exist
/// - The settings file cannot be read
/// - The YAML cannot be parsed
pub fn load_settings(path: Option<PathBuf>) -> Result<Settings> {
    let explicit = path.is_some();
    let settings_path = path.unwrap_or_else(get_config_path);

    if !settings_path.exists() {
        if explicit {
            anyhow::bail!("Settings file not found at {}", settings_path.display());
        }
        return Ok(Settings::default());
    }

    let content = fs::read_to_string(&settings_path)
        .with_context(|| format!("Failed to read settings file at {}", settings_path.display()))?;

    if content.trim().is_empty() {
        return Ok(Settings::default());
    }

    let settings: Settings = serde_saphyr::from_str(&content).with_context(|| {
        format!("Failed to parse settings: invalid YAML in {}", settings_path.display())
    })?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_settings(Some(dir.path().join("nope.yaml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "storage_key: other\nquota_bytes: 2048\n").unwrap();

        let settings = load_settings(Some(path)).unwrap();
        assert_eq!(settings.storage_key, "other");
        assert_eq!(settings.quota_bytes, Some(2048));
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "\n").unwrap();
        assert_eq!(load_settings(Some(path)).unwrap(), Settings::default());
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "storage_key: [unterminated\n").unwrap();
        let err = load_settings(Some(path)).unwrap_err();
        assert!(format!("{:#}", err).contains("invalid YAML"));
    }
}
