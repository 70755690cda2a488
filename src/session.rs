//! The dashboard application context.
//!
//! A [`Dashboard`] owns the store handle, the resolved configuration and the
//! section being edited. Every operation updates the in-memory configuration
//! and records a [`Status`] for the user; persisting is a separate [`save`]
//! step so a failed write never loses the current state.
//!
//! [`save`]: Dashboard::save

use anyhow::{Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::sync::broadcast::{self, error::RecvError};

use crate::edit::{self, apply_field_edits, apply_section_edit, FieldEdit};
use crate::model::{PortfolioConfig, Section};
use crate::source::{load_from_source, load_from_store, DocumentSource, LoadOrigin};
use crate::store::{is_quota_exceeded, KeyValueStore};
use crate::transfer::{self, ImportError, ImportScope};
use crate::view::{render, PageView};
use crate::{defaults, diag, diag_warn, presets, visibility};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
    Info,
}

/// User-facing result of the last operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

impl Status {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            message: message.into(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

pub struct Dashboard {
    store: Box<dyn KeyValueStore>,
    storage_key: String,
    config: PortfolioConfig,
    current_section: Section,
    origin: LoadOrigin,
    status: Option<Status>,
}

impl Dashboard {
    /// A dashboard showing the built-in defaults until [`load`](Self::load) runs
    pub fn new(store: Box<dyn KeyValueStore>, storage_key: impl Into<String>) -> Self {
        Self {
            store,
            storage_key: storage_key.into(),
            config: defaults::portfolio(),
            current_section: Section::Colors,
            origin: LoadOrigin::Defaults,
            status: None,
        }
    }

    pub fn config(&self) -> &PortfolioConfig {
        &self.config
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn origin(&self) -> LoadOrigin {
        self.origin
    }

    pub fn current_section(&self) -> Section {
        self.current_section
    }

    pub fn select_section(&mut self, section: Section) {
        self.current_section = section;
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    /// Take the last status, leaving none behind
    pub fn take_status(&mut self) -> Option<Status> {
        self.status.take()
    }

    fn set_status(&mut self, status: Status) {
        diag!("{}", status.message);
        self.status = Some(status);
    }

    /// Render tree for the current configuration
    pub fn view(&self) -> PageView {
        render(&self.config)
    }

    /// Load from storage, then `document`, then defaults
    pub async fn load<D: DocumentSource>(&mut self, document: &D) -> LoadOrigin {
        let loaded = load_from_source(self.store.as_ref(), &self.storage_key, document).await;
        self.config = loaded.config;
        self.origin = loaded.origin;
        self.set_status(Status::info(format!("Loaded from {}", loaded.origin)));
        loaded.origin
    }

    /// Persist the current configuration.
    ///
    /// On failure the in-memory configuration is kept as is and an error
    /// status is recorded.
    pub fn save(&mut self) -> Result<()> {
        let result = serde_json::to_string(&self.config)
            .context("Failed to serialize configuration")
            .and_then(|json| self.store.set(&self.storage_key, &json));

        if let Err(ref e) = result {
            let message = if is_quota_exceeded(e) {
                format!("Save failed, storage is full: {}", e)
            } else {
                format!("Save failed: {:#}", e)
            };
            diag_warn!("{}", message);
            self.status = Some(Status::error(message));
        }
        result
    }

    /// Apply `path=value` edits as one transaction
    pub fn apply_edits(&mut self, edits: &[FieldEdit]) -> Result<(), Vec<String>> {
        match apply_field_edits(&self.config, edits) {
            Ok(updated) => {
                self.config = updated;
                self.set_status(Status::success(format!("Updated {} field(s)", edits.len())));
                Ok(())
            }
            Err(errors) => {
                self.set_status(Status::error(format!(
                    "Edit rejected: {} problem(s)",
                    errors.len()
                )));
                Err(errors)
            }
        }
    }

    /// Replace one section with a JSON value
    pub fn apply_section_json(&mut self, section: Section, text: &str) -> Result<(), Vec<String>> {
        let result = serde_json::from_str(text)
            .map_err(|e| vec![format!("Invalid JSON format: {}", e)])
            .and_then(|value| apply_section_edit(&self.config, section, &value));

        match result {
            Ok(updated) => {
                self.config = updated;
                self.set_status(Status::success(format!("{} updated", section.title())));
                Ok(())
            }
            Err(errors) => {
                self.set_status(Status::error(format!(
                    "{} not updated: {} problem(s)",
                    section.title(),
                    errors.len()
                )));
                Err(errors)
            }
        }
    }

    /// Apply a color theme. Returns false (with an info status) for unknown names.
    pub fn apply_color_preset(&mut self, name: &str) -> bool {
        let applied = presets::apply_color_preset(&mut self.config, name);
        if applied {
            self.set_status(Status::success(format!("Applied '{}' colors", name.trim())));
        } else {
            self.set_status(Status::info(format!(
                "Unknown color preset '{}'. Available: {}",
                name,
                presets::COLOR_PRESETS.join(", ")
            )));
        }
        applied
    }

    /// Apply a visibility profile. Returns false (with an info status) for unknown names.
    pub fn apply_visibility_preset(&mut self, name: &str) -> bool {
        let applied = presets::apply_visibility_preset(&mut self.config, name);
        if applied {
            self.set_status(Status::success(format!(
                "Applied '{}' visibility",
                name.trim()
            )));
        } else {
            self.set_status(Status::info(format!(
                "Unknown visibility preset '{}'. Available: {}",
                name,
                presets::VISIBILITY_PRESETS.join(", ")
            )));
        }
        applied
    }

    /// Flip a visibility section. Returns whether it is now shown.
    pub fn toggle_section(&mut self, section: &str) -> bool {
        self.config.visibility = visibility::toggle_section(&self.config.visibility, section);
        let shown = visibility::section_visible(&self.config.visibility, section);
        self.set_status(Status::success(format!(
            "Section '{}' {}",
            section,
            if shown { "shown" } else { "hidden" }
        )));
        shown
    }

    pub fn set_visibility(&mut self, section: &str, item: &str, shown: bool) {
        self.config.visibility =
            visibility::set_item(&self.config.visibility, section, item, shown);
        self.set_status(Status::success(format!(
            "{}.{} {}",
            section,
            item,
            if shown { "shown" } else { "hidden" }
        )));
    }

    /// Remove the stored entry and return to the built-in defaults
    pub fn reset(&mut self) -> Result<()> {
        match self.store.remove(&self.storage_key) {
            Ok(_) => {
                self.config = defaults::portfolio();
                self.origin = LoadOrigin::Defaults;
                self.set_status(Status::success("Reset to defaults"));
                Ok(())
            }
            Err(e) => {
                self.set_status(Status::error(format!("Reset failed: {:#}", e)));
                Err(e)
            }
        }
    }

    /// Restore the default palette, keeping every other section
    pub fn reset_colors(&mut self) {
        self.config.colors = defaults::colors();
        self.set_status(Status::success("Colors reset to defaults"));
    }

    pub fn add_project(&mut self) -> u32 {
        let id = edit::collections::add_project(&mut self.config);
        self.set_status(Status::success(format!("Added project {}", id)));
        id
    }

    pub fn remove_project(&mut self, id: u32) -> bool {
        let removed = edit::collections::remove_project(&mut self.config, id);
        self.report_removal(removed, format!("project {}", id));
        removed
    }

    pub fn add_skill_category(&mut self, name: &str) -> Result<(), String> {
        match edit::collections::add_skill_category(&mut self.config, name) {
            Ok(()) => {
                self.set_status(Status::success(format!("Added skill category '{}'", name.trim())));
                Ok(())
            }
            Err(e) => {
                self.set_status(Status::error(e.clone()));
                Err(e)
            }
        }
    }

    pub fn remove_skill_category(&mut self, name: &str) -> bool {
        let removed = edit::collections::remove_skill_category(&mut self.config, name);
        self.report_removal(removed, format!("skill category '{}'", name));
        removed
    }

    pub fn add_social_link(&mut self) -> usize {
        let index = edit::collections::add_social_link(&mut self.config);
        self.set_status(Status::success(format!("Added social link #{}", index)));
        index
    }

    pub fn remove_social_link(&mut self, index: usize) -> bool {
        let removed = edit::collections::remove_social_link(&mut self.config, index);
        self.report_removal(removed, format!("social link #{}", index));
        removed
    }

    pub fn add_timeline_entry(&mut self, year: &str, title: &str) -> String {
        let id = edit::collections::add_timeline_entry(&mut self.config, year, title);
        self.set_status(Status::success(format!("Added timeline entry '{}'", id)));
        id
    }

    pub fn remove_timeline_entry(&mut self, id: &str) -> bool {
        let removed = edit::collections::remove_timeline_entry(&mut self.config, id);
        self.report_removal(removed, format!("timeline entry '{}'", id));
        removed
    }

    pub fn add_stat(&mut self, name: &str, percentage: i64, category: &str) -> Result<(), String> {
        match edit::collections::add_stat(&mut self.config, name, percentage, category) {
            Ok(()) => {
                self.set_status(Status::success(format!("Added stat '{}'", name.trim())));
                Ok(())
            }
            Err(e) => {
                self.set_status(Status::error(e.clone()));
                Err(e)
            }
        }
    }

    pub fn remove_stat(&mut self, name: &str) -> bool {
        let removed = edit::collections::remove_stat(&mut self.config, name);
        self.report_removal(removed, format!("stat '{}'", name));
        removed
    }

    fn report_removal(&mut self, removed: bool, what: String) {
        if removed {
            self.set_status(Status::success(format!("Removed {}", what)));
        } else {
            self.set_status(Status::info(format!("No {} to remove", what)));
        }
    }

    /// JSON for the whole configuration (`None`) or one section
    pub fn export_string(&self, section: Option<Section>) -> Result<String> {
        transfer::export_json(&self.config, section)
    }

    /// Write an export file into `dir`
    pub fn export_to_dir(&mut self, section: Option<Section>, dir: &Path) -> Result<PathBuf> {
        match transfer::export_to_dir(&self.config, section, dir) {
            Ok(path) => {
                self.set_status(Status::success(format!("Exported to {}", path.display())));
                Ok(path)
            }
            Err(e) => {
                self.set_status(Status::error(format!("Export failed: {:#}", e)));
                Err(e)
            }
        }
    }

    /// Import JSON text. A full document replaces everything; anything else
    /// replaces the current section.
    pub fn import_json(&mut self, text: &str) -> Result<ImportScope, ImportError> {
        let result = transfer::import_json(&self.config, text, self.current_section);
        self.finish_import(result)
    }

    pub fn import_file(&mut self, path: &Path) -> Result<ImportScope, ImportError> {
        let result = transfer::import_file(&self.config, path, self.current_section);
        self.finish_import(result)
    }

    fn finish_import(
        &mut self,
        result: Result<transfer::Imported, ImportError>,
    ) -> Result<ImportScope, ImportError> {
        match result {
            Ok(imported) => {
                self.config = imported.config;
                let message = match imported.scope {
                    ImportScope::Full => "Imported complete configuration".to_string(),
                    ImportScope::Section(section) => format!("Imported {}", section.title()),
                };
                self.set_status(Status::success(message));
                Ok(imported.scope)
            }
            Err(err) => {
                // Unparseable input imports nothing and is not an error
                let status = match err {
                    ImportError::Unreadable(ref message) => {
                        Status::info(format!("Nothing imported: {}", message))
                    }
                    ImportError::Invalid(_) => Status::error(format!("Import failed: {}", err)),
                };
                self.set_status(status);
                Err(err)
            }
        }
    }

    /// Subscribe to store changes, for use with [`reload_on_change`](Self::reload_on_change)
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.store.subscribe()
    }

    /// Wait until the storage key changes, then re-resolve from the store.
    ///
    /// A removed entry resolves to the defaults. Returns false once the
    /// store stops sending changes.
    pub async fn reload_on_change(&mut self, changes: &mut broadcast::Receiver<String>) -> bool {
        loop {
            match changes.recv().await {
                Ok(key) if key == self.storage_key => break,
                Ok(_) => continue,
                Err(RecvError::Lagged(missed)) => {
                    diag!("Missed {} store change(s), reloading", missed);
                    break;
                }
                Err(RecvError::Closed) => return false,
            }
        }

        match load_from_store(self.store.as_ref(), &self.storage_key) {
            Some(config) => {
                self.config = config;
                self.origin = LoadOrigin::Storage;
            }
            None => {
                self.config = defaults::portfolio();
                self.origin = LoadOrigin::Defaults;
            }
        }
        self.set_status(Status::info("Configuration changed, reloaded"));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ConfiguredDocument;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    const KEY: &str = "portfolioData";

    fn dashboard(store: Arc<MemoryStore>) -> Dashboard {
        Dashboard::new(Box::new(store), KEY)
    }

    fn memory() -> Arc<MemoryStore> {
        Arc::new(MemoryStore::default())
    }

    #[tokio::test]
    async fn test_load_and_save_round_trip() {
        let store = memory();
        let mut dash = dashboard(store.clone());
        assert_eq!(dash.load(&ConfiguredDocument::None).await, LoadOrigin::Defaults);

        dash.apply_edits(&["personal.name=Sam Rivera".parse().unwrap()]).unwrap();
        dash.save().unwrap();

        let mut reopened = dashboard(store);
        assert_eq!(reopened.load(&ConfiguredDocument::None).await, LoadOrigin::Storage);
        assert_eq!(reopened.config().personal.name, "Sam Rivera");
    }

    #[test]
    fn test_quota_failure_keeps_state() {
        let mut dash = dashboard(Arc::new(MemoryStore::new(Some(16))));
        dash.apply_edits(&["personal.name=Kept".parse().unwrap()]).unwrap();

        let err = dash.save().unwrap_err();
        assert!(is_quota_exceeded(&err));
        assert_eq!(dash.status().unwrap().kind, StatusKind::Error);
        assert_eq!(dash.config().personal.name, "Kept");
    }

    #[test]
    fn test_rejected_edit_leaves_config() {
        let mut dash = dashboard(memory());
        let before = dash.config().clone();
        let errors = dash
            .apply_edits(&["colors.primary=blue".parse().unwrap()])
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(dash.config(), &before);
    }

    #[test]
    fn test_unknown_preset_is_info() {
        let mut dash = dashboard(memory());
        let before = dash.config().clone();
        assert!(!dash.apply_color_preset("doesNotExist"));
        assert_eq!(dash.status().unwrap().kind, StatusKind::Info);
        assert_eq!(dash.config(), &before);

        assert!(dash.apply_visibility_preset("minimal"));
        assert_eq!(dash.status().unwrap().kind, StatusKind::Success);
    }

    #[test]
    fn test_toggle_reports_new_state() {
        let mut dash = dashboard(memory());
        assert!(!dash.toggle_section("footer"));
        assert!(dash.toggle_section("footer"));
    }

    #[test]
    fn test_reset_colors_keeps_other_sections() {
        let mut dash = dashboard(memory());
        dash.apply_color_preset("ocean");
        dash.apply_edits(&["personal.name=Sam".parse().unwrap()]).unwrap();

        dash.reset_colors();
        assert_eq!(dash.config().colors, defaults::colors());
        assert_eq!(dash.config().personal.name, "Sam");
    }

    #[test]
    fn test_reset_clears_store() {
        let store = memory();
        let mut dash = dashboard(store.clone());
        dash.save().unwrap();
        assert!(store.get(KEY).unwrap().is_some());

        dash.reset().unwrap();
        assert!(store.get(KEY).unwrap().is_none());
        assert_eq!(dash.origin(), LoadOrigin::Defaults);
    }

    #[test]
    fn test_added_social_link_survives_edit_and_reimport() {
        let mut dash = dashboard(memory());
        let index = dash.add_social_link();

        let edit = format!("social.{}.name=Mastodon", index);
        dash.apply_edits(&[edit.parse().unwrap()]).unwrap();
        assert_eq!(dash.config().social[index].name, "Mastodon");

        let exported = dash.export_string(None).unwrap();
        let mut fresh = dashboard(memory());
        assert_eq!(fresh.import_json(&exported).unwrap(), ImportScope::Full);
        assert_eq!(fresh.config(), dash.config());
    }

    #[tokio::test]
    async fn test_unknown_keys_survive_save() {
        let store = Arc::new(MemoryStore::with_entry(
            KEY,
            r#"{"personal": {"name": "Sam"}, "blogs": [{"title": "Hello"}]}"#,
        ));
        let mut dash = dashboard(store.clone());
        assert_eq!(dash.load(&ConfiguredDocument::None).await, LoadOrigin::Storage);

        dash.apply_edits(&["typography.fontSize=18px".parse().unwrap()])
            .unwrap();
        dash.save().unwrap();

        let saved: serde_json::Value =
            serde_json::from_str(&store.get(KEY).unwrap().unwrap()).unwrap();
        assert_eq!(saved["blogs"][0]["title"], "Hello");
        assert_eq!(saved["typography"]["fontSize"], "18px");
        assert_eq!(saved["personal"]["name"], "Sam");
    }

    #[test]
    fn test_import_uses_current_section() {
        let mut dash = dashboard(memory());
        dash.select_section(Section::Stats);
        let scope = dash
            .import_json(r#"[{"name": "Rust", "percentage": 90, "category": "Languages"}]"#)
            .unwrap();
        assert_eq!(scope, ImportScope::Section(Section::Stats));
        assert_eq!(dash.config().stats.len(), 1);
    }

    #[test]
    fn test_unparseable_import_is_info() {
        let mut dash = dashboard(memory());
        let before = dash.config().clone();
        assert!(dash.import_json("not json").is_err());
        assert_eq!(dash.status().unwrap().kind, StatusKind::Info);
        assert_eq!(dash.config(), &before);
    }

    #[test]
    fn test_missing_removal_is_info() {
        let mut dash = dashboard(memory());
        assert!(!dash.remove_project(404));
        assert_eq!(dash.status().unwrap().kind, StatusKind::Info);
    }

    #[tokio::test]
    async fn test_reload_on_external_change() {
        let store = memory();
        let mut dash = dashboard(store.clone());
        let mut changes = dash.subscribe();

        store.set("unrelated", "{}").unwrap();
        store
            .set(KEY, r#"{"personal": {"name": "From elsewhere"}}"#)
            .unwrap();

        assert!(dash.reload_on_change(&mut changes).await);
        assert_eq!(dash.config().personal.name, "From elsewhere");
        assert_eq!(dash.origin(), LoadOrigin::Storage);
    }
}
