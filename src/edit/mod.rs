//! Transactional edits: either every field of an edit is accepted, or the
//! edit is rejected with the list of failures and nothing changes.

pub mod collections;
pub mod fields;
pub mod validation;

pub use fields::{apply_field_edits, FieldEdit};
pub use validation::{is_valid_color, is_valid_email, validate_config, validate_section};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::model::{PortfolioConfig, Section};

fn parse<T: DeserializeOwned>(section: Section, value: &Value) -> Result<T, Vec<String>> {
    T::deserialize(value).map_err(|e| vec![format!("{}: {}", section, e)])
}

/// Replace one section with `value`, validating the result.
///
/// The returned config is a new value; `config` is never modified. On
/// failure every problem is reported.
pub fn apply_section_edit(
    config: &PortfolioConfig,
    section: Section,
    value: &Value,
) -> Result<PortfolioConfig, Vec<String>> {
    let mut updated = config.clone();

    match section {
        Section::Colors => updated.colors = parse(section, value)?,
        Section::Typography => updated.typography = parse(section, value)?,
        Section::Personal => updated.personal = parse(section, value)?,
        Section::Projects => updated.projects = parse(section, value)?,
        Section::Skills => updated.skills = parse(section, value)?,
        Section::Timeline => updated.timeline = parse(section, value)?,
        Section::Stats => updated.stats = parse(section, value)?,
        Section::Contact => updated.contact = parse(section, value)?,
        Section::Social => updated.social = parse(section, value)?,
        Section::Visibility => updated.visibility = parse(section, value)?,
    }

    let errors = validate_section(&updated, section);
    if errors.is_empty() {
        Ok(updated)
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_section_edit() {
        let config = PortfolioConfig::default();
        let updated = apply_section_edit(
            &config,
            Section::Contact,
            &json!({"email": "sam@rivera.dev", "phone": "", "location": "Lisbon"}),
        )
        .unwrap();

        assert_eq!(updated.contact.email, "sam@rivera.dev");
        assert_eq!(updated.contact.whatsapp, None);
        assert_eq!(updated.personal, config.personal);
    }

    #[test]
    fn test_invalid_edit_changes_nothing() {
        let config = PortfolioConfig::default();
        let before = config.clone();

        let errors = apply_section_edit(
            &config,
            Section::Contact,
            &json!({"email": "bad", "whatsapp": "123", "location": "Lisbon"}),
        )
        .unwrap_err();

        assert_eq!(errors.len(), 2);
        assert_eq!(config, before);
    }

    #[test]
    fn test_wrong_shape_reported_with_section() {
        let config = PortfolioConfig::default();
        let errors =
            apply_section_edit(&config, Section::Projects, &json!({"title": "x"})).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("projects:"));
    }

    #[test]
    fn test_visibility_requires_booleans() {
        let config = PortfolioConfig::default();
        let result = apply_section_edit(
            &config,
            Section::Visibility,
            &json!({"about": {"awards": "no"}}),
        );
        assert!(result.is_err());
    }
}
