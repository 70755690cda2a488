use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::legacy::{upgrade_legacy_visibility, LEGACY_KEYS};
use super::normalize::normalize_ids;
use crate::defaults;
use crate::model::{PortfolioConfig, Section, VisibilityMap};
use crate::{diag, diag_warn};

/// Resolve raw, possibly partial configuration data into a complete config.
///
/// Each top-level section is taken from `raw` when present and non-empty,
/// otherwise from the built-in defaults. Record sections are replaced whole.
/// `colors` merges per role over the default palette and `visibility` merges
/// per leaf over the default map. A section with the wrong shape falls back
/// to its default on its own; anything that is not a JSON object yields the
/// full defaults. Never fails.
pub fn resolve(raw: Option<&Value>) -> PortfolioConfig {
    let root = match raw {
        Some(Value::Object(root)) => root,
        Some(other) => {
            diag_warn!(
                "Ignoring configuration data: expected an object, found {}",
                kind_of(other)
            );
            return defaults::portfolio();
        }
        None => {
            diag!("No configuration data, using defaults");
            return defaults::portfolio();
        }
    };

    let mut config = PortfolioConfig {
        colors: merge_string_map(root, Section::Colors, defaults::colors),
        typography: merge_string_map(root, Section::Typography, defaults::typography),
        personal: replace_section(root, Section::Personal, defaults::personal),
        projects: replace_section(root, Section::Projects, defaults::projects),
        skills: replace_section(root, Section::Skills, defaults::skills),
        timeline: replace_section(root, Section::Timeline, defaults::timeline),
        stats: replace_section(root, Section::Stats, defaults::stats),
        contact: replace_section(root, Section::Contact, defaults::contact),
        social: replace_section(root, Section::Social, defaults::social),
        visibility: merge_visibility(root),
        extra: unknown_keys(root),
    };

    normalize_ids(&mut config);
    config
}

/// Parse JSON text and resolve it. Malformed text yields the full defaults.
pub fn resolve_str(text: &str) -> PortfolioConfig {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => resolve(Some(&value)),
        Err(e) => {
            diag_warn!("Invalid configuration JSON, using defaults: {}", e);
            defaults::portfolio()
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// The section value if it carries any data
fn present<'a>(root: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    match root.get(key)? {
        Value::Null => None,
        Value::Object(map) if map.is_empty() => None,
        Value::Array(items) if items.is_empty() => None,
        Value::String(s) if s.is_empty() => None,
        value => Some(value),
    }
}

fn replace_section<T, F>(root: &Map<String, Value>, section: Section, default: F) -> T
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    let Some(value) = present(root, section.key()) else {
        return default();
    };

    match T::deserialize(value) {
        Ok(parsed) => parsed,
        Err(e) => {
            diag_warn!("Section '{}' is malformed, using defaults: {}", section, e);
            default()
        }
    }
}

/// Merge a role -> CSS value object key by key over its defaults
fn merge_string_map<F>(root: &Map<String, Value>, section: Section, default: F) -> BTreeMap<String, String>
where
    F: FnOnce() -> BTreeMap<String, String>,
{
    let mut merged = default();
    let Some(value) = present(root, section.key()) else {
        return merged;
    };
    let Value::Object(entries) = value else {
        diag_warn!("Section '{}' is malformed, using defaults: expected an object", section);
        return merged;
    };

    for (key, value) in entries {
        match value {
            Value::String(text) => {
                merged.insert(key.clone(), text.clone());
            }
            _ => diag_warn!("Skipping {} '{}': value is not a string", section, key),
        }
    }
    merged
}

/// Root keys that are neither a known section nor a legacy visibility key
fn unknown_keys(root: &Map<String, Value>) -> Map<String, Value> {
    root.iter()
        .filter(|(key, _)| {
            !Section::ALL.iter().any(|section| section.key() == key.as_str())
                && !LEGACY_KEYS.contains(&key.as_str())
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

fn merge_visibility(root: &Map<String, Value>) -> VisibilityMap {
    let mut visibility = defaults::visibility();

    upgrade_legacy_visibility(root, &mut visibility);

    let Some(value) = present(root, Section::Visibility.key()) else {
        return visibility;
    };
    let Value::Object(sections) = value else {
        diag_warn!("Section 'visibility' is malformed, using defaults: expected an object");
        return visibility;
    };

    apply_leaf_overrides(sections, &mut visibility);
    visibility
}

/// Copy every boolean leaf of a section -> item -> bool object onto `visibility`.
/// Non-boolean leaves count as absent.
pub(super) fn apply_leaf_overrides(sections: &Map<String, Value>, visibility: &mut VisibilityMap) {
    for (section, items) in sections {
        let Value::Object(items) = items else {
            diag_warn!("Skipping visibility for '{}': expected an object of booleans", section);
            continue;
        };
        for (item, shown) in items {
            if let Value::Bool(shown) = shown {
                visibility
                    .entry(section.clone())
                    .or_default()
                    .insert(item.clone(), *shown);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_source_gives_defaults() {
        assert_eq!(resolve(None), defaults::portfolio());
    }

    #[test]
    fn test_single_color_override_keeps_other_defaults() {
        let raw = json!({"colors": {"primary": "#111111"}});
        let config = resolve(Some(&raw));

        assert_eq!(config.colors["primary"], "#111111");
        assert_eq!(config.colors["secondary"], "#667eea");
        assert_eq!(config.personal, defaults::personal());
        assert_eq!(config.projects, defaults::projects());
        assert_eq!(config.skills, defaults::skills());
        assert_eq!(config.contact, defaults::contact());
        assert_eq!(config.social, defaults::social());
        assert_eq!(config.visibility, defaults::visibility());
    }

    #[test]
    fn test_unknown_color_roles_pass_through() {
        let raw = json!({"colors": {"brandPink": "hsl(320, 90%, 60%)"}});
        let config = resolve(Some(&raw));
        assert_eq!(config.colors["brandPink"], "hsl(320, 90%, 60%)");
    }

    #[test]
    fn test_typography_merges_per_setting() {
        let raw = json!({"typography": {"fontSize": "18px", "letterSpacing": "0.02em", "lineHeight": 2}});
        let config = resolve(Some(&raw));

        assert_eq!(config.typography["fontSize"], "18px");
        assert_eq!(config.typography["letterSpacing"], "0.02em");
        assert_eq!(config.typography["lineHeight"], "1.6");
        assert_eq!(config.typography["fontFamily"], defaults::typography()["fontFamily"]);
    }

    #[test]
    fn test_unknown_root_keys_kept() {
        let raw = json!({
            "personal": {"name": "Sam"},
            "blogs": [{"title": "First post"}],
            "sectionVisibility": {"home": false}
        });
        let config = resolve(Some(&raw));

        assert_eq!(config.extra.len(), 1);
        assert_eq!(config.extra["blogs"], json!([{"title": "First post"}]));

        let saved = serde_json::to_value(&config).unwrap();
        assert_eq!(saved["blogs"], json!([{"title": "First post"}]));
        assert!(saved.get("sectionVisibility").is_none());
        assert_eq!(resolve(Some(&saved)), config);
    }

    #[test]
    fn test_not_json_gives_defaults() {
        assert_eq!(resolve_str("not json"), defaults::portfolio());
    }

    #[test]
    fn test_non_object_root_gives_defaults() {
        let raw = json!(["colors"]);
        assert_eq!(resolve(Some(&raw)), defaults::portfolio());
        let raw = json!("not json");
        assert_eq!(resolve(Some(&raw)), defaults::portfolio());
    }

    #[test]
    fn test_record_section_replaced_whole() {
        let raw = json!({"personal": {"name": "Sam Rivera"}});
        let config = resolve(Some(&raw));

        assert_eq!(config.personal.name, "Sam Rivera");
        // Shallow merge: fields not supplied are empty, not defaulted
        assert_eq!(config.personal.title, "");
        assert_eq!(config.personal.awards, 0);
    }

    #[test]
    fn test_empty_sections_count_as_absent() {
        let raw = json!({"projects": [], "skills": {}, "contact": null});
        let config = resolve(Some(&raw));
        assert_eq!(config.projects, defaults::projects());
        assert_eq!(config.skills, defaults::skills());
        assert_eq!(config.contact, defaults::contact());
    }

    #[test]
    fn test_malformed_section_falls_back_alone() {
        let raw = json!({
            "projects": "three great games",
            "social": [{"name": "Mastodon", "url": "https://mastodon.social", "icon": "🐘"}]
        });
        let config = resolve(Some(&raw));

        assert_eq!(config.projects, defaults::projects());
        assert_eq!(config.social.len(), 1);
        assert_eq!(config.social[0].name, "Mastodon");
    }

    #[test]
    fn test_negative_counter_is_malformed() {
        let raw = json!({"personal": {"name": "Sam", "awards": -1}});
        let config = resolve(Some(&raw));
        assert_eq!(config.personal, defaults::personal());
    }

    #[test]
    fn test_visibility_merges_per_leaf() {
        let raw = json!({"visibility": {"about": {"awards": false}}});
        let config = resolve(Some(&raw));

        assert_eq!(config.visibility["about"]["awards"], false);
        assert_eq!(config.visibility["about"]["experienceYears"], true);
        assert_eq!(config.visibility["header"], defaults::visibility()["header"]);
    }

    #[test]
    fn test_visibility_ignores_non_boolean_leaves() {
        let raw = json!({"visibility": {"hero": {"title": "no", "subtitle": null}, "footer": 3}});
        let config = resolve(Some(&raw));
        assert_eq!(config.visibility, defaults::visibility());
    }

    #[test]
    fn test_round_trip_of_resolved_config() {
        let mut config = defaults::portfolio();
        config.personal.name = "Round Trip".to_string();
        config.contact.whatsapp = None;
        config.stats.truncate(1);

        let text = serde_json::to_string(&config).unwrap();
        assert_eq!(resolve_str(&text), config);
    }
}
