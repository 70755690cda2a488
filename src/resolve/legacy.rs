use serde_json::{Map, Value};

use super::merge::apply_leaf_overrides;
use crate::defaults::visibility_items;
use crate::model::VisibilityMap;
use crate::{diag, diag_warn};

/// Item recorded for legacy sections that have no catalogue entries, so that
/// a disabled section still resolves hidden.
const SECTION_SWITCH_ITEM: &str = "enabled";

/// Top-level keys of the older visibility schema
pub const LEGACY_KEYS: &[&str] = &["sectionVisibility", "visibilityOptions"];

/// Page section names used by `sectionVisibility` that were later renamed
const LEGACY_SECTION_ALIASES: &[(&str, &str)] = &[("home", "hero")];

/// Fold the older flat visibility keys into the nested map.
///
/// `sectionVisibility` (section -> bool) hides every item of a disabled
/// section. `visibilityOptions` (section -> item -> bool) is applied leaf by
/// leaf afterwards. The nested `visibility` object, applied by the caller,
/// takes precedence over both. Returns true when anything legacy was found.
pub fn upgrade_legacy_visibility(root: &Map<String, Value>, visibility: &mut VisibilityMap) -> bool {
    let mut upgraded = false;

    if let Some(value) = root.get("sectionVisibility") {
        match value {
            Value::Object(sections) => {
                upgraded = true;
                for (section, enabled) in sections {
                    if *enabled != Value::Bool(false) {
                        continue;
                    }
                    let section = LEGACY_SECTION_ALIASES
                        .iter()
                        .find(|(legacy, _)| *legacy == section.as_str())
                        .map(|(_, current)| current.to_string())
                        .unwrap_or_else(|| section.clone());
                    disable_section(visibility, &section);
                }
            }
            Value::Null => {}
            _ => diag_warn!("Ignoring legacy 'sectionVisibility': expected an object"),
        }
    }

    if let Some(value) = root.get("visibilityOptions") {
        match value {
            Value::Object(sections) => {
                upgraded = true;
                apply_leaf_overrides(sections, visibility);
            }
            Value::Null => {}
            _ => diag_warn!("Ignoring legacy 'visibilityOptions': expected an object"),
        }
    }

    if upgraded {
        diag!("Upgraded legacy visibility keys to the nested visibility map");
    }
    upgraded
}

fn disable_section(visibility: &mut VisibilityMap, section: &str) {
    let items = visibility.entry(section.to_string()).or_default();
    let catalogue = visibility_items(section);

    if catalogue.is_empty() && items.is_empty() {
        items.insert(SECTION_SWITCH_ITEM.to_string(), false);
        return;
    }
    for item in catalogue {
        items.insert(item.to_string(), false);
    }
    for shown in items.values_mut() {
        *shown = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::resolve;
    use crate::visibility::{is_visible, section_visible};
    use serde_json::json;

    #[test]
    fn test_section_visibility_false_hides_section() {
        let raw = json!({"sectionVisibility": {"about": false, "projects": true}});
        let config = resolve(Some(&raw));

        assert!(!section_visible(&config.visibility, "about"));
        assert!(!is_visible(&config.visibility, "about", "awards"));
        assert!(section_visible(&config.visibility, "projects"));
    }

    #[test]
    fn test_home_alias_maps_to_hero() {
        let raw = json!({"sectionVisibility": {"home": false}});
        let config = resolve(Some(&raw));
        assert!(!section_visible(&config.visibility, "hero"));
    }

    #[test]
    fn test_unknown_legacy_section_gets_switch_item() {
        let raw = json!({"sectionVisibility": {"blog": false}});
        let config = resolve(Some(&raw));
        assert!(!section_visible(&config.visibility, "blog"));
        assert_eq!(config.visibility["blog"]["enabled"], false);
    }

    #[test]
    fn test_visibility_options_apply_per_leaf() {
        let raw = json!({"visibilityOptions": {"effects": {"particles": false}}});
        let config = resolve(Some(&raw));
        assert!(!is_visible(&config.visibility, "effects", "particles"));
        assert!(is_visible(&config.visibility, "effects", "glitchEffect"));
    }

    #[test]
    fn test_nested_visibility_wins_over_legacy() {
        let raw = json!({
            "sectionVisibility": {"contact": false},
            "visibility": {"contact": {"email": true}}
        });
        let config = resolve(Some(&raw));
        assert!(is_visible(&config.visibility, "contact", "email"));
        assert!(!is_visible(&config.visibility, "contact", "phone"));
        assert!(section_visible(&config.visibility, "contact"));
    }

    #[test]
    fn test_no_legacy_keys() {
        let mut visibility = crate::defaults::visibility();
        let root = Map::new();
        assert!(!upgrade_legacy_visibility(&root, &mut visibility));
        assert_eq!(visibility, crate::defaults::visibility());
    }
}
