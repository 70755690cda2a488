//! Visibility resolution over a nested section -> item -> bool map.
//!
//! The policy is opt-out: a missing section, a missing item or `true` all
//! mean "shown". Only an explicit `false` hides something, so documents saved
//! before an item existed keep showing it.

use std::collections::BTreeSet;

use crate::defaults::visibility_items;
use crate::model::VisibilityMap;

/// Whether a single item should render
pub fn is_visible(visibility: &VisibilityMap, section: &str, item: &str) -> bool {
    visibility.get(section).and_then(|items| items.get(item)) != Some(&false)
}

/// Item names considered part of a section: the built-in catalogue plus any
/// extra keys present in the map.
pub fn section_items(visibility: &VisibilityMap, section: &str) -> Vec<String> {
    let mut items: Vec<String> = visibility_items(section)
        .iter()
        .map(|item| item.to_string())
        .collect();
    let known: BTreeSet<String> = items.iter().cloned().collect();

    if let Some(entries) = visibility.get(section) {
        items.extend(entries.keys().filter(|key| !known.contains(*key)).cloned());
    }
    items
}

/// Whether a whole section should render.
///
/// Derived on every call from the individual items: a section is shown when
/// at least one of its items resolves visible, or when it has no items at all.
pub fn section_visible(visibility: &VisibilityMap, section: &str) -> bool {
    let items = section_items(visibility, section);
    items.is_empty() || items.iter().any(|item| is_visible(visibility, section, item))
}

/// Flip a whole section: all items to `false` if every item is currently
/// visible, otherwise all items to `true`. Returns the updated map.
pub fn toggle_section(visibility: &VisibilityMap, section: &str) -> VisibilityMap {
    let items = section_items(visibility, section);
    let all_visible = items.iter().all(|item| is_visible(visibility, section, item));
    let target = !all_visible;

    let mut updated = visibility.clone();
    if items.is_empty() {
        return updated;
    }
    let entries = updated.entry(section.to_string()).or_default();
    for item in items {
        entries.insert(item, target);
    }
    updated
}

/// Set one item explicitly. Returns the updated map.
pub fn set_item(visibility: &VisibilityMap, section: &str, item: &str, shown: bool) -> VisibilityMap {
    let mut updated = visibility.clone();
    updated
        .entry(section.to_string())
        .or_default()
        .insert(item.to_string(), shown);
    updated
}

/// All `(section, item)` pairs that are explicitly hidden
pub fn hidden_items(visibility: &VisibilityMap) -> Vec<(String, String)> {
    visibility
        .iter()
        .flat_map(|(section, items)| {
            items
                .iter()
                .filter(|(_, shown)| !**shown)
                .map(move |(item, _)| (section.clone(), item.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn map(json: &str) -> VisibilityMap {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_missing_section_is_visible() {
        let v = VisibilityMap::new();
        assert!(is_visible(&v, "hero", "title"));
    }

    #[test]
    fn test_missing_item_is_visible() {
        let v = map(r#"{"hero": {"subtitle": false}}"#);
        assert!(is_visible(&v, "hero", "title"));
    }

    #[test]
    fn test_explicit_true_is_visible() {
        let v = map(r#"{"hero": {"title": true}}"#);
        assert!(is_visible(&v, "hero", "title"));
    }

    #[test]
    fn test_only_explicit_false_hides() {
        let v = map(r#"{"about": {"awards": false}}"#);
        assert!(!is_visible(&v, "about", "awards"));
        assert!(is_visible(&v, "about", "experienceYears"));
        assert!(section_visible(&v, "about"));
    }

    #[test]
    fn test_section_hidden_when_every_item_false() {
        let v = map(r#"{"footer": {"copyright": false, "socialLinks": false}}"#);
        assert!(!section_visible(&v, "footer"));
    }

    #[test]
    fn test_section_with_partial_catalogue_stays_visible() {
        // Only two of the catalogue items are hidden
        let v = map(r#"{"skills": {"title": false, "categories": false}}"#);
        assert!(section_visible(&v, "skills"));
    }

    #[test]
    fn test_unknown_section_defaults_to_shown() {
        let v = VisibilityMap::new();
        assert!(section_visible(&v, "blog"));

        let hidden = map(r#"{"blog": {"posts": false}}"#);
        assert!(!section_visible(&hidden, "blog"));
    }

    #[test]
    fn test_toggle_all_visible_hides_everything() {
        let v = crate::defaults::visibility();
        let toggled = toggle_section(&v, "contact");
        assert!(toggled["contact"].values().all(|shown| !shown));
        assert!(!section_visible(&toggled, "contact"));
        // Other sections untouched
        assert_eq!(toggled["header"], v["header"]);
    }

    #[test]
    fn test_toggle_is_involution_for_uniform_sections() {
        let v = crate::defaults::visibility();
        let twice = toggle_section(&toggle_section(&v, "hero"), "hero");
        assert_eq!(twice, v);

        let hidden = crate::defaults::visibility_all(false);
        let twice = toggle_section(&toggle_section(&hidden, "hero"), "hero");
        assert_eq!(twice, hidden);
    }

    #[test]
    fn test_toggle_mixed_shows_everything() {
        let v = set_item(&crate::defaults::visibility(), "about", "awards", false);
        let toggled = toggle_section(&v, "about");
        assert!(toggled["about"].values().all(|shown| *shown));
    }

    #[test]
    fn test_toggle_does_not_mutate_input() {
        let v = crate::defaults::visibility();
        let before = v.clone();
        let _ = toggle_section(&v, "effects");
        assert_eq!(v, before);
    }

    #[test]
    fn test_toggle_unknown_empty_section_is_noop() {
        let v: VisibilityMap = BTreeMap::new();
        assert_eq!(toggle_section(&v, "blog"), v);
    }

    #[test]
    fn test_section_items_include_extra_keys() {
        let v = map(r#"{"footer": {"credits": false}}"#);
        let items = section_items(&v, "footer");
        assert_eq!(items, vec!["copyright", "socialLinks", "credits"]);
    }

    #[test]
    fn test_hidden_items() {
        let v = map(r#"{"about": {"awards": false, "title": true}, "effects": {"particles": false}}"#);
        assert_eq!(
            hidden_items(&v),
            vec![
                ("about".to_string(), "awards".to_string()),
                ("effects".to_string(), "particles".to_string()),
            ]
        );
    }
}
