use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::section::Section;

/// Semantic color role (`primary`, `surfaceHover`, ...) to CSS color value
pub type Colors = BTreeMap<String, String>;

/// Font setting (`fontFamily`, `fontSize`, ...) to CSS value
pub type Typography = BTreeMap<String, String>;

/// Skill category name to its icon and skill list
pub type Skills = BTreeMap<String, SkillCategory>;

/// Section name to item name to shown/hidden flag
///
/// A missing section or item means "shown"; only an explicit `false` hides.
pub type VisibilityMap = BTreeMap<String, BTreeMap<String, bool>>;

/// The fully resolved portfolio configuration.
///
/// Every field is always populated; see [`crate::resolve::resolve`] for how
/// partial documents are filled in from the built-in defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioConfig {
    pub colors: Colors,
    pub typography: Typography,
    pub personal: Personal,
    pub projects: Vec<Project>,
    pub skills: Skills,
    pub timeline: Vec<TimelineEntry>,
    pub stats: Vec<Stat>,
    pub contact: Contact,
    pub social: Vec<SocialLink>,
    pub visibility: VisibilityMap,
    /// Top-level keys this crate does not model (e.g. `blogs` written by the
    /// blog page). Carried through load and save untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        crate::defaults::portfolio()
    }
}

impl PortfolioConfig {
    /// Serialize one top-level section to JSON
    pub fn section_value(&self, section: Section) -> serde_json::Value {
        let value = match section {
            Section::Colors => serde_json::to_value(&self.colors),
            Section::Typography => serde_json::to_value(&self.typography),
            Section::Personal => serde_json::to_value(&self.personal),
            Section::Projects => serde_json::to_value(&self.projects),
            Section::Skills => serde_json::to_value(&self.skills),
            Section::Timeline => serde_json::to_value(&self.timeline),
            Section::Stats => serde_json::to_value(&self.stats),
            Section::Contact => serde_json::to_value(&self.contact),
            Section::Social => serde_json::to_value(&self.social),
            Section::Visibility => serde_json::to_value(&self.visibility),
        };
        // All section types are plain maps, strings and numbers
        value.unwrap_or(serde_json::Value::Null)
    }

    /// Next free project id (max existing id + 1)
    pub fn next_project_id(&self) -> u32 {
        self.projects.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }

    /// Find a project by id
    pub fn project(&self, id: u32) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Personal {
    pub name: String,
    pub title: String,
    /// Biography text
    pub about: String,
    pub experience_years: u32,
    pub projects_completed: u32,
    pub awards: u32,
    /// URL or inline data URI
    pub profile_image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub image: String,
    pub technologies: Vec<String>,
    pub live_url: String,
    pub github_url: String,
    pub featured: bool,
}

impl Project {
    /// Blank project as added from the dashboard
    pub fn placeholder(id: u32) -> Self {
        Self {
            id,
            title: "New Project".to_string(),
            description: "Project description here...".to_string(),
            image: String::new(),
            technologies: Vec::new(),
            live_url: "#".to_string(),
            github_url: "#".to_string(),
            featured: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillCategory {
    pub icon: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineEntry {
    pub id: String,
    /// Sort key, usually a four digit year or a range like "2019-2021"
    pub year: String,
    pub title: String,
    pub description: String,
    pub visible: bool,
}

impl Default for TimelineEntry {
    fn default() -> Self {
        Self {
            id: String::new(),
            year: String::new(),
            title: String::new(),
            description: String::new(),
            visible: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stat {
    pub name: String,
    /// Stored as given; clamped to 0..=100 only when rendered
    pub percentage: i64,
    pub category: String,
}

impl Stat {
    pub fn clamped_percentage(&self) -> u8 {
        self.percentage.clamp(0, 100) as u8
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub email: String,
    pub phone: String,
    /// International format with a leading `+`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    pub location: String,
}

impl Contact {
    /// Number used for chat links: digits and `+` only.
    /// Falls back to the phone number when no WhatsApp number is set.
    pub fn chat_number(&self) -> Option<String> {
        let raw = self
            .whatsapp
            .as_deref()
            .filter(|w| !w.trim().is_empty())
            .unwrap_or(&self.phone);

        let digits: String = raw
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();

        if digits.chars().any(|c| c.is_ascii_digit()) {
            Some(digits)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
    pub icon: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_fields_use_camel_case() {
        let project: Project = serde_json::from_str(
            r##"{"id": 3, "title": "Demo", "liveUrl": "https://demo.dev", "githubUrl": "#"}"##,
        )
        .unwrap();
        assert_eq!(project.id, 3);
        assert_eq!(project.live_url, "https://demo.dev");
        assert_eq!(project.github_url, "#");
        assert!(project.technologies.is_empty());
        assert!(!project.featured);
    }

    #[test]
    fn test_timeline_entry_visible_by_default() {
        let entry: TimelineEntry =
            serde_json::from_str(r#"{"id": "a", "year": "2020", "title": "Start"}"#).unwrap();
        assert!(entry.visible);
    }

    #[test]
    fn test_stat_clamped_percentage() {
        let mut stat = Stat {
            name: "Rust".to_string(),
            percentage: 140,
            category: "Languages".to_string(),
        };
        assert_eq!(stat.clamped_percentage(), 100);
        stat.percentage = -5;
        assert_eq!(stat.clamped_percentage(), 0);
        stat.percentage = 42;
        assert_eq!(stat.clamped_percentage(), 42);
    }

    #[test]
    fn test_chat_number_prefers_whatsapp() {
        let contact = Contact {
            email: String::new(),
            phone: "+1 (555) 123-4567".to_string(),
            whatsapp: Some("+44 7700 900123".to_string()),
            location: String::new(),
        };
        assert_eq!(contact.chat_number().as_deref(), Some("+447700900123"));
    }

    #[test]
    fn test_chat_number_falls_back_to_phone() {
        let contact = Contact {
            email: String::new(),
            phone: "+1 (555) 123-4567".to_string(),
            whatsapp: Some("  ".to_string()),
            location: String::new(),
        };
        assert_eq!(contact.chat_number().as_deref(), Some("+15551234567"));

        let empty = Contact::default();
        assert_eq!(empty.chat_number(), None);
    }

    #[test]
    fn test_whatsapp_omitted_when_absent() {
        let json = serde_json::to_value(Contact::default()).unwrap();
        assert!(json.get("whatsapp").is_none());
    }

    #[test]
    fn test_next_project_id() {
        let mut config = PortfolioConfig::default();
        config.projects = vec![Project::placeholder(4), Project::placeholder(2)];
        assert_eq!(config.next_project_id(), 5);
        config.projects.clear();
        assert_eq!(config.next_project_id(), 1);
    }
}
