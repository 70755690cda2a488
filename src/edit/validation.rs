use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::model::{PortfolioConfig, Section};

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static HTTP_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://.+").expect("valid URL regex"));
static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$")
        .expect("valid hex color regex")
});
static COLOR_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(rgb|rgba|hsl|hsla)\([^()]*\)$").expect("valid color function regex")
});

/// `#rgb`, `#rrggbb` (with optional alpha) or a CSS color function
pub fn is_valid_color(value: &str) -> bool {
    let value = value.trim();
    HEX_COLOR.is_match(value) || COLOR_FUNCTION.is_match(value)
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

pub fn is_http_url(value: &str) -> bool {
    HTTP_URL.is_match(value)
}

/// Link fields accept empty, an in-page `#` placeholder, or http(s)
fn is_valid_link(value: &str) -> bool {
    value.is_empty() || value == "#" || is_http_url(value)
}

/// Validate one section of a configuration.
/// Returns every problem found (not just the first), each prefixed with its field path.
pub fn validate_section(config: &PortfolioConfig, section: Section) -> Vec<String> {
    let mut errors = Vec::new();

    match section {
        Section::Colors => {
            for (role, value) in &config.colors {
                if !is_valid_color(value) {
                    errors.push(format!(
                        "colors.{}: invalid color '{}' - use #hex or rgb()/rgba()/hsl()/hsla()",
                        role, value
                    ));
                }
            }
        }
        Section::Typography => {
            for (setting, value) in &config.typography {
                if value.trim().is_empty() {
                    errors.push(format!("typography.{}: must not be empty", setting));
                }
            }
        }
        Section::Personal => {
            if config.personal.name.trim().is_empty() {
                errors.push("personal.name: must not be empty".to_string());
            }
        }
        Section::Projects => {
            let mut ids = HashSet::new();
            for (i, project) in config.projects.iter().enumerate() {
                if !ids.insert(project.id) {
                    errors.push(format!("projects[{}].id: duplicate id {}", i, project.id));
                }
                if project.title.trim().is_empty() {
                    errors.push(format!("projects[{}].title: must not be empty", i));
                }
                if !is_valid_link(&project.live_url) {
                    errors.push(format!(
                        "projects[{}].liveUrl: invalid '{}' - use http(s)://, # or leave empty",
                        i, project.live_url
                    ));
                }
                if !is_valid_link(&project.github_url) {
                    errors.push(format!(
                        "projects[{}].githubUrl: invalid '{}' - use http(s)://, # or leave empty",
                        i, project.github_url
                    ));
                }
            }
        }
        Section::Skills => {
            for name in config.skills.keys() {
                if name.trim().is_empty() {
                    errors.push("skills: category name must not be empty".to_string());
                }
            }
        }
        Section::Timeline => {
            let mut ids = HashSet::new();
            for (i, entry) in config.timeline.iter().enumerate() {
                if entry.id.trim().is_empty() {
                    errors.push(format!("timeline[{}].id: must not be empty", i));
                } else if !ids.insert(entry.id.as_str()) {
                    errors.push(format!("timeline[{}].id: duplicate id '{}'", i, entry.id));
                }
                if entry.year.trim().is_empty() {
                    errors.push(format!("timeline[{}].year: must not be empty", i));
                }
            }
        }
        Section::Stats => {
            for (i, stat) in config.stats.iter().enumerate() {
                if !(0..=100).contains(&stat.percentage) {
                    errors.push(format!(
                        "stats[{}].percentage: {} is outside 0-100",
                        i, stat.percentage
                    ));
                }
                if stat.name.trim().is_empty() {
                    errors.push(format!("stats[{}].name: must not be empty", i));
                }
            }
        }
        Section::Contact => {
            let contact = &config.contact;
            if !contact.email.is_empty() && !is_valid_email(&contact.email) {
                errors.push(format!("contact.email: invalid email '{}'", contact.email));
            }
            if let Some(ref whatsapp) = contact.whatsapp {
                if !whatsapp.is_empty() && !whatsapp.starts_with('+') {
                    errors.push(format!(
                        "contact.whatsapp: '{}' must be in international format (e.g. +1234567890)",
                        whatsapp
                    ));
                }
            }
        }
        Section::Social => {
            for (i, link) in config.social.iter().enumerate() {
                if link.name.trim().is_empty() {
                    errors.push(format!("social[{}].name: must not be empty", i));
                }
                if link.url != "#" && !is_http_url(&link.url) {
                    errors.push(format!(
                        "social[{}].url: invalid '{}' - URLs should start with http:// or https://",
                        i, link.url
                    ));
                }
            }
        }
        // Any nested map of booleans is acceptable
        Section::Visibility => {}
    }

    errors
}

/// Validate every section
pub fn validate_config(config: &PortfolioConfig) -> Result<(), Vec<String>> {
    let errors: Vec<String> = Section::ALL
        .iter()
        .flat_map(|section| validate_section(config, *section))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SocialLink, Stat};

    #[test]
    fn test_patterns_compile() {
        for pattern in [&EMAIL, &HTTP_URL, &HEX_COLOR, &COLOR_FUNCTION] {
            LazyLock::force(pattern);
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&PortfolioConfig::default()).is_ok());
    }

    #[test]
    fn test_color_formats() {
        assert!(is_valid_color("#111"));
        assert!(is_valid_color("#64ffda"));
        assert!(is_valid_color("#64ffda80"));
        assert!(is_valid_color("rgba(0, 0, 0, 0.3)"));
        assert!(is_valid_color("hsl(320, 90%, 60%)"));
        assert!(!is_valid_color("teal"));
        assert!(!is_valid_color("#12345"));
        assert!(!is_valid_color("rgb(0, 0, 0"));
    }

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("alex@gamedev.com"));
        assert!(!is_valid_email("alex@gamedev"));
        assert!(!is_valid_email("alex gamedev.com"));
    }

    #[test]
    fn test_invalid_color_reported_with_role() {
        let mut config = PortfolioConfig::default();
        config.colors.insert("accent".to_string(), "reddish".to_string());
        let errors = validate_section(&config, Section::Colors);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("colors.accent"));
    }

    #[test]
    fn test_stat_out_of_range() {
        let mut config = PortfolioConfig::default();
        config.stats.push(Stat {
            name: "Rust".to_string(),
            percentage: 120,
            category: "Languages".to_string(),
        });
        let errors = validate_section(&config, Section::Stats);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("outside 0-100"));
    }

    #[test]
    fn test_contact_checks() {
        let mut config = PortfolioConfig::default();
        config.contact.email = "nope".to_string();
        config.contact.whatsapp = Some("5551234567".to_string());
        let errors = validate_section(&config, Section::Contact);
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("contact.email"));
        assert!(errors[1].starts_with("contact.whatsapp"));
    }

    #[test]
    fn test_social_url_scheme() {
        let mut config = PortfolioConfig::default();
        config.social = vec![SocialLink {
            name: "Site".to_string(),
            url: "www.example.com".to_string(),
            icon: "🌐".to_string(),
        }];
        let errors = validate_section(&config, Section::Social);
        assert!(errors[0].contains("http:// or https://"));
    }

    #[test]
    fn test_duplicate_ids_reported() {
        let mut config = PortfolioConfig::default();
        config.projects[1].id = config.projects[0].id;
        config.timeline[1].id = config.timeline[0].id.clone();

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.starts_with("projects[1].id")));
        assert!(errors.iter().any(|e| e.starts_with("timeline[1].id")));
    }
}
