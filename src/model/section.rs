use std::fmt;
use std::str::FromStr;

/// Top-level sections of a portfolio configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Colors,
    Typography,
    Personal,
    Projects,
    Skills,
    Timeline,
    Stats,
    Contact,
    Social,
    Visibility,
}

impl Section {
    pub const ALL: [Section; 10] = [
        Section::Colors,
        Section::Typography,
        Section::Personal,
        Section::Projects,
        Section::Skills,
        Section::Timeline,
        Section::Stats,
        Section::Contact,
        Section::Social,
        Section::Visibility,
    ];

    /// JSON key of the section
    pub fn key(self) -> &'static str {
        match self {
            Section::Colors => "colors",
            Section::Typography => "typography",
            Section::Personal => "personal",
            Section::Projects => "projects",
            Section::Skills => "skills",
            Section::Timeline => "timeline",
            Section::Stats => "stats",
            Section::Contact => "contact",
            Section::Social => "social",
            Section::Visibility => "visibility",
        }
    }

    /// Human-readable heading, as shown above the section editor
    pub fn title(self) -> &'static str {
        match self {
            Section::Colors => "Colors Configuration",
            Section::Typography => "Typography",
            Section::Personal => "Personal Data",
            Section::Projects => "Projects",
            Section::Skills => "Skills & Technologies",
            Section::Timeline => "Timeline",
            Section::Stats => "Skill Stats",
            Section::Contact => "Contact Information",
            Section::Social => "Social Links",
            Section::Visibility => "Visibility Settings",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Section::ALL
            .into_iter()
            .find(|section| section.key() == needle)
            .ok_or_else(|| {
                let known: Vec<&str> = Section::ALL.iter().map(|s| s.key()).collect();
                format!("unknown section '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_section_case_insensitive() {
        assert_eq!("Colors".parse::<Section>(), Ok(Section::Colors));
        assert_eq!(" timeline ".parse::<Section>(), Ok(Section::Timeline));
    }

    #[test]
    fn test_parse_unknown_section_lists_known() {
        let err = "blogs".parse::<Section>().unwrap_err();
        assert!(err.contains("blogs"));
        assert!(err.contains("visibility"));
    }

    #[test]
    fn test_keys_are_unique() {
        let mut keys: Vec<&str> = Section::ALL.iter().map(|s| s.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), Section::ALL.len());
    }
}
