//! Built-in default table used whenever a section is missing from the source data

use std::collections::BTreeMap;

use crate::model::{
    Colors, Contact, Personal, PortfolioConfig, Project, SkillCategory, Skills, SocialLink, Stat,
    TimelineEntry, Typography, VisibilityMap,
};

/// Every known visibility section with its items, in page order
pub const VISIBILITY_ITEMS: &[(&str, &[&str])] = &[
    ("header", &["logo", "navigation", "dashboardLink", "mobileMenu"]),
    (
        "hero",
        &["title", "subtitle", "buttons", "scrollIndicator", "backgroundCanvas"],
    ),
    (
        "about",
        &[
            "title",
            "description",
            "profileImage",
            "experienceYears",
            "projectsCompleted",
            "awards",
        ],
    ),
    ("projects", &["title", "projectGrid", "featuredOnly"]),
    ("skills", &["title", "categories", "icons"]),
    ("timeline", &["title", "entries"]),
    ("stats", &["title", "entries"]),
    (
        "contact",
        &[
            "title",
            "contactInfo",
            "email",
            "phone",
            "location",
            "contactForm",
            "socialLinks",
        ],
    ),
    ("footer", &["copyright", "socialLinks"]),
    (
        "effects",
        &["particles", "scrollAnimations", "loadingScreen", "glitchEffect"],
    ),
];

/// Items of one catalogue section, empty for unknown sections
pub fn visibility_items(section: &str) -> &'static [&'static str] {
    VISIBILITY_ITEMS
        .iter()
        .find(|(name, _)| *name == section)
        .map(|(_, items)| *items)
        .unwrap_or(&[])
}

/// Inline SVG placeholder in the same shape the dashboard generated
pub fn placeholder_image(width: u32, height: u32, fill: &str, font_size: u32, label: &str) -> String {
    format!(
        "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 {w} {h}'%3E\
         %3Crect width='{w}' height='{h}' fill='%23{fill}'/%3E\
         %3Ctext x='50%25' y='50%25' font-family='Arial' font-size='{size}' fill='white' \
         text-anchor='middle' dy='.3em'%3E{label}%3C/text%3E%3C/svg%3E",
        w = width,
        h = height,
        fill = fill.trim_start_matches('#'),
        size = font_size,
        label = label,
    )
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn colors() -> Colors {
    [
        ("primary", "#64ffda"),
        ("primaryHover", "#52e7c7"),
        ("secondary", "#667eea"),
        ("secondaryHover", "#5568d3"),
        ("accent", "#ff6b6b"),
        ("accentHover", "#ff5252"),
        ("background", "#0a0a0a"),
        ("backgroundSecondary", "#1a1a2e"),
        ("surface", "#16213e"),
        ("surfaceHover", "#1f2a46"),
        ("text", "#ffffff"),
        ("textSecondary", "#b8c5d6"),
        ("textMuted", "#8892a0"),
        ("border", "#2c3e50"),
        ("borderLight", "#34495e"),
        ("link", "#64ffda"),
        ("linkHover", "#52e7c7"),
        ("success", "#4caf50"),
        ("error", "#f44336"),
        ("warning", "#ff9800"),
        ("info", "#2196f3"),
        ("gradientStart", "#667eea"),
        ("gradientEnd", "#764ba2"),
        ("shadowColor", "rgba(0, 0, 0, 0.3)"),
        ("glowColor", "rgba(100, 255, 218, 0.2)"),
    ]
    .into_iter()
    .map(|(role, value)| (role.to_string(), value.to_string()))
    .collect()
}

pub fn typography() -> Typography {
    [
        (
            "fontFamily",
            "'Inter', 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif",
        ),
        ("headingFont", "'Inter', sans-serif"),
        ("codeFont", "'Fira Code', 'Monaco', 'Consolas', monospace"),
        ("fontSize", "16px"),
        ("lineHeight", "1.6"),
    ]
    .into_iter()
    .map(|(setting, value)| (setting.to_string(), value.to_string()))
    .collect()
}

pub fn personal() -> Personal {
    Personal {
        name: "Alex Johnson".to_string(),
        title: "Game Developer & Designer".to_string(),
        about: "Passionate game developer with 5+ years of experience creating immersive \
                interactive experiences. Specialized in Unity, Unreal Engine, and cutting-edge \
                game technologies. I believe in the power of games to tell stories, connect \
                people, and create unforgettable moments."
            .to_string(),
        experience_years: 5,
        projects_completed: 23,
        awards: 7,
        profile_image: placeholder_image(200, 200, "667eea", 60, "AJ"),
    }
}

pub fn projects() -> Vec<Project> {
    vec![
        Project {
            id: 1,
            title: "Cyber Runner 2077".to_string(),
            description: "A futuristic endless runner game with cyberpunk aesthetics, featuring \
                          dynamic lighting and procedural level generation."
                .to_string(),
            image: placeholder_image(400, 200, "667eea", 24, "Cyber Runner"),
            technologies: strings(&["Unity", "C#", "Shader Graph", "ProBuilder"]),
            live_url: "#".to_string(),
            github_url: "#".to_string(),
            featured: true,
        },
        Project {
            id: 2,
            title: "Fantasy Quest RPG".to_string(),
            description: "Epic fantasy RPG with turn-based combat system, character progression, \
                          and immersive storytelling."
                .to_string(),
            image: placeholder_image(400, 200, "ff6b6b", 24, "Fantasy Quest"),
            technologies: strings(&["Unreal Engine", "Blueprint", "C++", "UI/UX"]),
            live_url: "#".to_string(),
            github_url: "#".to_string(),
            featured: true,
        },
        Project {
            id: 3,
            title: "Space Defense VR".to_string(),
            description: "Virtual reality tower defense game where players protect Earth from \
                          alien invasions using hand gestures and strategic thinking."
                .to_string(),
            image: placeholder_image(400, 200, "64ffda", 24, "Space Defense"),
            technologies: strings(&["Unity", "VR SDK", "C#", "3D Modeling"]),
            live_url: "#".to_string(),
            github_url: "#".to_string(),
            featured: false,
        },
    ]
}

pub fn skills() -> Skills {
    let mut skills = BTreeMap::new();
    for (category, icon, names) in [
        (
            "Game Engines",
            "🎮",
            &["Unity", "Unreal Engine", "Godot", "GameMaker Studio"][..],
        ),
        (
            "Programming",
            "💻",
            &["C#", "C++", "JavaScript", "Python", "GDScript"][..],
        ),
        (
            "Graphics & Art",
            "🎨",
            &["Blender", "Maya", "Photoshop", "Substance Painter", "Shader Programming"][..],
        ),
        ("Audio", "🎵", &["FMOD", "Wwise", "Audacity", "FL Studio"][..]),
        (
            "Tools & Platforms",
            "🛠️",
            &["Git", "Perforce", "Jenkins", "Steam", "Mobile Platforms"][..],
        ),
    ] {
        skills.insert(
            category.to_string(),
            SkillCategory {
                icon: icon.to_string(),
                skills: strings(names),
            },
        );
    }
    skills
}

pub fn timeline() -> Vec<TimelineEntry> {
    [
        ("start", "2019", "Started Game Development", "Shipped first indie prototype built in Unity."),
        ("studio", "2021", "Joined Indie Studio", "Gameplay programmer on two released titles."),
        ("lead", "2023", "Lead Developer", "Leading a small team building VR experiences."),
    ]
    .into_iter()
    .map(|(id, year, title, description)| TimelineEntry {
        id: id.to_string(),
        year: year.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        visible: true,
    })
    .collect()
}

pub fn stats() -> Vec<Stat> {
    [
        ("Unity", 95, "Game Engines"),
        ("Unreal Engine", 85, "Game Engines"),
        ("C#", 90, "Programming"),
        ("C++", 80, "Programming"),
        ("Blender", 70, "Graphics & Art"),
    ]
    .into_iter()
    .map(|(name, percentage, category)| Stat {
        name: name.to_string(),
        percentage,
        category: category.to_string(),
    })
    .collect()
}

pub fn contact() -> Contact {
    Contact {
        email: "alex@gamedev.com".to_string(),
        phone: "+1 (555) 123-4567".to_string(),
        whatsapp: Some("+15551234567".to_string()),
        location: "San Francisco, CA".to_string(),
    }
}

pub fn social() -> Vec<SocialLink> {
    [
        ("GitHub", "https://github.com", "🔗"),
        ("LinkedIn", "https://linkedin.com", "💼"),
        ("Twitter", "https://twitter.com", "🐦"),
        ("Portfolio", "#", "🌐"),
    ]
    .into_iter()
    .map(|(name, url, icon)| SocialLink {
        name: name.to_string(),
        url: url.to_string(),
        icon: icon.to_string(),
    })
    .collect()
}

/// Every catalogue item set to `value`
pub fn visibility_all(value: bool) -> VisibilityMap {
    VISIBILITY_ITEMS
        .iter()
        .map(|(section, items)| {
            let leaves = items.iter().map(|item| (item.to_string(), value)).collect();
            (section.to_string(), leaves)
        })
        .collect()
}

pub fn visibility() -> VisibilityMap {
    visibility_all(true)
}

pub fn portfolio() -> PortfolioConfig {
    PortfolioConfig {
        colors: colors(),
        typography: typography(),
        personal: personal(),
        projects: projects(),
        skills: skills(),
        timeline: timeline(),
        stats: stats(),
        contact: contact(),
        social: social(),
        visibility: visibility(),
        extra: serde_json::Map::new(),
    }
}
