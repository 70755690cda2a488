//! Named color themes and visibility profiles.
//!
//! Applying a preset replaces the whole target section. Per-item
//! customizations made before are discarded.

use crate::defaults::{visibility_all, VISIBILITY_ITEMS};
use crate::model::{Colors, PortfolioConfig, VisibilityMap};

pub const COLOR_PRESETS: &[&str] = &[
    "cyberpunk",
    "ocean",
    "sunset",
    "forest",
    "noir",
    "lavender",
    "minimal",
    "professional",
];

pub const VISIBILITY_PRESETS: &[&str] = &["full", "minimal", "professional", "no-effects"];

/// Role order shared by every palette below
const ROLES: [&str; 25] = [
    "primary",
    "primaryHover",
    "secondary",
    "secondaryHover",
    "accent",
    "accentHover",
    "background",
    "backgroundSecondary",
    "surface",
    "surfaceHover",
    "text",
    "textSecondary",
    "textMuted",
    "border",
    "borderLight",
    "link",
    "linkHover",
    "success",
    "error",
    "warning",
    "info",
    "gradientStart",
    "gradientEnd",
    "shadowColor",
    "glowColor",
];

fn palette(values: [&str; 25]) -> Colors {
    ROLES
        .iter()
        .zip(values)
        .map(|(role, value)| (role.to_string(), value.to_string()))
        .collect()
}

/// Complete palette for a named theme
pub fn color_preset(name: &str) -> Option<Colors> {
    let values = match name.trim().to_ascii_lowercase().as_str() {
        "cyberpunk" => [
            "#64ffda", "#52e7c7", "#667eea", "#5568d3", "#ff6b6b", "#ff5252", "#0a0a0a",
            "#1a1a2e", "#16213e", "#1f2a46", "#ffffff", "#b8c5d6", "#8892a0", "#2c3e50",
            "#34495e", "#64ffda", "#52e7c7", "#4caf50", "#f44336", "#ff9800", "#2196f3",
            "#667eea", "#764ba2", "rgba(0, 0, 0, 0.3)", "rgba(100, 255, 218, 0.2)",
        ],
        "ocean" => [
            "#00b4d8", "#0096c7", "#4361ee", "#3a51d4", "#7209b7", "#560bad", "#03045e",
            "#023e8a", "#0077b6", "#0096c7", "#caf0f8", "#90e0ef", "#48cae4", "#0096c7",
            "#00b4d8", "#00d4ff", "#00b8e6", "#06ffa5", "#ff006e", "#ffb703", "#0096c7",
            "#4361ee", "#7209b7", "rgba(3, 4, 94, 0.5)", "rgba(0, 180, 216, 0.3)",
        ],
        "sunset" => [
            "#ff6b35", "#ff5722", "#f7931e", "#e67e00", "#fbb040", "#f9a825", "#1a0b2e",
            "#2e1a47", "#432874", "#52368c", "#fff5e4", "#ffe4c0", "#ffc98b", "#5b3a70",
            "#734a94", "#ff6b35", "#ff5722", "#4caf50", "#e53935", "#fbb040", "#29b6f6",
            "#ff6b35", "#f7931e", "rgba(26, 11, 46, 0.4)", "rgba(255, 107, 53, 0.3)",
        ],
        "forest" => [
            "#52b788", "#40916c", "#2d6a4f", "#1b4332", "#95d5b2", "#74c69d", "#081c15",
            "#1b4332", "#2d6a4f", "#40916c", "#d8f3dc", "#b7e4c7", "#95d5b2", "#40916c",
            "#52b788", "#95d5b2", "#74c69d", "#52b788", "#e63946", "#f4a261", "#2a9d8f",
            "#52b788", "#2d6a4f", "rgba(8, 28, 21, 0.5)", "rgba(82, 183, 136, 0.2)",
        ],
        "noir" => [
            "#e0e0e0", "#f5f5f5", "#9e9e9e", "#bdbdbd", "#616161", "#757575", "#000000",
            "#121212", "#1e1e1e", "#2a2a2a", "#ffffff", "#e0e0e0", "#9e9e9e", "#424242",
            "#616161", "#e0e0e0", "#f5f5f5", "#66bb6a", "#ef5350", "#ffa726", "#42a5f5",
            "#424242", "#212121", "rgba(0, 0, 0, 0.6)", "rgba(255, 255, 255, 0.1)",
        ],
        "lavender" => [
            "#c77dff", "#b565f2", "#9d4edd", "#8b3fd9", "#e0aaff", "#d49aed", "#10002b",
            "#240046", "#3c096c", "#5a189a", "#f0e6ff", "#e0d1ff", "#c9b3f5", "#5a189a",
            "#7209b7", "#c77dff", "#b565f2", "#4caf50", "#ff006e", "#ffb703", "#4cc9f0",
            "#c77dff", "#7209b7", "rgba(16, 0, 43, 0.5)", "rgba(199, 125, 255, 0.3)",
        ],
        "minimal" => [
            "#111111", "#333333", "#555555", "#777777", "#0070f3", "#0060df", "#ffffff",
            "#fafafa", "#f5f5f5", "#eaeaea", "#111111", "#444444", "#888888", "#eaeaea",
            "#f0f0f0", "#0070f3", "#0060df", "#0a7d32", "#e00000", "#f5a623", "#0070f3",
            "#fafafa", "#eaeaea", "rgba(0, 0, 0, 0.08)", "rgba(0, 112, 243, 0.1)",
        ],
        "professional" => [
            "#1e40af", "#1e3a8a", "#0f766e", "#115e59", "#b45309", "#92400e", "#f8fafc",
            "#f1f5f9", "#ffffff", "#e2e8f0", "#0f172a", "#334155", "#64748b", "#cbd5e1",
            "#e2e8f0", "#1d4ed8", "#1e3a8a", "#15803d", "#b91c1c", "#d97706", "#0369a1",
            "#1e40af", "#0f766e", "rgba(15, 23, 42, 0.12)", "rgba(30, 64, 175, 0.15)",
        ],
        _ => return None,
    };
    Some(palette(values))
}

/// Complete visibility map for a named profile
pub fn visibility_preset(name: &str) -> Option<VisibilityMap> {
    let hidden: &[(&str, &str)] = match name.trim().to_ascii_lowercase().as_str() {
        "full" => &[],
        "no-effects" => &[
            ("effects", "particles"),
            ("effects", "scrollAnimations"),
            ("effects", "loadingScreen"),
            ("effects", "glitchEffect"),
            ("hero", "backgroundCanvas"),
        ],
        "professional" => &[
            ("header", "dashboardLink"),
            ("hero", "scrollIndicator"),
            ("hero", "backgroundCanvas"),
            ("effects", "particles"),
            ("effects", "loadingScreen"),
            ("effects", "glitchEffect"),
        ],
        "minimal" => &[
            ("header", "dashboardLink"),
            ("hero", "buttons"),
            ("hero", "scrollIndicator"),
            ("hero", "backgroundCanvas"),
            ("about", "profileImage"),
            ("about", "experienceYears"),
            ("about", "projectsCompleted"),
            ("about", "awards"),
            ("skills", "icons"),
            ("timeline", "title"),
            ("timeline", "entries"),
            ("stats", "title"),
            ("stats", "entries"),
            ("contact", "phone"),
            ("contact", "contactForm"),
            ("effects", "particles"),
            ("effects", "scrollAnimations"),
            ("effects", "loadingScreen"),
            ("effects", "glitchEffect"),
        ],
        _ => return None,
    };

    let mut map = visibility_all(true);
    for (section, item) in hidden {
        if let Some(items) = map.get_mut(*section) {
            items.insert(item.to_string(), false);
        }
    }
    debug_assert_eq!(map.len(), VISIBILITY_ITEMS.len());
    Some(map)
}

/// Replace `colors` with the named palette.
/// Returns false and leaves the config untouched when the name is unknown.
pub fn apply_color_preset(config: &mut PortfolioConfig, name: &str) -> bool {
    match color_preset(name) {
        Some(colors) => {
            config.colors = colors;
            true
        }
        None => false,
    }
}

/// Replace `visibility` with the named profile.
/// Returns false and leaves the config untouched when the name is unknown.
pub fn apply_visibility_preset(config: &mut PortfolioConfig, name: &str) -> bool {
    match visibility_preset(name) {
        Some(visibility) => {
            config.visibility = visibility;
            true
        }
        None => false,
    }
}
