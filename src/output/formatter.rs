use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::model::{Colors, Section, VisibilityMap};
use crate::presets::{COLOR_PRESETS, VISIBILITY_PRESETS};
use crate::session::{Status, StatusKind};
use crate::view::PageView;
use crate::visibility::{is_visible, section_items, section_visible};

/// Width of a stat bar in cells
const BAR_WIDTH: usize = 20;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Fit a line to the terminal; pipes get the full text
fn fit(text: &str, indent: usize) -> String {
    match get_terminal_width() {
        Some(width) if width > indent + 10 => truncate_text(text, width - indent),
        _ => text.to_string(),
    }
}

/// One status line with a kind marker
pub fn format_status(status: &Status, use_colors: bool) -> String {
    let marker = match status.kind {
        StatusKind::Success => "✓",
        StatusKind::Error => "✗",
        StatusKind::Info => "i",
    };

    if !use_colors {
        return format!("{} {}", marker, status.message);
    }
    match status.kind {
        StatusKind::Success => format!("{} {}", marker.green(), status.message),
        StatusKind::Error => format!("{} {}", marker.red(), status.message.red()),
        StatusKind::Info => format!("{} {}", marker.cyan(), status.message),
    }
}

/// Bulleted list of validation problems
pub fn format_errors(errors: &[String]) -> String {
    errors
        .iter()
        .map(|error| format!("  - {}", error))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse `#rgb` or `#rrggbb` into components
fn hex_rgb(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.strip_prefix('#')?;
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return None,
    };
    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Color roles, one per line, with a swatch when colors are enabled
pub fn format_colors(colors: &Colors, use_colors: bool) -> String {
    let name_width = colors.keys().map(|k| k.len()).max().unwrap_or(0);

    colors
        .iter()
        .map(|(role, value)| {
            let swatch = match hex_rgb(value) {
                Some((r, g, b)) if use_colors => format!("{} ", "██".truecolor(r, g, b)),
                _ => String::new(),
            };
            format!("  {:<width$}  {}{}", role, swatch, value, width = name_width)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Every visibility section with its items; hidden items are marked
pub fn format_visibility_table(visibility: &VisibilityMap, use_colors: bool) -> String {
    let mut sections: Vec<String> = crate::defaults::VISIBILITY_ITEMS
        .iter()
        .map(|(name, _)| name.to_string())
        .collect();
    sections.extend(
        visibility
            .keys()
            .filter(|key| !sections.contains(key))
            .cloned()
            .collect::<Vec<_>>(),
    );

    sections
        .iter()
        .map(|section| {
            let state = if section_visible(visibility, section) {
                "shown"
            } else {
                "hidden"
            };
            let header = if use_colors {
                if state == "shown" {
                    format!("{} ({})", section.bold(), state.green())
                } else {
                    format!("{} ({})", section.bold(), state.red())
                }
            } else {
                format!("{} ({})", section, state)
            };

            let items = section_items(visibility, section)
                .into_iter()
                .map(|item| {
                    let shown = is_visible(visibility, section, &item);
                    if shown {
                        format!("    [x] {}", item)
                    } else if use_colors {
                        format!("    [ ] {}", item.dimmed())
                    } else {
                        format!("    [ ] {}", item)
                    }
                })
                .collect::<Vec<_>>()
                .join("\n");

            format!("{}\n{}", header, items)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Known section keys with their titles
pub fn format_section_list(current: Section, use_colors: bool) -> String {
    Section::ALL
        .iter()
        .map(|section| {
            let marker = if *section == current { "*" } else { " " };
            if use_colors && *section == current {
                format!("{} {:<11} {}", marker, section.key().bold(), section.title())
            } else {
                format!("{} {:<11} {}", marker, section.key(), section.title())
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_preset_list() -> String {
    format!(
        "Color presets:      {}\nVisibility presets: {}",
        COLOR_PRESETS.join(", "),
        VISIBILITY_PRESETS.join(", ")
    )
}

fn heading(title: &str, use_colors: bool) -> String {
    if use_colors {
        title.bold().to_string()
    } else {
        title.to_string()
    }
}

fn hidden_line(title: &str, use_colors: bool) -> String {
    if use_colors {
        format!("{} {}", title.dimmed(), "(hidden)".dimmed())
    } else {
        format!("{} (hidden)", title)
    }
}

fn stat_bar(percentage: u8) -> String {
    let filled = usize::from(percentage) * BAR_WIDTH / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// Plain-text preview of the rendered page
pub fn format_page(page: &PageView, use_colors: bool) -> String {
    let mut lines: Vec<String> = Vec::new();

    match &page.hero {
        Some(hero) => {
            let name = hero.title.clone().unwrap_or_default();
            let title = hero.subtitle.clone().unwrap_or_default();
            let text = [name, title]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" | ");
            lines.push(heading(&fit(&text, 0), use_colors));
        }
        None => lines.push(hidden_line("Hero", use_colors)),
    }

    if page.header.is_none() {
        lines.push(hidden_line("Header", use_colors));
    }

    lines.push(String::new());
    match &page.about {
        Some(about) => {
            lines.push(heading("About", use_colors));
            if let Some(ref description) = about.description {
                lines.push(format!("  {}", fit(description, 2)));
            }
            let counters: Vec<String> = [
                about.experience_years.map(|n| format!("{} years", n)),
                about.projects_completed.map(|n| format!("{} projects", n)),
                about.awards.map(|n| format!("{} awards", n)),
            ]
            .into_iter()
            .flatten()
            .collect();
            if !counters.is_empty() {
                lines.push(format!("  {}", counters.join(" · ")));
            }
        }
        None => lines.push(hidden_line("About", use_colors)),
    }

    lines.push(String::new());
    match &page.projects {
        Some(projects) => {
            lines.push(heading("Projects", use_colors));
            for card in projects.cards.iter().flatten() {
                let tech = if card.technologies.is_empty() {
                    String::new()
                } else {
                    format!("  [{}]", card.technologies.join(", "))
                };
                lines.push(fit(&format!("  {:>2}. {}{}", card.id, card.title, tech), 0));
            }
        }
        None => lines.push(hidden_line("Projects", use_colors)),
    }

    lines.push(String::new());
    match &page.skills {
        Some(skills) => {
            lines.push(heading("Skills", use_colors));
            for category in skills.categories.iter().flatten() {
                let icon = category
                    .icon
                    .as_ref()
                    .map(|icon| format!("{} ", icon))
                    .unwrap_or_default();
                lines.push(fit(
                    &format!("  {}{}: {}", icon, category.name, category.skills.join(", ")),
                    0,
                ));
            }
        }
        None => lines.push(hidden_line("Skills", use_colors)),
    }

    lines.push(String::new());
    match &page.timeline {
        Some(timeline) => {
            lines.push(heading("Timeline", use_colors));
            for entry in timeline.entries.iter().flatten() {
                lines.push(fit(&format!("  {:<9} {}", entry.year, entry.title), 0));
            }
        }
        None => lines.push(hidden_line("Timeline", use_colors)),
    }

    lines.push(String::new());
    match &page.stats {
        Some(stats) => {
            lines.push(heading("Stats", use_colors));
            let name_width = stats
                .entries
                .iter()
                .flatten()
                .map(|bar| bar.name.chars().count())
                .max()
                .unwrap_or(0);
            for bar in stats.entries.iter().flatten() {
                lines.push(format!(
                    "  {:<width$}  {} {:>3}%",
                    bar.name,
                    stat_bar(bar.percentage),
                    bar.percentage,
                    width = name_width
                ));
            }
        }
        None => lines.push(hidden_line("Stats", use_colors)),
    }

    lines.push(String::new());
    match &page.contact {
        Some(contact) => {
            lines.push(heading("Contact", use_colors));
            if let Some(ref info) = contact.info {
                for value in [&info.email, &info.phone, &info.location].into_iter().flatten() {
                    lines.push(format!("  {}", value));
                }
                if let Some(ref chat) = info.chat_url {
                    lines.push(format!("  Chat: {}", chat));
                }
            }
            if let Some(ref links) = contact.social_links {
                let names: Vec<&str> = links.iter().map(|link| link.name.as_str()).collect();
                lines.push(format!("  Social: {}", names.join(", ")));
            }
        }
        None => lines.push(hidden_line("Contact", use_colors)),
    }

    if let Some(copyright) = page.footer.as_ref().and_then(|f| f.copyright.as_ref()) {
        lines.push(String::new());
        lines.push(copyright.clone());
    }

    let effects: Vec<&str> = [
        (page.effects.particles, "particles"),
        (page.effects.scroll_animations, "scroll animations"),
        (page.effects.loading_screen, "loading screen"),
        (page.effects.glitch_effect, "glitch"),
    ]
    .into_iter()
    .filter(|(on, _)| *on)
    .map(|(_, name)| name)
    .collect();
    lines.push(String::new());
    if effects.is_empty() {
        lines.push("Effects: none".to_string());
    } else {
        lines.push(format!("Effects: {}", effects.join(", ")));
    }

    lines.join("\n")
}
