use crate::model::{PortfolioConfig, Project, SkillCategory, SocialLink, Stat, TimelineEntry};

/// Append a placeholder project. Returns its id.
pub fn add_project(config: &mut PortfolioConfig) -> u32 {
    let id = config.next_project_id();
    config.projects.push(Project::placeholder(id));
    id
}

/// Remove the project with `id`. Returns true if one was removed.
pub fn remove_project(config: &mut PortfolioConfig, id: u32) -> bool {
    let before = config.projects.len();
    config.projects.retain(|p| p.id != id);
    config.projects.len() != before
}

/// Add an empty skill category with the default icon
pub fn add_skill_category(config: &mut PortfolioConfig, name: &str) -> Result<(), String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("category name must not be empty".to_string());
    }
    if config.skills.contains_key(name) {
        return Err(format!("category '{}' already exists", name));
    }
    config.skills.insert(
        name.to_string(),
        SkillCategory {
            icon: "🔧".to_string(),
            skills: Vec::new(),
        },
    );
    Ok(())
}

pub fn remove_skill_category(config: &mut PortfolioConfig, name: &str) -> bool {
    config.skills.remove(name).is_some()
}

/// Append a placeholder social link. Returns its index.
pub fn add_social_link(config: &mut PortfolioConfig) -> usize {
    config.social.push(SocialLink {
        name: "New Platform".to_string(),
        url: "#".to_string(),
        icon: "🔗".to_string(),
    });
    config.social.len() - 1
}

pub fn remove_social_link(config: &mut PortfolioConfig, index: usize) -> bool {
    if index < config.social.len() {
        config.social.remove(index);
        true
    } else {
        false
    }
}

/// Lowercase, dash separated id derived from a title
fn slug(title: &str) -> String {
    let mut slug = String::new();
    for c in title.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-').to_string();
    if slug.is_empty() {
        "entry".to_string()
    } else {
        slug
    }
}

/// Add a visible timeline entry. Returns its id, derived from the title and
/// made unique within the timeline.
pub fn add_timeline_entry(config: &mut PortfolioConfig, year: &str, title: &str) -> String {
    let base = slug(title);
    let mut id = base.clone();
    let mut suffix = 2;
    while config.timeline.iter().any(|entry| entry.id == id) {
        id = format!("{}-{}", base, suffix);
        suffix += 1;
    }

    config.timeline.push(TimelineEntry {
        id: id.clone(),
        year: year.trim().to_string(),
        title: title.trim().to_string(),
        description: String::new(),
        visible: true,
    });
    id
}

pub fn remove_timeline_entry(config: &mut PortfolioConfig, id: &str) -> bool {
    let before = config.timeline.len();
    config.timeline.retain(|entry| entry.id != id);
    config.timeline.len() != before
}

/// Timeline entries sorted by year, oldest first. Stable for equal years.
pub fn sorted_timeline(config: &PortfolioConfig) -> Vec<&TimelineEntry> {
    let mut entries: Vec<&TimelineEntry> = config.timeline.iter().collect();
    entries.sort_by(|a, b| a.year.cmp(&b.year));
    entries
}

/// Add a skill stat. The percentage must be within 0-100.
pub fn add_stat(
    config: &mut PortfolioConfig,
    name: &str,
    percentage: i64,
    category: &str,
) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("stat name must not be empty".to_string());
    }
    if !(0..=100).contains(&percentage) {
        return Err(format!("percentage {} is outside 0-100", percentage));
    }
    config.stats.push(Stat {
        name: name.trim().to_string(),
        percentage,
        category: category.trim().to_string(),
    });
    Ok(())
}

/// Remove every stat named `name`. Returns true if any was removed.
pub fn remove_stat(config: &mut PortfolioConfig, name: &str) -> bool {
    let before = config.stats.len();
    config.stats.retain(|stat| stat.name != name);
    config.stats.len() != before
}
