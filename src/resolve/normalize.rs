use std::collections::HashSet;

use crate::diag_warn;
use crate::model::PortfolioConfig;

/// Make project and timeline ids unique.
///
/// Projects with any duplicate id are renumbered `1..=n` in order. Timeline
/// entries keep the first occurrence of an id; later duplicates get the
/// lowest `-2`, `-3`, ... suffix not used by any other entry.
pub fn normalize_ids(config: &mut PortfolioConfig) {
    let mut seen = HashSet::new();
    if !config.projects.iter().all(|p| seen.insert(p.id)) {
        diag_warn!("Duplicate project ids found, renumbering projects");
        for (index, project) in config.projects.iter_mut().enumerate() {
            project.id = index as u32 + 1;
        }
    }

    // Reserve every input id so an already unique id is never renamed
    let mut taken: HashSet<String> = config.timeline.iter().map(|t| t.id.clone()).collect();
    let mut kept: HashSet<String> = HashSet::new();
    for entry in config.timeline.iter_mut() {
        if kept.insert(entry.id.clone()) {
            continue;
        }
        let mut suffix = 2;
        let renamed = loop {
            let candidate = format!("{}-{}", entry.id, suffix);
            if !taken.contains(&candidate) {
                break candidate;
            }
            suffix += 1;
        };
        diag_warn!("Duplicate timeline id '{}' renamed to '{}'", entry.id, renamed);
        taken.insert(renamed.clone());
        entry.id = renamed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Project, TimelineEntry};

    fn entry(id: &str) -> TimelineEntry {
        TimelineEntry {
            id: id.to_string(),
            ..TimelineEntry::default()
        }
    }

    #[test]
    fn test_unique_ids_untouched() {
        let mut config = PortfolioConfig::default();
        let before = config.clone();
        normalize_ids(&mut config);
        assert_eq!(config, before);
    }

    #[test]
    fn test_duplicate_project_ids_renumbered() {
        let mut config = PortfolioConfig::default();
        config.projects = vec![
            Project::placeholder(7),
            Project::placeholder(7),
            Project::placeholder(2),
        ];
        normalize_ids(&mut config);
        let ids: Vec<u32> = config.projects.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_duplicate_timeline_ids_suffixed() {
        let mut config = PortfolioConfig::default();
        config.timeline = vec![entry("job"), entry("job"), entry("job")];
        normalize_ids(&mut config);
        let ids: Vec<&str> = config.timeline.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["job", "job-2", "job-3"]);
    }

    #[test]
    fn test_unique_timeline_id_never_renamed() {
        let mut config = PortfolioConfig::default();
        config.timeline = vec![entry("job"), entry("job"), entry("job-2"), entry("job")];
        normalize_ids(&mut config);
        let ids: Vec<&str> = config.timeline.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["job", "job-3", "job-2", "job-4"]);
    }
}
