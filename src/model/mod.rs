pub mod section;
pub mod types;

pub use section::Section;
pub use types::{
    Colors, Contact, Personal, PortfolioConfig, Project, SkillCategory, Skills, SocialLink, Stat,
    TimelineEntry, Typography, VisibilityMap,
};
