//! Typed render tree for the portfolio page.
//!
//! [`render`] is pure: visibility, the featured-project rule, timeline
//! ordering and stat clamping are all decided here, so a renderer only walks
//! the tree. Hidden sections are `None`; hidden items are `None` or `false`.

use serde::Serialize;

use crate::edit::collections::sorted_timeline;
use crate::model::{Colors, PortfolioConfig, SocialLink, Typography};
use crate::visibility::{is_visible, section_visible};

/// Most project cards shown in the grid
pub const MAX_PROJECT_CARDS: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub theme: Colors,
    pub typography: Typography,
    pub header: Option<HeaderView>,
    pub hero: Option<HeroView>,
    pub about: Option<AboutView>,
    pub projects: Option<ProjectsView>,
    pub skills: Option<SkillsView>,
    pub timeline: Option<TimelineView>,
    pub stats: Option<StatsView>,
    pub contact: Option<ContactView>,
    pub footer: Option<FooterView>,
    pub effects: EffectsView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderView {
    pub logo: Option<String>,
    pub navigation: bool,
    pub dashboard_link: bool,
    pub mobile_menu: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroView {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub buttons: bool,
    pub scroll_indicator: bool,
    pub background_canvas: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AboutView {
    pub show_title: bool,
    pub description: Option<String>,
    pub profile_image: Option<String>,
    pub experience_years: Option<u32>,
    pub projects_completed: Option<u32>,
    pub awards: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectsView {
    pub show_title: bool,
    pub cards: Option<Vec<ProjectCard>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectCard {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub image: String,
    pub technologies: Vec<String>,
    pub live: Link,
    pub source: Link,
}

/// A link target. `#` is a placeholder and stays in the same tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub href: String,
    pub external: bool,
}

impl Link {
    fn new(href: &str) -> Self {
        Self {
            href: href.to_string(),
            external: !href.is_empty() && href != "#",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SocialButton {
    pub name: String,
    pub icon: String,
    pub link: Link,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillsView {
    pub show_title: bool,
    pub categories: Option<Vec<SkillCategoryView>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillCategoryView {
    pub name: String,
    pub icon: Option<String>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineView {
    pub show_title: bool,
    pub entries: Option<Vec<TimelineItem>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineItem {
    pub year: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsView {
    pub show_title: bool,
    pub entries: Option<Vec<StatBar>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatBar {
    pub name: String,
    pub category: String,
    /// Always within 0..=100
    pub percentage: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactView {
    pub show_title: bool,
    pub info: Option<ContactInfo>,
    pub contact_form: bool,
    pub social_links: Option<Vec<SocialButton>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    /// `https://wa.me/<digits>` when a WhatsApp or phone number is set
    pub chat_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FooterView {
    pub copyright: Option<String>,
    pub social_links: Option<Vec<SocialButton>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectsView {
    pub particles: bool,
    pub scroll_animations: bool,
    pub loading_screen: bool,
    pub glitch_effect: bool,
    /// Particle color, the theme's primary role
    pub particle_color: Option<String>,
}

/// Build the render tree for a resolved configuration
pub fn render(config: &PortfolioConfig) -> PageView {
    let v = &config.visibility;
    let shown = |section: &str, item: &str| is_visible(v, section, item);
    let section = |name: &str| section_visible(v, name);

    let header = section("header").then(|| HeaderView {
        logo: shown("header", "logo").then(|| config.personal.name.clone()),
        navigation: shown("header", "navigation"),
        dashboard_link: shown("header", "dashboardLink"),
        mobile_menu: shown("header", "mobileMenu"),
    });

    let hero = section("hero").then(|| HeroView {
        title: shown("hero", "title").then(|| config.personal.name.clone()),
        subtitle: shown("hero", "subtitle").then(|| config.personal.title.clone()),
        buttons: shown("hero", "buttons"),
        scroll_indicator: shown("hero", "scrollIndicator"),
        background_canvas: shown("hero", "backgroundCanvas"),
    });

    let personal = &config.personal;
    let about = section("about").then(|| AboutView {
        show_title: shown("about", "title"),
        description: shown("about", "description").then(|| personal.about.clone()),
        profile_image: Some(personal.profile_image.clone())
            .filter(|image| !image.is_empty() && shown("about", "profileImage")),
        experience_years: shown("about", "experienceYears").then_some(personal.experience_years),
        projects_completed: shown("about", "projectsCompleted")
            .then_some(personal.projects_completed),
        awards: shown("about", "awards").then_some(personal.awards),
    });

    let projects = section("projects").then(|| ProjectsView {
        show_title: shown("projects", "title"),
        cards: shown("projects", "projectGrid")
            .then(|| project_cards(config, shown("projects", "featuredOnly"))),
    });

    let skills = section("skills").then(|| {
        let icons = shown("skills", "icons");
        SkillsView {
            show_title: shown("skills", "title"),
            categories: shown("skills", "categories").then(|| {
                config
                    .skills
                    .iter()
                    .map(|(name, category)| SkillCategoryView {
                        name: name.clone(),
                        icon: Some(category.icon.clone()).filter(|_| icons),
                        skills: category.skills.clone(),
                    })
                    .collect()
            }),
        }
    });

    let timeline = section("timeline").then(|| TimelineView {
        show_title: shown("timeline", "title"),
        entries: shown("timeline", "entries").then(|| {
            sorted_timeline(config)
                .into_iter()
                .filter(|entry| entry.visible)
                .map(|entry| TimelineItem {
                    year: entry.year.clone(),
                    title: entry.title.clone(),
                    description: entry.description.clone(),
                })
                .collect()
        }),
    });

    let stats = section("stats").then(|| StatsView {
        show_title: shown("stats", "title"),
        entries: shown("stats", "entries").then(|| {
            config
                .stats
                .iter()
                .map(|stat| StatBar {
                    name: stat.name.clone(),
                    category: stat.category.clone(),
                    percentage: stat.clamped_percentage(),
                })
                .collect()
        }),
    });

    let contact = section("contact").then(|| {
        let c = &config.contact;
        ContactView {
            show_title: shown("contact", "title"),
            info: shown("contact", "contactInfo").then(|| ContactInfo {
                email: shown("contact", "email").then(|| c.email.clone()),
                phone: shown("contact", "phone").then(|| c.phone.clone()),
                location: shown("contact", "location").then(|| c.location.clone()),
                chat_url: c
                    .chat_number()
                    .map(|number| format!("https://wa.me/{}", number.trim_start_matches('+'))),
            }),
            contact_form: shown("contact", "contactForm"),
            social_links: shown("contact", "socialLinks").then(|| social_links(&config.social)),
        }
    });

    let footer = section("footer").then(|| FooterView {
        copyright: shown("footer", "copyright").then(|| format!("© {}", personal.name)),
        social_links: shown("footer", "socialLinks").then(|| social_links(&config.social)),
    });

    let particles = shown("effects", "particles");
    let effects = EffectsView {
        particles,
        scroll_animations: shown("effects", "scrollAnimations"),
        loading_screen: shown("effects", "loadingScreen"),
        glitch_effect: shown("effects", "glitchEffect"),
        particle_color: config.colors.get("primary").filter(|_| particles).cloned(),
    };

    PageView {
        theme: config.colors.clone(),
        typography: config.typography.clone(),
        header,
        hero,
        about,
        projects,
        skills,
        timeline,
        stats,
        contact,
        footer,
        effects,
    }
}

/// Featured projects only when `featured_only`, capped at [`MAX_PROJECT_CARDS`]
fn project_cards(config: &PortfolioConfig, featured_only: bool) -> Vec<ProjectCard> {
    config
        .projects
        .iter()
        .filter(|project| !featured_only || project.featured)
        .take(MAX_PROJECT_CARDS)
        .map(|project| ProjectCard {
            id: project.id,
            title: project.title.clone(),
            description: project.description.clone(),
            image: project.image.clone(),
            technologies: project.technologies.clone(),
            live: Link::new(&project.live_url),
            source: Link::new(&project.github_url),
        })
        .collect()
}

fn social_links(links: &[SocialLink]) -> Vec<SocialButton> {
    links
        .iter()
        .map(|link| SocialButton {
            name: link.name.clone(),
            icon: link.icon.clone(),
            link: Link::new(&link.url),
        })
        .collect()
}
