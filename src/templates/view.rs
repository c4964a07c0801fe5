//! Serializable page views built from resolved content

use anyhow::Result;
use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::{AboutPage, ContentStore, Feature, MarkdownRenderer, ProjectRecord};
use crate::helpers::{project_path, tag_path, url_for};

/// Site-wide values shared by every page
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub name: String,
    pub description: String,
    pub author: String,
    pub url: String,
    pub root: String,
    pub language: String,
    pub contact_url: String,
}

impl SiteData {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            name: config.site_name().to_string(),
            description: config.description.clone(),
            author: config.author.clone(),
            url: config.url.trim_end_matches('/').to_string(),
            root: url_for(config, "/"),
            language: config.language.clone(),
            contact_url: url_for(config, &config.contact_url),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NavItem {
    pub name: String,
    pub url: String,
}

/// Header navigation
pub fn nav_items(config: &SiteConfig) -> Vec<NavItem> {
    let tags = format!("/{}/", config.tag_dir.trim_matches('/'));
    let items: [(&str, &str); 4] = [
        ("Home", "/"),
        ("Portfolio", "/#portfolio"),
        ("About", "/about/"),
        ("Tags", tags.as_str()),
    ];

    items
        .iter()
        .map(|(name, path)| NavItem {
            name: name.to_string(),
            url: url_for(config, path),
        })
        .collect()
}

/// A tag badge; tags without a usable slug have no page and no `url`
#[derive(Debug, Clone, Serialize)]
pub struct TagLink {
    pub name: String,
    pub url: Option<String>,
}

impl TagLink {
    fn new(config: &SiteConfig, tag: &str) -> Self {
        let url = if slug::slugify(tag).is_empty() {
            None
        } else {
            Some(url_for(config, &tag_path(config, tag)))
        };
        Self {
            name: tag.to_string(),
            url,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageView {
    pub src: String,
    pub alt: String,
}

/// A project as shown in listings
#[derive(Debug, Clone, Serialize)]
pub struct ProjectCard {
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub url: String,
    pub image: Option<ImageView>,
    pub tags: Vec<TagLink>,
}

pub fn project_card(config: &SiteConfig, record: &ProjectRecord) -> ProjectCard {
    ProjectCard {
        slug: record.slug.clone(),
        title: record.title.clone(),
        summary: record.summary.clone(),
        url: url_for(config, &project_path(config, &record.slug)),
        image: image_view(config, record),
        tags: tag_links(config, record),
    }
}

/// A fully composed project detail page
#[derive(Debug, Clone, Serialize)]
pub struct ProjectView {
    pub slug: String,
    pub title: String,
    pub url: String,
    pub tags: Vec<TagLink>,
    /// Whether the repository/contact button row is shown
    pub has_actions: bool,
    pub repository_url: Option<String>,
    pub contact_url: Option<String>,
    pub image: Option<ImageView>,
    pub summary: String,
    pub problem: String,
    pub solution: String,
    pub features: Vec<Feature>,
    /// Rendered markdown body, absent when the project has none
    pub content_html: Option<String>,
    pub video_id: Option<String>,
    pub back_url: String,
}

/// Compose the detail page of a resolved project
pub fn project_view(
    config: &SiteConfig,
    renderer: &MarkdownRenderer,
    record: &ProjectRecord,
) -> Result<ProjectView> {
    let content_html = renderer.render_section(record.content.as_deref())?;

    Ok(ProjectView {
        slug: record.slug.clone(),
        title: record.title.clone(),
        url: url_for(config, &project_path(config, &record.slug)),
        tags: tag_links(config, record),
        has_actions: !record.links.is_empty(),
        repository_url: record.links.repository.clone(),
        contact_url: record
            .links
            .contact
            .as_deref()
            .map(|c| url_for(config, c)),
        image: image_view(config, record),
        summary: record.summary.clone(),
        problem: record.problem.clone(),
        solution: record.solution.clone(),
        features: record.features.clone(),
        content_html,
        video_id: record.video_id.clone(),
        back_url: url_for(config, "/#portfolio"),
    })
}

/// Title and description of a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
}

/// Metadata for a project route, including unknown slugs
pub fn project_meta(store: &ContentStore, slug: &str) -> PageMeta {
    match store.resolve(slug) {
        Some(project) => PageMeta {
            title: project.title.clone(),
            description: project.description().to_string(),
        },
        None => not_found_meta(),
    }
}

pub fn not_found_meta() -> PageMeta {
    PageMeta {
        title: "Project Not Found".to_string(),
        description: String::new(),
    }
}

/// Tags sharing a slug and the projects carrying any of them
#[derive(Debug, Clone, Serialize)]
pub struct TagGroup {
    /// First spelling in sorted tag order
    pub name: String,
    pub slug: String,
    pub url: String,
    pub projects: Vec<ProjectCard>,
}

/// One group per tag slug, ordered by each group's first tag.
///
/// Tags that differ only in case or punctuation share a page. Tags with an
/// empty slug get no group.
pub fn tag_groups(config: &SiteConfig, store: &ContentStore) -> Vec<TagGroup> {
    let mut slugs: Vec<(String, String)> = Vec::new();
    for tag in store.list_all_tags() {
        let slug = slug::slugify(&tag);
        if slug.is_empty() || slugs.iter().any(|(s, _)| *s == slug) {
            continue;
        }
        slugs.push((slug, tag));
    }

    slugs
        .into_iter()
        .map(|(slug, name)| {
            let projects = store
                .projects()
                .iter()
                .filter(|p| p.tags.iter().any(|t| slug::slugify(t) == slug))
                .map(|p| project_card(config, p))
                .collect();
            TagGroup {
                url: url_for(config, &tag_path(config, &name)),
                name,
                slug,
                projects,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct AboutView {
    pub title: String,
    pub content_html: Option<String>,
}

pub fn about_view(renderer: &MarkdownRenderer, about: &AboutPage) -> Result<AboutView> {
    Ok(AboutView {
        title: about.title.clone(),
        content_html: renderer.render_section(about.content.as_deref())?,
    })
}

fn image_view(config: &SiteConfig, record: &ProjectRecord) -> Option<ImageView> {
    record.image.as_ref().map(|image| ImageView {
        src: url_for(config, &image.path),
        alt: image.alt.clone(),
    })
}

fn tag_links(config: &SiteConfig, record: &ProjectRecord) -> Vec<TagLink> {
    record.tags.iter().map(|t| TagLink::new(config, t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_view_sections() {
        let config = SiteConfig::default();
        let renderer = MarkdownRenderer::new();
        let store = ContentStore::sample().unwrap();

        let record = store.resolve("rehabilitation-program").unwrap();
        let view = project_view(&config, &renderer, record).unwrap();
        assert_eq!(view.url, "/projects/rehabilitation-program/");
        assert_eq!(view.features.len(), 4);
        assert_eq!(view.contact_url.as_deref(), Some("/contact"));
        assert!(view.repository_url.is_none());
        assert!(view.content_html.unwrap().contains("<h3>Phase 1: Protection</h3>"));
        assert_eq!(view.image.unwrap().alt, "ACL Rehabilitation Program");
        assert_eq!(view.back_url, "/#portfolio");

        let record = store.resolve("injury-prevention").unwrap();
        let view = project_view(&config, &renderer, record).unwrap();
        assert!(view.content_html.is_none());
        assert!(view.contact_url.is_none());
    }

    #[test]
    fn test_project_meta() {
        let store = ContentStore::sample().unwrap();
        let meta = project_meta(&store, "performance-analytics");
        assert_eq!(meta.title, "Performance Analytics Dashboard");
        assert!(meta.description.starts_with("A data-driven approach"));

        assert_eq!(project_meta(&store, "missing"), not_found_meta());
        assert_eq!(not_found_meta().title, "Project Not Found");
    }

    #[test]
    fn test_tag_groups() {
        let config = SiteConfig::default();
        let store = ContentStore::sample().unwrap();
        let groups = tag_groups(&config, &store);
        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, store.list_all_tags());

        let sports = groups.iter().find(|g| g.name == "Sports Medicine").unwrap();
        assert_eq!(sports.url, "/tags/sports-medicine/");
        assert_eq!(sports.projects.len(), 1);
        assert_eq!(sports.projects[0].slug, "rehabilitation-program");
    }

    #[test]
    fn test_tags_sharing_a_slug_share_a_group() {
        let config = SiteConfig::default();
        let mut alpha = ProjectRecord::new("alpha", "Alpha");
        alpha.tags = vec!["Sports Medicine".to_string()];
        let mut beta = ProjectRecord::new("beta", "Beta");
        beta.tags = vec!["sports medicine".to_string(), "Youth".to_string()];
        let store = ContentStore::from_records(vec![alpha, beta]).unwrap();

        let groups = tag_groups(&config, &store);
        let slugs: Vec<&str> = groups.iter().map(|g| g.slug.as_str()).collect();
        assert_eq!(slugs, ["sports-medicine", "youth"]);

        let sports = &groups[0];
        assert_eq!(sports.name, "Sports Medicine");
        let members: Vec<&str> = sports.projects.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(members, ["alpha", "beta"]);
    }

    #[test]
    fn test_punctuation_tag_has_no_link() {
        let config = SiteConfig::default();
        let mut record = ProjectRecord::new("odd", "Odd");
        record.tags = vec!["???".to_string(), "Youth".to_string()];
        let store = ContentStore::from_records(vec![record]).unwrap();

        let card = project_card(&config, store.resolve("odd").unwrap());
        assert!(card.tags[0].url.is_none());
        assert_eq!(card.tags[1].url.as_deref(), Some("/tags/youth/"));

        let groups = tag_groups(&config, &store);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "Youth");
    }

    #[test]
    fn test_action_row_follows_links() {
        let config = SiteConfig::default();
        let renderer = MarkdownRenderer::new();
        let mut record = ProjectRecord::new("gait-lab", "Gait Lab");
        let view = project_view(&config, &renderer, &record).unwrap();
        assert!(!view.has_actions);

        record.links.repository = Some("https://github.com/example/gait".to_string());
        let view = project_view(&config, &renderer, &record).unwrap();
        assert!(view.has_actions);
    }

    #[test]
    fn test_site_data_author() {
        let config = SiteConfig {
            author: "Justin Ortiz".to_string(),
            ..Default::default()
        };
        assert_eq!(SiteData::from_config(&config).author, "Justin Ortiz");
    }

    #[test]
    fn test_nav_items_honor_root() {
        let config = SiteConfig {
            root: "/folio/".to_string(),
            ..Default::default()
        };
        let urls: Vec<String> = nav_items(&config).into_iter().map(|n| n.url).collect();
        assert_eq!(urls, ["/folio/", "/folio/#portfolio", "/folio/about/", "/folio/tags/"]);
    }
}
