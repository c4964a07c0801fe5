//! In-memory project store with slug lookup

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use super::frontmatter::{parse_about, parse_project};
use super::project::{AboutPage, ProjectRecord};
use crate::error::{ContentError, Result};

/// Built-in sample projects as (file stem, document)
pub(crate) const SAMPLE_PROJECTS: &[(&str, &str)] = &[
    (
        "rehabilitation-program",
        include_str!("samples/rehabilitation-program.md"),
    ),
    (
        "injury-prevention",
        include_str!("samples/injury-prevention.md"),
    ),
    (
        "performance-analytics",
        include_str!("samples/performance-analytics.md"),
    ),
];

/// Built-in sample About page
pub(crate) const SAMPLE_ABOUT: &str = include_str!("samples/about.md");

/// Immutable set of project records keyed by slug
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    projects: Vec<ProjectRecord>,
    index: HashMap<String, usize>,
}

impl ContentStore {
    /// Build a store, checking slug uniqueness, slug format and titles
    pub fn from_records(projects: Vec<ProjectRecord>) -> Result<Self> {
        let mut index = HashMap::with_capacity(projects.len());

        for (i, project) in projects.iter().enumerate() {
            validate_slug(&project.slug)?;
            if project.title.trim().is_empty() {
                return Err(ContentError::EmptyTitle(project.slug.clone()));
            }
            if index.insert(project.slug.clone(), i).is_some() {
                return Err(ContentError::DuplicateSlug(project.slug.clone()));
            }
        }

        Ok(Self { projects, index })
    }

    /// The built-in sample projects
    pub fn sample() -> Result<Self> {
        let records = SAMPLE_PROJECTS
            .iter()
            .map(|(stem, doc)| {
                parse_project(doc, Path::new(&format!("samples/{}.md", stem)), stem)
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_records(records)
    }

    /// Look up a project by its exact slug
    pub fn resolve(&self, slug: &str) -> Option<&ProjectRecord> {
        self.index.get(slug).map(|&i| &self.projects[i])
    }

    /// Every slug once, in store order
    pub fn list_slugs(&self) -> Vec<&str> {
        self.projects.iter().map(|p| p.slug.as_str()).collect()
    }

    /// Every tag across all projects, deduplicated and sorted
    pub fn list_all_tags(&self) -> Vec<String> {
        self.projects
            .iter()
            .flat_map(|p| p.tags.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Projects carrying the given tag, in store order
    pub fn projects_with_tag(&self, tag: &str) -> Vec<&ProjectRecord> {
        self.projects.iter().filter(|p| p.has_tag(tag)).collect()
    }

    /// All projects in store order
    pub fn projects(&self) -> &[ProjectRecord] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

/// The built-in sample About page
pub fn sample_about() -> Result<AboutPage> {
    parse_about(SAMPLE_ABOUT, Path::new("samples/about.md"))
}

/// A slug is URL-safe when slugifying it is a no-op
fn validate_slug(slug: &str) -> Result<()> {
    let suggested = slug::slugify(slug);
    if slug.is_empty() || suggested != slug {
        return Err(ContentError::InvalidSlug {
            slug: slug.to_string(),
            suggested,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(slug: &str, title: &str, tags: &[&str]) -> ProjectRecord {
        let mut r = ProjectRecord::new(slug, title);
        r.tags = tags.iter().map(|t| t.to_string()).collect();
        r
    }

    #[test]
    fn test_resolve_every_slug() {
        let store = ContentStore::sample().unwrap();
        for slug in store.list_slugs() {
            assert_eq!(store.resolve(slug).unwrap().slug, slug);
        }
    }

    #[test]
    fn test_resolve_unknown_slug() {
        let store = ContentStore::sample().unwrap();
        assert!(store.resolve("no-such-project").is_none());
        assert!(store.resolve("").is_none());
        assert!(store.resolve("Rehabilitation-Program").is_none());
    }

    #[test]
    fn test_sample_rehabilitation_program() {
        let store = ContentStore::sample().unwrap();
        let project = store.resolve("rehabilitation-program").unwrap();
        assert_eq!(project.title, "ACL Rehabilitation Program");
        let features: Vec<&str> = project.features.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(
            features,
            [
                "Phase-Based Progression",
                "Objective Testing Protocols",
                "Sport-Specific Training",
                "Psychological Readiness",
            ]
        );
        assert_eq!(project.video_id.as_deref(), Some("dQw4w9WgXcQ"));
        assert!(project.content.is_some());
    }

    #[test]
    fn test_list_slugs_complete_and_unique() {
        let store = ContentStore::sample().unwrap();
        let slugs = store.list_slugs();
        assert_eq!(
            slugs,
            ["rehabilitation-program", "injury-prevention", "performance-analytics"]
        );
        let unique: BTreeSet<_> = slugs.iter().collect();
        assert_eq!(unique.len(), store.len());
    }

    #[test]
    fn test_list_all_tags_sorted_and_deduplicated() {
        let store = ContentStore::from_records(vec![
            record("a", "A", &["Rehabilitation", "Sports Medicine"]),
            record("b", "B", &["Education", "Prevention"]),
            record("c", "C", &["Prevention", "Education"]),
        ])
        .unwrap();
        assert_eq!(
            store.list_all_tags(),
            ["Education", "Prevention", "Rehabilitation", "Sports Medicine"]
        );
    }

    #[test]
    fn test_projects_with_tag() {
        let store = ContentStore::from_records(vec![
            record("a", "A", &["Youth"]),
            record("b", "B", &["Education"]),
            record("c", "C", &["Youth", "Education"]),
        ])
        .unwrap();
        let slugs: Vec<&str> = store
            .projects_with_tag("Youth")
            .iter()
            .map(|p| p.slug.as_str())
            .collect();
        assert_eq!(slugs, ["a", "c"]);
        assert!(store.projects_with_tag("youth").is_empty());
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let err = ContentStore::from_records(vec![record("a", "A", &[]), record("a", "B", &[])])
            .unwrap_err();
        assert!(matches!(err, ContentError::DuplicateSlug(s) if s == "a"));
    }

    #[test]
    fn test_empty_title_rejected() {
        let err = ContentStore::from_records(vec![record("a", "  ", &[])]).unwrap_err();
        assert!(matches!(err, ContentError::EmptyTitle(_)));
    }

    #[test]
    fn test_invalid_slug_rejected() {
        for bad in ["", "Has Spaces", "UPPER", "trailing-"] {
            let err = ContentStore::from_records(vec![record(bad, "T", &[])]).unwrap_err();
            assert!(matches!(err, ContentError::InvalidSlug { .. }), "{bad:?}");
        }
    }

    #[test]
    fn test_empty_store() {
        let store = ContentStore::from_records(Vec::new()).unwrap();
        assert!(store.is_empty());
        assert!(store.list_slugs().is_empty());
        assert!(store.list_all_tags().is_empty());
    }

    #[test]
    fn test_sample_about() {
        let about = sample_about().unwrap();
        assert!(about.title.starts_with("Traded Protein Shakes"));
        assert!(about.content.unwrap().contains("## Journey"));
    }
}
