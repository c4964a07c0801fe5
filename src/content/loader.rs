//! Content loader - builds the project store from the content directory

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::frontmatter::{parse_about, parse_project};
use super::store::{sample_about, ContentStore};
use super::{AboutPage, ProjectRecord};
use crate::Folio;

/// Loads projects and the About page from the content directory
pub struct ContentLoader<'a> {
    folio: &'a Folio,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(folio: &'a Folio) -> Self {
        Self { folio }
    }

    /// Build the project store.
    ///
    /// Falls back to the built-in sample projects when the site has no
    /// projects directory at all. An existing but empty directory yields an
    /// empty store.
    pub fn load_store(&self) -> Result<ContentStore> {
        let projects_dir = self.folio.projects_dir();
        if !projects_dir.exists() {
            tracing::info!(
                "No projects directory at {:?}, using built-in sample projects",
                projects_dir
            );
            return Ok(ContentStore::sample()?);
        }

        let projects = self.load_projects(&projects_dir)?;
        let store = ContentStore::from_records(projects)
            .with_context(|| format!("Invalid project content in {:?}", projects_dir))?;

        tracing::debug!("Loaded slugs: {:?}", store.list_slugs());
        Ok(store)
    }

    /// Load every project file, ordered by file name
    fn load_projects(&self, projects_dir: &Path) -> Result<Vec<ProjectRecord>> {
        let mut projects = Vec::new();

        for entry in WalkDir::new(projects_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
        {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) && !is_hidden(path) {
                projects.push(load_project(path)?);
            }
        }

        Ok(projects)
    }

    /// Load the About page, or the default heading when none exists
    pub fn load_about(&self) -> Result<AboutPage> {
        let about_path = self.folio.content_dir.join("about.md");
        if about_path.exists() {
            let content = fs::read_to_string(&about_path)
                .with_context(|| format!("Failed to read {:?}", about_path))?;
            return Ok(parse_about(&content, &about_path)?);
        }

        if !self.folio.projects_dir().exists() {
            // Site without content: pair the sample projects with the sample page
            return Ok(sample_about()?);
        }

        tracing::debug!("No about page at {:?}", about_path);
        Ok(AboutPage::default())
    }
}

/// Load a single project file
fn load_project(path: &Path) -> Result<ProjectRecord> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;

    let file_stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("untitled");

    let record = parse_project(&content, path, file_stem)?;
    tracing::debug!("Loaded project {} from {:?}", record.slug, path);
    Ok(record)
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

/// Dot-files and underscore-prefixed drafts are skipped
fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.') || n.starts_with('_'))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_falls_back_to_samples() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::with_config(dir.path(), SiteConfig::default());
        let loader = ContentLoader::new(&folio);

        let store = loader.load_store().unwrap();
        assert_eq!(store.len(), 3);
        assert!(loader.load_about().unwrap().content.is_some());
    }

    #[test]
    fn test_loads_projects_in_file_name_order() {
        let dir = tempfile::tempdir().unwrap();
        let projects = dir.path().join("content/projects");
        write(&projects.join("b-second.md"), "---\ntitle: Second\n---\n");
        write(&projects.join("a-first.md"), "---\ntitle: First\ntags: X\n---\nBody\n");
        write(&projects.join("_draft.md"), "---\ntitle: Draft\n---\n");
        write(&projects.join("notes.txt"), "ignored");

        let folio = Folio::with_config(dir.path(), SiteConfig::default());
        let loader = ContentLoader::new(&folio);
        let store = loader.load_store().unwrap();

        assert_eq!(store.list_slugs(), ["a-first", "b-second"]);
        assert_eq!(store.resolve("a-first").unwrap().content.as_deref(), Some("Body"));
        // projects directory exists but about.md does not
        assert_eq!(loader.load_about().unwrap(), AboutPage::default());
    }

    #[test]
    fn test_duplicate_slug_fails_build() {
        let dir = tempfile::tempdir().unwrap();
        let projects = dir.path().join("content/projects");
        write(&projects.join("one.md"), "---\nslug: same\ntitle: One\n---\n");
        write(&projects.join("two.md"), "---\nslug: same\ntitle: Two\n---\n");

        let folio = Folio::with_config(dir.path(), SiteConfig::default());
        assert!(ContentLoader::new(&folio).load_store().is_err());
    }

    #[test]
    fn test_loads_about_page() {
        let dir = tempfile::tempdir().unwrap();
        write(
            &dir.path().join("content/about.md"),
            "---\ntitle: Hello\n---\nI build things.\n",
        );
        fs::create_dir_all(dir.path().join("content/projects")).unwrap();

        let folio = Folio::with_config(dir.path(), SiteConfig::default());
        let about = ContentLoader::new(&folio).load_about().unwrap();
        assert_eq!(about.title, "Hello");
        assert_eq!(about.content.as_deref(), Some("I build things."));
    }
}
