//! Generator module - writes the static site using the built-in Tera templates

use anyhow::{Context as _, Result};
use chrono::Datelike;
use std::fs;
use std::path::Path;

use tera::Context;
use walkdir::WalkDir;

use crate::content::{AboutPage, ContentStore, MarkdownRenderer};
use crate::helpers::{escape_xml, full_url_for, project_path, url_for};
use crate::templates::{
    about_view, nav_items, not_found_meta, project_card, project_meta, project_view, tag_groups,
    PageMeta, ProjectCard, SiteData, TemplateRenderer,
};
use crate::Folio;

/// Static site generator using Tera templates
pub struct Generator {
    folio: Folio,
    renderer: TemplateRenderer,
    markdown: MarkdownRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(folio: &Folio) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        let markdown = MarkdownRenderer::from_config(&folio.config);

        Ok(Self {
            folio: folio.clone(),
            renderer,
            markdown,
        })
    }

    /// Generate the entire site
    pub fn generate(&self, store: &ContentStore, about: &AboutPage) -> Result<()> {
        // Ensure public directory exists
        fs::create_dir_all(&self.folio.public_dir).with_context(|| {
            format!("Failed to create public dir {:?}", self.folio.public_dir)
        })?;

        // Copy static assets (images, css, etc.)
        self.copy_static_assets()?;

        self.generate_home(store)?;
        self.generate_about(about)?;
        self.generate_project_pages(store)?;
        self.generate_tag_pages(store)?;
        self.generate_not_found()?;
        self.generate_sitemap(store)?;
        self.generate_project_index(store)?;

        Ok(())
    }

    /// Render the detail page for a slug, or `None` when no project matches
    pub fn render_project(&self, store: &ContentStore, slug: &str) -> Result<Option<String>> {
        let Some(record) = store.resolve(slug) else {
            return Ok(None);
        };

        let view = project_view(&self.folio.config, &self.markdown, record)?;
        let meta = project_meta(store, slug);
        let path = project_path(&self.folio.config, slug);

        let mut context = self.create_base_context(&path, &meta);
        context.insert("project", &view);

        let html = self
            .renderer
            .render("project.html", &context)
            .with_context(|| format!("Failed to render project {}", slug))?;
        Ok(Some(html))
    }

    /// Create a base context with common variables
    fn create_base_context(&self, path: &str, meta: &PageMeta) -> Context {
        let config = &self.folio.config;

        let mut context = Context::new();
        context.insert("site", &SiteData::from_config(config));
        context.insert("nav", &nav_items(config));
        context.insert("social", &config.social.entries());
        context.insert("social_links", &config.social);
        context.insert("current_year", &chrono::Local::now().year());
        context.insert("current_url", &url_for(config, path));
        context.insert("canonical_url", &full_url_for(config, path));
        context.insert("page_title", &meta.title);
        context.insert("page_description", &meta.description);
        context
    }

    /// Generate the listing page
    fn generate_home(&self, store: &ContentStore) -> Result<()> {
        let config = &self.folio.config;
        let cards: Vec<ProjectCard> = store
            .projects()
            .iter()
            .map(|p| project_card(config, p))
            .collect();
        let all_tags: Vec<_> = tag_groups(config, store)
            .into_iter()
            .map(|g| crate::templates::TagLink {
                name: g.name,
                url: Some(g.url),
            })
            .collect();

        let meta = PageMeta {
            title: String::new(),
            description: config.description.clone(),
        };
        let mut context = self.create_base_context("/", &meta);
        context.insert("projects", &cards);
        context.insert("all_tags", &all_tags);

        let html = self.renderer.render("home.html", &context)?;
        self.write_page("index.html", &html)
    }

    /// Generate the About page
    fn generate_about(&self, about: &AboutPage) -> Result<()> {
        let view = about_view(&self.markdown, about)?;
        let meta = PageMeta {
            title: "About".to_string(),
            description: about.title.clone(),
        };

        let mut context = self.create_base_context("about/", &meta);
        context.insert("about", &view);

        let html = self.renderer.render("about.html", &context)?;
        self.write_page("about/index.html", &html)
    }

    /// Generate one detail page per known slug
    fn generate_project_pages(&self, store: &ContentStore) -> Result<()> {
        for slug in store.list_slugs() {
            let Some(html) = self.render_project(store, slug)? else {
                continue;
            };
            let path = project_path(&self.folio.config, slug);
            self.write_page(&format!("{}index.html", path), &html)?;
        }

        tracing::info!("Generated {} project pages", store.len());
        Ok(())
    }

    /// Generate the tag index and one page per tag
    fn generate_tag_pages(&self, store: &ContentStore) -> Result<()> {
        let config = &self.folio.config;
        let groups = tag_groups(config, store);
        let tag_dir = config.tag_dir.trim_matches('/');
        let tags_url = url_for(config, &format!("{}/", tag_dir));

        let meta = PageMeta {
            title: "Tags".to_string(),
            description: String::new(),
        };
        let mut context = self.create_base_context(&format!("{}/", tag_dir), &meta);
        context.insert("tags", &groups);
        let html = self.renderer.render("tags.html", &context)?;
        self.write_page(&format!("{}/index.html", tag_dir), &html)?;

        for group in &groups {
            let meta = PageMeta {
                title: group.name.clone(),
                description: String::new(),
            };
            let path = format!("{}/{}/", tag_dir, group.slug);
            let mut context = self.create_base_context(&path, &meta);
            context.insert("tag", group);
            context.insert("tags_url", &tags_url);

            let html = self.renderer.render("tag.html", &context)?;
            self.write_page(&format!("{}index.html", path), &html)?;
        }

        tracing::info!("Generated {} tag pages", groups.len());
        Ok(())
    }

    /// Generate the not-found page served for unknown routes
    fn generate_not_found(&self) -> Result<()> {
        let context = self.create_base_context("404.html", &not_found_meta());
        let html = self.renderer.render("404.html", &context)?;
        self.write_page("404.html", &html)
    }

    /// Generate sitemap.xml with absolute URLs
    fn generate_sitemap(&self, store: &ContentStore) -> Result<()> {
        let config = &self.folio.config;
        let tag_dir = config.tag_dir.trim_matches('/');

        let mut paths = vec!["/".to_string(), "about/".to_string(), format!("{}/", tag_dir)];
        paths.extend(store.list_slugs().into_iter().map(|s| project_path(config, s)));
        paths.extend(
            tag_groups(config, store)
                .into_iter()
                .map(|g| format!("{}/{}/", tag_dir, g.slug)),
        );

        let mut sitemap = String::new();
        sitemap.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        sitemap.push('\n');
        sitemap.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
        sitemap.push('\n');
        for path in &paths {
            sitemap.push_str(&format!(
                "  <url><loc>{}</loc></url>\n",
                escape_xml(&full_url_for(config, path))
            ));
        }
        sitemap.push_str("</urlset>\n");

        self.write_page("sitemap.xml", &sitemap)?;
        tracing::info!("Generated sitemap.xml");
        Ok(())
    }

    /// Generate projects.json for client-side filtering
    fn generate_project_index(&self, store: &ContentStore) -> Result<()> {
        let config = &self.folio.config;
        let data: Vec<serde_json::Value> = store
            .projects()
            .iter()
            .map(|p| {
                serde_json::json!({
                    "slug": p.slug,
                    "title": p.title,
                    "summary": p.summary,
                    "url": url_for(config, &project_path(config, &p.slug)),
                    "tags": p.tags,
                })
            })
            .collect();

        let json = serde_json::to_string_pretty(&data)?;
        self.write_page("projects.json", &json)?;
        tracing::info!("Generated projects.json");
        Ok(())
    }

    /// Write a file below the public directory
    fn write_page(&self, relative: &str, contents: &str) -> Result<()> {
        // Strip leading slash from path to avoid creating absolute paths
        let output_path = self.folio.public_dir.join(relative.trim_start_matches('/'));
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {:?}", parent))?;
        }
        fs::write(&output_path, contents)
            .with_context(|| format!("Failed to write {:?}", output_path))?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }

    /// Copy static assets to the public directory
    fn copy_static_assets(&self) -> Result<()> {
        let static_dir = &self.folio.static_dir;
        if !static_dir.exists() {
            return Ok(());
        }

        let mut copied = 0;
        for entry in WalkDir::new(static_dir).follow_links(true) {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() || is_hidden(path) {
                continue;
            }

            let relative = path.strip_prefix(static_dir)?;
            let dest = self.folio.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest).with_context(|| format!("Failed to copy {:?}", path))?;
            copied += 1;
        }

        tracing::debug!("Copied {} static assets", copied);
        Ok(())
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(false)
}
