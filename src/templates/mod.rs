//! Built-in site templates using the Tera template engine
//!
//! All templates are embedded directly in the binary.

mod view;

use anyhow::Result;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::helpers::{html_escape, strip_html, truncate};

pub use view::{
    about_view, nav_items, not_found_meta, project_card, project_meta, project_view,
    tag_groups, AboutView, ImageView, NavItem, PageMeta, ProjectCard, ProjectView, SiteData,
    TagGroup, TagLink,
};

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Autoescape stays on for .html, but '/' must survive in URLs
        tera.set_escape_fn(html_escape);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("home.html", include_str!("site/home.html")),
            ("project.html", include_str!("site/project.html")),
            ("about.html", include_str!("site/about.html")),
            ("tags.html", include_str!("site/tags.html")),
            ("tag.html", include_str!("site/tag.html")),
            ("404.html", include_str!("site/404.html")),
            // Partials
            (
                "partials/head.html",
                include_str!("site/partials/head.html"),
            ),
            (
                "partials/header.html",
                include_str!("site/partials/header.html"),
            ),
            (
                "partials/footer.html",
                include_str!("site/partials/footer.html"),
            ),
            ("partials/card.html", include_str!("site/partials/card.html")),
        ])?;

        // Register custom filters
        tera.register_filter("strip_html", strip_html_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    Ok(tera::Value::String(strip_html(&s)))
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => " ...".to_string(),
    };

    Ok(tera::Value::String(truncate(&s, length, Some(&omission))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_compile() {
        assert!(TemplateRenderer::new().is_ok());
    }

    #[test]
    fn test_truncate_chars_filter() {
        let mut args = HashMap::new();
        args.insert("length".to_string(), tera::Value::from(5));
        let out = truncate_chars_filter(&tera::Value::from("Hello World"), &args).unwrap();
        assert_eq!(out, tera::Value::from("Hello ..."));

        let out = truncate_chars_filter(&tera::Value::from("Hi"), &args).unwrap();
        assert_eq!(out, tera::Value::from("Hi"));
    }

    #[test]
    fn test_strip_html_filter() {
        let out =
            strip_html_filter(&tera::Value::from("<p>A <em>b</em></p>"), &HashMap::new()).unwrap();
        assert_eq!(out, tera::Value::from("A b"));
    }
}
