//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::social::{env_value, SocialLinks};

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    /// Display name used in titles and the footer
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,
    /// Target of the "Contact Me" buttons
    pub contact_url: String,

    // Directory
    pub content_dir: String,
    pub static_dir: String,
    pub public_dir: String,
    pub project_dir: String,
    pub tag_dir: String,

    // Writing
    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub markdown: MarkdownConfig,

    /// Outbound profile links, resolved from the environment
    #[serde(skip)]
    pub social: SocialLinks,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Portfolio".to_string(),
            description: String::new(),
            author: String::new(),
            language: "en".to_string(),

            url: "http://localhost:4000".to_string(),
            root: "/".to_string(),
            contact_url: "/contact".to_string(),

            content_dir: "content".to_string(),
            static_dir: "static".to_string(),
            public_dir: "public".to_string(),
            project_dir: "projects".to_string(),
            tag_dir: "tags".to_string(),

            highlight: HighlightConfig::default(),
            markdown: MarkdownConfig::default(),

            social: SocialLinks::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Apply environment overrides from the process environment
    pub fn apply_env(&mut self) {
        self.apply_lookup(|key| std::env::var(key).ok());
    }

    /// Apply environment overrides from an arbitrary lookup
    pub fn apply_lookup<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = env_value(&lookup, "SITE_NAME") {
            tracing::debug!("Site name overridden by SITE_NAME: {}", name);
            self.title = name;
        }
        self.social = SocialLinks::from_lookup(&lookup);
    }

    /// The display name shown in the footer and page titles
    pub fn site_name(&self) -> &str {
        &self.title
    }
}

/// Syntax highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

/// Markdown rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Escape raw HTML found in markdown sources
    pub sanitize: bool,
    pub smart_punctuation: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            sanitize: true,
            smart_punctuation: true,
        }
    }
}
