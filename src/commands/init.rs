//! Initialize a new portfolio site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::content::{SAMPLE_ABOUT, SAMPLE_PROJECTS};

const CONFIG_TEMPLATE: &str = r#"# Site
title: My Portfolio
description: ''
author: ''
language: en

# URL
url: http://localhost:4000
root: /
contact_url: /contact

# Directory
content_dir: content
static_dir: static
public_dir: public
project_dir: projects
tag_dir: tags

# Writing
highlight:
  enable: true
  theme: base16-ocean.dark
  line_number: false
markdown:
  sanitize: true
  smart_punctuation: true
"#;

const ENV_TEMPLATE: &str = r#"# Overrides the `title` in _config.yml
SITE_NAME=

# Footer and About page links
SOCIAL_GITHUB_URL=
SOCIAL_LINKEDIN_URL=
SOCIAL_YOUTUBE_URL=
SOCIAL_TWITTER_URL=
SOCIAL_INSTAGRAM_URL=
"#;

const PROJECT_SCAFFOLD: &str = r#"---
slug: {{ slug }}
title: {{ title }}
summary:
problem:
solution:
image: /placeholder.svg
tags:
features: []
# video_id:
# links:
#   repository:
#   contact: /contact
---
"#;

const PLACEHOLDER_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="1200" height="600" viewBox="0 0 1200 600"><rect width="1200" height="600" fill="#e5e7eb"/></svg>
"##;

const SITE_CSS: &str = r#"body { margin: 0; font-family: system-ui, sans-serif; color: #111; }
.container { max-width: 72rem; margin: 0 auto; padding: 0 1rem; }
.nav { display: flex; justify-content: space-between; align-items: center; padding: 1rem 0; }
.nav-links { display: flex; gap: 1rem; list-style: none; }
.project-grid, .feature-grid { display: grid; gap: 1.5rem; grid-template-columns: repeat(auto-fill, minmax(18rem, 1fr)); }
.card { border: 1px solid #e5e7eb; border-radius: 0.5rem; padding: 1.5rem; }
.badge { display: inline-block; border: 1px solid #d1d5db; border-radius: 999px; padding: 0.1rem 0.6rem; margin: 0 0.25rem 0.25rem 0; background: #f3f4f6; }
.button { display: inline-block; padding: 0.5rem 1rem; border-radius: 0.375rem; background: #111; color: #fff; text-decoration: none; }
.button.outline { background: transparent; color: #111; border: 1px solid #111; }
.actions { display: flex; flex-wrap: wrap; gap: 0.75rem; margin: 1rem 0; }
.project-image img, .project-card img { width: 100%; border-radius: 0.5rem; object-fit: cover; }
.video iframe { width: 100%; aspect-ratio: 16 / 9; border: 0; }
.site-footer { border-top: 1px solid #e5e7eb; margin-top: 3rem; }
.footer-inner { display: flex; justify-content: space-between; align-items: center; padding: 1.5rem 1rem; }
.social-links { display: flex; gap: 1rem; }
.sr-only { position: absolute; width: 1px; height: 1px; overflow: hidden; clip: rect(0, 0, 0, 0); }
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("Site already initialized: {:?} exists", config_path);
    }

    // Create directory structure
    fs::create_dir_all(target_dir.join("content/projects"))?;
    fs::create_dir_all(target_dir.join("static/css"))?;
    fs::create_dir_all(target_dir.join("scaffolds"))?;

    write_new(&config_path, CONFIG_TEMPLATE)?;
    write_new(&target_dir.join(".env.example"), ENV_TEMPLATE)?;
    write_new(&target_dir.join("scaffolds/project.md"), PROJECT_SCAFFOLD)?;
    write_new(&target_dir.join("static/placeholder.svg"), PLACEHOLDER_SVG)?;
    write_new(&target_dir.join("static/css/site.css"), SITE_CSS)?;

    // Sample content
    write_new(&target_dir.join("content/about.md"), SAMPLE_ABOUT)?;
    for (stem, doc) in SAMPLE_PROJECTS {
        write_new(
            &target_dir.join("content/projects").join(format!("{}.md", stem)),
            doc,
        )?;
    }

    Ok(())
}

/// The scaffold used when the site has no scaffolds/project.md
pub fn default_project_scaffold() -> &'static str {
    PROJECT_SCAFFOLD
}

/// Write a file, refusing to replace an existing one
fn write_new(path: &Path, contents: &str) -> Result<()> {
    if path.exists() {
        anyhow::bail!("File already exists: {:?}", path);
    }
    fs::write(path, contents)?;
    tracing::debug!("Created {:?}", path);
    Ok(())
}
