//! Create a new project

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use super::init::default_project_scaffold;
use crate::Folio;

/// Create a new project file from the site's scaffold
pub fn create_project(folio: &Folio, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let title = title.trim();
    if title.is_empty() {
        anyhow::bail!("Project title must not be empty");
    }

    let slug = match slug {
        Some(s) => {
            let s = s.trim();
            let normalized = slug::slugify(s);
            if s != normalized {
                anyhow::bail!("Invalid slug {:?}, try {:?}", s, normalized);
            }
            normalized
        }
        None => slug::slugify(title),
    };
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a slug from title {:?}", title);
    }

    let target_dir = folio.projects_dir();
    fs::create_dir_all(&target_dir)?;
    let file_path = target_dir.join(format!("{}.md", slug));

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    // Load scaffold template
    let scaffold_path = folio.base_dir.join("scaffolds").join("project.md");
    let scaffold = if scaffold_path.exists() {
        fs::read_to_string(&scaffold_path)?
    } else {
        default_project_scaffold().to_string()
    };

    let content = scaffold
        .replace("{{ title }}", &yaml_quote(title))
        .replace("{{ slug }}", &slug);

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

/// Double-quoted YAML scalar
fn yaml_quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}
