//! List site content

use anyhow::Result;

use crate::content::loader::ContentLoader;
use crate::content::ContentStore;
use crate::helpers::{project_path, url_for};
use crate::templates::tag_groups;
use crate::Folio;

/// List site content by type
pub fn run(folio: &Folio, content_type: &str) -> Result<()> {
    let store = ContentLoader::new(folio).load_store()?;

    match content_type {
        "project" | "projects" => {
            println!("Projects ({}):", store.len());
            for project in store.projects() {
                println!(
                    "  {} - {} [{}]",
                    project.slug,
                    project.title,
                    project.tags.join(", ")
                );
            }
        }
        "tag" | "tags" => {
            let counts = tag_counts(&store);
            println!("Tags ({}):", counts.len());
            for (tag, count) in counts {
                println!("  {} ({})", tag, count);
            }
        }
        "route" | "routes" => {
            let routes = routes(folio, &store);
            println!("Routes ({}):", routes.len());
            for route in routes {
                println!("  {}", route);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown content type: {}. Use: projects, tags, routes",
                content_type
            );
        }
    }

    Ok(())
}

/// Tags with the number of projects carrying them, most used first
pub fn tag_counts(store: &ContentStore) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = store
        .list_all_tags()
        .into_iter()
        .map(|tag| {
            let n = store.projects_with_tag(&tag).len();
            (tag, n)
        })
        .collect();
    // stable sort keeps alphabetical order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Every URL the generator writes a page for
pub fn routes(folio: &Folio, store: &ContentStore) -> Vec<String> {
    let config = &folio.config;
    let mut routes = vec![url_for(config, "/"), url_for(config, "/about/")];
    routes.extend(
        store
            .list_slugs()
            .into_iter()
            .map(|slug| url_for(config, &project_path(config, slug))),
    );
    routes.push(url_for(
        config,
        &format!("/{}/", config.tag_dir.trim_matches('/')),
    ));
    routes.extend(tag_groups(config, store).into_iter().map(|g| g.url));
    routes
}
