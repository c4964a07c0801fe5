//! Generate static files

use anyhow::Result;
use notify::Watcher;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::Duration;

use crate::content::loader::ContentLoader;
use crate::generator::Generator;
use crate::Folio;

/// Generate the static site
pub fn run(folio: &Folio) -> Result<()> {
    let start = std::time::Instant::now();

    // Load content
    let loader = ContentLoader::new(folio);
    let store = loader.load_store()?;
    let about = loader.load_about()?;

    tracing::info!(
        "Loaded {} projects and {} tags",
        store.len(),
        store.list_all_tags().len()
    );

    let generator = Generator::new(folio)?;
    generator.generate(&store, &about)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}

/// Paths whose changes trigger a rebuild
pub fn watch_paths(folio: &Folio) -> Vec<PathBuf> {
    [
        folio.content_dir.clone(),
        folio.static_dir.clone(),
        folio.base_dir.join("_config.yml"),
        folio.base_dir.join(".env"),
    ]
    .into_iter()
    .filter(|p| p.exists())
    .collect()
}

/// Watch for file changes and regenerate
pub async fn watch(folio: &Folio) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    for path in watch_paths(folio) {
        let mode = if path.is_dir() {
            notify::RecursiveMode::Recursive
        } else {
            notify::RecursiveMode::NonRecursive
        };
        watcher.watch(&path, mode)?;
        tracing::debug!("Watching: {:?}", path);
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    // Debounce events
    let mut last_rebuild = std::time::Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                // Only rebuild if more than 500ms since last rebuild
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("File changed, regenerating...");
                    if let Err(e) = rebuild(&folio.base_dir) {
                        tracing::error!("Generation failed: {:#}", e);
                    }
                    last_rebuild = std::time::Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                break;
            }
        }
    }

    Ok(())
}

/// Reopen the site so config and environment edits apply, then generate
pub fn rebuild(base_dir: &Path) -> Result<()> {
    if let Err(e) = dotenvy::from_path_override(base_dir.join(".env")) {
        tracing::debug!("No .env reloaded: {}", e);
    }
    let folio = Folio::new(base_dir)?;
    run(&folio)
}
