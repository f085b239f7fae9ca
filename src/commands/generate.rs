//! Generate the JSON data artifacts

use anyhow::Result;
use notify::Watcher;
use std::time::Duration;

use crate::content::loader::ContentLoader;
use crate::generator::Generator;
use crate::Blog;

/// Compile all markdown posts into the data artifacts
pub fn run(blog: &Blog) -> Result<()> {
    let start = std::time::Instant::now();

    // A missing source directory is an accepted idle state, not an error
    if !blog.posts_dir.exists() {
        tracing::info!("Posts directory {:?} not found, nothing to do", blog.posts_dir);
        return Ok(());
    }

    let loader = ContentLoader::new(blog);
    let posts = loader.load_posts()?;

    let generator = Generator::new(blog);
    let stats = generator.generate(&posts)?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} posts, {} categories, {} tags in {:.2}s",
        stats.posts,
        stats.categories,
        stats.tags,
        duration.as_secs_f64()
    );

    Ok(())
}

/// Watch for file changes and regenerate
pub async fn watch(blog: &Blog) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    if blog.posts_dir.exists() {
        watcher.watch(&blog.posts_dir, notify::RecursiveMode::Recursive)?;
    }

    let config_path = blog.base_dir.join("_config.yml");
    if config_path.exists() {
        watcher.watch(&config_path, notify::RecursiveMode::NonRecursive)?;
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
                    if let Err(e) = run(blog) {
                        tracing::error!("Generation failed: {}", e);
                    }
                    last_rebuild = std::time::Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {
                // Continue waiting
            }
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                break;
            }
        }
    }

    Ok(())
}
