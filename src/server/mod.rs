//! Blog server - serves the data artifacts plus the admin API
//!
//! Routes:
//! - `GET /data/*` - generated JSON artifacts
//! - `POST /api/auth` - password login, returns a signed session token
//! - `GET /api/auth/verify` - checks a session token against its window
//! - `POST /api/deploy` - mock deploy simulators (github, vercel)
//! - `GET /rss` - RSS 2.0 feed of the most recent posts

pub mod api;
pub mod rss;
pub mod session;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::services::ServeDir;

use crate::config::SiteConfig;
use crate::Blog;

/// Shared server state
pub struct ServerState {
    pub blog: Blog,
    /// Admin password from the environment; None disables the admin API
    pub admin_password: Option<String>,
    /// Per-process token signing secret
    pub secret: [u8; 32],
}

/// Start the blog server
pub async fn start(blog: &Blog, ip: &str, port: u16, watch: bool) -> Result<()> {
    let admin_password = SiteConfig::admin_password();
    if admin_password.is_none() {
        tracing::warn!("ADMIN_PASSWORD is not set; the admin API is disabled");
    }

    let state = Arc::new(ServerState {
        blog: blog.clone(),
        admin_password,
        secret: session::generate_secret(),
    });

    let app = Router::new()
        .route("/api/auth", post(api::auth))
        .route("/api/auth/verify", get(api::verify))
        .route("/api/deploy", post(api::deploy))
        .route("/rss", get(rss::feed))
        .nest_service("/data", ServeDir::new(&blog.data_dir))
        .with_state(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    if watch {
        println!("Watching for post changes...");
    }
    println!("Press Ctrl+C to stop.");

    if watch {
        let blog_clone = blog.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch_and_regenerate(blog_clone) {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Watch the posts directory and regenerate artifacts on change
fn watch_and_regenerate(blog: Blog) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    // Debounce to avoid multiple rapid rebuilds
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    if blog.posts_dir.exists() {
        debouncer
            .watcher()
            .watch(&blog.posts_dir, RecursiveMode::Recursive)?;
        tracing::debug!("Watching: {:?}", blog.posts_dir);
    }

    let config_path = blog.base_dir.join("_config.yml");
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant = events.iter().any(|e| {
                    let path_str = e.path.to_string_lossy();
                    !path_str.contains(".git") && !path_str.ends_with('~')
                });
                if !relevant {
                    continue;
                }

                tracing::info!("Posts changed, regenerating...");
                match blog.generate() {
                    Ok(_) => tracing::info!("Regenerated successfully"),
                    Err(e) => tracing::error!("Generation failed: {}", e),
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}
