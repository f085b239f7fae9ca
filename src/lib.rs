//! blog-rs: a markdown personal blog engine
//!
//! This crate compiles a directory of markdown posts with YAML front matter
//! into a set of JSON data artifacts (post list, per-post detail, category
//! index, tag list) and serves them together with a small admin API.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod reader;
pub mod server;

use anyhow::Result;
use std::path::Path;

/// The main blog application
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Markdown source directory
    pub posts_dir: std::path::PathBuf,
    /// Generated JSON data directory
    pub data_dir: std::path::PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let posts_dir = base_dir.join(&config.posts_dir);
        let data_dir = base_dir.join(&config.data_dir);

        Ok(Self {
            config,
            base_dir,
            posts_dir,
            data_dir,
        })
    }

    /// Compile markdown sources into the JSON data artifacts
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Delete the generated data directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post
    pub fn new_post(&self, title: &str) -> Result<()> {
        commands::new::run(self, title)
    }
}
