//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,

    // Directory
    pub posts_dir: String,
    pub data_dir: String,

    // Feed
    pub feed_limit: usize,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),

            url: "http://localhost:4000".to_string(),

            posts_dir: "posts".to_string(),
            data_dir: "public/data".to_string(),

            feed_limit: 20,

            extra: BTreeMap::new(),
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

    /// Admin password from the environment.
    ///
    /// There is deliberately no built-in default: an unset `ADMIN_PASSWORD`
    /// means the admin API is disabled.
    pub fn admin_password() -> Option<String> {
        std::env::var("ADMIN_PASSWORD")
            .ok()
            .filter(|p| !p.is_empty())
    }
}
