//! Initialize a new blog

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Initialize a new blog in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    // Create directory structure
    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("posts"))?;

    // Create default _config.yml
    let config_content = r#"# Site
title: My Blog
description: ''
author: John Doe
language: en

# URL
url: http://localhost:4000

# Directory
posts_dir: posts
data_dir: public/data

# Feed
feed_limit: 20
"#;
    let config_path = target_dir.join("_config.yml");
    if !config_path.exists() {
        fs::write(&config_path, config_content)?;
    }

    // Create a sample post
    let sample_post = r#"---
title: Hello World
date: "2024-01-01"
category: General
tags: [intro]
---
Welcome to your new blog. This is your first post.

## Writing

Edit files under `posts/` and run `blog-rs generate` to rebuild the data
artifacts, or `blog-rs server --watch` to serve them while you write.
"#;
    let sample_path = target_dir.join("posts/hello-world.md");
    if !sample_path.exists() {
        fs::write(&sample_path, sample_post)?;
    }

    Ok(())
}
