//! Create a new post

use anyhow::Result;
use std::fs;

use crate::Blog;

/// Create a new post markdown file in the posts directory
pub fn run(blog: &Blog, title: &str) -> Result<()> {
    let now = chrono::Local::now();

    fs::create_dir_all(&blog.posts_dir)?;

    let slug = slugify(title);
    let file_path = blog.posts_dir.join(format!("{}.md", slug));

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let content = format!(
        r#"---
title: {}
date: "{}"
description: ""
category: ""
tags: []
---
"#,
        title,
        now.format("%Y-%m-%d")
    );

    fs::write(&file_path, content)?;

    println!("Created: {:?}", file_path);

    Ok(())
}

/// URL-friendly slug from a title: lowercase, non-alphanumerics collapsed to
/// single hyphens
fn slugify(title: &str) -> String {
    let mut slug = String::new();
    let mut prev_hyphen = false;

    for c in title.chars() {
        if c.is_alphanumeric() {
            for lower in c.to_lowercase() {
                slug.push(lower);
            }
            prev_hyphen = false;
        } else if !prev_hyphen && !slug.is_empty() {
            slug.push('-');
            prev_hyphen = true;
        }
    }

    let slug = slug.trim_end_matches('-').to_string();
    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  Lots -- of?? junk  "), "lots-of-junk");
        assert_eq!(slugify("???"), "untitled");
    }

    #[test]
    fn test_new_post_created_with_frontmatter() {
        let tmp = tempfile::tempdir().unwrap();
        let blog = Blog::new(tmp.path()).unwrap();

        run(&blog, "My First Post").unwrap();

        let path = blog.posts_dir.join("my-first-post.md");
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("---\n"));
        assert!(content.contains("title: My First Post"));
    }

    #[test]
    fn test_new_post_refuses_overwrite() {
        let tmp = tempfile::tempdir().unwrap();
        let blog = Blog::new(tmp.path()).unwrap();

        run(&blog, "Dup").unwrap();
        assert!(run(&blog, "Dup").is_err());
    }
}
