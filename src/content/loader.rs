//! Content loader - loads posts from the markdown source directory

use anyhow::Result;
use chrono::{DateTime, Local};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{markdown, FrontMatter, MarkdownRenderer, Post, PostMeta};
use crate::Blog;

/// Loads content from the posts directory
pub struct ContentLoader<'a> {
    blog: &'a Blog,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(blog: &'a Blog) -> Self {
        Self {
            blog,
            renderer: MarkdownRenderer::new(),
        }
    }

    /// Load all posts, sorted by date descending (newest first)
    ///
    /// Returns an empty list when the posts directory does not exist.
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        let posts_dir = &self.blog.posts_dir;
        if !posts_dir.exists() {
            return Ok(Vec::new());
        }

        let mut posts: Vec<(Option<DateTime<Local>>, Post)> = Vec::new();

        for entry in WalkDir::new(posts_dir)
            .sort_by_file_name()
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                match self.load_post(path) {
                    Ok((date, post)) => posts.push((date, post)),
                    Err(e) => {
                        tracing::warn!("Failed to load post {:?}: {}", path, e);
                    }
                }
            }
        }

        // Sort by date descending; undated posts sort last. The sort is
        // stable, so ties keep traversal order.
        posts.sort_by(|a, b| b.0.cmp(&a.0));

        Ok(posts.into_iter().map(|(_, p)| p).collect())
    }

    /// Load a single post from a file
    fn load_post(&self, path: &Path) -> Result<(Option<DateTime<Local>>, Post)> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content);

        // Slug comes from the filename, not the title
        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled")
            .to_string();

        // Title falls back to the filename
        let title = fm.title.unwrap_or_else(|| slug.clone());

        let date_parsed = fm.date.as_deref().and_then(super::parse_date_string);

        let meta = PostMeta {
            slug,
            title,
            description: fm.description,
            // The date string passes through verbatim
            date: fm.date.unwrap_or_default(),
            category: fm.category.filter(|c| !c.is_empty()),
            tags: fm.tags,
            reading_time: markdown::reading_time(body),
            extra: fm.extra,
        };

        let post = Post {
            meta,
            content: self.renderer.render(body),
        };

        Ok((date_parsed, post))
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Blog;
    use std::fs;

    fn blog_in(dir: &Path) -> Blog {
        Blog::new(dir).unwrap()
    }

    #[test]
    fn test_load_posts_missing_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let blog = blog_in(tmp.path());
        let loader = ContentLoader::new(&blog);
        assert!(loader.load_posts().unwrap().is_empty());
    }

    #[test]
    fn test_load_hello_post() {
        let tmp = tempfile::tempdir().unwrap();
        let posts_dir = tmp.path().join("posts");
        fs::create_dir_all(&posts_dir).unwrap();
        fs::write(
            posts_dir.join("hello.md"),
            "---\ntitle: Hello\ndate: \"2024-01-01\"\ncategory: Linux\ntags: [intro]\n---\nHello **world**\n",
        )
        .unwrap();

        let blog = blog_in(tmp.path());
        let loader = ContentLoader::new(&blog);
        let posts = loader.load_posts().unwrap();
        assert_eq!(posts.len(), 1);

        let post = &posts[0];
        assert_eq!(post.meta.slug, "hello");
        assert_eq!(post.meta.title, "Hello");
        assert_eq!(post.meta.date, "2024-01-01");
        assert_eq!(post.meta.category.as_deref(), Some("Linux"));
        assert_eq!(post.meta.tags, vec!["intro"]);
        assert_eq!(post.meta.reading_time, "1 min read");
        assert!(post.content.contains("<strong>world</strong>"));
    }

    #[test]
    fn test_posts_sorted_date_descending() {
        let tmp = tempfile::tempdir().unwrap();
        let posts_dir = tmp.path().join("posts");
        fs::create_dir_all(&posts_dir).unwrap();
        fs::write(
            posts_dir.join("older.md"),
            "---\ntitle: Older\ndate: \"2023-05-01\"\n---\nbody\n",
        )
        .unwrap();
        fs::write(
            posts_dir.join("newer.md"),
            "---\ntitle: Newer\ndate: \"2024-05-01\"\n---\nbody\n",
        )
        .unwrap();

        let blog = blog_in(tmp.path());
        let loader = ContentLoader::new(&blog);
        let posts = loader.load_posts().unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.meta.slug.as_str()).collect();
        assert_eq!(slugs, vec!["newer", "older"]);
    }

    #[test]
    fn test_title_falls_back_to_filename() {
        let tmp = tempfile::tempdir().unwrap();
        let posts_dir = tmp.path().join("posts");
        fs::create_dir_all(&posts_dir).unwrap();
        fs::write(posts_dir.join("untitled-note.md"), "Just a body.\n").unwrap();

        let blog = blog_in(tmp.path());
        let loader = ContentLoader::new(&blog);
        let posts = loader.load_posts().unwrap();
        assert_eq!(posts[0].meta.title, "untitled-note");
        assert_eq!(posts[0].meta.slug, "untitled-note");
    }
}
