//! Generator module - emits the JSON data artifacts
//!
//! Four artifacts are produced per run, wholesale:
//! - `posts.json`: array of post metadata, date-descending
//! - `post-<slug>.json`: one per post, metadata plus rendered HTML content
//! - `categories.json`: `{name, count, posts}` entries, sorted by name
//! - `tags.json`: distinct tags, sorted ascending
//!
//! Every artifact is written to a temporary file and renamed into place, so a
//! concurrent reader never observes a torn file. Ordering is fully
//! deterministic: regenerating from unchanged sources is byte-identical.

use anyhow::{Context, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::content::{CategoryEntry, Post, PostMeta};
use crate::Blog;

/// Emits JSON data artifacts into the data directory
pub struct Generator {
    blog: Blog,
}

/// Counts reported after a generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateStats {
    pub posts: usize,
    pub categories: usize,
    pub tags: usize,
}

impl Generator {
    /// Create a new generator
    pub fn new(blog: &Blog) -> Self {
        Self { blog: blog.clone() }
    }

    /// Write all four artifacts from the loaded posts
    pub fn generate(&self, posts: &[Post]) -> Result<GenerateStats> {
        let data_dir = &self.blog.data_dir;
        fs::create_dir_all(data_dir)
            .with_context(|| format!("failed to create data directory {:?}", data_dir))?;

        let metas: Vec<&PostMeta> = posts.iter().map(|p| &p.meta).collect();
        let categories = build_categories(&metas);
        let tags = build_tags(&metas);

        write_json_atomic(&data_dir.join("posts.json"), &metas)?;

        for post in posts {
            let path = data_dir.join(format!("post-{}.json", post.meta.slug));
            write_json_atomic(&path, post)?;
        }

        write_json_atomic(&data_dir.join("categories.json"), &categories)?;
        write_json_atomic(&data_dir.join("tags.json"), &tags)?;

        self.remove_stale_post_files(posts)?;

        Ok(GenerateStats {
            posts: posts.len(),
            categories: categories.len(),
            tags: tags.len(),
        })
    }

    /// Delete `post-<slug>.json` files whose source post no longer exists
    fn remove_stale_post_files(&self, posts: &[Post]) -> Result<()> {
        let live: BTreeSet<String> = posts
            .iter()
            .map(|p| format!("post-{}.json", p.meta.slug))
            .collect();

        for entry in fs::read_dir(&self.blog.data_dir)?.filter_map(|e| e.ok()) {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if name.starts_with("post-") && name.ends_with(".json") && !live.contains(name) {
                tracing::debug!("Removing stale artifact {}", name);
                fs::remove_file(entry.path())?;
            }
        }

        Ok(())
    }
}

/// Build the category index: only posts with a category participate, entries
/// are sorted by name, and each entry snapshots its members' metadata
fn build_categories(metas: &[&PostMeta]) -> Vec<CategoryEntry> {
    let mut by_name: BTreeMap<String, Vec<PostMeta>> = BTreeMap::new();

    for meta in metas {
        if let Some(category) = &meta.category {
            by_name
                .entry(category.clone())
                .or_default()
                .push((*meta).clone());
        }
    }

    by_name
        .into_iter()
        .map(|(name, posts)| CategoryEntry {
            name,
            count: posts.len(),
            posts,
        })
        .collect()
}

/// Build the flat tag list: distinct, case-sensitive, ascending
fn build_tags(metas: &[&PostMeta]) -> Vec<String> {
    let tags: BTreeSet<String> = metas
        .iter()
        .flat_map(|m| m.tags.iter().cloned())
        .collect();
    tags.into_iter().collect()
}

/// Serialize to pretty JSON, write to a temp file in the same directory, then
/// rename into place
fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, &json)
        .with_context(|| format!("failed to write {:?}", tmp_path))?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("failed to move {:?} into place", tmp_path))?;

    Ok(())
}
