//! Content reader - loads the generated JSON artifacts back from disk
//!
//! Every call re-reads from disk; there is no caching layer. Any read or
//! parse failure is logged and collapses to "no data" for the caller.

use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::{CategoryEntry, Post, PostMeta};

/// Reads the generated data artifacts
#[derive(Debug, Clone)]
pub struct DataReader {
    data_dir: PathBuf,
}

impl DataReader {
    /// Create a reader over a data directory
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    /// All post metadata, date-descending; empty when the artifact is
    /// missing or unparsable
    pub fn all_posts(&self) -> Vec<PostMeta> {
        self.read_json("posts.json").unwrap_or_default()
    }

    /// A single post including HTML content, or None when absent
    pub fn post_by_slug(&self, slug: &str) -> Option<Post> {
        self.read_json(&format!("post-{}.json", slug))
    }

    /// Posts whose category exactly matches the given name
    pub fn posts_by_category(&self, category: &str) -> Vec<PostMeta> {
        self.all_posts()
            .into_iter()
            .filter(|p| p.category.as_deref() == Some(category))
            .collect()
    }

    /// The category index
    pub fn categories(&self) -> Vec<CategoryEntry> {
        self.read_json("categories.json").unwrap_or_default()
    }

    /// The sorted distinct tag list
    pub fn all_tags(&self) -> Vec<String> {
        self.read_json("tags.json").unwrap_or_default()
    }

    fn read_json<T: DeserializeOwned>(&self, filename: &str) -> Option<T> {
        let path = self.data_dir.join(filename);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("Could not read {:?}: {}", path, e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Could not parse {:?}: {}", path, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::loader::ContentLoader;
    use crate::generator::Generator;
    use crate::Blog;
    use std::fs;

    fn generated_reader(tmp: &Path) -> DataReader {
        let posts_dir = tmp.join("posts");
        fs::create_dir_all(&posts_dir).unwrap();
        fs::write(
            posts_dir.join("hello.md"),
            "---\ntitle: Hello\ndate: \"2024-01-01\"\ncategory: Linux\ntags: [intro]\n---\nHello **world**\n",
        )
        .unwrap();
        fs::write(
            posts_dir.join("second.md"),
            "---\ntitle: Second\ndate: \"2024-02-01\"\ncategory: Docker\n---\nbody\n",
        )
        .unwrap();

        let blog = Blog::new(tmp).unwrap();
        let posts = ContentLoader::new(&blog).load_posts().unwrap();
        Generator::new(&blog).generate(&posts).unwrap();
        DataReader::new(&blog.data_dir)
    }

    #[test]
    fn test_all_posts_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let reader = generated_reader(tmp.path());

        let posts = reader.all_posts();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].slug, "second");
        assert_eq!(posts[1].slug, "hello");
    }

    #[test]
    fn test_post_by_slug() {
        let tmp = tempfile::tempdir().unwrap();
        let reader = generated_reader(tmp.path());

        let post = reader.post_by_slug("hello").unwrap();
        assert_eq!(post.meta.title, "Hello");
        assert!(post.content.contains("<strong>world</strong>"));
    }

    #[test]
    fn test_post_by_slug_missing_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        let reader = generated_reader(tmp.path());
        assert!(reader.post_by_slug("missing").is_none());
    }

    #[test]
    fn test_posts_by_category_exact_match() {
        let tmp = tempfile::tempdir().unwrap();
        let reader = generated_reader(tmp.path());

        let linux = reader.posts_by_category("Linux");
        assert_eq!(linux.len(), 1);
        assert_eq!(linux[0].slug, "hello");

        // Exact match only
        assert!(reader.posts_by_category("linux").is_empty());
    }

    #[test]
    fn test_categories_and_tags() {
        let tmp = tempfile::tempdir().unwrap();
        let reader = generated_reader(tmp.path());

        let categories = reader.categories();
        let names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Docker", "Linux"]);

        assert_eq!(reader.all_tags(), vec!["intro"]);
    }

    #[test]
    fn test_missing_artifacts_collapse_to_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let reader = DataReader::new(tmp.path().join("nowhere"));
        assert!(reader.all_posts().is_empty());
        assert!(reader.categories().is_empty());
        assert!(reader.all_tags().is_empty());
    }

    #[test]
    fn test_unparsable_artifact_collapses_to_empty() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("posts.json"), "{ not json").unwrap();
        let reader = DataReader::new(tmp.path());
        assert!(reader.all_posts().is_empty());
    }
}
