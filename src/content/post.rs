//! Post data model
//!
//! Field names mirror the JSON artifacts: `readingTime` is camelCase on the
//! wire, and optional fields are omitted entirely when absent so that the
//! artifacts stay byte-stable across regenerations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Post metadata as it appears in `posts.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostMeta {
    /// Unique identifier, derived from the source filename
    pub slug: String,

    /// Post title
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Publication date as written in front matter (ISO date string)
    pub date: String,

    /// Single category, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Ordered tag list; uniqueness is not enforced per post
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Precomputed display string, e.g. "3 min read"
    #[serde(rename = "readingTime")]
    pub reading_time: String,

    /// Custom front-matter fields, passed through verbatim
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// A full post as it appears in `post-<slug>.json`: metadata plus HTML body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(flatten)]
    pub meta: PostMeta,

    /// Rendered HTML content
    pub content: String,
}

/// One entry of `categories.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub name: String,

    /// Always equal to `posts.len()`; recomputed wholesale on each run
    pub count: usize,

    /// Snapshot of member metadata at generation time
    pub posts: Vec<PostMeta>,
}
