//! RSS 2.0 feed

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::ServerState;
use crate::content::{parse_date_string, PostMeta};
use crate::helpers::xml::{cdata, escape_xml};
use crate::reader::DataReader;

/// GET /rss - feed of the most recent posts
pub async fn feed(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let reader = DataReader::new(&state.blog.data_dir);
    let posts = reader.all_posts();

    let xml = build_feed(&state.blog.config, &posts, Utc::now());

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        xml,
    )
}

/// Build the feed XML for the `feed_limit` most recent posts
pub fn build_feed(
    config: &crate::config::SiteConfig,
    posts: &[PostMeta],
    now: DateTime<Utc>,
) -> String {
    let site_url = config.url.trim_end_matches('/');

    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str("<rss version=\"2.0\">\n");
    xml.push_str("  <channel>\n");
    xml.push_str(&format!("    <title>{}</title>\n", escape_xml(&config.title)));
    xml.push_str(&format!(
        "    <description>{}</description>\n",
        escape_xml(&config.description)
    ));
    xml.push_str(&format!("    <link>{}</link>\n", escape_xml(site_url)));
    xml.push_str(&format!(
        "    <language>{}</language>\n",
        escape_xml(&config.language)
    ));
    xml.push_str(&format!(
        "    <lastBuildDate>{}</lastBuildDate>\n",
        now.to_rfc2822()
    ));
    xml.push_str("    <generator>blog-rs</generator>\n");

    for post in posts.iter().take(config.feed_limit) {
        let link = format!("{}/posts/{}", site_url, post.slug);
        let pub_date = parse_date_string(&post.date)
            .map(|d| d.to_rfc2822())
            .unwrap_or_default();

        xml.push_str("    <item>\n");
        xml.push_str(&format!("      <title>{}</title>\n", cdata(&post.title)));
        xml.push_str(&format!(
            "      <description>{}</description>\n",
            cdata(post.description.as_deref().unwrap_or(""))
        ));
        xml.push_str(&format!("      <link>{}</link>\n", escape_xml(&link)));
        xml.push_str(&format!(
            "      <guid isPermaLink=\"true\">{}</guid>\n",
            escape_xml(&link)
        ));
        xml.push_str(&format!("      <pubDate>{}</pubDate>\n", pub_date));
        if let Some(category) = &post.category {
            xml.push_str(&format!("      <category>{}</category>\n", cdata(category)));
        }
        for tag in &post.tags {
            xml.push_str(&format!("      <category>{}</category>\n", cdata(tag)));
        }
        xml.push_str("    </item>\n");
    }

    xml.push_str("  </channel>\n");
    xml.push_str("</rss>\n");

    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use std::collections::BTreeMap;

    fn post(slug: &str, title: &str, date: &str) -> PostMeta {
        PostMeta {
            slug: slug.to_string(),
            title: title.to_string(),
            description: None,
            date: date.to_string(),
            category: Some("Linux".to_string()),
            tags: vec!["intro".to_string()],
            reading_time: "1 min read".to_string(),
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn test_feed_contains_channel_and_items() {
        let config = SiteConfig {
            title: "Tech Notes".to_string(),
            url: "https://blog.example.com/".to_string(),
            ..Default::default()
        };
        let posts = vec![post("hello", "Hello", "2024-01-01")];

        let xml = build_feed(&config, &posts, Utc::now());
        assert!(xml.contains("<title>Tech Notes</title>"));
        assert!(xml.contains("<title><![CDATA[Hello]]></title>"));
        assert!(xml.contains("<link>https://blog.example.com/posts/hello</link>"));
        assert!(xml.contains("<category><![CDATA[Linux]]></category>"));
        assert!(xml.contains("<category><![CDATA[intro]]></category>"));
    }

    #[test]
    fn test_feed_caps_at_limit() {
        let config = SiteConfig::default();
        let posts: Vec<PostMeta> = (0..30)
            .map(|i| post(&format!("p{}", i), &format!("Post {}", i), "2024-01-01"))
            .collect();

        let xml = build_feed(&config, &posts, Utc::now());
        assert_eq!(xml.matches("<item>").count(), 20);
    }

    #[test]
    fn test_feed_escapes_title_cdata() {
        let config = SiteConfig::default();
        let posts = vec![post("x", "Bad ]]> title", "2024-01-01")];

        let xml = build_feed(&config, &posts, Utc::now());
        // The CDATA close sequence inside the title must be split
        assert!(!xml.contains("<![CDATA[Bad ]]> title]]>"));
        assert!(xml.contains("Bad "));
    }
}
