//! Markdown rendering

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};

/// Words-per-minute rate used for the readingTime display string
const READING_WPM: usize = 200;

/// Markdown renderer
///
/// Fenced code blocks render as `<pre><code class="language-{lang}">` with an
/// escaped body; syntax highlighting is left to the client.
pub struct MarkdownRenderer {
    options: Options,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS;
        Self { options }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);

        let mut events: Vec<Event> = Vec::new();
        let mut in_code_block = false;
        let mut code_block_lang: Option<String> = None;
        let mut code_block_content = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    code_block_lang = match kind {
                        CodeBlockKind::Fenced(lang) => {
                            let lang = lang.to_string();
                            if lang.is_empty() {
                                None
                            } else {
                                Some(lang)
                            }
                        }
                        CodeBlockKind::Indented => None,
                    };
                    code_block_content.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    let rendered =
                        render_code_block(&code_block_content, code_block_lang.as_deref());
                    events.push(Event::Html(CowStr::from(rendered)));
                    in_code_block = false;
                    code_block_lang = None;
                }
                Event::Text(text) if in_code_block => {
                    code_block_content.push_str(&text);
                }
                _ => {
                    events.push(event);
                }
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        html_output
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a code block with an optional language class
fn render_code_block(code: &str, lang: Option<&str>) -> String {
    let escaped = html_escape(code);
    match lang {
        Some(lang) => format!(
            r#"<pre><code class="language-{}">{}</code></pre>"#,
            lang, escaped
        ),
        None => format!("<pre><code>{}</code></pre>", escaped),
    }
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Whitespace-delimited token count of the raw markdown body
pub fn word_count(body: &str) -> usize {
    body.split_whitespace().count()
}

/// Reading time display string: ceil(words / 200) minutes
pub fn reading_time(body: &str) -> String {
    let words = word_count(body);
    let minutes = words.div_ceil(READING_WPM).max(1);
    format!("{} min read", minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.");
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_emphasis() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("Hello **world** and *moon*");
        assert!(html.contains("<strong>world</strong>"));
        assert!(html.contains("<em>moon</em>"));
    }

    #[test]
    fn test_render_code_block_with_language() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```");
        assert!(html.contains(r#"<pre><code class="language-rust">"#));
        assert!(html.contains("fn main() {}"));
    }

    #[test]
    fn test_render_code_block_without_language() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```\nplain text\n```");
        assert!(html.contains("<pre><code>plain text"));
    }

    #[test]
    fn test_code_block_is_escaped() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```html\n<div>&</div>\n```");
        assert!(html.contains("&lt;div&gt;&amp;&lt;/div&gt;"));
    }

    #[test]
    fn test_render_list() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("- one\n- two\n");
        assert!(html.contains("<ul>"));
        assert!(html.contains("<li>one</li>"));
    }

    #[test]
    fn test_word_count_excludes_nothing_but_whitespace() {
        assert_eq!(word_count("Hello **world**"), 2);
        assert_eq!(word_count("  \n\n  "), 0);
    }

    #[test]
    fn test_reading_time_rounds_up() {
        assert_eq!(reading_time("word"), "1 min read");

        let two_hundred_one = vec!["word"; 201].join(" ");
        assert_eq!(reading_time(&two_hundred_one), "2 min read");

        let exactly_four_hundred = vec!["word"; 400].join(" ");
        assert_eq!(reading_time(&exactly_four_hundred), "2 min read");
    }

    #[test]
    fn test_reading_time_empty_body_is_one_minute() {
        assert_eq!(reading_time(""), "1 min read");
    }
}
