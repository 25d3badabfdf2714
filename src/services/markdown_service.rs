//! Blog content rendering.
//!
//! Post `content` may be Markdown or already-rendered HTML; both must
//! display. Content whose first non-whitespace character opens a tag is
//! passed through untouched, everything else goes through the Markdown
//! renderer.

use pulldown_cmark::{Options, Parser, html};

/// Service for rendering post content to HTML.
pub struct MarkdownService;

impl MarkdownService {
    pub fn new() -> Self {
        Self
    }

    /// Render post content to HTML.
    pub fn render_content(&self, content: &str) -> String {
        if looks_like_html(content) {
            return content.to_string();
        }

        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_TASKLISTS);

        let parser = Parser::new_ext(content, options);
        let mut out = String::with_capacity(content.len() * 2);
        html::push_html(&mut out, parser);
        out
    }
}

impl Default for MarkdownService {
    fn default() -> Self {
        Self::new()
    }
}

fn looks_like_html(content: &str) -> bool {
    content.trim_start().starts_with('<')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_is_rendered() {
        let service = MarkdownService::new();
        let out = service.render_content("# Title\n\nSome **bold** text.");
        assert!(out.contains("<h1>"));
        assert!(out.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_html_passes_through() {
        let service = MarkdownService::new();
        let content = "<p>Already rendered</p>";
        assert_eq!(service.render_content(content), content);
    }

    #[test]
    fn test_tables_enabled() {
        let service = MarkdownService::new();
        let out = service.render_content("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(out.contains("<table>"));
    }

    #[test]
    fn test_empty_content() {
        let service = MarkdownService::new();
        assert_eq!(service.render_content(""), "");
    }
}
