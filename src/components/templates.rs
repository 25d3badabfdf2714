use std::fs;
use std::path::Path;

use crate::errors::Result;
use crate::utils::escape_attr;

/// Template rendering context for the page shell.
#[derive(Debug, Clone)]
pub struct TemplateContext {
    pub title: String,
    pub description: String,
    /// Extra head markup: canonical link, OpenGraph tags, JSON-LD.
    pub head: String,
    pub nav: String,
    pub content: String,
    pub footer: String,
}

/// Component for assembling full HTML pages.
pub struct TemplateComponent;

impl TemplateComponent {
    pub fn new() -> Self {
        Self
    }

    /// Load and render the HTML shell template. A site operator can override
    /// the shell by dropping a `base.html` under the static directory;
    /// otherwise the built-in shell is used.
    pub fn render_shell_template(&self, context: &TemplateContext) -> Result<String> {
        let possible_paths = ["static/html/base.html", "./static/html/base.html"];

        for path_str in &possible_paths {
            if let Ok(base) = fs::read_to_string(Path::new(path_str)) {
                let html = base
                    .replace("{{TITLE}}", &escape_attr(&context.title))
                    .replace("{{DESCRIPTION}}", &escape_attr(&context.description))
                    .replace("{{HEAD}}", &context.head)
                    .replace("{{NAV}}", &context.nav)
                    .replace("{{CONTENT}}", &context.content)
                    .replace("{{FOOTER}}", &context.footer);
                return Ok(html);
            }
        }

        Ok(format!(
            concat!(
                "<!doctype html><html lang=\"en\"><head>",
                "<meta charset=\"utf-8\">",
                "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">",
                "<title>{title}</title>",
                "<meta name=\"description\" content=\"{description}\">",
                "<link rel=\"stylesheet\" href=\"/static/css/forge.css\">",
                "{head}",
                "</head><body>",
                "{nav}",
                "<main class=\"page\">{content}</main>",
                "{footer}",
                "</body></html>"
            ),
            title = escape_attr(&context.title),
            description = escape_attr(&context.description),
            head = context.head,
            nav = context.nav,
            content = context.content,
            footer = context.footer,
        ))
    }

    /// Assemble a complete page.
    pub fn render_page(
        &self,
        title: &str,
        description: &str,
        head: &str,
        nav: &str,
        content: &str,
        footer: &str,
    ) -> Result<String> {
        let context = TemplateContext {
            title: title.to_string(),
            description: description.to_string(),
            head: head.to_string(),
            nav: nav.to_string(),
            content: content.to_string(),
            footer: footer.to_string(),
        };
        self.render_shell_template(&context)
    }
}

impl Default for TemplateComponent {
    fn default() -> Self {
        Self::new()
    }
}
