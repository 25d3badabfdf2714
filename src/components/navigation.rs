use crate::utils::escape_attr;

/// Top navigation and footer chrome shared by every page.
pub struct NavigationComponent;

const NAV_LINKS: &[(&str, &str)] = &[
    ("/", "Home"),
    ("/strategies", "Strategies"),
    ("/strategy-builder", "Strategy Builder"),
    ("/blog", "Blog"),
    ("/about", "About"),
    ("/contact", "Contact"),
];

impl NavigationComponent {
    pub fn new() -> Self {
        Self
    }

    /// Header bar with the active link highlighted.
    pub fn render_header(&self, active: &str) -> String {
        let mut html = String::new();
        html.push_str("<header class=\"site-header\"><nav class=\"nav\">");
        html.push_str("<a class=\"brand\" href=\"/\">Forge</a><ul class=\"nav-links\">");
        for (href, label) in NAV_LINKS {
            let class = if *href == active { " class=\"active\"" } else { "" };
            html.push_str(&format!(
                "<li><a{} href=\"{}\">{}</a></li>",
                class,
                escape_attr(href),
                label
            ));
        }
        html.push_str("</ul></nav></header>");
        html
    }

    pub fn render_footer(&self) -> String {
        let mut html = String::new();
        html.push_str("<footer class=\"site-footer\"><div class=\"footer-inner\">");
        html.push_str("<div class=\"footer-brand\"><span class=\"brand\">Forge</span>");
        html.push_str(
            "<p>AI-powered DeFi strategy automation. Risk-managed, profit-maximized \
             strategies for builders and traders.</p></div>",
        );
        html.push_str("<ul class=\"footer-links\">");
        html.push_str("<li><a href=\"/strategies\">Strategies</a></li>");
        html.push_str("<li><a href=\"/blog\">Blog</a></li>");
        html.push_str("<li><a href=\"/about\">About</a></li>");
        html.push_str("<li><a href=\"/sitemap.xml\">Sitemap</a></li>");
        html.push_str("</ul>");
        html.push_str("<p class=\"footer-note\">Not financial advice. Do your own research.</p>");
        html.push_str("</div></footer>");
        html
    }
}

impl Default for NavigationComponent {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_link_is_marked() {
        let nav = NavigationComponent::new();
        let html = nav.render_header("/blog");
        assert!(html.contains("<a class=\"active\" href=\"/blog\">Blog</a>"));
        assert!(!html.contains("class=\"active\" href=\"/strategies\""));
    }

    #[test]
    fn test_footer_links() {
        let nav = NavigationComponent::new();
        let html = nav.render_footer();
        assert!(html.contains("/sitemap.xml"));
    }
}
