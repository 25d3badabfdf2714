//! SEO head markup: canonical link, OpenGraph/Twitter tags, and the JSON-LD
//! structured-data script tag shared by the detail pages.

use serde_json::Value;

use crate::utils::escape_attr;

const SITE_NAME: &str = "Forge DeFi Platform";

/// Build the extra `<head>` markup for a page.
pub fn render_head(
    title: &str,
    description: &str,
    canonical: &str,
    og_type: &str,
    structured_data: Option<&Value>,
) -> String {
    let full_title = if title.is_empty() {
        "Forge - AI-Powered DeFi Strategy Automation Platform".to_string()
    } else {
        format!("{title} | {SITE_NAME}")
    };

    let mut html = String::new();
    html.push_str(&format!(
        "<link rel=\"canonical\" href=\"{}\">",
        escape_attr(canonical)
    ));
    html.push_str("<meta name=\"robots\" content=\"index, follow\">");
    html.push_str(&format!(
        "<meta property=\"og:type\" content=\"{}\">",
        escape_attr(og_type)
    ));
    html.push_str(&format!(
        "<meta property=\"og:title\" content=\"{}\">",
        escape_attr(&full_title)
    ));
    html.push_str(&format!(
        "<meta property=\"og:description\" content=\"{}\">",
        escape_attr(description)
    ));
    html.push_str(&format!(
        "<meta property=\"og:url\" content=\"{}\">",
        escape_attr(canonical)
    ));
    html.push_str(&format!(
        "<meta property=\"og:site_name\" content=\"{SITE_NAME}\">"
    ));
    html.push_str("<meta property=\"twitter:card\" content=\"summary_large_image\">");
    html.push_str(&format!(
        "<meta property=\"twitter:title\" content=\"{}\">",
        escape_attr(&full_title)
    ));

    if let Some(data) = structured_data {
        // JSON-LD must not be HTML-escaped; close-tag sequences are broken
        // up instead.
        let json = data.to_string().replace("</", "<\\/");
        html.push_str(&format!(
            "<script type=\"application/ld+json\">{json}</script>"
        ));
    }

    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_head_contains_canonical_and_og() {
        let html = render_head(
            "Strategies",
            "Catalog",
            "https://forge.finance/strategies",
            "website",
            None,
        );
        assert!(html.contains("rel=\"canonical\" href=\"https://forge.finance/strategies\""));
        assert!(html.contains("og:title"));
        assert!(html.contains("Strategies | Forge DeFi Platform"));
        assert!(!html.contains("ld+json"));
    }

    #[test]
    fn test_structured_data_script() {
        let data = json!({ "@type": "Product", "name": "X" });
        let html = render_head("T", "D", "https://forge.finance/x", "website", Some(&data));
        assert!(html.contains("application/ld+json"));
        assert!(html.contains("\"@type\":\"Product\""));
    }

    #[test]
    fn test_close_tag_sequences_are_neutralized() {
        let data = json!({ "name": "</script><script>alert(1)" });
        let html = render_head("T", "D", "https://forge.finance/x", "website", Some(&data));
        assert!(!html.contains("</script><script>alert"));
    }
}
