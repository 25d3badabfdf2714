//! Sitemap generation.
//!
//! Emits the standard `<urlset>` document: the static pages with a fixed
//! changefreq/priority table, then every strategy and published post.
//! `lastmod` always comes out as a valid `YYYY-MM-DD`; a record with a
//! malformed timestamp dates its entry today rather than breaking the feed.

use crate::exports::canon;
use crate::models::{BlogPost, Strategy};
use crate::utils::{dates, escape_xml};

/// XML namespace for sitemaps
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Single URL entry in the sitemap.
#[derive(Debug, Clone)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: String,
    pub changefreq: &'static str,
    pub priority: &'static str,
}

/// Static pages with their crawl hints.
const STATIC_PAGES: &[(&str, &str, &str)] = &[
    ("/", "weekly", "1.0"),
    ("/strategies", "daily", "0.9"),
    ("/blog", "weekly", "0.8"),
    ("/about", "monthly", "0.7"),
    ("/contact", "monthly", "0.6"),
];

/// Collect the full URL list: static pages, strategies, posts.
pub fn sitemap_entries(
    strategies: &[Strategy],
    posts: &[BlogPost],
    base_url: &str,
) -> Vec<SitemapEntry> {
    let today = dates::today_ymd();
    let mut entries: Vec<SitemapEntry> = STATIC_PAGES
        .iter()
        .map(|&(path, changefreq, priority)| SitemapEntry {
            loc: format!("{base_url}{path}"),
            lastmod: today.clone(),
            changefreq,
            priority,
        })
        .collect();

    for strategy in strategies {
        let canonical = canon::strategy_entry(strategy);
        entries.push(SitemapEntry {
            loc: format!("{base_url}{}", canonical.path),
            lastmod: canonical.last_write,
            changefreq: "weekly",
            priority: "0.8",
        });
    }

    for post in posts {
        let canonical = canon::post_entry(post);
        entries.push(SitemapEntry {
            loc: format!("{base_url}{}", canonical.path),
            lastmod: canonical.last_write,
            changefreq: "monthly",
            priority: "0.7",
        });
    }

    entries
}

/// Render the entry list as sitemap XML.
pub fn render_sitemap_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::with_capacity(4096);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
    xml.push('\n');

    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
        xml.push_str(&format!("    <lastmod>{}</lastmod>\n", entry.lastmod));
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            entry.changefreq
        ));
        xml.push_str(&format!("    <priority>{}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Document;
    use serde_json::{Value, json};

    const BASE: &str = "https://forge.finance";

    fn strategy(data: Value) -> Strategy {
        Strategy::from_document(&Document {
            id: data
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or("s1")
                .to_string(),
            data,
        })
    }

    fn post(data: Value) -> BlogPost {
        BlogPost::from_document(&Document {
            id: "p1".to_string(),
            data,
        })
    }

    fn is_ymd(s: &str) -> bool {
        let b = s.as_bytes();
        b.len() == 10
            && b[4] == b'-'
            && b[7] == b'-'
            && b.iter().enumerate().all(|(i, c)| {
                if i == 4 || i == 7 {
                    *c == b'-'
                } else {
                    c.is_ascii_digit()
                }
            })
    }

    #[test]
    fn test_static_pages_lead_the_sitemap() {
        let entries = sitemap_entries(&[], &[], BASE);
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].loc, "https://forge.finance/");
        assert_eq!(entries[0].priority, "1.0");
        assert_eq!(entries[1].loc, "https://forge.finance/strategies");
        assert_eq!(entries[1].changefreq, "daily");
    }

    #[test]
    fn test_lastmod_is_valid_for_every_timestamp_shape() {
        let strategies = vec![
            strategy(json!({ "id": "a", "name": "A",
                "updatedAt": { "seconds": 1_705_276_800 } })),
            strategy(json!({ "id": "b", "name": "B",
                "updatedAt": "2024-01-08T16:45:00Z" })),
            strategy(json!({ "id": "c", "name": "C", "updatedAt": 1_705_276_800 })),
            strategy(json!({ "id": "d", "name": "D", "updatedAt": null })),
            strategy(json!({ "id": "e", "name": "E", "updatedAt": "garbage" })),
            strategy(json!({ "id": "f", "name": "F" })),
        ];
        let entries = sitemap_entries(&strategies, &[], BASE);
        for entry in &entries {
            assert!(
                is_ymd(&entry.lastmod),
                "bad lastmod {:?} for {}",
                entry.lastmod,
                entry.loc
            );
        }
        let xml = render_sitemap_xml(&entries);
        assert!(!xml.contains("Invalid"));
    }

    #[test]
    fn test_record_urls_and_hints() {
        let strategies = vec![strategy(json!({ "id": "lido-arbitrum", "name": "L" }))];
        let posts = vec![post(json!({ "title": "P", "slug": "defi-guide" }))];
        let entries = sitemap_entries(&strategies, &posts, BASE);

        let strat = entries
            .iter()
            .find(|e| e.loc.ends_with("/strategies/lido-arbitrum"))
            .unwrap();
        assert_eq!(strat.changefreq, "weekly");
        assert_eq!(strat.priority, "0.8");

        let blog = entries
            .iter()
            .find(|e| e.loc.ends_with("/blog/defi-guide"))
            .unwrap();
        assert_eq!(blog.changefreq, "monthly");
        assert_eq!(blog.priority, "0.7");
    }

    #[test]
    fn test_xml_structure_and_escaping() {
        let strategies = vec![strategy(json!({ "id": "a&b", "name": "X" }))];
        let entries = sitemap_entries(&strategies, &[], BASE);
        let xml = render_sitemap_xml(&entries);

        let lines: Vec<&str> = xml.lines().collect();
        assert_eq!(lines[0], r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        assert!(lines[1].starts_with("<urlset"));
        assert_eq!(lines.last().unwrap().trim(), "</urlset>");
        assert_eq!(xml.matches("<url>").count(), 6);
        assert!(xml.contains("/strategies/a&amp;b"));
    }
}
