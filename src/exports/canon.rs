//! Canonical field map feeding every exporter.
//!
//! One derivation per record of the fields the sitemap and AI endpoints
//! share: display title, site path, and the two date views. Each renderer
//! then only chooses which canonical fields to include and in which
//! container format.

use crate::models::{BlogPost, Strategy};
use crate::utils::dates;

/// Exporter-facing view of one record.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalEntry {
    /// Display title (strategy name or post title).
    pub title: String,
    /// Site path relative to the base URL, e.g. `/strategies/<id>`.
    pub path: String,
    /// Author-facing freshness date: the author-supplied display date when
    /// present, else the normalized write timestamp, else today.
    pub updated: String,
    /// Store-write freshness date: the normalized write timestamp chain,
    /// else today. The sitemap's `lastmod` source.
    pub last_write: String,
}

pub fn strategy_entry(s: &Strategy) -> CanonicalEntry {
    CanonicalEntry {
        title: s.name.clone(),
        path: format!("/strategies/{}", s.id),
        updated: s
            .last_updated
            .clone()
            .and_then(|raw| dates::to_ymd(&serde_json::Value::String(raw)))
            .unwrap_or_else(|| dates::ymd_or_today(&s.updated_at)),
        last_write: dates::to_ymd(&s.updated_at)
            .unwrap_or_else(|| dates::ymd_or_today(&s.created_at)),
    }
}

pub fn post_entry(p: &BlogPost) -> CanonicalEntry {
    let last_write = dates::to_ymd(&p.updated_at)
        .or_else(|| dates::to_ymd(&p.published_at))
        .unwrap_or_else(|| dates::ymd_or_today(&p.created_at));
    CanonicalEntry {
        title: p.title.clone(),
        path: format!("/blog/{}", p.slug),
        updated: last_write.clone(),
        last_write,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Document;
    use serde_json::{Value, json};

    fn strategy(data: Value) -> Strategy {
        Strategy::from_document(&Document {
            id: "s1".to_string(),
            data,
        })
    }

    fn post(data: Value) -> BlogPost {
        BlogPost::from_document(&Document {
            id: "p1".to_string(),
            data,
        })
    }

    #[test]
    fn test_strategy_updated_prefers_author_date() {
        let entry = strategy_entry(&strategy(json!({
            "name": "X",
            "lastUpdated": "2024-01-15",
            "updatedAt": "2024-03-01T00:00:00Z"
        })));
        assert_eq!(entry.updated, "2024-01-15");
        assert_eq!(entry.last_write, "2024-03-01");
        assert_eq!(entry.path, "/strategies/s1");
    }

    #[test]
    fn test_strategy_garbage_author_date_falls_through() {
        let entry = strategy_entry(&strategy(json!({
            "name": "X",
            "lastUpdated": "recently",
            "updatedAt": "2024-03-01T00:00:00Z"
        })));
        assert_eq!(entry.updated, "2024-03-01");
    }

    #[test]
    fn test_minimal_records_get_today() {
        let today = dates::today_ymd();
        let s = strategy_entry(&strategy(json!({ "name": "Bare" })));
        assert_eq!(s.updated, today);
        assert_eq!(s.last_write, today);

        let p = post_entry(&post(json!({ "title": "Bare", "slug": "bare" })));
        assert_eq!(p.last_write, today);
        assert_eq!(p.path, "/blog/bare");
    }

    #[test]
    fn test_post_last_write_chain() {
        let entry = post_entry(&post(json!({
            "title": "X",
            "slug": "x",
            "publishedAt": "2024-01-05T00:00:00Z",
            "createdAt": "2024-01-01T00:00:00Z"
        })));
        assert_eq!(entry.last_write, "2024-01-05");

        let entry = post_entry(&post(json!({
            "title": "X",
            "slug": "x",
            "updatedAt": { "seconds": 1_705_276_800 }
        })));
        assert_eq!(entry.last_write, "2024-01-15");
    }
}
