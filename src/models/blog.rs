//! Blog post record model.

use serde::Deserialize;
use serde_json::Value;

use crate::models::fields;
use crate::store::Document;
use crate::utils::dates;

/// A blog post as read from the `blog_posts` collection.
///
/// Deserialization is lenient for the same reasons as [`crate::models::Strategy`].
/// `slug` is the detail-route lookup key; uniqueness is a convention, not a
/// store guarantee, and duplicate slugs resolve first-match-wins.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlogPost {
    #[serde(deserialize_with = "fields::lenient_string")]
    pub id: String,
    #[serde(deserialize_with = "fields::lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "fields::lenient_string")]
    pub slug: String,
    #[serde(deserialize_with = "fields::lenient_string")]
    pub excerpt: String,
    /// Markdown or pre-rendered HTML; the detail page handles both.
    #[serde(deserialize_with = "fields::lenient_string")]
    pub content: String,
    #[serde(deserialize_with = "fields::lenient_opt_string")]
    pub author: Option<String>,
    #[serde(deserialize_with = "fields::lenient_string")]
    pub category: String,
    #[serde(deserialize_with = "fields::lenient_strings")]
    pub tags: Vec<String>,

    #[serde(deserialize_with = "fields::lenient_u64")]
    pub views: u64,
    #[serde(deserialize_with = "fields::lenient_u64")]
    pub likes: u64,
    #[serde(deserialize_with = "fields::lenient_opt_u32")]
    pub read_time: Option<u32>,

    #[serde(deserialize_with = "fields::lenient_string")]
    pub status: String,
    pub created_at: Value,
    pub updated_at: Value,
    /// Author-facing publish date; may differ from `createdAt`.
    pub published_at: Value,
    #[serde(deserialize_with = "fields::lenient_bool")]
    pub featured: bool,
}

impl BlogPost {
    /// Build a post from a stored document; never fails.
    pub fn from_document(doc: &Document) -> Self {
        let mut post: BlogPost = serde_json::from_value(doc.data.clone()).unwrap_or_default();
        post.id = doc.id.clone();
        post
    }

    /// Listings show posts whose `status` is `"published"` or absent; older
    /// documents predate the field.
    pub fn is_published(&self) -> bool {
        self.status.is_empty() || self.status == "published"
    }

    /// Epoch sort key for newest-first listings: publish date when present,
    /// else the write timestamp.
    pub fn publish_sort_key(&self) -> i64 {
        dates::sort_key(&self.published_at)
            .or_else(|| dates::sort_key(&self.created_at))
            .unwrap_or(0)
    }

    pub fn created_sort_key(&self) -> i64 {
        dates::sort_key(&self.created_at).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(data: Value) -> Document {
        Document {
            id: "p1".to_string(),
            data,
        }
    }

    #[test]
    fn test_minimal_document() {
        let p = BlogPost::from_document(&doc(json!({ "title": "Hello" })));
        assert_eq!(p.id, "p1");
        assert_eq!(p.title, "Hello");
        assert_eq!(p.views, 0);
        assert_eq!(p.read_time, None);
        assert!(p.is_published(), "absent status counts as published");
    }

    #[test]
    fn test_draft_is_not_published() {
        let p = BlogPost::from_document(&doc(json!({ "status": "draft" })));
        assert!(!p.is_published());
        let p = BlogPost::from_document(&doc(json!({ "status": "published" })));
        assert!(p.is_published());
    }

    #[test]
    fn test_publish_sort_key_prefers_published_at() {
        let p = BlogPost::from_document(&doc(json!({
            "publishedAt": "2024-01-10T12:00:00Z",
            "createdAt": "2024-01-01T00:00:00Z"
        })));
        let created_only = BlogPost::from_document(&doc(json!({
            "createdAt": "2024-01-05T00:00:00Z"
        })));
        assert!(p.publish_sort_key() > created_only.publish_sort_key());
    }

    #[test]
    fn test_lenient_counters() {
        let p = BlogPost::from_document(&doc(json!({
            "views": "17",
            "likes": null,
            "readTime": "8"
        })));
        assert_eq!(p.views, 17);
        assert_eq!(p.likes, 0);
        assert_eq!(p.read_time, Some(8));
    }
}
