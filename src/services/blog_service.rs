//! Blog post content accessor.

use std::sync::Arc;

use log::{error, info, warn};
use serde_json::{Value, json};

use crate::errors::{ForgeError, Result};
use crate::models::BlogPost;
use crate::store::{Document, ListQuery, RecordStore, StoreError};

const BLOG_COLLECTION: &str = "blog_posts";

/// CRUD, query, and counter operations for the `blog_posts` collection.
pub struct BlogService {
    store: Arc<dyn RecordStore>,
}

impl BlogService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Published posts, newest first.
    ///
    /// The primary query filters `status == "published"` and orders by the
    /// write timestamp; a store without the composite index rejects it, and
    /// the fallback fetches everything, keeps posts whose status is
    /// `"published"` or absent (older documents predate the field), and
    /// sorts in memory. A draft never survives either path.
    pub async fn list_all(&self) -> Result<Vec<BlogPost>> {
        let compound = ListQuery::new()
            .where_eq("status", json!("published"))
            .order_desc("createdAt");
        let docs = match self.store.list(BLOG_COLLECTION, compound).await {
            Ok(docs) => docs,
            Err(StoreError::QueryUnsupported(q)) => {
                warn!("Compound blog query unavailable ({q}), filtering in memory");
                let docs = self
                    .store
                    .list(BLOG_COLLECTION, ListQuery::new())
                    .await
                    .map_err(|e| self.log_error("getting blog posts", e))?;
                return Ok(published_newest_first(docs));
            }
            Err(e) => return Err(self.log_error("getting blog posts", e)),
        };
        Ok(docs.iter().map(BlogPost::from_document).collect())
    }

    /// One post by id; `NotFound` when no document matches.
    pub async fn get_by_id(&self, id: &str) -> Result<BlogPost> {
        let doc = self
            .store
            .get(BLOG_COLLECTION, id)
            .await
            .map_err(|e| match e {
                StoreError::NotFound { .. } => ForgeError::NotFound,
                other => self.log_error("getting blog post", other),
            })?;
        Ok(BlogPost::from_document(&doc))
    }

    /// One published post by slug. Slug uniqueness is a convention the store
    /// does not enforce; duplicates resolve first-match-wins.
    pub async fn get_by_slug(&self, slug: &str) -> Result<BlogPost> {
        self.list_all()
            .await?
            .into_iter()
            .find(|post| post.slug == slug)
            .ok_or(ForgeError::NotFound)
    }

    /// Published posts in one category, newest first.
    pub async fn list_by_category(&self, category: &str) -> Result<Vec<BlogPost>> {
        let compound = ListQuery::new()
            .where_eq("category", json!(category))
            .order_desc("createdAt");
        let docs = match self.store.list(BLOG_COLLECTION, compound).await {
            Ok(docs) => docs,
            Err(StoreError::QueryUnsupported(q)) => {
                warn!("Compound blog query unavailable ({q}), filtering in memory");
                let docs = self
                    .store
                    .list(BLOG_COLLECTION, ListQuery::new())
                    .await
                    .map_err(|e| self.log_error("getting blog posts by category", e))?;
                let mut posts = published_newest_first(docs);
                posts.retain(|post| post.category == category);
                return Ok(posts);
            }
            Err(e) => return Err(self.log_error("getting blog posts by category", e)),
        };
        let mut posts: Vec<BlogPost> = docs.iter().map(BlogPost::from_document).collect();
        posts.retain(BlogPost::is_published);
        Ok(posts)
    }

    /// Posts by one author id, newest first.
    pub async fn list_by_author(&self, author_id: &str) -> Result<Vec<BlogPost>> {
        let compound = ListQuery::new()
            .where_eq("authorId", json!(author_id))
            .order_desc("createdAt");
        let docs = match self.store.list(BLOG_COLLECTION, compound).await {
            Ok(docs) => docs,
            Err(StoreError::QueryUnsupported(q)) => {
                warn!("Compound blog query unavailable ({q}), filtering in memory");
                let mut docs = self
                    .store
                    .list(BLOG_COLLECTION, ListQuery::new())
                    .await
                    .map_err(|e| self.log_error("getting blog posts by author", e))?;
                docs.retain(|doc| doc.field("authorId") == Some(&json!(author_id)));
                let mut posts: Vec<BlogPost> =
                    docs.iter().map(BlogPost::from_document).collect();
                posts.sort_by_key(|post| std::cmp::Reverse(post.created_sort_key()));
                return Ok(posts);
            }
            Err(e) => return Err(self.log_error("getting blog posts by author", e)),
        };
        Ok(docs.iter().map(BlogPost::from_document).collect())
    }

    /// Create a post. The payload gains `status: "published"` and zeroed
    /// counters along with the store's write timestamps.
    pub async fn create(&self, mut payload: Value) -> Result<BlogPost> {
        if payload.is_object() {
            payload["status"] = json!("published");
            payload["views"] = json!(0);
            payload["likes"] = json!(0);
        }
        let doc = self
            .store
            .create(BLOG_COLLECTION, payload)
            .await
            .map_err(|e| self.log_error("creating blog post", e))?;
        info!("Created blog post {}", doc.id);
        Ok(BlogPost::from_document(&doc))
    }

    pub async fn update(&self, id: &str, patch: Value) -> Result<BlogPost> {
        let doc = self
            .store
            .update(BLOG_COLLECTION, id, patch)
            .await
            .map_err(|e| self.log_error("updating blog post", e))?;
        info!("Updated blog post {}", doc.id);
        Ok(BlogPost::from_document(&doc))
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.store
            .delete(BLOG_COLLECTION, id)
            .await
            .map_err(|e| self.log_error("deleting blog post", e))?;
        info!("Deleted blog post {}", id);
        Ok(())
    }

    /// Bump the view counter. Counter failures are logged and swallowed;
    /// a page view must never fail because of them.
    pub async fn increment_views(&self, id: &str) {
        if let Err(e) = self.store.increment(BLOG_COLLECTION, id, "views", 1).await {
            error!("Error incrementing views for {id}: {e}");
        }
    }

    /// Bump the like counter; same discipline as `increment_views`.
    pub async fn like_post(&self, id: &str) {
        if let Err(e) = self.store.increment(BLOG_COLLECTION, id, "likes", 1).await {
            error!("Error liking blog post {id}: {e}");
        }
    }

    fn log_error(&self, action: &str, e: StoreError) -> ForgeError {
        error!("Error {action}: {e}");
        ForgeError::Store(e)
    }
}

fn published_newest_first(docs: Vec<Document>) -> Vec<BlogPost> {
    let mut posts: Vec<BlogPost> = docs.iter().map(BlogPost::from_document).collect();
    posts.retain(BlogPost::is_published);
    posts.sort_by_key(|post| std::cmp::Reverse(post.created_sort_key()));
    posts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::JsonStore;
    use tempfile::TempDir;

    fn service() -> (TempDir, Arc<JsonStore>, BlogService) {
        let dir = TempDir::new().expect("temp dir");
        let store = Arc::new(JsonStore::new(dir.path()));
        let service = BlogService::new(store.clone());
        (dir, store, service)
    }

    #[tokio::test]
    async fn test_create_sets_defaults() {
        let (_dir, _store, service) = service();
        let post = service
            .create(json!({ "title": "Hello", "slug": "hello" }))
            .await
            .unwrap();
        assert_eq!(post.status, "published");
        assert_eq!(post.views, 0);
        assert_eq!(post.likes, 0);
        assert!(!post.created_at.is_null());
    }

    #[tokio::test]
    async fn test_list_all_fallback_excludes_drafts_keeps_absent_status() {
        let (_dir, store, service) = service();
        service
            .create(json!({ "title": "Published", "slug": "p" }))
            .await
            .unwrap();
        // A draft, written around the accessor so status survives.
        store
            .create(
                "blog_posts",
                json!({ "title": "Draft", "slug": "d", "status": "draft" }),
            )
            .await
            .unwrap();
        // An old document from before the status field existed.
        store
            .create("blog_posts", json!({ "title": "Legacy", "slug": "l" }))
            .await
            .unwrap();

        // JsonStore rejects the compound query, so this runs the fallback.
        let posts = service.list_all().await.unwrap();
        let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
        assert!(titles.contains(&"Published"));
        assert!(titles.contains(&"Legacy"));
        assert!(!titles.contains(&"Draft"));
    }

    #[tokio::test]
    async fn test_get_by_slug_duplicate_resolves_to_one_post() {
        let (_dir, _store, service) = service();
        service
            .create(json!({ "title": "One", "slug": "shared" }))
            .await
            .unwrap();
        service
            .create(json!({ "title": "Two", "slug": "shared" }))
            .await
            .unwrap();

        // Duplicate slugs are a data problem the lookup does not try to fix:
        // it returns the first match from the listing, whichever that is.
        let found = service.get_by_slug("shared").await.unwrap();
        assert_eq!(found.slug, "shared");
    }

    #[tokio::test]
    async fn test_get_by_slug_missing() {
        let (_dir, _store, service) = service();
        let err = service.get_by_slug("nope").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_list_by_category() {
        let (_dir, _store, service) = service();
        service
            .create(json!({ "title": "A", "slug": "a", "category": "Education" }))
            .await
            .unwrap();
        service
            .create(json!({ "title": "B", "slug": "b", "category": "Security" }))
            .await
            .unwrap();

        let education = service.list_by_category("Education").await.unwrap();
        assert_eq!(education.len(), 1);
        assert_eq!(education[0].title, "A");
    }

    #[tokio::test]
    async fn test_list_by_author() {
        let (_dir, _store, service) = service();
        service
            .create(json!({ "title": "Mine", "slug": "m", "authorId": "u1" }))
            .await
            .unwrap();
        service
            .create(json!({ "title": "Theirs", "slug": "t", "authorId": "u2" }))
            .await
            .unwrap();

        let mine = service.list_by_author("u1").await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].title, "Mine");
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (_dir, _store, service) = service();
        let post = service
            .create(json!({ "title": "Before", "slug": "x" }))
            .await
            .unwrap();

        let updated = service
            .update(&post.id, json!({ "title": "After" }))
            .await
            .unwrap();
        assert_eq!(updated.title, "After");
        assert_eq!(updated.slug, "x");

        service.delete(&post.id).await.unwrap();
        assert!(service.get_by_id(&post.id).await.is_err());
    }

    #[tokio::test]
    async fn test_counters_swallow_missing_documents() {
        let (_dir, _store, service) = service();
        // Neither call panics or errors for an id that does not exist.
        service.increment_views("gone").await;
        service.like_post("gone").await;

        let post = service
            .create(json!({ "title": "Counted", "slug": "c" }))
            .await
            .unwrap();
        service.increment_views(&post.id).await;
        service.increment_views(&post.id).await;
        service.like_post(&post.id).await;

        let fetched = service.get_by_id(&post.id).await.unwrap();
        assert_eq!(fetched.views, 2);
        assert_eq!(fetched.likes, 1);
    }
}
