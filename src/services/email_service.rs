//! Waitlist signups and outbound newsletter integrations.
//!
//! Signups are recorded in the `waitlist` collection and forwarded to the
//! configured provider endpoint. Both operations are best-effort: failures
//! are logged, and the caller always reports success to the visitor.

use log::{error, info, warn};
use serde_json::json;

use crate::store::RecordStore;
use crate::utils::dates;

const WAITLIST_COLLECTION: &str = "waitlist";

/// Provider endpoint path by configured provider name.
fn provider_path(provider: &str) -> Option<&'static str> {
    match provider {
        "mailchimp" => Some("/api/mailchimp/subscribe"),
        "convertkit" => Some("/api/convertkit/subscribe"),
        "api" => Some("/api/waitlist"),
        "sheets" => Some("/api/sheets/add"),
        _ => None,
    }
}

pub struct EmailService {
    client: reqwest::Client,
    provider: String,
    api_base: Option<String>,
}

impl EmailService {
    pub fn new(provider: String, api_base: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self {
            client,
            provider,
            api_base,
        }
    }

    /// Record a waitlist signup. Never fails from the caller's perspective.
    pub async fn subscribe(&self, store: &dyn RecordStore, email: &str) {
        let payload = json!({
            "email": email,
            "source": "landing_page",
            "timestamp": dates::now_rfc3339(),
        });

        match store.create(WAITLIST_COLLECTION, payload.clone()).await {
            Ok(doc) => info!("Waitlist signup recorded: {}", doc.id),
            Err(e) => error!("Error recording waitlist signup: {e}"),
        }

        self.forward_to_provider(&payload).await;
    }

    async fn forward_to_provider(&self, payload: &serde_json::Value) {
        let Some(path) = provider_path(&self.provider) else {
            return;
        };
        let Some(base) = &self.api_base else {
            warn!(
                "Waitlist provider '{}' configured without an API base",
                self.provider
            );
            return;
        };

        let url = format!("{}{}", base.trim_end_matches('/'), path);
        match self.client.post(&url).json(payload).send().await {
            Ok(resp) if resp.status().is_success() => {
                info!("Waitlist signup forwarded to {}", self.provider);
            }
            Ok(resp) => warn!(
                "Waitlist provider {} returned {}",
                self.provider,
                resp.status()
            ),
            Err(e) => warn!("Waitlist provider {} call failed: {e}", self.provider),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::JsonStore;
    use tempfile::TempDir;

    #[test]
    fn test_provider_paths() {
        assert_eq!(provider_path("mailchimp"), Some("/api/mailchimp/subscribe"));
        assert_eq!(provider_path("convertkit"), Some("/api/convertkit/subscribe"));
        assert_eq!(provider_path("api"), Some("/api/waitlist"));
        assert_eq!(provider_path("sheets"), Some("/api/sheets/add"));
        assert_eq!(provider_path("none"), None);
        assert_eq!(provider_path(""), None);
    }

    #[tokio::test]
    async fn test_subscribe_records_signup_without_provider() {
        let dir = TempDir::new().expect("temp dir");
        let store = JsonStore::new(dir.path());
        let service = EmailService::new("none".to_string(), None);

        service.subscribe(&store, "user@example.com").await;

        let docs = store
            .list(WAITLIST_COLLECTION, crate::store::ListQuery::new())
            .await
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].field("email"), Some(&json!("user@example.com")));
        assert_eq!(docs[0].field("source"), Some(&json!("landing_page")));
    }

    #[tokio::test]
    async fn test_subscribe_survives_unreachable_provider() {
        let dir = TempDir::new().expect("temp dir");
        let store = JsonStore::new(dir.path());
        // Nothing listens here; the POST fails and is swallowed.
        let service = EmailService::new(
            "api".to_string(),
            Some("http://127.0.0.1:9".to_string()),
        );

        service.subscribe(&store, "user@example.com").await;

        let docs = store
            .list(WAITLIST_COLLECTION, crate::store::ListQuery::new())
            .await
            .unwrap();
        assert_eq!(docs.len(), 1, "signup is still recorded locally");
    }
}
