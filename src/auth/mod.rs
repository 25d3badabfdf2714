//! Admin authentication.
//!
//! The admin surface is gated by a single email/password identity behind the
//! [`AuthProvider`] seam. Sessions are opaque bearer tokens carried in a
//! cookie; there is no authorization model beyond authenticated-or-not.
//! Sign-in failure is always the same generic message, with no distinction
//! between a wrong password and an unknown account.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use log::{info, warn};
use sha2::{Digest, Sha256};

use crate::errors::{ForgeError, Result};

pub const SESSION_COOKIE: &str = "forge_session";

/// An authenticated admin user.
#[derive(Debug, Clone)]
pub struct User {
    pub email: String,
}

/// Session-issuing auth collaborator.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Verify credentials and open a session, returning the session token.
    async fn sign_in(&self, email: &str, password: &str) -> Result<String>;

    /// Close a session. Unknown tokens are ignored.
    async fn sign_out(&self, token: &str);

    /// The user behind a session token, if the session is live.
    async fn current_user(&self, token: &str) -> Option<User>;
}

/// Auth provider backed by the configured admin credentials, with in-memory
/// sessions.
pub struct ConfigAuth {
    admin_email: String,
    admin_password: String,
    sessions: Mutex<HashMap<String, User>>,
}

impl ConfigAuth {
    pub fn new(admin_email: String, admin_password: String) -> Self {
        Self {
            admin_email,
            admin_password,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn issue_token(&self, email: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        hex::encode(Sha256::digest(format!("{email}:{nanos}")))
    }
}

#[async_trait]
impl AuthProvider for ConfigAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<String> {
        if self.admin_email.is_empty()
            || email != self.admin_email
            || password != self.admin_password
        {
            warn!("Failed admin sign-in attempt for '{email}'");
            return Err(ForgeError::AuthFailure);
        }

        let token = self.issue_token(email);
        let user = User {
            email: email.to_string(),
        };
        self.sessions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(token.clone(), user);
        info!("Admin signed in: {email}");
        Ok(token)
    }

    async fn sign_out(&self, token: &str) {
        let removed = self
            .sessions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(token);
        if let Some(user) = removed {
            info!("Admin signed out: {}", user.email);
        }
    }

    async fn current_user(&self, token: &str) -> Option<User> {
        self.sessions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(token)
            .cloned()
    }
}

/// Extract the session token from a `Cookie` request header.
pub fn session_from_cookies(header: Option<&str>) -> Option<String> {
    let header = header?;
    for pair in header.split(';') {
        let Some((name, value)) = pair.trim().split_once('=') else {
            continue;
        };
        if name == SESSION_COOKIE && !value.is_empty() {
            return Some(value.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth() -> ConfigAuth {
        ConfigAuth::new("admin@forge.finance".to_string(), "hunter2".to_string())
    }

    #[tokio::test]
    async fn test_sign_in_and_session_lifecycle() {
        let auth = auth();
        let token = auth.sign_in("admin@forge.finance", "hunter2").await.unwrap();

        let user = auth.current_user(&token).await.unwrap();
        assert_eq!(user.email, "admin@forge.finance");

        auth.sign_out(&token).await;
        assert!(auth.current_user(&token).await.is_none());
    }

    #[tokio::test]
    async fn test_bad_credentials_are_generic() {
        let auth = auth();
        let wrong_password = auth
            .sign_in("admin@forge.finance", "nope")
            .await
            .unwrap_err();
        let unknown_account = auth.sign_in("who@example.com", "hunter2").await.unwrap_err();

        // Same error either way; callers cannot tell the cases apart.
        assert_eq!(wrong_password.to_string(), unknown_account.to_string());
        assert!(matches!(wrong_password, ForgeError::AuthFailure));
    }

    #[tokio::test]
    async fn test_empty_admin_email_disables_sign_in() {
        let auth = ConfigAuth::new(String::new(), String::new());
        assert!(auth.sign_in("", "").await.is_err());
    }

    #[test]
    fn test_session_from_cookies() {
        assert_eq!(
            session_from_cookies(Some("forge_session=abc123")),
            Some("abc123".to_string())
        );
        assert_eq!(
            session_from_cookies(Some("theme=dark; forge_session=abc123; other=1")),
            Some("abc123".to_string())
        );
        assert_eq!(session_from_cookies(Some("theme=dark")), None);
        assert_eq!(session_from_cookies(None), None);
    }
}
