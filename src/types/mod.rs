use std::sync::Arc;

use crate::auth::AuthProvider;
use crate::config::Config;
use crate::services::EmailService;
use crate::store::RecordStore;

/// Application state shared across all handlers. The store and auth
/// collaborators sit behind trait objects so tests can substitute fakes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn RecordStore>,
    pub auth: Arc<dyn AuthProvider>,
    pub email: Arc<EmailService>,
}
