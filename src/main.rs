use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;

use forge_site::auth::{AuthProvider, ConfigAuth};
use forge_site::logger::Logger;
use forge_site::{
    AppState, Config, EmailService, ForgeError, JsonStore, RecordStore, handlers, sample_data,
};

#[tokio::main]
async fn main() -> Result<(), ForgeError> {
    if let Err(e) = Logger::init() {
        eprintln!("Failed to initialize logger: {e}");
    }

    let config = Arc::new(Config::from_env());
    let store: Arc<dyn RecordStore> = Arc::new(JsonStore::new(config.data_dir.as_ref().clone()));
    let auth: Arc<dyn AuthProvider> = Arc::new(ConfigAuth::new(
        config.admin_email.clone(),
        config.admin_password.clone(),
    ));
    let email = Arc::new(EmailService::new(
        config.waitlist_provider.clone(),
        config.waitlist_api_base.clone(),
    ));

    if config.seed {
        sample_data::seed_if_empty(store.clone()).await?;
    }

    let state = AppState {
        config: config.clone(),
        store,
        auth,
        email,
    };

    let app = Router::new()
        .route("/", get(handlers::handle_landing))
        .route("/strategies", get(handlers::handle_strategies))
        .route("/strategies/:id", get(handlers::handle_strategy_detail))
        .route("/strategy-builder", get(handlers::handle_strategy_builder))
        .route("/blog", get(handlers::handle_blog))
        .route("/blog/:slug", get(handlers::handle_blog_detail))
        .route("/about", get(handlers::handle_about))
        .route("/contact", get(handlers::handle_contact))
        .route("/admin", get(handlers::handle_admin))
        .route("/admin/login", post(handlers::handle_admin_login))
        .route("/admin/logout", post(handlers::handle_admin_logout))
        .route(
            "/admin/strategies",
            post(handlers::handle_admin_create_strategy),
        )
        .route("/admin/posts", post(handlers::handle_admin_create_post))
        .route("/sitemap.xml", get(handlers::handle_sitemap))
        .route("/ai/sitemap.json", get(handlers::handle_ai_catalog))
        .route("/ai/:file", get(handlers::handle_ai_strategy))
        .route("/waitlist", post(handlers::handle_waitlist))
        .route("/static/*path", get(handlers::handle_static))
        .with_state(state);

    let addr = config.socket_addr();
    log::info!("Forge listening on http://{addr}");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await.map_err(ForgeError::from)
}
