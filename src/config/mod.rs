use std::path::PathBuf;
use std::sync::Arc;

/// Application configuration, read from the environment at startup.
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Root directory of the document store.
    pub data_dir: Arc<PathBuf>,
    pub static_dir: Arc<PathBuf>,
    /// Canonical site origin used in the sitemap, AI endpoints, and
    /// structured data.
    pub base_url: String,
    pub admin_email: String,
    pub admin_password: String,
    /// Waitlist provider name: mailchimp, convertkit, api, sheets, or none.
    pub waitlist_provider: String,
    /// Origin of the provider API endpoints.
    pub waitlist_api_base: Option<String>,
    /// Populate an empty store with sample content on startup.
    pub seed: bool,
}

impl Config {
    /// Read configuration from `FORGE_*` environment variables, with
    /// defaults suitable for local development.
    pub fn from_env() -> Self {
        Self {
            host: env_or("FORGE_HOST", "0.0.0.0"),
            port: std::env::var("FORGE_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5080),
            data_dir: Arc::new(PathBuf::from(env_or("FORGE_DATA", "data"))),
            static_dir: Arc::new(PathBuf::from(env_or("FORGE_STATIC", "static"))),
            base_url: env_or("FORGE_BASE_URL", "https://forge.finance"),
            admin_email: env_or("FORGE_ADMIN_EMAIL", ""),
            admin_password: env_or("FORGE_ADMIN_PASSWORD", ""),
            waitlist_provider: env_or("FORGE_WAITLIST_PROVIDER", "none"),
            waitlist_api_base: std::env::var("FORGE_WAITLIST_API").ok(),
            seed: std::env::var("FORGE_SEED").is_ok(),
        }
    }

    /// Get the socket address for binding.
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        let ip = self
            .host
            .parse()
            .unwrap_or(std::net::IpAddr::from([0, 0, 0, 0]));
        std::net::SocketAddr::new(ip, self.port)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
