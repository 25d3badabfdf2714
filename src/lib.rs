//! Forge content and strategy catalog server.
//!
//! Serves the marketing site for the Forge DeFi platform: the strategy
//! catalog, the blog, the admin content-entry surface, and the SEO/AI
//! crawler endpoints, all backed by a document store behind the
//! [`store::RecordStore`] seam.

pub mod auth;
pub mod components;
pub mod config;
pub mod errors;
pub mod exports;
pub mod handlers;
pub mod logger;
pub mod models;
pub mod sample_data;
pub mod services;
pub mod store;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::Config;
pub use errors::{ForgeError, Result};
pub use models::{BlogPost, Strategy};
pub use services::{BlogService, EmailService, MarkdownService, StrategyService};
pub use store::{JsonStore, RecordStore};
pub use types::AppState;
