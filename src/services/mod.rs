pub mod blog_service;
pub mod catalog;
pub mod email_service;
pub mod markdown_service;
pub mod projection;
pub mod strategy_service;

pub use blog_service::BlogService;
pub use email_service::EmailService;
pub use markdown_service::MarkdownService;
pub use strategy_service::StrategyService;
