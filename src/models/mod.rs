pub mod blog;
pub mod fields;
pub mod strategy;

pub use blog::BlogPost;
pub use fields::{ChangeEntry, FaqEntry, ProtocolFee, RiskLevel, RiskNote, Step};
pub use strategy::Strategy;
