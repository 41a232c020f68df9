pub mod engine;
pub mod reply;

pub use engine::{BotStats, EngineOptions, ResponseEngine};
pub use reply::compose_reply;
