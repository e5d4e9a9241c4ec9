pub mod bot_stats_models;
pub mod bot_stats_service;
pub mod bot_stats_store;

pub use bot_stats_models::{BotStats, StatKind};
pub use bot_stats_service::{BotStatsService, StatsError};
pub use bot_stats_store::StatsStore;
