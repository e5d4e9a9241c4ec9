use super::bot_stats_models::{BotStats, StatKind};
use super::bot_stats_service::StatsError;
use async_trait::async_trait;

/// Storage port for the global counters.
#[async_trait]
pub trait StatsStore: Send + Sync {
    async fn get_stats(&self) -> Result<Option<BotStats>, StatsError>;

    /// Add one to `kind`, creating the record on first use. Must be a single
    /// read-modify-write so concurrent messages never lose a count.
    async fn increment(&self, kind: StatKind) -> Result<BotStats, StatsError>;
}

#[async_trait]
impl StatsStore for Box<dyn StatsStore> {
    async fn get_stats(&self) -> Result<Option<BotStats>, StatsError> {
        (**self).get_stats().await
    }

    async fn increment(&self, kind: StatKind) -> Result<BotStats, StatsError> {
        (**self).increment(kind).await
    }
}
