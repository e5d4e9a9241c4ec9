// Usage counters. Atomicity belongs to the store, see `StatsStore::increment`.

use super::bot_stats_models::{BotStats, StatKind};
use super::bot_stats_store::StatsStore;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Storage error: {0}")]
    StorageError(String),
}

pub struct BotStatsService<S: StatsStore> {
    store: S,
}

impl<S: StatsStore> BotStatsService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn record(&self, kind: StatKind) -> Result<BotStats, StatsError> {
        let stats = self.store.increment(kind).await?;
        tracing::debug!(%kind, total = stats.get(kind), "Stat recorded");
        Ok(stats)
    }

    /// Current counters; all zero if nothing was recorded yet.
    pub async fn snapshot(&self) -> Result<BotStats, StatsError> {
        Ok(self.store.get_stats().await?.unwrap_or_else(BotStats::zeroed))
    }
}
