use crate::core::bot_stats::{BotStats, StatKind, StatsError, StatsStore};
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Single process-wide record behind a mutex; `None` until the first increment.
pub struct InMemoryStatsStore {
    stats: Mutex<Option<BotStats>>,
}

impl InMemoryStatsStore {
    pub fn new() -> Self {
        Self {
            stats: Mutex::new(None),
        }
    }
}

impl Default for InMemoryStatsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StatsStore for InMemoryStatsStore {
    async fn get_stats(&self) -> Result<Option<BotStats>, StatsError> {
        Ok(self.stats.lock().await.clone())
    }

    async fn increment(&self, kind: StatKind) -> Result<BotStats, StatsError> {
        let mut guard = self.stats.lock().await;
        let stats = guard.get_or_insert_with(BotStats::zeroed);
        stats.increment(kind);
        Ok(stats.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_increment_creates_the_record() {
        let store = InMemoryStatsStore::new();
        assert!(store.get_stats().await.unwrap().is_none());

        let stats = store.increment(StatKind::CodeFixed).await.unwrap();
        assert_eq!(stats.code_fixed, 1);
        assert_eq!(stats.questions_answered, 0);
        assert_eq!(store.get_stats().await.unwrap(), Some(stats));
    }

    #[tokio::test]
    async fn increment_moves_the_timestamp_forward() {
        let store = InMemoryStatsStore::new();
        let first = store.increment(StatKind::QuestionsAnswered).await.unwrap();
        let second = store.increment(StatKind::QuestionsAnswered).await.unwrap();

        assert_eq!(second.questions_answered, 2);
        assert!(second.last_updated >= first.last_updated);
    }
}
