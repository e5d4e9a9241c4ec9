use crate::core::bot_stats::{BotStats, StatKind, StatsError, StatsStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Row, Sqlite};

/// Counters live in a single row with id 1.
pub struct SqliteStatsStore {
    pool: Pool<Sqlite>,
}

impl SqliteStatsStore {
    pub async fn new(pool: Pool<Sqlite>) -> anyhow::Result<Self> {
        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS bot_stats (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                questions_answered INTEGER NOT NULL DEFAULT 0,
                code_fixed INTEGER NOT NULL DEFAULT 0,
                concepts_explained INTEGER NOT NULL DEFAULT 0,
                last_updated TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn stats_from_row(row: &sqlx::sqlite::SqliteRow) -> BotStats {
    BotStats {
        questions_answered: row.get::<i64, _>("questions_answered") as u64,
        code_fixed: row.get::<i64, _>("code_fixed") as u64,
        concepts_explained: row.get::<i64, _>("concepts_explained") as u64,
        last_updated: row.get::<DateTime<Utc>, _>("last_updated"),
    }
}

#[async_trait]
impl StatsStore for SqliteStatsStore {
    async fn get_stats(&self) -> Result<Option<BotStats>, StatsError> {
        let row = sqlx::query(
            "SELECT questions_answered, code_fixed, concepts_explained, last_updated FROM bot_stats WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StatsError::StorageError(e.to_string()))?;

        Ok(row.as_ref().map(stats_from_row))
    }

    async fn increment(&self, kind: StatKind) -> Result<BotStats, StatsError> {
        // Column names come from a closed enum, never from user input.
        let column = kind.column();
        let sql = format!(
            r#"
            INSERT INTO bot_stats (id, {column}, last_updated)
            VALUES (1, 1, ?)
            ON CONFLICT(id) DO UPDATE SET
                {column} = {column} + 1,
                last_updated = excluded.last_updated
            RETURNING questions_answered, code_fixed, concepts_explained, last_updated
            "#
        );

        let row = sqlx::query(&sql)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StatsError::StorageError(e.to_string()))?;

        Ok(stats_from_row(&row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::test_support::temp_pool;
    use std::sync::Arc;

    #[tokio::test]
    async fn counters_persist_across_stores() {
        let (_dir, pool) = temp_pool().await;

        let store = SqliteStatsStore::new(pool.clone()).await.unwrap();
        assert!(store.get_stats().await.unwrap().is_none());

        store.increment(StatKind::QuestionsAnswered).await.unwrap();
        store.increment(StatKind::QuestionsAnswered).await.unwrap();
        let stats = store.increment(StatKind::ConceptsExplained).await.unwrap();
        assert_eq!(stats.questions_answered, 2);
        assert_eq!(stats.concepts_explained, 1);
        assert_eq!(stats.code_fixed, 0);

        let reopened = SqliteStatsStore::new(pool).await.unwrap();
        let stats = reopened.get_stats().await.unwrap().unwrap();
        assert_eq!(stats.questions_answered, 2);
        assert_eq!(stats.concepts_explained, 1);
    }

    #[tokio::test]
    async fn concurrent_increments_are_atomic() {
        let (_dir, pool) = temp_pool().await;
        let store = Arc::new(SqliteStatsStore::new(pool).await.unwrap());

        let mut handles = Vec::new();
        for _ in 0..20 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.increment(StatKind::CodeFixed).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let stats = store.get_stats().await.unwrap().unwrap();
        assert_eq!(stats.code_fixed, 20);
    }
}
