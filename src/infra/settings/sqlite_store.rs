use crate::core::settings::{ServerSettings, SettingsError, SettingsStore, SettingsUpdate};
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Pool, Row, Sqlite};

pub struct SqliteSettingsStore {
    pool: Pool<Sqlite>,
}

impl SqliteSettingsStore {
    pub async fn new(pool: Pool<Sqlite>) -> anyhow::Result<Self> {
        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS server_settings (
                server_id INTEGER PRIMARY KEY,
                prefix TEXT NOT NULL DEFAULT '!',
                auto_respond BOOLEAN NOT NULL DEFAULT 1,
                language_tag TEXT NOT NULL DEFAULT 'en'
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn settings_from_row(row: &SqliteRow) -> ServerSettings {
    ServerSettings {
        server_id: row.get::<i64, _>("server_id") as u64,
        prefix: row.get("prefix"),
        auto_respond: row.get("auto_respond"),
        language_tag: row.get("language_tag"),
    }
}

#[async_trait]
impl SettingsStore for SqliteSettingsStore {
    async fn get_settings(&self, server_id: u64) -> Result<Option<ServerSettings>, SettingsError> {
        let row = sqlx::query(
            "SELECT server_id, prefix, auto_respond, language_tag FROM server_settings WHERE server_id = ?",
        )
        .bind(server_id as i64)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| SettingsError::StorageError(e.to_string()))?;

        Ok(row.as_ref().map(settings_from_row))
    }

    async fn upsert_settings(
        &self,
        server_id: u64,
        update: SettingsUpdate,
    ) -> Result<ServerSettings, SettingsError> {
        // Read and write in one transaction so two partial updates can't
        // overwrite each other's fields.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| SettingsError::StorageError(e.to_string()))?;

        let row = sqlx::query(
            "SELECT server_id, prefix, auto_respond, language_tag FROM server_settings WHERE server_id = ?",
        )
        .bind(server_id as i64)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| SettingsError::StorageError(e.to_string()))?;

        let mut settings = row
            .as_ref()
            .map(settings_from_row)
            .unwrap_or_else(|| ServerSettings::with_defaults(server_id));
        settings.apply(&update);

        sqlx::query(
            r#"
            INSERT INTO server_settings (server_id, prefix, auto_respond, language_tag)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(server_id) DO UPDATE SET
                prefix = excluded.prefix,
                auto_respond = excluded.auto_respond,
                language_tag = excluded.language_tag
            "#,
        )
        .bind(server_id as i64)
        .bind(&settings.prefix)
        .bind(settings.auto_respond)
        .bind(&settings.language_tag)
        .execute(&mut *tx)
        .await
        .map_err(|e| SettingsError::StorageError(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| SettingsError::StorageError(e.to_string()))?;

        Ok(settings)
    }
}
