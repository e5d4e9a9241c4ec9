// The infra module contains implementations of core traits.
// Each feature implementation goes in its own submodule.

#[path = "settings/mod.rs"]
pub mod settings;

#[path = "bot_stats/mod.rs"]
pub mod bot_stats;

#[path = "ai/mod.rs"]
pub mod ai;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use std::path::Path;

/// Open (creating if needed) the sqlite database at `database_url`.
pub async fn connect_sqlite(database_url: &str) -> anyhow::Result<Pool<Sqlite>> {
    let path_str = database_url.trim_start_matches("sqlite://");
    if !database_url.contains(":memory:") && !Path::new(path_str).exists() {
        if let Some(parent) = Path::new(path_str).parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::File::create(path_str)?;
    }

    let conn_str = if database_url.starts_with("sqlite:") {
        database_url.to_string()
    } else {
        format!("sqlite://{}", database_url)
    };

    let pool = SqlitePoolOptions::new().connect(&conn_str).await?;
    Ok(pool)
}
