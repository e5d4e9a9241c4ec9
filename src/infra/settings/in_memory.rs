// In-memory SettingsStore. Used by tests and when STORAGE_BACKEND=memory;
// everything is lost on restart.

use crate::core::settings::{ServerSettings, SettingsError, SettingsStore, SettingsUpdate};
use async_trait::async_trait;
use dashmap::DashMap;

/// Guild id -> settings.
///
/// DashMap's entry API holds the shard lock for the whole read-modify-write,
/// so concurrent updates to one guild never interleave.
pub struct InMemorySettingsStore {
    data: DashMap<u64, ServerSettings>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
        }
    }
}

impl Default for InMemorySettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn get_settings(&self, server_id: u64) -> Result<Option<ServerSettings>, SettingsError> {
        Ok(self.data.get(&server_id).map(|entry| entry.value().clone()))
    }

    async fn upsert_settings(
        &self,
        server_id: u64,
        update: SettingsUpdate,
    ) -> Result<ServerSettings, SettingsError> {
        let mut entry = self
            .data
            .entry(server_id)
            .or_insert_with(|| ServerSettings::with_defaults(server_id));
        entry.apply(&update);
        Ok(entry.value().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_guild_is_none() {
        let store = InMemorySettingsStore::new();
        assert!(store.get_settings(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn upsert_starts_from_defaults() {
        let store = InMemorySettingsStore::new();
        let settings = store
            .upsert_settings(
                1,
                SettingsUpdate {
                    prefix: Some("?".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(settings.prefix, "?");
        assert!(settings.auto_respond);
        assert_eq!(store.get_settings(1).await.unwrap(), Some(settings));
        assert!(store.get_settings(2).await.unwrap().is_none());
    }
}
