use super::settings_models::{ServerSettings, SettingsUpdate};
use super::settings_service::SettingsError;
use async_trait::async_trait;

/// Storage port for per-guild settings.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get_settings(&self, server_id: u64) -> Result<Option<ServerSettings>, SettingsError>;

    /// Apply `update` on top of the stored row (or the defaults when there is
    /// none) and return the result.
    async fn upsert_settings(
        &self,
        server_id: u64,
        update: SettingsUpdate,
    ) -> Result<ServerSettings, SettingsError>;
}

// Lets the composition root pick a backend at runtime.
#[async_trait]
impl SettingsStore for Box<dyn SettingsStore> {
    async fn get_settings(&self, server_id: u64) -> Result<Option<ServerSettings>, SettingsError> {
        (**self).get_settings(server_id).await
    }

    async fn upsert_settings(
        &self,
        server_id: u64,
        update: SettingsUpdate,
    ) -> Result<ServerSettings, SettingsError> {
        (**self).upsert_settings(server_id, update).await
    }
}
