// Per-guild settings: command prefix, auto-respond switch, language tag.
//
// Messages from DMs (no guild) and guilds that never changed anything get the
// defaults without a row being written.

use super::settings_models::{ServerSettings, SettingsUpdate, DEFAULT_PREFIX};
use super::settings_store::SettingsStore;
use thiserror::Error;

const MAX_PREFIX_LEN: usize = 5;
const MIN_LANGUAGE_LEN: usize = 2;
const MAX_LANGUAGE_LEN: usize = 10;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Prefix must be 1-5 characters without spaces")]
    InvalidPrefix,

    #[error("Language must be 2-10 letters, e.g. `en` or `pt-BR`")]
    InvalidLanguage,
}

pub struct SettingsService<S: SettingsStore> {
    store: S,
}

impl<S: SettingsStore> SettingsService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Settings that apply to a message from `server_id` (`None` for DMs).
    pub async fn effective(&self, server_id: Option<u64>) -> Result<ServerSettings, SettingsError> {
        let Some(server_id) = server_id else {
            return Ok(ServerSettings::with_defaults(0));
        };

        Ok(self
            .store
            .get_settings(server_id)
            .await?
            .unwrap_or_else(|| ServerSettings::with_defaults(server_id)))
    }

    /// Command prefix for a guild. Falls back to the default on storage errors
    /// so a flaky store never makes the bot deaf to commands.
    pub async fn prefix_for(&self, server_id: Option<u64>) -> String {
        match self.effective(server_id).await {
            Ok(settings) => settings.prefix,
            Err(e) => {
                tracing::warn!(?server_id, "Falling back to default prefix: {}", e);
                DEFAULT_PREFIX.to_string()
            }
        }
    }

    /// Flip auto-respond and return the new value.
    pub async fn toggle_auto_respond(&self, server_id: u64) -> Result<bool, SettingsError> {
        let current = self.effective(Some(server_id)).await?;
        let updated = self
            .store
            .upsert_settings(
                server_id,
                SettingsUpdate {
                    auto_respond: Some(!current.auto_respond),
                    ..Default::default()
                },
            )
            .await?;

        tracing::info!(server_id, auto_respond = updated.auto_respond, "Auto-respond toggled");
        Ok(updated.auto_respond)
    }

    pub async fn set_prefix(
        &self,
        server_id: u64,
        prefix: &str,
    ) -> Result<ServerSettings, SettingsError> {
        let prefix = prefix.trim();
        if prefix.is_empty()
            || prefix.chars().count() > MAX_PREFIX_LEN
            || prefix.chars().any(char::is_whitespace)
        {
            return Err(SettingsError::InvalidPrefix);
        }

        self.update(
            server_id,
            SettingsUpdate {
                prefix: Some(prefix.to_string()),
                ..Default::default()
            },
        )
        .await
    }

    pub async fn set_language(
        &self,
        server_id: u64,
        language_tag: &str,
    ) -> Result<ServerSettings, SettingsError> {
        let tag = language_tag.trim();
        let len = tag.chars().count();
        if !(MIN_LANGUAGE_LEN..=MAX_LANGUAGE_LEN).contains(&len)
            || !tag.chars().all(|c| c.is_ascii_alphabetic() || c == '-')
        {
            return Err(SettingsError::InvalidLanguage);
        }

        self.update(
            server_id,
            SettingsUpdate {
                language_tag: Some(tag.to_string()),
                ..Default::default()
            },
        )
        .await
    }

    pub async fn update(
        &self,
        server_id: u64,
        update: SettingsUpdate,
    ) -> Result<ServerSettings, SettingsError> {
        self.store.upsert_settings(server_id, update).await
    }
}
