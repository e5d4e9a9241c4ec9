use serde::{Deserialize, Serialize};

pub const DEFAULT_PREFIX: &str = "!";
pub const DEFAULT_LANGUAGE: &str = "en";

/// Per-guild configuration. One row per guild, created on first write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    pub server_id: u64,
    pub prefix: String,
    pub auto_respond: bool,
    pub language_tag: String,
}

impl ServerSettings {
    pub fn with_defaults(server_id: u64) -> Self {
        Self {
            server_id,
            prefix: DEFAULT_PREFIX.to_string(),
            auto_respond: true,
            language_tag: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Overwrite the fields present in `update`.
    pub fn apply(&mut self, update: &SettingsUpdate) {
        if let Some(prefix) = &update.prefix {
            self.prefix = prefix.clone();
        }
        if let Some(auto_respond) = update.auto_respond {
            self.auto_respond = auto_respond;
        }
        if let Some(language_tag) = &update.language_tag {
            self.language_tag = language_tag.clone();
        }
    }
}

/// Partial settings change; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub prefix: Option<String>,
    pub auto_respond: Option<bool>,
    pub language_tag: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_new_guilds() {
        let settings = ServerSettings::with_defaults(42);
        assert_eq!(settings.prefix, "!");
        assert!(settings.auto_respond);
        assert_eq!(settings.language_tag, "en");
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let mut settings = ServerSettings::with_defaults(42);
        settings.apply(&SettingsUpdate {
            auto_respond: Some(false),
            ..Default::default()
        });

        assert!(!settings.auto_respond);
        assert_eq!(settings.prefix, "!");
        assert_eq!(settings.language_tag, "en");
    }
}
