pub mod settings_models;
pub mod settings_service;
pub mod settings_store;

pub use settings_models::{ServerSettings, SettingsUpdate};
pub use settings_service::{SettingsError, SettingsService};
pub use settings_store::SettingsStore;
