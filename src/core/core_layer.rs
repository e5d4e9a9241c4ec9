// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "analysis/mod.rs"]
pub mod analysis;

#[path = "assistant/mod.rs"]
pub mod assistant;

#[path = "settings/mod.rs"]
pub mod settings;

#[path = "bot_stats/mod.rs"]
pub mod bot_stats;
