// Discord layer - commands and event handlers.

#[path = "commands/command_catalog.rs"]
pub mod commands;

#[path = "assistant/mod.rs"]
pub mod assistant;

use crate::core::assistant::{AssistantService, MessageRouter};
use crate::core::bot_stats::{BotStatsService, StatsStore};
use crate::core::settings::{SettingsService, SettingsStore};
use crate::infra::ai::ChatCompletionClient;
use std::sync::Arc;

pub type Assistant = AssistantService<ChatCompletionClient>;
pub type Settings = SettingsService<Box<dyn SettingsStore>>;
pub type Stats = BotStatsService<Box<dyn StatsStore>>;
pub type Router = MessageRouter<Assistant, Box<dyn SettingsStore>, Box<dyn StatsStore>>;

/// Shared state handed to every command and event.
pub struct Data {
    pub router: Arc<Router>,
    pub settings: Arc<Settings>,
    pub stats: Arc<Stats>,
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;
