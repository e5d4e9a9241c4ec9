// This is the entry point of the Discord bot.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic)
// - `infra/` = Implementations of core traits (databases, APIs)
// - `discord/` = Discord-specific adapters (commands, events)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Set up the Discord framework
// 4. Register commands and event handlers

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "discord/discord_layer.rs"]
mod discord;
#[path = "infra/infra_layer.rs"]
mod infra;

use crate::core::analysis::QuestionClassifier;
use crate::core::assistant::{AssistantService, MessageRouter};
use crate::core::bot_stats::{BotStatsService, StatsStore};
use crate::core::settings::{SettingsService, SettingsStore};
use crate::discord::assistant::auto_responder;
use crate::discord::assistant::channel_gate::DEFAULT_HELPER_CHANNEL;
use crate::discord::assistant::HelperChannelGate;
use crate::discord::commands::presence;
use crate::discord::{Data, Error};
use crate::infra::ai::chat_completion_client::DEFAULT_ENDPOINT;
use crate::infra::ai::ChatCompletionClient;
use crate::infra::bot_stats::{InMemoryStatsStore, SqliteStatsStore};
use crate::infra::settings::{InMemorySettingsStore, SqliteSettingsStore};
use poise::serenity_prelude as serenity;
use std::sync::Arc;

const DEFAULT_MODEL: &str = "gpt-4o";

/// Event handler for non-command Discord events.
async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    if let serenity::FullEvent::Message { new_message } = event {
        if let Err(e) = auto_responder::handle_message(ctx, new_message, data).await {
            tracing::error!(
                channel_id = new_message.channel_id.get(),
                "Failed to deliver automatic reply: {}",
                e
            );
        }
    }

    Ok(())
}

/// Pick the storage backend named by `STORAGE_BACKEND`.
async fn build_stores(
    backend: &str,
    data_dir: &str,
) -> anyhow::Result<(Box<dyn SettingsStore>, Box<dyn StatsStore>)> {
    if backend == "memory" {
        tracing::warn!("Using in-memory storage; settings and stats reset on restart");
        return Ok((
            Box::new(InMemorySettingsStore::new()),
            Box::new(InMemoryStatsStore::new()),
        ));
    }

    if backend != "sqlite" {
        tracing::warn!(backend, "Unknown STORAGE_BACKEND, falling back to sqlite");
    }

    std::fs::create_dir_all(data_dir)?;
    let pool = infra::connect_sqlite(&format!("{}/helper.db", data_dir)).await?;

    let settings_store = SqliteSettingsStore::new(pool.clone()).await?;
    let stats_store = SqliteStatsStore::new(pool).await?;
    Ok((Box::new(settings_store), Box::new(stats_store)))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let token = std::env::var("DISCORD_TOKEN").expect(
        "Missing DISCORD_TOKEN environment variable! Create a .env file with your bot token.",
    );
    let api_key = std::env::var("OPENAI_API_KEY")
        .or_else(|_| std::env::var("API_KEY"))
        .expect("Missing OPENAI_API_KEY environment variable!");
    let endpoint = std::env::var("AI_API_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
    let model = std::env::var("AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
    let helper_channel = std::env::var("HELPER_CHANNEL_NAME")
        .unwrap_or_else(|_| DEFAULT_HELPER_CHANNEL.to_string());
    let classifier = match std::env::var("CLASSIFIER_THRESHOLD") {
        Ok(raw) => match raw.parse::<f32>() {
            Ok(threshold) => QuestionClassifier::with_threshold(threshold),
            Err(e) => {
                tracing::warn!(%raw, "Invalid CLASSIFIER_THRESHOLD, using default: {}", e);
                QuestionClassifier::default()
            }
        },
        Err(_) => QuestionClassifier::default(),
    };
    let threshold = classifier.threshold();
    let backend = std::env::var("STORAGE_BACKEND").unwrap_or_else(|_| "sqlite".to_string());
    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());

    // ============================================================
    // DEPENDENCY INJECTION SETUP
    // ============================================================
    // Stores are boxed so the backend can be chosen at runtime; the services
    // only see the traits.

    let (settings_store, stats_store) = build_stores(&backend, &data_dir)
        .await
        .expect("Failed to initialize storage");

    let settings_service = Arc::new(SettingsService::new(settings_store));
    let stats_service = Arc::new(BotStatsService::new(stats_store));

    let ai_client = ChatCompletionClient::new(api_key, Some(endpoint));
    let assistant = Arc::new(AssistantService::new(ai_client, model.clone()));

    let router = Arc::new(MessageRouter::new(
        classifier,
        Box::new(HelperChannelGate::new(Some(helper_channel.clone()))),
        Arc::clone(&assistant),
        Arc::clone(&settings_service),
        Arc::clone(&stats_service),
    ));

    tracing::info!(
        %backend,
        %model,
        %helper_channel,
        threshold,
        "Services initialized"
    );

    let data = Data {
        router,
        settings: settings_service,
        stats: stats_service,
    };

    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT // Required to read message content
        | serenity::GatewayIntents::GUILDS;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                discord::commands::help::help(),
                discord::commands::assist::explain(),
                discord::commands::assist::fix(),
                discord::commands::settings::settings(),
                discord::commands::settings::toggle(),
                discord::commands::stats::botstats(),
            ],
            prefix_options: poise::PrefixFrameworkOptions {
                // Each guild picks its own prefix.
                dynamic_prefix: Some(|ctx| {
                    Box::pin(async move {
                        let guild_id = ctx.guild_id.map(|id| id.get());
                        Ok(Some(ctx.data.settings.prefix_for(guild_id).await))
                    })
                }),
                mention_as_prefix: true,
                ..Default::default()
            },
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            on_error: |error| {
                Box::pin(async move {
                    if let poise::FrameworkError::Command { error, ctx, .. } = &error {
                        tracing::error!(
                            command = %ctx.command().qualified_name,
                            "Command failed: {}",
                            error
                        );
                    }
                    if let Err(e) = poise::builtins::on_error(error).await {
                        tracing::error!("Error while handling error: {}", e);
                    }
                })
            },
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                tracing::info!(user = %ready.user.name, "Bot is starting up");

                // Register slash commands globally (takes up to an hour to propagate)
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;

                tracing::info!("Commands registered");
                presence::on_ready(ctx);

                Ok(data)
            })
        })
        .build();

    // Create the client and start the bot
    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .expect("Error creating client");

    client.start().await.expect("Error running bot");
}
