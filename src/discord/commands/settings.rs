// Per-guild settings commands. Thin wrappers over `SettingsService`.

use crate::core::settings::{ServerSettings, SettingsError};
use crate::discord::{Context, Error};
use poise::serenity_prelude as serenity;

fn settings_embed(settings: &ServerSettings) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title("Server Settings")
        .color(0x5865F2)
        .field("Prefix", &settings.prefix, false)
        .field(
            "Auto Respond",
            if settings.auto_respond { "On" } else { "Off" },
            false,
        )
        .field("Language", &settings.language_tag, false)
}

/// Show current server settings.
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    subcommands("show", "prefix", "language")
)]
pub async fn settings(ctx: Context<'_>) -> Result<(), Error> {
    show_settings(ctx).await
}

/// Show current server settings.
#[poise::command(slash_command, prefix_command, guild_only)]
pub async fn show(ctx: Context<'_>) -> Result<(), Error> {
    show_settings(ctx).await
}

async fn show_settings(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("This command can only be used in a server.")?;
    let settings = ctx.data().settings.effective(Some(guild_id.get())).await?;

    ctx.send(poise::CreateReply::default().embed(settings_embed(&settings)))
        .await?;
    Ok(())
}

/// Change the command prefix.
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "ADMINISTRATOR"
)]
pub async fn prefix(
    ctx: Context<'_>,
    #[description = "New prefix, 1-5 characters"] new_prefix: String,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("This command can only be used in a server.")?;

    match ctx.data().settings.set_prefix(guild_id.get(), &new_prefix).await {
        Ok(settings) => {
            ctx.say(format!("Command prefix is now `{}`.", settings.prefix))
                .await?;
        }
        Err(SettingsError::InvalidPrefix) => {
            ctx.say(SettingsError::InvalidPrefix.to_string()).await?;
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

/// Change the server language tag.
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "ADMINISTRATOR"
)]
pub async fn language(
    ctx: Context<'_>,
    #[description = "Language tag, e.g. en or pt-BR"] tag: String,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("This command can only be used in a server.")?;

    match ctx.data().settings.set_language(guild_id.get(), &tag).await {
        Ok(settings) => {
            ctx.say(format!("Language is now `{}`.", settings.language_tag))
                .await?;
        }
        Err(SettingsError::InvalidLanguage) => {
            ctx.say(SettingsError::InvalidLanguage.to_string()).await?;
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

/// Toggle automatic responses on/off.
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "MANAGE_GUILD"
)]
pub async fn toggle(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("This command can only be used in a server.")?;
    let enabled = ctx
        .data()
        .settings
        .toggle_auto_respond(guild_id.get())
        .await?;

    ctx.say(format!(
        "Automatic responses are now {}.",
        if enabled { "on" } else { "off" }
    ))
    .await?;
    Ok(())
}
