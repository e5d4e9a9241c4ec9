use crate::discord::{Context, Error};
use poise::serenity_prelude as serenity;

struct CommandMetadata {
    usage: &'static str,
    description: &'static str,
    priority: i32,
}

fn get_command_metadata(name: &str) -> Option<CommandMetadata> {
    let metadata = match name {
        "help" => CommandMetadata {
            usage: "help",
            description: "Display this help message",
            priority: 100,
        },
        "explain" => CommandMetadata {
            usage: "explain [concept]",
            description: "Explain a programming concept",
            priority: 90,
        },
        "fix" => CommandMetadata {
            usage: "fix [code]",
            description: "Fix code in your message (include code in ``` blocks)",
            priority: 80,
        },
        "settings" => CommandMetadata {
            usage: "settings",
            description: "Show current server settings",
            priority: 70,
        },
        "toggle" => CommandMetadata {
            usage: "toggle",
            description: "Toggle automatic responses on/off",
            priority: 60,
        },
        "botstats" => CommandMetadata {
            usage: "botstats",
            description: "Show how often the bot has helped",
            priority: 50,
        },
        _ => return None,
    };
    Some(metadata)
}

/// Show what the bot can do.
#[poise::command(slash_command, prefix_command)]
pub async fn help(ctx: Context<'_>) -> Result<(), Error> {
    let prefix = ctx
        .data()
        .settings
        .prefix_for(ctx.guild_id().map(|id| id.get()))
        .await;

    let mut entries: Vec<(i32, String, String)> = ctx
        .framework()
        .options()
        .commands
        .iter()
        .filter(|command| !command.hide_in_help)
        .map(|command| match get_command_metadata(&command.name) {
            Some(metadata) => (
                metadata.priority,
                format!("{}{}", prefix, metadata.usage),
                metadata.description.to_string(),
            ),
            None => (
                0,
                format!("{}{}", prefix, command.name),
                command
                    .description
                    .clone()
                    .unwrap_or_else(|| "No description provided.".to_string()),
            ),
        })
        .collect();

    // Highest priority first, then by name.
    entries.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

    let mut embed = serenity::CreateEmbed::new()
        .title("SourceHelperBot Help")
        .description("I can automatically detect programming questions and provide help.")
        .color(0x5865F2);

    for (_, usage, description) in entries {
        embed = embed.field(usage, description, false);
    }

    embed = embed.footer(serenity::CreateEmbedFooter::new(
        "Every command also works as a slash command.",
    ));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_command_has_usage() {
        for name in ["help", "explain", "fix", "settings", "toggle", "botstats"] {
            let metadata = get_command_metadata(name).unwrap();
            assert!(metadata.usage.starts_with(name));
        }
        assert!(get_command_metadata("unknown").is_none());
    }
}
