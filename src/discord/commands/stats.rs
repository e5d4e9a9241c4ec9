use crate::core::bot_stats::StatKind;
use crate::discord::{Context, Error};
use poise::serenity_prelude as serenity;

/// Show how often the bot has helped.
#[poise::command(slash_command, prefix_command)]
pub async fn botstats(ctx: Context<'_>) -> Result<(), Error> {
    let stats = ctx.data().stats.snapshot().await?;

    let mut embed = serenity::CreateEmbed::new()
        .title("SourceHelperBot Stats")
        .color(0x5865F2);

    for kind in [
        StatKind::QuestionsAnswered,
        StatKind::CodeFixed,
        StatKind::ConceptsExplained,
    ] {
        embed = embed.field(kind.to_string(), stats.get(kind).to_string(), true);
    }

    embed = embed.footer(serenity::CreateEmbedFooter::new(format!(
        "Last updated {}",
        stats.last_updated.format("%Y-%m-%d %H:%M UTC")
    )));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}
