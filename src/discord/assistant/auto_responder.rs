// Message event glue for the auto-responder.
//
// Translate the serenity message into an `IncomingMessage`, let the core router
// decide, then deliver whatever it produced. No analysis happens here.

use super::replies::{plan_reply, ReplyPlan};
use crate::core::assistant::{IncomingMessage, RouteDecision};
use crate::discord::{Data, Error};
use poise::serenity_prelude as serenity;

pub async fn handle_message(
    ctx: &serenity::Context,
    message: &serenity::Message,
    data: &Data,
) -> Result<(), Error> {
    // Cheap check first so we never fetch channel info for our own replies.
    if message.author.bot {
        return Ok(());
    }

    // Commands can also be invoked as `@bot explain ...`.
    let bot_user_id = ctx.cache.current_user().id.get();
    let channel_name = text_channel_name(ctx, message).await;

    let incoming = IncomingMessage {
        content: message.content.clone(),
        author_is_bot: message.author.bot,
        channel_id: message.channel_id.get(),
        channel_name,
        server_id: message.guild_id.map(|id| id.get()),
        bot_user_id: Some(bot_user_id),
    };

    let decision = data.router.route(&incoming).await;
    if !decision.is_action() {
        tracing::trace!(channel_id = incoming.channel_id, ?decision, "No automatic reply");
        return Ok(());
    }

    answer(ctx, message, data, &decision).await
}

async fn answer(
    ctx: &serenity::Context,
    message: &serenity::Message,
    data: &Data,
    decision: &RouteDecision,
) -> Result<(), Error> {
    tracing::info!(
        guild_id = ?message.guild_id,
        channel_id = message.channel_id.get(),
        ?decision,
        "Answering message"
    );

    let _ = message.channel_id.broadcast_typing(&ctx.http).await;

    // Failures were already logged by the router; stay silent in the channel.
    let Some(reply) = data.router.respond(decision).await else {
        return Ok(());
    };

    let language = match decision {
        RouteDecision::Correct { language, .. } => Some(language.as_str()),
        _ => None,
    };

    send_plan(ctx, message, plan_reply(&reply, language)).await
}

/// Name of the channel when it is a plain guild text channel.
async fn text_channel_name(ctx: &serenity::Context, message: &serenity::Message) -> Option<String> {
    message.guild_id?;

    match message.channel(ctx).await {
        Ok(serenity::Channel::Guild(channel)) if channel.kind == serenity::ChannelType::Text => {
            Some(channel.name)
        }
        Ok(_) => None,
        Err(e) => {
            tracing::warn!(channel_id = message.channel_id.get(), "Failed to fetch channel: {}", e);
            None
        }
    }
}

/// Send a reply plan as a chain of messages. The first one replies to the
/// original message; the attachment rides on the last.
async fn send_plan(
    ctx: &serenity::Context,
    message: &serenity::Message,
    plan: ReplyPlan,
) -> Result<(), Error> {
    let ReplyPlan {
        chunks,
        mut attachment,
    } = plan;
    let last = chunks.len().saturating_sub(1);

    for (i, chunk) in chunks.into_iter().enumerate() {
        let mut builder = serenity::CreateMessage::new().content(chunk);
        if i == 0 {
            builder = builder.reference_message(message);
        }
        if i == last {
            if let Some(file) = attachment.take() {
                builder = builder.add_file(serenity::CreateAttachment::bytes(
                    file.code.into_bytes(),
                    file.filename,
                ));
            }
        }

        message.channel_id.send_message(&ctx.http, builder).await?;
    }

    Ok(())
}
