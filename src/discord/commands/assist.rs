// Explicit help commands.
//
// Same generation path as the auto-responder, but errors are turned into a
// short apology instead of being swallowed, since somebody asked.

use crate::discord::assistant::replies::{plan_reply, ReplyPlan};
use crate::discord::{Context, Error};
use poise::serenity_prelude as serenity;

/// Explain a programming concept.
#[poise::command(slash_command, prefix_command)]
pub async fn explain(
    ctx: Context<'_>,
    #[description = "Concept to explain, e.g. javascript closures"]
    #[rest]
    concept: String,
) -> Result<(), Error> {
    let concept = concept.trim();
    if concept.is_empty() {
        ctx.say("Please specify a concept to explain. Example: `!explain javascript closures`")
            .await?;
        return Ok(());
    }

    ctx.defer().await?;

    match ctx.data().router.explain_on_request(concept).await {
        Ok(explanation) => send_plan(ctx, plan_reply(&explanation, None)).await?,
        Err(e) => {
            tracing::error!(concept, "Error generating explanation: {}", e);
            ctx.say("Sorry, I encountered an error while generating an explanation.")
                .await?;
        }
    }

    Ok(())
}

/// Fix the code in your message.
#[poise::command(slash_command, prefix_command)]
pub async fn fix(
    ctx: Context<'_>,
    #[description = "Code to fix, wrapped in ``` or ` marks"]
    #[rest]
    code: String,
) -> Result<(), Error> {
    ctx.defer().await?;

    match ctx.data().router.correct_on_request(&code).await {
        Ok(Some(correction)) => {
            send_plan(
                ctx,
                plan_reply(&correction.reply, Some(&correction.language)),
            )
            .await?;
        }
        Ok(None) => {
            ctx.say("Please include code in your message using ``` blocks.")
                .await?;
        }
        Err(e) => {
            tracing::error!("Error correcting code: {}", e);
            ctx.say("Sorry, I encountered an error while correcting the code.")
                .await?;
        }
    }

    Ok(())
}

async fn send_plan(ctx: Context<'_>, plan: ReplyPlan) -> Result<(), Error> {
    let ReplyPlan {
        chunks,
        mut attachment,
    } = plan;
    let last = chunks.len().saturating_sub(1);

    for (i, chunk) in chunks.into_iter().enumerate() {
        let mut reply = poise::CreateReply::default().content(chunk);
        if i == last {
            if let Some(file) = attachment.take() {
                reply = reply.attachment(serenity::CreateAttachment::bytes(
                    file.code.into_bytes(),
                    file.filename,
                ));
            }
        }
        ctx.send(reply).await?;
    }

    Ok(())
}
