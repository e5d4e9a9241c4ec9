// Bot presence. Discord-only glue, nothing here reaches into the core.

use poise::serenity_prelude as serenity;

/// Default status shown once the gateway is ready.
pub fn on_ready(ctx: &serenity::Context) {
    let activity = serenity::ActivityData::watching("for programming questions | !help");
    ctx.set_presence(Some(activity), serenity::OnlineStatus::Online);
}
