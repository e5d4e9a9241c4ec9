use crate::core::assistant::{AdmissionGate, IncomingMessage};

pub const DEFAULT_HELPER_CHANNEL: &str = "helperbot-chat";

/// Keeps the bot quiet in every named guild text channel except one.
///
/// Messages without a channel name (DMs, threads) are always admitted. With no
/// required name the gate admits everything.
pub struct HelperChannelGate {
    channel_name: Option<String>,
}

impl HelperChannelGate {
    pub fn new(channel_name: Option<String>) -> Self {
        Self {
            channel_name: channel_name.filter(|name| !name.trim().is_empty()),
        }
    }
}

impl AdmissionGate for HelperChannelGate {
    fn admits(&self, message: &IncomingMessage) -> bool {
        match (&self.channel_name, &message.channel_name) {
            (Some(required), Some(actual)) => required == actual,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_channel(name: Option<&str>) -> IncomingMessage {
        IncomingMessage {
            content: "hi".into(),
            channel_name: name.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn only_the_helper_channel_is_admitted() {
        let gate = HelperChannelGate::new(Some(DEFAULT_HELPER_CHANNEL.to_string()));
        assert!(gate.admits(&in_channel(Some("helperbot-chat"))));
        assert!(!gate.admits(&in_channel(Some("general"))));
    }

    #[test]
    fn unnamed_channels_pass() {
        let gate = HelperChannelGate::new(Some(DEFAULT_HELPER_CHANNEL.to_string()));
        assert!(gate.admits(&in_channel(None)));
    }

    #[test]
    fn empty_name_disables_the_restriction() {
        let gate = HelperChannelGate::new(Some("  ".to_string()));
        assert!(gate.admits(&in_channel(Some("general"))));

        let gate = HelperChannelGate::new(None);
        assert!(gate.admits(&in_channel(Some("general"))));
    }
}
