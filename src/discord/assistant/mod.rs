// Discord side of the auto-responder: admission, event handling, reply shaping.

pub mod auto_responder;
pub mod channel_gate;
pub mod replies;

pub use channel_gate::HelperChannelGate;
