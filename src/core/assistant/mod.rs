pub mod assistant_service;
pub mod formatting;
pub mod message_router;
pub mod models;
pub mod prompts;

pub use assistant_service::{AiProvider, AssistantService, GenerationError, ResponseGenerator};
pub use message_router::{
    AdmissionGate, Correction, IncomingMessage, MessageRouter, NoActionReason, RouteDecision,
};
pub use models::{AiConfig, AiMessage, AiProviderResponse};
