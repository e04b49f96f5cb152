// src/therapist/mod.rs — Scripted therapist chat

pub mod context;
pub mod policy;
pub mod service;
pub mod session;
pub mod templates;
pub mod tone;

pub use context::{ContextBuilder, ConversationContext};
pub use policy::ResponsePolicy;
pub use service::ChatService;
pub use session::{ChatMessage, ChatRole, SessionManager, TherapistSession};
pub use tone::{Category, Tone};
