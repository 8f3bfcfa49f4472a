pub mod chat_service;
pub mod event_service;

pub use chat_service::{ChatBackend, ChatController, ChatView, IgnoreReason, SendOutcome};
pub use event_service::{
    ACTION_ATTRIBUTE, ActionControl, ActionOutcome, EventAction, EventBackend, EventDispatcher,
    EventId, PageHost,
};
