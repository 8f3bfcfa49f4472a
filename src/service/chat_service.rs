use std::cell::RefCell;

use async_trait::async_trait;
use tracing::{debug, error, warn};

use crate::config::UiText;
use crate::errors::ClientError;
use crate::models::{ChatMessage, ChatWidgetState, ChatbotRequest, ChatbotResponse, WidgetPhase};

#[cfg(test)]
#[path = "chat_service_test.rs"]
mod chat_service_test;

/// Transport for one chatbot turn.
#[async_trait(?Send)]
pub trait ChatBackend {
    async fn send_turn(&self, request: &ChatbotRequest) -> Result<ChatbotResponse, ClientError>;
}

/// Everything the controller does to the page. Implementations own the
/// markup; `render_message` receives raw text and must escape it.
pub trait ChatView {
    fn set_open(&self, open: bool);
    fn show_welcome(&self);
    /// Append a bubble. Also removes the welcome block if it is shown.
    fn render_message(&self, message: &ChatMessage);
    fn set_typing(&self, typing: bool);
    fn clear_input(&self);
    /// Focus the input once the open animation has finished.
    fn focus_input(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Empty,
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Nothing was sent.
    Ignored(IgnoreReason),
    /// The assistant answered; both turns are in the history.
    Replied,
    /// The server answered without a usable reply; only the user turn is kept.
    Fallback,
    /// The request or its decoding failed; only the user turn is kept.
    Offline,
}

/// Controller for the floating chatbot widget.
///
/// State lives in a `RefCell` that is never held across an `.await`, so a
/// second submission made while a reply is pending sees `is_typing` and is
/// dropped.
pub struct ChatController<B, V> {
    backend: B,
    view: V,
    text: UiText,
    state: RefCell<ChatWidgetState>,
}

impl<B: ChatBackend, V: ChatView> ChatController<B, V> {
    pub fn new(backend: B, view: V, text: UiText) -> Self {
        Self { backend, view, text, state: RefCell::new(ChatWidgetState::default()) }
    }

    pub fn state(&self) -> ChatWidgetState {
        self.state.borrow().clone()
    }

    pub fn history(&self) -> Vec<ChatMessage> {
        self.state.borrow().conversation_history.clone()
    }

    pub fn phase(&self) -> WidgetPhase {
        self.state.borrow().phase()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn toggle(&self) {
        if self.state.borrow().is_open {
            self.close();
        } else {
            self.open();
        }
    }

    pub fn open(&self) {
        let show_welcome = {
            let mut state = self.state.borrow_mut();
            if state.is_open {
                return;
            }
            state.is_open = true;
            state.conversation_history.is_empty()
        };
        self.view.set_open(true);
        if show_welcome {
            self.view.show_welcome();
        }
        self.view.focus_input();
    }

    pub fn close(&self) {
        self.state.borrow_mut().is_open = false;
        self.view.set_open(false);
    }

    /// Run one chat turn for `raw` input.
    pub async fn send_message(&self, raw: &str) -> SendOutcome {
        let message = raw.trim();
        if message.is_empty() {
            return SendOutcome::Ignored(IgnoreReason::Empty);
        }

        let request = {
            let mut state = self.state.borrow_mut();
            if state.is_typing {
                debug!("chatbot reply pending, dropping submission");
                return SendOutcome::Ignored(IgnoreReason::Busy);
            }
            state.conversation_history.push(ChatMessage::user(message));
            state.is_typing = true;
            ChatbotRequest {
                message: message.to_string(),
                history: state.conversation_history.clone(),
            }
        };

        self.view.render_message(&ChatMessage::user(message));
        self.view.clear_input();
        self.view.set_typing(true);

        debug!(history_len = request.history.len(), "sending chatbot turn");
        let result = self.backend.send_turn(&request).await;

        self.state.borrow_mut().is_typing = false;
        self.view.set_typing(false);

        match result {
            Ok(response) => match response.reply() {
                Some(reply) => {
                    let reply = ChatMessage::assistant(reply);
                    self.view.render_message(&reply);
                    self.state.borrow_mut().conversation_history.push(reply);
                    SendOutcome::Replied
                }
                None => {
                    warn!(success = response.success, "chatbot returned no usable reply");
                    let text = response
                        .message
                        .filter(|m| !m.is_empty())
                        .unwrap_or_else(|| self.text.chat_fallback.clone());
                    self.view.render_message(&ChatMessage::assistant(text));
                    SendOutcome::Fallback
                }
            },
            Err(e) => {
                error!("chatbot request failed: {e}");
                self.view.render_message(&ChatMessage::assistant(self.text.chat_offline.clone()));
                SendOutcome::Offline
            }
        }
    }
}

/// Enter submits; Shift+Enter inserts a newline.
pub fn is_submit_key(key: &str, shift: bool) -> bool {
    key == "Enter" && !shift
}

/// Height for the auto-growing input given its content height.
pub fn input_height(scroll_height: i32, max_height: i32) -> i32 {
    scroll_height.min(max_height).max(0)
}
