use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "models_test.rs"]
mod models_test;

// ── Chat ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One turn of the chatbot conversation, exactly as sent back to the server
/// in `history`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: MessageRole::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: MessageRole::Assistant, content: content.into() }
    }
}

/// Derived position of the widget in its open/close/await cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetPhase {
    Closed,
    OpenIdle,
    OpenAwaitingReply,
}

/// State owned by a single chat widget controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatWidgetState {
    pub is_open: bool,
    pub conversation_history: Vec<ChatMessage>,
    pub is_typing: bool,
}

impl ChatWidgetState {
    pub fn phase(&self) -> WidgetPhase {
        match (self.is_open, self.is_typing) {
            (false, _) => WidgetPhase::Closed,
            (true, false) => WidgetPhase::OpenIdle,
            (true, true) => WidgetPhase::OpenAwaitingReply,
        }
    }
}

/// Body of `POST /api/chatbot`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatbotRequest {
    pub message: String,
    pub history: Vec<ChatMessage>,
}

/// Reply from `POST /api/chatbot`. `message` carries either the assistant's
/// answer or, when `success` is false, an error text for the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChatbotResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl ChatbotResponse {
    /// The assistant reply, if the server produced a usable one.
    pub fn reply(&self) -> Option<&str> {
        if !self.success {
            return None;
        }
        self.message.as_deref().filter(|m| !m.is_empty())
    }
}

// ── Events ────────────────────────────────────────────────────────────────────

/// Reply from the `/event/{id}/{action}` endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub new_points: Option<i64>,
}

// ── Alerts ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Danger,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Danger => "danger",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }

    /// Bootstrap alert class, e.g. `alert-warning`.
    pub fn css_class(&self) -> String {
        format!("alert-{}", self.as_str())
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
