use std::cell::Cell;
use std::time::Duration;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlElement, HtmlTextAreaElement};

use sport_connect::alerts::{self, AlertId, AlertStack, AlertStore, AlertTimings};
use sport_connect::markup;
use sport_connect::models::{ChatMessage, MessageRole, Severity};
use sport_connect::service::ChatView;
use sport_connect::ClientConfig;

use crate::dom;

const ASSISTANT_AVATAR: &str = "⚽";

// ── Alerts ────────────────────────────────────────────────────────────────────

/// Reactive alert stack shared by the alert list and the page host.
#[derive(Clone, Copy)]
pub struct AlertState(pub RwSignal<AlertStack>);

impl AlertState {
    pub fn new() -> Self {
        Self(RwSignal::new(AlertStack::new()))
    }

    /// Push a banner and start its auto-dismiss timer.
    pub fn show(&self, message: &str, severity: Severity, timings: AlertTimings) {
        let Some(id) = self.0.try_update(|stack| stack.push(message, severity)) else {
            return;
        };
        let state = *self;
        spawn_local(async move {
            alerts::auto_dismiss(&state, id, timings, gloo_timers::future::sleep).await;
        });
    }

    pub fn dismiss(&self, id: AlertId) {
        self.0.update(|stack| {
            stack.remove(id);
        });
    }
}

impl AlertStore for AlertState {
    fn with_stack<R>(&self, f: impl FnOnce(&mut AlertStack) -> R) -> Option<R> {
        self.0.try_update(f)
    }
}

// ── Chatbot ───────────────────────────────────────────────────────────────────

/// A bubble ready for display; `html` is already escaped.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedMessage {
    pub id: usize,
    pub role: MessageRole,
    pub html: String,
    pub avatar: String,
    pub avatar_color: Option<String>,
}

/// Signals behind the chatbot message list.
#[derive(Clone, Copy)]
pub struct ChatbotSignals {
    pub welcome: RwSignal<bool>,
    pub messages: RwSignal<Vec<RenderedMessage>>,
    pub typing: RwSignal<bool>,
}

impl ChatbotSignals {
    pub fn new() -> Self {
        Self {
            welcome: RwSignal::new(false),
            messages: RwSignal::new(Vec::new()),
            typing: RwSignal::new(false),
        }
    }
}

/// Browser side of the chatbot: signals for the message list plus the
/// template's window and input elements.
pub struct ChatbotView {
    signals: ChatbotSignals,
    window: HtmlElement,
    input: HtmlTextAreaElement,
    focus_delay: Duration,
    default_avatar_color: String,
    next_id: Cell<usize>,
}

impl ChatbotView {
    pub fn new(
        signals: ChatbotSignals,
        window: HtmlElement,
        input: HtmlTextAreaElement,
        config: &ClientConfig,
    ) -> Self {
        Self {
            signals,
            window,
            input,
            focus_delay: config.focus_delay(),
            default_avatar_color: config.text.default_avatar_color.clone(),
            next_id: Cell::new(0),
        }
    }

    fn avatar_for(&self, role: MessageRole) -> (String, Option<String>) {
        match role {
            MessageRole::Assistant => (ASSISTANT_AVATAR.to_string(), None),
            MessageRole::User => {
                let (text, color) = dom::user_avatar();
                let color = color.unwrap_or_else(|| self.default_avatar_color.clone());
                (markup::user_initials(text.as_deref()), Some(color))
            }
        }
    }
}

impl ChatView for ChatbotView {
    fn set_open(&self, open: bool) {
        let classes = self.window.class_list();
        let result = if open { classes.add_1("open") } else { classes.remove_1("open") };
        if let Err(e) = result {
            log::error!("Failed to toggle chatbot window: {e:?}");
        }
    }

    fn show_welcome(&self) {
        self.signals.welcome.set(true);
    }

    fn render_message(&self, message: &ChatMessage) {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let (avatar, avatar_color) = self.avatar_for(message.role);
        let rendered = RenderedMessage {
            id,
            role: message.role,
            html: markup::render_content(&message.content),
            avatar,
            avatar_color,
        };
        self.signals.welcome.set(false);
        self.signals.messages.update(|msgs| msgs.push(rendered));
    }

    fn set_typing(&self, typing: bool) {
        self.signals.typing.set(typing);
    }

    fn clear_input(&self) {
        self.input.set_value("");
        // `leptos::prelude` shadows `style()` with the tachys attribute setter.
        let style = HtmlElement::style(&self.input);
        if let Err(e) = style.set_property("height", "auto") {
            log::error!("Failed to reset chatbot input height: {e:?}");
        }
    }

    fn focus_input(&self) {
        let input = self.input.clone();
        let millis = u32::try_from(self.focus_delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, move || {
            let _ = input.focus();
        })
        .forget();
    }
}
