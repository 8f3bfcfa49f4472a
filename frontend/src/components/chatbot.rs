//! "Coach Sport+" chatbot widget: message list view and page wiring.

use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, HtmlElement, HtmlTextAreaElement, KeyboardEvent};

use sport_connect::service::chat_service::{input_height, is_submit_key};
use sport_connect::service::ChatController;
use sport_connect::{ClientConfig, ClientError};

use crate::api::HttpChatBackend;
use crate::dom;
use crate::state::{ChatbotSignals, ChatbotView, RenderedMessage};

pub const TOGGLE_ID: &str = "chatbot-toggle";
pub const CLOSE_ID: &str = "chatbot-close";
pub const SEND_ID: &str = "chatbot-send";
pub const INPUT_ID: &str = "chatbot-input";
pub const MESSAGES_ID: &str = "chatbot-messages";
pub const WINDOW_ID: &str = "chatbot-window";

/// Welcome block, bubbles and typing indicator.
#[component]
pub fn ChatMessages(
    signals: ChatbotSignals,
    welcome_title: String,
    welcome_body: String,
) -> impl IntoView {
    view! {
        {move || {
            signals.welcome.get().then(|| {
                view! {
                    <div class="chatbot-welcome">
                        <div class="chatbot-welcome-icon">"⚽"</div>
                        <h4>{welcome_title.clone()}</h4>
                        <p>{welcome_body.clone()}</p>
                    </div>
                }
            })
        }}
        <For
            each=move || signals.messages.get()
            key=|m| m.id
            let:msg
        >
            <MessageBubble message=msg />
        </For>
        {move || {
            signals.typing.get().then(|| {
                view! {
                    <div id="chatbot-typing-indicator" class="chatbot-message assistant">
                        <div class="chatbot-avatar">"⚽"</div>
                        <div class="chatbot-typing visible">
                            <div class="chatbot-typing-dots">
                                <div class="chatbot-typing-dot"></div>
                                <div class="chatbot-typing-dot"></div>
                                <div class="chatbot-typing-dot"></div>
                            </div>
                        </div>
                    </div>
                }
            })
        }}
    }
}

#[component]
fn MessageBubble(message: RenderedMessage) -> impl IntoView {
    let css_class = format!("chatbot-message {}", message.role);
    let avatar_style = message.avatar_color.map(|c| format!("background-color: {c}"));

    view! {
        <div class=css_class>
            <div class="chatbot-avatar" style=avatar_style>{message.avatar}</div>
            <div class="chatbot-bubble" inner_html=message.html></div>
        </div>
    }
}

/// Wire the chatbot to the template's elements.
///
/// Fails with `MissingElement` when the page has no chatbot; nothing is
/// attached in that case.
pub fn init(config: &ClientConfig) -> Result<(), ClientError> {
    let toggle = dom::require::<HtmlElement>(TOGGLE_ID)?;
    let close = dom::require::<HtmlElement>(CLOSE_ID)?;
    let send = dom::require::<HtmlElement>(SEND_ID)?;
    let input = dom::require::<HtmlTextAreaElement>(INPUT_ID)?;
    let messages = dom::require::<HtmlElement>(MESSAGES_ID)?;
    let window = dom::require::<HtmlElement>(WINDOW_ID)?;

    let signals = ChatbotSignals::new();
    let welcome_title = config.text.welcome_title.clone();
    let welcome_body = config.text.welcome_body.clone();
    let scroll_host = messages.clone();
    leptos::mount::mount_to(messages, move || {
        // Keep the latest bubble in view.
        Effect::new(move || {
            signals.messages.track();
            signals.typing.track();
            scroll_host.set_scroll_top(scroll_host.scroll_height());
        });
        view! {
            <ChatMessages signals=signals welcome_title=welcome_title welcome_body=welcome_body />
        }
    })
    .forget();

    let view = ChatbotView::new(signals, window, input.clone(), config);
    let backend = HttpChatBackend::new(config);
    let controller = Rc::new(ChatController::new(backend, view, config.text.clone()));

    dom::listen(&toggle, "click", {
        let controller = controller.clone();
        move |_| controller.toggle()
    });
    dom::listen(&close, "click", {
        let controller = controller.clone();
        move |_| controller.close()
    });

    let submit: Rc<dyn Fn()> = {
        let input = input.clone();
        Rc::new(move || {
            let text = input.value();
            let controller = controller.clone();
            spawn_local(async move {
                let outcome = controller.send_message(&text).await;
                log::debug!("chatbot turn finished: {outcome:?}");
            });
        })
    };

    dom::listen(&send, "click", {
        let submit = submit.clone();
        move |_| submit()
    });
    dom::listen(&input, "keypress", move |ev: Event| {
        if let Some(key) = ev.dyn_ref::<KeyboardEvent>() {
            if is_submit_key(&key.key(), key.shift_key()) {
                ev.prevent_default();
                submit();
            }
        }
    });

    let max_height = config.input_max_height_px;
    let target = input.clone();
    dom::listen(&target, "input", move |_| {
        let style = HtmlElement::style(&input);
        let height = style
            .set_property("height", "auto")
            .map(|()| input_height(input.scroll_height(), max_height))
            .and_then(|height| style.set_property("height", &format!("{height}px")));
        if let Err(e) = height {
            log::error!("Failed to resize chatbot input: {e:?}");
        }
    });

    log::debug!("chatbot initialized");
    Ok(())
}
