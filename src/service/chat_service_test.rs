use super::*;

use std::collections::VecDeque;
use std::rc::Rc;

use tokio::sync::Semaphore;

use crate::models::MessageRole;

// =============================================================
// Fakes
// =============================================================

#[derive(Default)]
struct FakeBackend {
    replies: RefCell<VecDeque<Result<ChatbotResponse, ClientError>>>,
    requests: RefCell<Vec<ChatbotRequest>>,
    gate: Option<Rc<Semaphore>>,
}

impl FakeBackend {
    fn replying(replies: Vec<Result<ChatbotResponse, ClientError>>) -> Self {
        Self { replies: RefCell::new(replies.into()), ..Self::default() }
    }

    fn gated(replies: Vec<Result<ChatbotResponse, ClientError>>, gate: Rc<Semaphore>) -> Self {
        Self { gate: Some(gate), ..Self::replying(replies) }
    }

    fn calls(&self) -> usize {
        self.requests.borrow().len()
    }
}

#[async_trait(?Send)]
impl ChatBackend for FakeBackend {
    async fn send_turn(&self, request: &ChatbotRequest) -> Result<ChatbotResponse, ClientError> {
        self.requests.borrow_mut().push(request.clone());
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::network("/api/chatbot", "no scripted reply")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ViewEvent {
    Open(bool),
    Welcome,
    Message(MessageRole, String),
    Typing(bool),
    ClearInput,
    Focus,
}

#[derive(Default)]
struct FakeView {
    events: RefCell<Vec<ViewEvent>>,
}

impl FakeView {
    fn events(&self) -> Vec<ViewEvent> {
        self.events.borrow().clone()
    }

    fn rendered(&self) -> Vec<(MessageRole, String)> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                ViewEvent::Message(role, text) => Some((*role, text.clone())),
                _ => None,
            })
            .collect()
    }

    fn count(&self, event: &ViewEvent) -> usize {
        self.events.borrow().iter().filter(|e| *e == event).count()
    }
}

impl ChatView for FakeView {
    fn set_open(&self, open: bool) {
        self.events.borrow_mut().push(ViewEvent::Open(open));
    }
    fn show_welcome(&self) {
        self.events.borrow_mut().push(ViewEvent::Welcome);
    }
    fn render_message(&self, message: &ChatMessage) {
        self.events.borrow_mut().push(ViewEvent::Message(message.role, message.content.clone()));
    }
    fn set_typing(&self, typing: bool) {
        self.events.borrow_mut().push(ViewEvent::Typing(typing));
    }
    fn clear_input(&self) {
        self.events.borrow_mut().push(ViewEvent::ClearInput);
    }
    fn focus_input(&self) {
        self.events.borrow_mut().push(ViewEvent::Focus);
    }
}

fn ok(message: &str) -> Result<ChatbotResponse, ClientError> {
    Ok(ChatbotResponse { success: true, message: Some(message.to_string()) })
}

fn controller(backend: FakeBackend) -> ChatController<FakeBackend, FakeView> {
    ChatController::new(backend, FakeView::default(), UiText::default())
}

// =============================================================
// Open / close
// =============================================================

#[test]
fn toggle_opens_with_welcome_then_closes() {
    let chat = controller(FakeBackend::default());
    chat.toggle();
    assert_eq!(chat.phase(), WidgetPhase::OpenIdle);
    assert_eq!(
        chat.view().events(),
        vec![ViewEvent::Open(true), ViewEvent::Welcome, ViewEvent::Focus]
    );

    chat.toggle();
    assert_eq!(chat.phase(), WidgetPhase::Closed);
    assert_eq!(chat.view().events().last(), Some(&ViewEvent::Open(false)));
}

#[tokio::test]
async fn welcome_is_not_shown_once_history_exists() {
    let chat = controller(FakeBackend::replying(vec![ok("Bien sûr !")]));
    chat.open();
    chat.send_message("Un conseil ?").await;
    chat.close();
    chat.open();
    assert_eq!(chat.view().count(&ViewEvent::Welcome), 1);
    assert_eq!(chat.view().count(&ViewEvent::Focus), 2);
}

#[test]
fn open_twice_is_idempotent() {
    let chat = controller(FakeBackend::default());
    chat.open();
    chat.open();
    assert_eq!(chat.view().count(&ViewEvent::Open(true)), 1);
}

// =============================================================
// send_message
// =============================================================

#[tokio::test]
async fn empty_or_whitespace_input_is_ignored() {
    let chat = controller(FakeBackend::default());
    chat.open();
    let before = chat.state();

    assert_eq!(chat.send_message("").await, SendOutcome::Ignored(IgnoreReason::Empty));
    assert_eq!(chat.send_message("  \n\t ").await, SendOutcome::Ignored(IgnoreReason::Empty));

    assert_eq!(chat.state(), before);
    assert_eq!(chat.backend().calls(), 0);
    assert!(chat.view().rendered().is_empty());
}

#[tokio::test]
async fn successful_reply_appends_user_then_assistant() {
    let chat = controller(FakeBackend::replying(vec![ok("Hydrate-toi bien.")]));
    chat.open();

    let outcome = chat.send_message("  Conseil avant un match ?  ").await;

    assert_eq!(outcome, SendOutcome::Replied);
    assert_eq!(
        chat.history(),
        vec![
            ChatMessage::user("Conseil avant un match ?"),
            ChatMessage::assistant("Hydrate-toi bien."),
        ]
    );
    assert!(!chat.state().is_typing);
    assert_eq!(
        chat.view().events()[3..],
        [
            ViewEvent::Message(MessageRole::User, "Conseil avant un match ?".into()),
            ViewEvent::ClearInput,
            ViewEvent::Typing(true),
            ViewEvent::Typing(false),
            ViewEvent::Message(MessageRole::Assistant, "Hydrate-toi bien.".into()),
        ]
    );
}

#[tokio::test]
async fn request_carries_message_and_full_history() {
    let chat = controller(FakeBackend::replying(vec![ok("Premier"), ok("Second")]));
    chat.send_message("Salut").await;
    chat.send_message("Et le foot ?").await;

    let requests = chat.backend().requests.borrow();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].message, "Et le foot ?");
    assert_eq!(
        requests[1].history,
        vec![
            ChatMessage::user("Salut"),
            ChatMessage::assistant("Premier"),
            ChatMessage::user("Et le foot ?"),
        ]
    );
}

#[tokio::test]
async fn failure_flag_renders_server_message_without_storing_it() {
    let chat = controller(FakeBackend::replying(vec![Ok(ChatbotResponse {
        success: false,
        message: Some("Le coach est indisponible.".into()),
    })]));

    let outcome = chat.send_message("Salut").await;

    assert_eq!(outcome, SendOutcome::Fallback);
    assert_eq!(chat.history(), vec![ChatMessage::user("Salut")]);
    assert_eq!(
        chat.view().rendered().last(),
        Some(&(MessageRole::Assistant, "Le coach est indisponible.".to_string()))
    );
    assert!(!chat.state().is_typing);
}

#[tokio::test]
async fn success_without_payload_renders_generic_apology() {
    let reply = ChatbotResponse { success: true, message: None };
    let chat = controller(FakeBackend::replying(vec![Ok(reply)]));

    assert_eq!(chat.send_message("Salut").await, SendOutcome::Fallback);
    assert_eq!(chat.history().len(), 1);
    assert_eq!(
        chat.view().rendered().last().map(|(_, text)| text.as_str()),
        Some(UiText::default().chat_fallback.as_str())
    );
}

#[tokio::test]
async fn transport_error_renders_offline_message_without_storing_it() {
    let chat = controller(FakeBackend::replying(vec![Err(ClientError::decode(
        "/api/chatbot",
        "expected value at line 1 column 1",
    ))]));

    let outcome = chat.send_message("Salut").await;

    assert_eq!(outcome, SendOutcome::Offline);
    assert_eq!(chat.history(), vec![ChatMessage::user("Salut")]);
    assert_eq!(
        chat.view().rendered().last().map(|(_, text)| text.as_str()),
        Some(UiText::default().chat_offline.as_str())
    );
    assert_eq!(chat.view().count(&ViewEvent::Typing(false)), 1);
    assert!(!chat.state().is_typing);
}

#[tokio::test]
async fn submission_while_pending_is_dropped() {
    let gate = Rc::new(Semaphore::new(0));
    let chat = controller(FakeBackend::gated(vec![ok("Réponse")], gate.clone()));
    chat.open();

    let mut first = Box::pin(chat.send_message("Premier"));
    assert!(futures_util::poll!(first.as_mut()).is_pending());
    assert_eq!(chat.phase(), WidgetPhase::OpenAwaitingReply);

    assert_eq!(chat.send_message("Second").await, SendOutcome::Ignored(IgnoreReason::Busy));
    assert_eq!(chat.backend().calls(), 1);

    gate.add_permits(1);
    assert_eq!(first.await, SendOutcome::Replied);
    assert_eq!(chat.phase(), WidgetPhase::OpenIdle);
    assert_eq!(
        chat.history(),
        vec![ChatMessage::user("Premier"), ChatMessage::assistant("Réponse")]
    );
}

#[tokio::test]
async fn reply_still_lands_after_panel_is_closed() {
    let gate = Rc::new(Semaphore::new(0));
    let chat = controller(FakeBackend::gated(vec![ok("Réponse")], gate.clone()));
    chat.open();

    let mut pending = Box::pin(chat.send_message("Salut"));
    assert!(futures_util::poll!(pending.as_mut()).is_pending());
    chat.close();
    gate.add_permits(1);

    assert_eq!(pending.await, SendOutcome::Replied);
    assert_eq!(chat.phase(), WidgetPhase::Closed);
    assert_eq!(chat.history().len(), 2);
}

// =============================================================
// Input helpers
// =============================================================

#[test]
fn enter_submits_unless_shift_is_held() {
    assert!(is_submit_key("Enter", false));
    assert!(!is_submit_key("Enter", true));
    assert!(!is_submit_key("a", false));
}

#[test]
fn input_height_is_capped() {
    assert_eq!(input_height(42, 100), 42);
    assert_eq!(input_height(240, 100), 100);
}
