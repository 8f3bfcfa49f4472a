use std::cell::RefCell;
use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::config::ClientConfig;
use crate::errors::ClientError;
use crate::models::{ActionResponse, Severity};

#[cfg(test)]
#[path = "event_service_test.rs"]
mod event_service_test;

pub type EventId = u64;

/// Attribute naming the action on an event button.
pub const ACTION_ATTRIBUTE: &str = "data-event-action";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventAction {
    Join,
    Leave,
    Cancel,
}

impl EventAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventAction::Join => "join",
            EventAction::Leave => "leave",
            EventAction::Cancel => "cancel",
        }
    }

    pub fn path(&self, event_id: EventId) -> String {
        format!("/event/{event_id}/{}", self.as_str())
    }

    pub fn success_severity(&self) -> Severity {
        match self {
            EventAction::Join => Severity::Success,
            EventAction::Leave => Severity::Warning,
            EventAction::Cancel => Severity::Info,
        }
    }

    /// Whether a successful response refreshes the navbar points.
    pub fn updates_points(&self) -> bool {
        matches!(self, EventAction::Join | EventAction::Leave)
    }
}

impl std::str::FromStr for EventAction {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "join" => Ok(EventAction::Join),
            "leave" => Ok(EventAction::Leave),
            "cancel" => Ok(EventAction::Cancel),
            _ => Err(ClientError::invalid_markup(ACTION_ATTRIBUTE, s)),
        }
    }
}

/// Transport for the three event endpoints.
#[async_trait(?Send)]
pub trait EventBackend {
    async fn perform(
        &self,
        action: EventAction,
        event_id: EventId,
    ) -> Result<ActionResponse, ClientError>;
}

/// The button (or other control) that triggered an action.
pub trait ActionControl {
    /// Current label as plain text.
    fn label(&self) -> String;
    /// Disable the control and show a spinner with `loading_label`.
    fn set_busy(&self, loading_label: &str);
    /// Re-enable the control with `label` as plain text.
    fn restore(&self, label: &str);
}

/// Page-level side effects of an action.
pub trait PageHost {
    fn confirm(&self, prompt: &str) -> bool;
    fn show_alert(&self, message: &str, severity: Severity);
    /// Overwrite the navbar points, if the page shows them.
    fn set_points(&self, points: i64);
    fn schedule_reload(&self, delay: Duration);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The user declined the confirmation prompt.
    Declined,
    /// Same event already has an action in flight.
    AlreadyPending,
    /// Server accepted; a reload is scheduled.
    Completed,
    /// Server refused (`success: false`); control restored.
    Rejected,
    /// Transport or decoding failed; control restored.
    Failed,
}

pub struct EventDispatcher<B, P> {
    backend: B,
    page: P,
    config: ClientConfig,
    in_flight: RefCell<HashSet<EventId>>,
}

impl<B: EventBackend, P: PageHost> EventDispatcher<B, P> {
    pub fn new(backend: B, page: P, config: ClientConfig) -> Self {
        Self { backend, page, config, in_flight: RefCell::new(HashSet::new()) }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub async fn join(&self, event_id: EventId, control: &impl ActionControl) -> ActionOutcome {
        self.run(EventAction::Join, event_id, control).await
    }

    pub async fn leave(&self, event_id: EventId, control: &impl ActionControl) -> ActionOutcome {
        self.run(EventAction::Leave, event_id, control).await
    }

    pub async fn cancel(&self, event_id: EventId, control: &impl ActionControl) -> ActionOutcome {
        self.run(EventAction::Cancel, event_id, control).await
    }

    pub async fn run(
        &self,
        action: EventAction,
        event_id: EventId,
        control: &impl ActionControl,
    ) -> ActionOutcome {
        if let Some(prompt) = self.confirmation(action) {
            if !self.page.confirm(prompt) {
                debug!(event_id, action = action.as_str(), "action declined");
                return ActionOutcome::Declined;
            }
        }

        if !self.in_flight.borrow_mut().insert(event_id) {
            warn!(event_id, action = action.as_str(), "action already in flight, ignoring");
            return ActionOutcome::AlreadyPending;
        }

        let original_label = control.label();
        control.set_busy(self.loading_label(action));

        let result = self.backend.perform(action, event_id).await;
        self.in_flight.borrow_mut().remove(&event_id);

        match result {
            Ok(response) if response.success => {
                info!(event_id, action = action.as_str(), "action accepted");
                self.page.show_alert(&response.message, action.success_severity());
                if action.updates_points() {
                    if let Some(points) = response.new_points {
                        self.page.set_points(points);
                    }
                }
                self.page.schedule_reload(self.config.reload_delay());
                ActionOutcome::Completed
            }
            Ok(response) => {
                warn!(event_id, action = action.as_str(), "action refused: {}", response.message);
                self.page.show_alert(&response.message, Severity::Danger);
                control.restore(&original_label);
                ActionOutcome::Rejected
            }
            Err(e) => {
                error!(event_id, action = action.as_str(), "action request failed: {e}");
                self.page.show_alert(self.failure_message(action), Severity::Danger);
                control.restore(&original_label);
                ActionOutcome::Failed
            }
        }
    }

    fn confirmation(&self, action: EventAction) -> Option<&str> {
        match action {
            EventAction::Join => None,
            EventAction::Leave => Some(&self.config.text.leave_confirm),
            EventAction::Cancel => Some(&self.config.text.cancel_confirm),
        }
    }

    fn loading_label(&self, action: EventAction) -> &str {
        match action {
            EventAction::Join => &self.config.text.join_loading,
            EventAction::Leave => &self.config.text.leave_loading,
            EventAction::Cancel => &self.config.text.cancel_loading,
        }
    }

    fn failure_message(&self, action: EventAction) -> &str {
        match action {
            EventAction::Join => &self.config.text.join_failed,
            EventAction::Leave | EventAction::Cancel => &self.config.text.action_failed,
        }
    }
}
