//! Transient alert banners.
//!
//! [`AlertStack`] is the model behind the banners at the top of the page:
//! newest first, each one independently timed. [`auto_dismiss`] drives a
//! single alert through `Shown -> Fading -> removed` using whatever sleep
//! primitive the host provides.

use std::cell::RefCell;
use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::config::{DEFAULT_ALERT_FADE_MS, DEFAULT_ALERT_VISIBLE_MS};
use crate::models::Severity;

#[cfg(test)]
#[path = "alerts_test.rs"]
mod alerts_test;

pub type AlertId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertTimings {
    pub visible_for: Duration,
    pub fade_for: Duration,
}

impl Default for AlertTimings {
    fn default() -> Self {
        Self {
            visible_for: Duration::from_millis(DEFAULT_ALERT_VISIBLE_MS),
            fade_for: Duration::from_millis(DEFAULT_ALERT_FADE_MS),
        }
    }
}

impl AlertTimings {
    /// Time from insertion to removal when nobody dismisses the alert.
    pub fn lifetime(&self) -> Duration {
        self.visible_for + self.fade_for
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertPhase {
    Shown,
    Fading,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub id: AlertId,
    pub message: String,
    pub severity: Severity,
    pub phase: AlertPhase,
}

impl Alert {
    /// Bootstrap classes for the banner element.
    pub fn css_classes(&self) -> String {
        let show = match self.phase {
            AlertPhase::Shown => " show",
            AlertPhase::Fading => "",
        };
        format!("alert {} alert-dismissible fade{show}", self.severity.css_class())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertStack {
    alerts: Vec<Alert>,
    next_id: AlertId,
}

impl AlertStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a banner on top of the stack.
    pub fn push(&mut self, message: impl Into<String>, severity: Severity) -> AlertId {
        let id = self.next_id;
        self.next_id += 1;
        self.alerts.insert(
            0,
            Alert { id, message: message.into(), severity, phase: AlertPhase::Shown },
        );
        id
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn get(&self, id: AlertId) -> Option<&Alert> {
        self.alerts.iter().find(|a| a.id == id)
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    /// Start the fade-out. Returns `false` if the alert is gone or already
    /// fading.
    pub fn begin_fade(&mut self, id: AlertId) -> bool {
        match self.alerts.iter_mut().find(|a| a.id == id) {
            Some(alert) if alert.phase == AlertPhase::Shown => {
                alert.phase = AlertPhase::Fading;
                true
            }
            _ => false,
        }
    }

    /// Remove an alert; used both for manual dismissal and the end of the
    /// fade. Returns `false` if it was already removed.
    pub fn remove(&mut self, id: AlertId) -> bool {
        let before = self.alerts.len();
        self.alerts.retain(|a| a.id != id);
        self.alerts.len() != before
    }
}

/// Shared access to an [`AlertStack`] from timer callbacks.
///
/// Returns `None` when the stack is no longer reachable (e.g. its owner was
/// torn down), which timers treat as "nothing to do".
pub trait AlertStore {
    fn with_stack<R>(&self, f: impl FnOnce(&mut AlertStack) -> R) -> Option<R>;
}

impl AlertStore for RefCell<AlertStack> {
    fn with_stack<R>(&self, f: impl FnOnce(&mut AlertStack) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

/// Fade and remove one alert on the standard schedule.
///
/// Returns `true` if this call removed the alert, `false` if it was
/// dismissed (or faded) by someone else first.
pub async fn auto_dismiss<St, Sl, Fut>(
    store: &St,
    id: AlertId,
    timings: AlertTimings,
    sleep: Sl,
) -> bool
where
    St: AlertStore + ?Sized,
    Sl: Fn(Duration) -> Fut,
    Fut: Future<Output = ()>,
{
    sleep(timings.visible_for).await;
    if !store.with_stack(|stack| stack.begin_fade(id)).unwrap_or(false) {
        debug!(alert_id = id, "alert already dismissed");
        return false;
    }
    sleep(timings.fade_for).await;
    store.with_stack(|stack| stack.remove(id)).unwrap_or(false)
}
