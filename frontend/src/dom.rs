//! Thin `web-sys` helpers and the browser implementations of the page-side
//! traits (`ActionControl`, `PageHost`).

use std::time::Duration;

use gloo_timers::callback::Timeout;
use gloo_timers::future::sleep;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, EventTarget, HtmlButtonElement, HtmlElement, Window};

use sport_connect::ClientError;
use sport_connect::alerts::AlertTimings;
use sport_connect::markup::escape_html;
use sport_connect::models::Severity;
use sport_connect::service::{ActionControl, PageHost};

use crate::state::AlertState;

pub const POINTS_ID: &str = "user-points";
pub const AVATAR_SELECTOR: &str = ".avatar-circle";

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window()?.document()
}

pub fn by_id<T: JsCast>(id: &str) -> Option<T> {
    document()?.get_element_by_id(id)?.dyn_into::<T>().ok()
}

/// Like [`by_id`], but a missing element is an error.
pub fn require<T: JsCast>(id: &str) -> Result<T, ClientError> {
    by_id(id).ok_or_else(|| ClientError::missing(format!("#{id}")))
}

pub fn query<T: JsCast>(selector: &str) -> Option<T> {
    document()?.query_selector(selector).ok()??.dyn_into::<T>().ok()
}

pub fn query_all(selector: &str) -> Vec<Element> {
    let Some(list) = document().and_then(|d| d.query_selector_all(selector).ok()) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Attach a listener for the lifetime of the page.
pub fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    let callback = closure.as_ref().unchecked_ref();
    if let Err(e) = target.add_event_listener_with_callback(event, callback) {
        log::error!("Failed to attach {event} listener: {e:?}");
    }
    closure.forget();
}

/// Navbar avatar text and computed background colour, if the page has one.
pub fn user_avatar() -> (Option<String>, Option<String>) {
    let Some(el) = query::<HtmlElement>(AVATAR_SELECTOR) else {
        return (None, None);
    };
    let color = window()
        .and_then(|w| w.get_computed_style(&el).ok().flatten())
        .and_then(|style| style.get_property_value("background-color").ok())
        .filter(|c| !c.is_empty());
    (el.text_content(), color)
}

/// Fade out and remove server-rendered, non-dismissible alerts.
pub fn expire_static_alerts(timings: AlertTimings) {
    for alert in query_all(".alert:not(.alert-dismissible)") {
        spawn_local(async move {
            sleep(timings.visible_for).await;
            let classes = alert.class_list();
            if let Err(e) = classes.remove_1("show").and_then(|()| classes.add_1("fade")) {
                log::error!("Failed to fade static alert: {e:?}");
            }
            sleep(timings.fade_for).await;
            alert.remove();
        });
    }
}

// ── ActionControl ─────────────────────────────────────────────────────────────

/// The clicked event button.
pub struct ButtonControl(pub HtmlElement);

impl ButtonControl {
    fn set_disabled(&self, disabled: bool) {
        if let Some(button) = self.0.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
            return;
        }
        let result = if disabled {
            self.0.set_attribute("disabled", "")
        } else {
            self.0.remove_attribute("disabled")
        };
        if let Err(e) = result {
            log::error!("Failed to toggle disabled on event control: {e:?}");
        }
    }
}

impl ActionControl for ButtonControl {
    fn label(&self) -> String {
        self.0.inner_text()
    }

    fn set_busy(&self, loading_label: &str) {
        self.set_disabled(true);
        self.0.set_inner_html(&format!(
            r#"<span class="spinner-border spinner-border-sm me-2"></span>{}"#,
            escape_html(loading_label)
        ));
    }

    fn restore(&self, label: &str) {
        self.set_disabled(false);
        self.0.set_inner_text(label);
    }
}

// ── PageHost ──────────────────────────────────────────────────────────────────

pub struct BrowserPage {
    alerts: Option<AlertState>,
    timings: AlertTimings,
}

impl BrowserPage {
    pub fn new(alerts: Option<AlertState>, timings: AlertTimings) -> Self {
        Self { alerts, timings }
    }
}

impl PageHost for BrowserPage {
    fn confirm(&self, prompt: &str) -> bool {
        window().and_then(|w| w.confirm_with_message(prompt).ok()).unwrap_or(false)
    }

    fn show_alert(&self, message: &str, severity: Severity) {
        match self.alerts {
            Some(alerts) => alerts.show(message, severity, self.timings),
            None => log::warn!("No alert container on this page, dropping: {message}"),
        }
    }

    fn set_points(&self, points: i64) {
        if let Some(el) = by_id::<HtmlElement>(POINTS_ID) {
            el.set_inner_text(&points.to_string());
        }
    }

    fn schedule_reload(&self, delay: Duration) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, || {
            if let Some(w) = window() {
                if let Err(e) = w.location().reload() {
                    log::error!("Reload failed: {e:?}");
                }
            }
        })
        .forget();
    }
}
