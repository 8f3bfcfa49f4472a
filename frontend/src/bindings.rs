//! Page-level listeners: event action buttons and the event filter form.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlElement, HtmlFormElement};

use sport_connect::service::{ACTION_ATTRIBUTE, EventAction, EventDispatcher, EventId};

use crate::api::HttpEventBackend;
use crate::dom::{self, BrowserPage, ButtonControl};

pub const ACTION_SELECTOR: &str = "[data-event-action][data-event-id]";
pub const FILTER_FORM_ID: &str = "filter-form";
pub const FILTER_RESET_SELECTOR: &str = "[data-filter-reset]";

pub type PageDispatcher = EventDispatcher<HttpEventBackend, BrowserPage>;

fn parse_action(el: &Element) -> Option<(EventAction, EventId)> {
    let action = el.get_attribute(ACTION_ATTRIBUTE)?.parse::<EventAction>();
    let id = el.get_attribute("data-event-id")?.trim().parse::<EventId>();
    match (action, id) {
        (Ok(action), Ok(id)) => Some((action, id)),
        (Err(e), _) => {
            log::warn!("Skipping event button: {e}");
            None
        }
        (_, Err(e)) => {
            log::warn!("Skipping event button with bad id: {e}");
            None
        }
    }
}

/// Attach join/leave/cancel handlers to every `data-event-action` button.
/// The clicked button is passed to the dispatcher as the control to disable.
pub fn bind_event_buttons(dispatcher: Rc<PageDispatcher>) -> usize {
    let mut bound = 0;
    for el in dom::query_all(ACTION_SELECTOR) {
        let Some((action, event_id)) = parse_action(&el) else {
            continue;
        };
        let Ok(button) = el.dyn_into::<HtmlElement>() else {
            continue;
        };
        let dispatcher = dispatcher.clone();
        let target = button.clone();
        dom::listen(&target, "click", move |ev| {
            ev.prevent_default();
            let dispatcher = dispatcher.clone();
            let control = ButtonControl(button.clone());
            spawn_local(async move {
                let outcome = dispatcher.run(action, event_id, &control).await;
                log::debug!("event {event_id} {}: {outcome:?}", action.as_str());
            });
        });
        bound += 1;
    }
    bound
}

/// Submit the filter form on every change, and send reset links home.
pub fn bind_filters() {
    if let Some(form) = dom::by_id::<HtmlFormElement>(FILTER_FORM_ID) {
        let target = form.clone();
        dom::listen(&target, "change", move |_| {
            if let Err(e) = form.submit() {
                log::error!("Filter submit failed: {e:?}");
            }
        });
    }

    for reset in dom::query_all(FILTER_RESET_SELECTOR) {
        dom::listen(&reset, "click", |ev| {
            ev.prevent_default();
            if let Some(w) = dom::window() {
                if let Err(e) = w.location().set_href("/") {
                    log::error!("Filter reset failed: {e:?}");
                }
            }
        });
    }
}
