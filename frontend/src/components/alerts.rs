//! Alert banners at the top of the page's main container.

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::dom;
use crate::state::AlertState;

pub const CONTAINER_SELECTOR: &str = ".container";

/// Stack of dismissible banners, newest first.
#[component]
pub fn AlertList(state: AlertState) -> impl IntoView {
    view! {
        <For
            each=move || state.0.get().alerts().to_vec()
            key=|alert| alert.id
            let:alert
        >
            {
                let id = alert.id;
                let classes = move || {
                    state.0.with(|stack| stack.get(id).map(|a| a.css_classes()).unwrap_or_default())
                };
                view! {
                    <div class=classes role="alert">
                        {alert.message.clone()}
                        <button
                            type="button"
                            class="btn-close"
                            aria-label="Close"
                            on:click=move |_| state.dismiss(id)
                        ></button>
                    </div>
                }
            }
        </For>
    }
}

/// Insert a host element as the container's first child and mount the alert
/// list into it. Returns `None` when the page has no container.
pub fn mount_alert_host() -> Option<AlertState> {
    let container = dom::query::<HtmlElement>(CONTAINER_SELECTOR)?;
    let host = dom::document()?
        .create_element("div")
        .ok()?
        .dyn_into::<HtmlElement>()
        .ok()?;
    host.set_class_name("alert-host");
    if let Err(e) = container.insert_before(&host, container.first_child().as_ref()) {
        log::error!("Failed to insert alert host: {e:?}");
        return None;
    }

    let state = AlertState::new();
    leptos::mount::mount_to(host, move || view! { <AlertList state=state /> }).forget();
    Some(state)
}
