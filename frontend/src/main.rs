mod api;
mod bindings;
mod components;
mod dom;
mod state;

use std::rc::Rc;

use web_sys::Element;

use sport_connect::ClientConfig;
use sport_connect::service::EventDispatcher;

use api::HttpEventBackend;
use dom::BrowserPage;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

/// Optional `<script type="application/json">` carrying config overrides.
const CONFIG_ELEMENT_ID: &str = "sport-connect-config";

fn load_config() -> ClientConfig {
    let Some(raw) = dom::by_id::<Element>(CONFIG_ELEMENT_ID).and_then(|el| el.text_content()) else {
        return ClientConfig::default();
    };
    ClientConfig::from_json(&raw).unwrap_or_else(|e| {
        log::warn!("{e}; using default configuration");
        ClientConfig::default()
    })
}

fn main() {
    console_log::init_with_level(log::Level::Debug).expect("Failed to init logger");
    log::info!("Sport Connect loaded");

    let config = load_config();
    let timings = config.alert_timings();

    // Tasks spawned below run on `wasm_bindgen_futures`, not Leptos's executor,
    // which only exists once something is mounted.
    // ── Alerts ────────────────────────────────────────────────────────────────
    let alerts = components::alerts::mount_alert_host();
    dom::expire_static_alerts(timings);

    // ── Event actions & filters ───────────────────────────────────────────────
    let page = BrowserPage::new(alerts, timings);
    let backend = HttpEventBackend::new(config.clone());
    let dispatcher = Rc::new(EventDispatcher::new(backend, page, config.clone()));
    let bound = bindings::bind_event_buttons(dispatcher);
    log::debug!("Bound {bound} event action button(s)");
    bindings::bind_filters();

    // ── Chatbot ───────────────────────────────────────────────────────────────
    match components::chatbot::init(&config) {
        Ok(()) => {}
        Err(e) if e.is_missing_element() => log::debug!("Chatbot not on this page: {e}"),
        Err(e) => log::error!("Chatbot initialization failed: {e}"),
    }
}
