// =============================================================
// Startup without a mounted view
// =============================================================
//
// `.container` and the chatbot are both optional, so nothing guarantees a
// `mount_to` call before the first task is spawned. Leptos's `spawn_local`
// panics until its executor is initialized by a mount; every spawn in the
// page wiring must go through `wasm_bindgen_futures` instead.

const SOURCES: [(&str, &str); 5] = [
    ("main.rs", include_str!("main.rs")),
    ("dom.rs", include_str!("dom.rs")),
    ("bindings.rs", include_str!("bindings.rs")),
    ("state.rs", include_str!("state.rs")),
    ("components/chatbot.rs", include_str!("components/chatbot.rs")),
];

#[test]
fn page_wiring_never_spawns_on_the_leptos_executor() {
    for (file, source) in SOURCES {
        assert!(!source.contains("leptos::task"), "{file} imports leptos::task");
    }
}

#[test]
fn modules_that_spawn_use_wasm_bindgen_futures() {
    for (file, source) in SOURCES {
        if source.contains("spawn_local(") {
            assert!(
                source.contains("use wasm_bindgen_futures::spawn_local;"),
                "{file} spawns without importing wasm_bindgen_futures::spawn_local"
            );
        }
    }
}

#[test]
fn web_sys_style_is_called_explicitly() {
    // `leptos::prelude` brings in a one-argument `style` that shadows web-sys.
    for (file, source) in SOURCES {
        assert!(!source.contains("input.style()"), "{file} calls the shadowed style()");
    }
}
