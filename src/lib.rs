//! Progressive enhancement for server-rendered pages.
//!
//! On load, the page gets:
//! - description toggles behind `.expansion-button` triggers,
//! - auto-sizing `<textarea>`s that indent with Tab / Shift+Tab,
//! - a confirm dialog in front of clicks on `[confirm]` elements.
//!
//! The same behaviors are available as Leptos components under [`components`].

pub mod autosize;
pub mod components;
pub mod config;
pub mod confirm;
pub mod enhance;
pub mod error;
pub mod indent;
pub mod logging;
pub mod toggle;
mod util;

pub use config::EnhancerConfig;
pub use enhance::{enhance_document, on_page_load, EnhanceStats, EnhancedPage};
pub use error::{EnhanceError, Result};

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    logging::init();

    let config = EnhancerConfig::load();
    if let Err(e) = on_page_load(config) {
        tracing::error!(error = %e, "could not schedule page enhancement");
    }
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use crate::components::ui::{AutoTextarea, ExpandableSection};
    use leptos::prelude::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn root() -> web_sys::HtmlElement {
        let document = util::document().unwrap();
        let root = document
            .create_element("div")
            .unwrap()
            .dyn_into::<web_sys::HtmlElement>()
            .unwrap();
        document.body().unwrap().append_child(&root).unwrap();
        root
    }

    #[wasm_bindgen_test]
    fn test_config_from_window_global() {
        let window = util::window().unwrap();
        let value = js_sys::JSON::parse(r#"{"maxHeight": 180, "confirm": false}"#).unwrap();
        js_sys::Reflect::set(&window, &config::GLOBAL_KEY.into(), &value).unwrap();

        let c = EnhancerConfig::load();
        assert_eq!(c.max_height, 180);
        assert!(!c.confirm);

        js_sys::Reflect::delete_property(&window, &config::GLOBAL_KEY.into()).unwrap();
        assert_eq!(EnhancerConfig::load(), EnhancerConfig::default());
    }

    // Reactive effects flush asynchronously.
    async fn next_tick() {
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            let _ = util::window()
                .unwrap()
                .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, 0);
        });
        wasm_bindgen_futures::JsFuture::from(promise).await.unwrap();
    }

    #[wasm_bindgen_test]
    async fn test_expandable_section_toggles_description() {
        let root = root();
        let handle = leptos::mount::mount_to(root.clone(), || {
            view! { <ExpandableSection label="Details">"hidden text"</ExpandableSection> }
        });

        let trigger = root
            .query_selector("button")
            .unwrap()
            .unwrap()
            .dyn_into::<web_sys::HtmlElement>()
            .unwrap();
        let description = util::document()
            .unwrap()
            .get_element_by_id(&format!("{}-description", trigger.id()))
            .unwrap()
            .dyn_into::<web_sys::HtmlElement>()
            .unwrap();

        assert_eq!(description.style().get_property_value("display").unwrap(), "none");
        trigger.click();
        next_tick().await;
        assert_eq!(description.style().get_property_value("display").unwrap(), "block");

        drop(handle);
        root.remove();
    }

    #[wasm_bindgen_test]
    fn test_auto_textarea_sizes_on_input() {
        let root = root();
        let value = RwSignal::new(String::new());
        let handle = leptos::mount::mount_to(root.clone(), move || {
            view! { <AutoTextarea bind_value=value max_height=48 /> }
        });

        let ta = root
            .query_selector("textarea")
            .unwrap()
            .unwrap()
            .dyn_into::<web_sys::HtmlTextAreaElement>()
            .unwrap();
        ta.set_value(&"row\n".repeat(40));
        ta.dispatch_event(&web_sys::Event::new("input").unwrap()).unwrap();

        assert_eq!(value.get_untracked().lines().count(), 40);
        assert_eq!(ta.style().get_property_value("height").unwrap(), "48px");
        assert_eq!(ta.style().get_property_value("overflow").unwrap(), "visible");

        drop(handle);
        root.remove();
    }
}
