//! Page-load wiring: find the marked elements and bind their behaviors.

use crate::autosize::{Autosizer, TextareaKey, DEFERRED_EVENTS, IMMEDIATE_EVENTS};
use crate::config::EnhancerConfig;
use crate::error::Result;
use crate::{confirm, indent, toggle, util};
use gloo_events::{EventListener, EventListenerOptions, EventListenerPhase};
use wasm_bindgen::JsCast;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EnhanceStats {
    pub toggles: usize,
    /// Triggers left alone because of a markup error.
    pub skipped_toggles: usize,
    pub textareas: usize,
    pub confirm_guard: bool,
}

/// Everything bound to one document.
///
/// Dropping it detaches every listener and discards remembered heights.
pub struct EnhancedPage {
    listeners: Vec<EventListener>,
    autosizer: Autosizer,
    keys: Vec<TextareaKey>,
    stats: EnhanceStats,
}

impl EnhancedPage {
    fn new(autosizer: Autosizer) -> Self {
        Self {
            listeners: vec![],
            autosizer,
            keys: vec![],
            stats: EnhanceStats::default(),
        }
    }

    pub fn stats(&self) -> EnhanceStats {
        self.stats
    }

    pub fn autosizer(&self) -> &Autosizer {
        &self.autosizer
    }

    /// Keep every binding alive for the rest of the page's life.
    pub fn forget(mut self) {
        for listener in self.listeners.drain(..) {
            listener.forget();
        }
        self.keys.clear();
    }

    fn bind_toggles(
        &mut self,
        window: &web_sys::Window,
        document: &web_sys::Document,
        config: &EnhancerConfig,
    ) {
        // Live collection; snapshot before binding.
        let found = document.get_elements_by_class_name(&config.expansion_class);
        let triggers = (0..found.length())
            .filter_map(|i| found.item(i))
            .collect::<Vec<_>>();

        for trigger in triggers {
            let (pair, target) =
                match toggle::resolve_target(document, &trigger, &config.description_suffix) {
                    Ok(resolved) => resolved,
                    Err(e) => {
                        tracing::warn!(error = %e, "skipping expansion trigger");
                        self.stats.skipped_toggles += 1;
                        continue;
                    }
                };

            let window = window.clone();
            let target_id = pair.target_id.clone();
            self.listeners
                .push(EventListener::new(&trigger, "click", move |_| {
                    match toggle::toggle_display(&window, &target) {
                        Ok(before) => tracing::debug!(
                            description = %target_id,
                            was_visible = before.is_visible(),
                            "toggled description"
                        ),
                        Err(e) => tracing::warn!(error = %e, description = %target_id, "toggle failed"),
                    }
                }));
            self.stats.toggles += 1;
        }
    }

    fn bind_textareas(&mut self, document: &web_sys::Document, config: &EnhancerConfig) {
        let found = document.get_elements_by_tag_name("textarea");
        let textareas = (0..found.length())
            .filter_map(|i| found.item(i))
            .filter_map(|el| el.dyn_into::<web_sys::HtmlTextAreaElement>().ok())
            .collect::<Vec<_>>();

        for el in textareas {
            if config.tab_indent {
                self.bind_tab_indent(&el);
            }
            if config.autosize {
                self.bind_autosize(&el);
            }
            self.stats.textareas += 1;
        }
    }

    fn bind_autosize(&mut self, el: &web_sys::HtmlTextAreaElement) {
        let key = self.autosizer.register();
        self.keys.push(key);

        for event in IMMEDIATE_EVENTS {
            let (sizer, target) = (self.autosizer.clone(), el.clone());
            self.listeners.push(EventListener::new(el, event, move |_| {
                if let Err(e) = sizer.resize(&target, key) {
                    tracing::warn!(error = %e, ?key, "textarea resize failed");
                }
            }));
        }

        for event in DEFERRED_EVENTS {
            let (sizer, target) = (self.autosizer.clone(), el.clone());
            self.listeners.push(EventListener::new(el, event, move |_| {
                if let Err(e) = sizer.resize_later(target.clone(), key) {
                    tracing::warn!(error = %e, ?key, "could not schedule textarea resize");
                }
            }));
        }

        // Fit the initial content.
        if let Err(e) = self.autosizer.resize(el, key) {
            tracing::warn!(error = %e, ?key, "initial textarea resize failed");
        }
    }

    fn bind_tab_indent(&mut self, el: &web_sys::HtmlTextAreaElement) {
        let target = el.clone();
        self.listeners.push(EventListener::new_with_options(
            el,
            "keydown",
            EventListenerOptions::enable_prevent_default(),
            move |ev| {
                let Some(ev) = ev.dyn_ref::<web_sys::KeyboardEvent>() else {
                    return;
                };
                if let Err(e) = indent::handle_tab_key(&target, ev) {
                    tracing::warn!(error = %e, "tab edit failed");
                }
            },
        ));
    }

    fn bind_confirm_guard(&mut self, document: &web_sys::Document, config: &EnhancerConfig) {
        let attribute = config.confirm_attribute.clone();
        // Capture phase at the document runs before any handler on the target.
        let options = EventListenerOptions {
            phase: EventListenerPhase::Capture,
            passive: false,
        };
        self.listeners.push(EventListener::new_with_options(
            document,
            "click",
            options,
            move |ev| {
                let verdict = confirm::guard_click(ev, &attribute);
                if verdict != confirm::Verdict::Unguarded {
                    tracing::debug!(?verdict, "confirm guard");
                }
            },
        ));
        self.stats.confirm_guard = true;
    }
}

impl Drop for EnhancedPage {
    fn drop(&mut self) {
        for key in self.keys.drain(..) {
            self.autosizer.release(key);
        }
    }
}

/// Bind every enabled behavior on `document`.
pub fn enhance_document(
    document: &web_sys::Document,
    config: &EnhancerConfig,
) -> Result<EnhancedPage> {
    let window = util::window()?;
    let mut page = EnhancedPage::new(Autosizer::new(config.max_height, config.resize_policy));

    if config.toggle {
        page.bind_toggles(&window, document, config);
    }
    if config.autosize || config.tab_indent {
        page.bind_textareas(document, config);
    }
    if config.confirm {
        page.bind_confirm_guard(document, config);
    }

    tracing::info!(stats = ?page.stats, "page enhanced");
    Ok(page)
}

/// Enhance the current document once it has finished loading.
pub fn on_page_load(config: EnhancerConfig) -> Result<()> {
    let window = util::window()?;
    let document = util::document()?;

    if document.ready_state() == "complete" {
        enhance_document(&document, &config)?.forget();
        return Ok(());
    }

    EventListener::once(&window, "load", move |_| {
        match enhance_document(&document, &config) {
            Ok(page) => page.forget(),
            Err(e) => tracing::error!(error = %e, "page enhancement failed"),
        }
    })
    .forget();
    Ok(())
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount(html: &str) -> web_sys::HtmlElement {
        let document = util::document().unwrap();
        let root = document
            .create_element("div")
            .unwrap()
            .dyn_into::<web_sys::HtmlElement>()
            .unwrap();
        root.set_inner_html(html);
        document.body().unwrap().append_child(&root).unwrap();
        root
    }

    fn element<T: JsCast>(id: &str) -> T {
        util::document()
            .unwrap()
            .get_element_by_id(id)
            .unwrap()
            .dyn_into::<T>()
            .unwrap()
    }

    fn inline_display(id: &str) -> String {
        element::<web_sys::HtmlElement>(id)
            .style()
            .get_property_value("display")
            .unwrap()
    }

    fn press_tab(el: &web_sys::HtmlTextAreaElement, shift: bool) {
        let init = web_sys::KeyboardEventInit::new();
        init.set_key("Tab");
        init.set_shift_key(shift);
        init.set_bubbles(true);
        init.set_cancelable(true);
        let ev = web_sys::KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
        el.dispatch_event(&ev).unwrap();
    }

    #[wasm_bindgen_test]
    fn test_toggle_flips_and_restores() {
        let root = mount(
            r#"<button id="t1" class="expansion-button">more</button>
               <div id="t1-description" style="display: none">details</div>"#,
        );
        let config = EnhancerConfig {
            confirm: false,
            ..Default::default()
        };
        let page = enhance_document(&util::document().unwrap(), &config).unwrap();
        assert_eq!(page.stats().toggles, 1);

        let button = element::<web_sys::HtmlElement>("t1");
        button.click();
        assert_eq!(inline_display("t1-description"), "block");
        button.click();
        assert_eq!(inline_display("t1-description"), "none");

        drop(page);
        root.remove();
    }

    #[wasm_bindgen_test]
    fn test_loaded_document_enhanced_immediately() {
        let root = mount(
            r#"<button id="t9" class="expansion-button">more</button>
               <div id="t9-description">details</div>"#,
        );
        assert_eq!(util::document().unwrap().ready_state(), "complete");
        let config = EnhancerConfig {
            autosize: false,
            tab_indent: false,
            confirm: false,
            ..Default::default()
        };
        on_page_load(config).unwrap();

        element::<web_sys::HtmlElement>("t9").click();
        assert_eq!(inline_display("t9-description"), "none");

        root.remove();
    }

    #[wasm_bindgen_test]
    fn test_missing_companion_is_skipped() {
        let root = mount(r#"<button id="orphan" class="expansion-button">x</button>"#);
        let config = EnhancerConfig {
            confirm: false,
            ..Default::default()
        };
        let page = enhance_document(&util::document().unwrap(), &config).unwrap();
        assert_eq!(page.stats().toggles, 0);
        assert_eq!(page.stats().skipped_toggles, 1);
        drop(page);
        root.remove();
    }

    #[wasm_bindgen_test]
    fn test_tab_key_indents_selection() {
        let root = mount(r#"<textarea id="ta1"></textarea>"#);
        let config = EnhancerConfig {
            confirm: false,
            autosize: false,
            ..Default::default()
        };
        let page = enhance_document(&util::document().unwrap(), &config).unwrap();

        let ta = element::<web_sys::HtmlTextAreaElement>("ta1");
        ta.set_value("a\nb");
        ta.set_selection_range(0, 3).unwrap();
        press_tab(&ta, false);
        assert_eq!(ta.value(), "\ta\n\tb");
        assert_eq!(ta.selection_end().unwrap(), Some(5));

        press_tab(&ta, true);
        assert_eq!(ta.value(), "a\nb");
        assert_eq!(ta.selection_start().unwrap(), Some(0));
        assert_eq!(ta.selection_end().unwrap(), Some(3));

        drop(page);
        root.remove();
    }

    #[wasm_bindgen_test]
    fn test_autosize_clamps_to_max_height() {
        let root = mount(r#"<textarea id="ta2" rows="1"></textarea>"#);
        let config = EnhancerConfig {
            confirm: false,
            tab_indent: false,
            max_height: 60,
            ..Default::default()
        };
        let page = enhance_document(&util::document().unwrap(), &config).unwrap();
        assert_eq!(page.autosizer().heights().borrow().len(), 1);

        let ta = element::<web_sys::HtmlTextAreaElement>("ta2");
        ta.set_value(&"line\n".repeat(50));
        ta.dispatch_event(&web_sys::Event::new("input").unwrap()).unwrap();
        let style = ta.style();
        assert_eq!(style.get_property_value("height").unwrap(), "60px");
        assert_eq!(style.get_property_value("overflow").unwrap(), "visible");

        let heights = page.autosizer().heights().clone();
        drop(page);
        assert!(heights.borrow().is_empty());
        root.remove();
    }

    fn height_px(el: &web_sys::HtmlTextAreaElement) -> u32 {
        el.style()
            .get_property_value("height")
            .unwrap()
            .trim_end_matches("px")
            .parse()
            .unwrap()
    }

    async fn next_tick() {
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            let _ = util::window()
                .unwrap()
                .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, 0);
        });
        wasm_bindgen_futures::JsFuture::from(promise).await.unwrap();
    }

    fn autosize_only() -> EnhancerConfig {
        EnhancerConfig {
            confirm: false,
            tab_indent: false,
            toggle: false,
            max_height: 1000,
            ..Default::default()
        }
    }

    #[wasm_bindgen_test]
    fn test_prefilled_textarea_sized_at_enhancement() {
        let root = mount(r#"<textarea id="ta3" rows="1"></textarea>"#);
        let ta = element::<web_sys::HtmlTextAreaElement>("ta3");
        ta.set_value(&"line\n".repeat(10));
        assert_eq!(ta.style().get_property_value("height").unwrap(), "");

        let page = enhance_document(&util::document().unwrap(), &autosize_only()).unwrap();
        assert!(height_px(&ta) > 0);
        assert_eq!(ta.style().get_property_value("overflow").unwrap(), "hidden");

        drop(page);
        root.remove();
    }

    #[wasm_bindgen_test]
    async fn test_paste_resizes_on_next_tick() {
        let root = mount(r#"<textarea id="ta4" rows="1"></textarea>"#);
        let page = enhance_document(&util::document().unwrap(), &autosize_only()).unwrap();
        let ta = element::<web_sys::HtmlTextAreaElement>("ta4");
        let before = height_px(&ta);

        ta.set_value(&"line\n".repeat(20));
        ta.dispatch_event(&web_sys::Event::new("paste").unwrap()).unwrap();
        assert_eq!(height_px(&ta), before);

        next_tick().await;
        assert!(height_px(&ta) > before);

        drop(page);
        root.remove();
    }

    #[wasm_bindgen_test]
    fn test_cleared_content_keeps_grown_height() {
        let root = mount(r#"<textarea id="ta5" rows="1"></textarea>"#);
        let page = enhance_document(&util::document().unwrap(), &autosize_only()).unwrap();
        let ta = element::<web_sys::HtmlTextAreaElement>("ta5");
        let empty = height_px(&ta);

        ta.set_value(&"line\n".repeat(20));
        ta.dispatch_event(&web_sys::Event::new("input").unwrap()).unwrap();
        let grown = height_px(&ta);
        assert!(grown > empty);

        ta.set_value("");
        ta.dispatch_event(&web_sys::Event::new("input").unwrap()).unwrap();
        assert_eq!(height_px(&ta), grown);

        drop(page);
        root.remove();
    }

    /// Dispatch a cancelable click on `id` with `window.confirm` answering
    /// `answer`; the native dialog is restored afterwards.
    fn click_with_confirm(id: &str, answer: bool) -> bool {
        let window = util::window().unwrap();
        let native = js_sys::Reflect::get(&window, &"confirm".into()).unwrap();
        let stub = js_sys::Function::new_no_args(if answer { "return true;" } else { "return false;" });
        js_sys::Reflect::set(&window, &"confirm".into(), &stub).unwrap();

        let init = web_sys::EventInit::new();
        init.set_bubbles(true);
        init.set_cancelable(true);
        let ev = web_sys::Event::new_with_event_init_dict("click", &init).unwrap();
        let delivered = element::<web_sys::HtmlElement>(id).dispatch_event(&ev).unwrap();

        js_sys::Reflect::set(&window, &"confirm".into(), &native).unwrap();
        delivered
    }

    fn confirm_only() -> EnhancerConfig {
        EnhancerConfig {
            toggle: false,
            autosize: false,
            tab_indent: false,
            ..Default::default()
        }
    }

    #[wasm_bindgen_test]
    fn test_declined_confirm_blocks_click() {
        let root = mount(
            r#"<a id="del" href="javascript:void(0)" confirm="Really?"><span id="del-label">Delete</span></a>"#,
        );
        let page = enhance_document(&util::document().unwrap(), &confirm_only()).unwrap();
        assert!(page.stats().confirm_guard);

        // Click lands on a descendant of the marked link.
        assert!(!click_with_confirm("del-label", false));

        drop(page);
        root.remove();
    }

    #[wasm_bindgen_test]
    fn test_accepted_confirm_lets_click_through() {
        let root = mount(
            r#"<a id="arch" href="javascript:void(0)" confirm="Archive?"><span id="arch-label">Archive</span></a>"#,
        );
        let page = enhance_document(&util::document().unwrap(), &confirm_only()).unwrap();

        assert!(click_with_confirm("arch-label", true));

        drop(page);
        root.remove();
    }
}
