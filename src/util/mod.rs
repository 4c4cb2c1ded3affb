use crate::error::{EnhanceError, Result};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

pub(crate) fn window() -> Result<web_sys::Window> {
    web_sys::window().ok_or(EnhanceError::NoWindow)
}

pub(crate) fn document() -> Result<web_sys::Document> {
    window()?.document().ok_or(EnhanceError::NoDocument)
}

/// Run `f` on the next tick, after the browser has applied the pending edit.
///
/// Fire-and-forget: callbacks run in scheduling order and cannot be cancelled.
pub(crate) fn defer(f: impl FnOnce() + 'static) -> Result<()> {
    window()?.set_timeout_with_callback_and_timeout_and_arguments_0(
        Closure::once_into_js(f).as_ref().unchecked_ref(),
        0,
    )?;
    Ok(())
}

/// Ask the user through the native blocking dialog. A dialog that cannot be
/// shown counts as declined.
pub(crate) fn ask(prompt: &str) -> bool {
    match window().and_then(|w| w.confirm_with_message(prompt).map_err(Into::into)) {
        Ok(accepted) => accepted,
        Err(e) => {
            tracing::warn!(error = %e, "confirmation dialog unavailable");
            false
        }
    }
}
