//! Confirm-before-click guard for elements carrying a prompt attribute.

use crate::util;
use wasm_bindgen::JsCast;

pub const DEFAULT_CONFIRM_ATTRIBUTE: &str = "confirm";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// No marked element between the click target and the root.
    Unguarded,
    Accepted,
    Declined,
}

/// First prompt found walking outwards from the click target.
pub fn nearest_prompt<I>(chain: I) -> Option<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    chain.into_iter().flatten().next()
}

/// Prompt of the nearest element at or above `node` carrying `attribute`.
pub fn prompt_for(node: &web_sys::Node, attribute: &str) -> Option<String> {
    let start = match node.dyn_ref::<web_sys::Element>() {
        Some(el) => Some(el.clone()),
        None => node.parent_element(),
    };
    nearest_prompt(
        std::iter::successors(start, |el| el.parent_element()).map(|el| el.get_attribute(attribute)),
    )
}

/// Ask before letting a click through; a declined click goes nowhere else.
pub fn guard_click(ev: &web_sys::Event, attribute: &str) -> Verdict {
    let Some(prompt) = ev
        .target()
        .and_then(|t| t.dyn_into::<web_sys::Node>().ok())
        .and_then(|node| prompt_for(&node, attribute))
    else {
        return Verdict::Unguarded;
    };

    if util::ask(&prompt) {
        Verdict::Accepted
    } else {
        ev.prevent_default();
        ev.stop_immediate_propagation();
        Verdict::Declined
    }
}
