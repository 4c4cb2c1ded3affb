use crate::indent::{handle_tab_key, TabEdit};
use leptos::html;
use leptos::prelude::*;

/// Tab / Shift+Tab editing for the textarea behind `node_ref`.
#[derive(Clone, Copy)]
pub struct TabIndent {
    node_ref: NodeRef<html::Textarea>,
}

impl TabIndent {
    /// Call from `on:keydown`. Returns the edit when the key was a Tab.
    pub fn on_keydown(&self, ev: &web_sys::KeyboardEvent) -> Option<TabEdit> {
        let el = self.node_ref.get_untracked()?;
        match handle_tab_key(&el, ev) {
            Ok(edit) => edit,
            Err(e) => {
                tracing::warn!(error = %e, "tab edit failed");
                None
            }
        }
    }
}

pub fn use_tab_indent(node_ref: NodeRef<html::Textarea>) -> TabIndent {
    TabIndent { node_ref }
}
