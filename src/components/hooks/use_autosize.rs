use crate::autosize::{Autosizer, ResizePolicy, SharedHeights, TextareaKey};
use leptos::html;
use leptos::prelude::*;
use std::rc::Rc;

thread_local! {
    // Remembered heights of every mounted `AutoTextarea`.
    static HEIGHTS: SharedHeights = SharedHeights::default();
}

/// Handle returned by [`use_autosize`]; wire its methods to the textarea events.
#[derive(Clone, Copy)]
pub struct Autosize {
    key: TextareaKey,
    node_ref: NodeRef<html::Textarea>,
    max_height: u32,
    policy: ResizePolicy,
}

impl Autosize {
    fn sizer(&self) -> Autosizer {
        Autosizer::with_table(HEIGHTS.with(Rc::clone), self.max_height, self.policy)
    }

    /// After `input` / `change`: the content is already up to date.
    pub fn resize_now(&self) {
        let Some(el) = self.node_ref.get_untracked() else {
            return;
        };
        if let Err(e) = self.sizer().resize(&el, self.key) {
            tracing::warn!(error = %e, key = ?self.key, "textarea resize failed");
        }
    }

    /// After `cut` / `paste` / `drop` / `keydown`: measure on the next tick.
    pub fn resize_later(&self) {
        let Some(el) = self.node_ref.get_untracked() else {
            return;
        };
        if let Err(e) = self.sizer().resize_later(el, self.key) {
            tracing::warn!(error = %e, key = ?self.key, "could not schedule textarea resize");
        }
    }

    pub fn remembered(&self) -> Option<u32> {
        HEIGHTS.with(|h| h.borrow().remembered(self.key))
    }
}

/// Auto-size the textarea behind `node_ref`.
///
/// Sizes once when the element mounts; the remembered height is dropped with
/// the owning component.
pub fn use_autosize(
    node_ref: NodeRef<html::Textarea>,
    max_height: u32,
    policy: ResizePolicy,
) -> Autosize {
    let key = HEIGHTS.with(|h| h.borrow_mut().register());
    on_cleanup(move || HEIGHTS.with(|h| h.borrow_mut().forget(key)));

    let autosize = Autosize {
        key,
        node_ref,
        max_height,
        policy,
    };

    Effect::new(move |_| {
        if node_ref.get().is_some() {
            autosize.resize_now();
        }
    });

    autosize
}
