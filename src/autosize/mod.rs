//! Auto-sizing textareas.
//!
//! A textarea is grown to fit its content, up to a configured maximum. Past
//! the maximum it scrolls. Under [`ResizePolicy::KeepGrown`] a box never
//! shrinks back on its own once it has grown.

use crate::error::Result;
use crate::util;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

pub const DEFAULT_MAX_HEIGHT: u32 = 400;

/// Edits after which the content is re-measured right away.
pub const IMMEDIATE_EVENTS: [&str; 2] = ["change", "input"];

/// Edits that fire before the browser updates the content; re-measured on the
/// next tick.
pub const DEFERRED_EVENTS: [&str; 4] = ["cut", "paste", "drop", "keydown"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Overflow {
    Hidden,
    Visible,
}

#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ResizePolicy {
    /// Always adopt the measured height.
    Fit,
    /// Grow immediately, never shrink below the last adopted height.
    #[default]
    KeepGrown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fit {
    pub height: u32,
    pub overflow: Overflow,
}

/// Clamp a measured content height to `max`.
pub fn fit_height(natural: u32, max: u32) -> Fit {
    if natural > max {
        Fit {
            height: max,
            overflow: Overflow::Visible,
        }
    } else {
        Fit {
            height: natural,
            overflow: Overflow::Hidden,
        }
    }
}

/// Decide the height to apply given the last remembered one.
pub fn resolve_height(remembered: Option<u32>, fit: Fit, policy: ResizePolicy) -> Fit {
    match (policy, remembered) {
        (ResizePolicy::KeepGrown, Some(prev)) if prev > fit.height => Fit {
            height: prev,
            ..fit
        },
        _ => fit,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextareaKey(u32);

/// Remembered heights, one entry per enhanced textarea.
///
/// An entry appears on the first resize and disappears on [`HeightTable::forget`].
#[derive(Debug, Default)]
pub struct HeightTable {
    next_key: u32,
    heights: BTreeMap<TextareaKey, u32>,
}

impl HeightTable {
    pub fn register(&mut self) -> TextareaKey {
        let key = TextareaKey(self.next_key);
        self.next_key = self.next_key.wrapping_add(1);
        key
    }

    pub fn remembered(&self, key: TextareaKey) -> Option<u32> {
        self.heights.get(&key).copied()
    }

    pub fn forget(&mut self, key: TextareaKey) {
        self.heights.remove(&key);
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// One resize step: clamp, apply the policy, remember the result.
    pub fn apply(
        &mut self,
        key: TextareaKey,
        natural: u32,
        max_height: u32,
        policy: ResizePolicy,
    ) -> Fit {
        let fit = fit_height(natural, max_height);
        let resolved = resolve_height(self.remembered(key), fit, policy);
        self.heights.insert(key, resolved.height);
        resolved
    }
}

pub type SharedHeights = Rc<RefCell<HeightTable>>;

/// Measures and sizes textareas against a shared [`HeightTable`].
#[derive(Clone, Debug)]
pub struct Autosizer {
    heights: SharedHeights,
    max_height: u32,
    policy: ResizePolicy,
}

impl Autosizer {
    pub fn new(max_height: u32, policy: ResizePolicy) -> Self {
        Self::with_table(SharedHeights::default(), max_height, policy)
    }

    pub fn with_table(heights: SharedHeights, max_height: u32, policy: ResizePolicy) -> Self {
        Self {
            heights,
            max_height,
            policy,
        }
    }

    pub fn heights(&self) -> &SharedHeights {
        &self.heights
    }

    pub fn register(&self) -> TextareaKey {
        self.heights.borrow_mut().register()
    }

    pub fn release(&self, key: TextareaKey) {
        self.heights.borrow_mut().forget(key);
    }

    pub fn resize(&self, el: &web_sys::HtmlTextAreaElement, key: TextareaKey) -> Result<Fit> {
        let style = el.style();
        // Collapse first so scrollHeight reports the content height, not the box.
        style.set_property("height", "auto")?;
        let natural = el.scroll_height().max(0) as u32;

        let fit = self
            .heights
            .borrow_mut()
            .apply(key, natural, self.max_height, self.policy);

        style.set_property("height", &format!("{}px", fit.height))?;
        style.set_property("overflow", fit.overflow.as_ref())?;

        tracing::trace!(
            ?key,
            natural,
            height = fit.height,
            overflow = %fit.overflow,
            "resized textarea"
        );
        Ok(fit)
    }

    pub fn resize_later(&self, el: web_sys::HtmlTextAreaElement, key: TextareaKey) -> Result<()> {
        let sizer = self.clone();
        util::defer(move || {
            if let Err(e) = sizer.resize(&el, key) {
                tracing::warn!(error = %e, ?key, "deferred textarea resize failed");
            }
        })
    }
}
