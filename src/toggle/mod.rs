//! Show/hide a description element from its trigger button.

use crate::error::{EnhanceError, Result};
use wasm_bindgen::JsCast;

pub const HIDDEN: &str = "none";
pub const SHOWN: &str = "block";

pub const DEFAULT_EXPANSION_CLASS: &str = "expansion-button";
pub const DEFAULT_DESCRIPTION_SUFFIX: &str = "-description";

/// Explicit target override on a trigger: `data-description-id="..."`.
pub const TARGET_ATTRIBUTE: &str = "data-description-id";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisplayState {
    Hidden,
    /// Any computed value other than `none`.
    Shown(String),
}

impl DisplayState {
    pub fn from_computed(value: &str) -> Self {
        let value = value.trim();
        if value == HIDDEN {
            Self::Hidden
        } else {
            Self::Shown(value.to_string())
        }
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Shown(_))
    }

    /// The inline `display` value that flips this state.
    pub fn toggled(&self) -> &'static str {
        match self {
            Self::Hidden => SHOWN,
            Self::Shown(_) => HIDDEN,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpansionPair {
    pub trigger_id: String,
    pub target_id: String,
}

impl ExpansionPair {
    /// `explicit` wins over the `trigger_id + suffix` convention.
    pub fn resolve(trigger_id: &str, explicit: Option<&str>, suffix: &str) -> Self {
        let target_id = match explicit.map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => format!("{trigger_id}{suffix}"),
        };
        Self {
            trigger_id: trigger_id.to_string(),
            target_id,
        }
    }
}

/// Find the element a trigger controls.
pub fn resolve_target(
    document: &web_sys::Document,
    trigger: &web_sys::Element,
    suffix: &str,
) -> Result<(ExpansionPair, web_sys::HtmlElement)> {
    let id = trigger.id();
    if id.is_empty() {
        return Err(EnhanceError::UnnamedTrigger);
    }

    let pair = ExpansionPair::resolve(
        &id,
        trigger.get_attribute(TARGET_ATTRIBUTE).as_deref(),
        suffix,
    );
    let target = document
        .get_element_by_id(&pair.target_id)
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
        .ok_or_else(|| EnhanceError::MissingCompanion {
            trigger: pair.trigger_id.clone(),
            target: pair.target_id.clone(),
        })?;

    Ok((pair, target))
}

/// Flip `target` between hidden and shown. Returns the state before the flip.
pub fn toggle_display(
    window: &web_sys::Window,
    target: &web_sys::HtmlElement,
) -> Result<DisplayState> {
    let current = match window.get_computed_style(target)? {
        Some(style) => style.get_property_value("display")?,
        None => String::new(),
    };

    let state = DisplayState::from_computed(&current);
    target.style().set_property("display", state.toggled())?;
    Ok(state)
}
