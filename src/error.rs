use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug, Error)]
pub enum EnhanceError {
    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("expansion trigger has no id")]
    UnnamedTrigger,

    /// Markup error: a trigger points at an element that is not on the page.
    #[error("companion element `{target}` for trigger `{trigger}` not found")]
    MissingCompanion { trigger: String, target: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for EnhanceError {
    fn from(value: JsValue) -> Self {
        if let Some(err) = value.dyn_ref::<js_sys::Error>() {
            return Self::Js(String::from(err.message()));
        }
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

pub type Result<T, E = EnhanceError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_companion_message_names_both_ids() {
        let e = EnhanceError::MissingCompanion {
            trigger: "notes".to_string(),
            target: "notes-description".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "companion element `notes-description` for trigger `notes` not found"
        );
    }

    #[test]
    fn test_invalid_config_message() {
        let e = EnhanceError::InvalidConfig("maxHeight must be positive".to_string());
        assert_eq!(
            e.to_string(),
            "invalid configuration: maxHeight must be positive"
        );
    }
}
