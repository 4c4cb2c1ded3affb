use crate::autosize::{ResizePolicy, DEFAULT_MAX_HEIGHT};
use crate::confirm::DEFAULT_CONFIRM_ATTRIBUTE;
use crate::error::{EnhanceError, Result};
use crate::toggle::{DEFAULT_DESCRIPTION_SUFFIX, DEFAULT_EXPANSION_CLASS};
use serde::{Deserialize, Serialize};

/// `window.PAGE_ENHANCER = { ... }`
pub const GLOBAL_KEY: &str = "PAGE_ENHANCER";

/// `<script type="application/json" id="page-enhancer-config">{ ... }</script>`
pub const CONFIG_ELEMENT_ID: &str = "page-enhancer-config";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EnhancerConfig {
    #[serde(alias = "max_height")]
    pub max_height: u32,
    #[serde(alias = "expansion_class")]
    pub expansion_class: String,
    #[serde(alias = "description_suffix")]
    pub description_suffix: String,
    #[serde(alias = "confirm_attribute")]
    pub confirm_attribute: String,
    #[serde(alias = "resize_policy")]
    pub resize_policy: ResizePolicy,

    /// Behavior switches.
    pub toggle: bool,
    pub autosize: bool,
    #[serde(alias = "tab_indent")]
    pub tab_indent: bool,
    pub confirm: bool,
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            max_height: DEFAULT_MAX_HEIGHT,
            expansion_class: DEFAULT_EXPANSION_CLASS.to_string(),
            description_suffix: DEFAULT_DESCRIPTION_SUFFIX.to_string(),
            confirm_attribute: DEFAULT_CONFIRM_ATTRIBUTE.to_string(),
            resize_policy: ResizePolicy::default(),
            toggle: true,
            autosize: true,
            tab_indent: true,
            confirm: true,
        }
    }
}

impl EnhancerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str::<Self>(json)
            .map_err(|e| EnhanceError::InvalidConfig(e.to_string()))?
            .validated()
    }

    pub fn validated(self) -> Result<Self> {
        if self.max_height == 0 {
            return Err(EnhanceError::InvalidConfig(
                "maxHeight must be positive".to_string(),
            ));
        }
        if self.expansion_class.trim().is_empty() {
            return Err(EnhanceError::InvalidConfig(
                "expansionClass must not be empty".to_string(),
            ));
        }
        // An empty suffix would pair every trigger with itself.
        if self.description_suffix.trim().is_empty() {
            return Err(EnhanceError::InvalidConfig(
                "descriptionSuffix must not be empty".to_string(),
            ));
        }
        if self.confirm_attribute.trim().is_empty() {
            return Err(EnhanceError::InvalidConfig(
                "confirmAttribute must not be empty".to_string(),
            ));
        }
        Ok(self)
    }

    /// Page configuration: the window global first, then the JSON script
    /// element, then defaults. A broken configuration falls back to defaults.
    pub fn load() -> Self {
        let Some(json) = Self::read_window_global().or_else(Self::read_config_element) else {
            return Self::default();
        };

        match Self::from_json(&json) {
            Ok(config) => {
                tracing::debug!(?config, "loaded page configuration");
                config
            }
            Err(e) => {
                tracing::warn!(error = %e, "ignoring page configuration, using defaults");
                Self::default()
            }
        }
    }

    fn read_window_global() -> Option<String> {
        let window = web_sys::window()?;
        let value = js_sys::Reflect::get(&window, &GLOBAL_KEY.into()).ok()?;
        if value.is_undefined() || value.is_null() || !value.is_object() {
            return None;
        }
        js_sys::JSON::stringify(&value).ok()?.as_string()
    }

    fn read_config_element() -> Option<String> {
        let document = web_sys::window()?.document()?;
        document
            .get_element_by_id(CONFIG_ELEMENT_ID)?
            .text_content()
            .filter(|text| !text.trim().is_empty())
    }
}
