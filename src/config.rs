//! Controller configuration.
//!
//! Every field has a default matching the stock site markup, so an empty JSON
//! object (or no config at all) is valid.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use serde::Deserialize;

use crate::error::ThemeError;

/// A global `object.method` the browser host calls after each apply.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct HookPath {
    pub object: String,
    pub method: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Key of the persisted preference.
    pub storage_key: String,
    /// Attribute set to `"dark"` on the document root.
    pub root_attribute: String,
    /// Selector of the navbar list the toggle is appended to.
    pub nav_selector: String,
    /// Marker class on the toggle link, also used to detect an existing toggle.
    pub toggle_class: String,
    pub retry_interval_ms: u32,
    /// `None` keeps retrying until the navbar shows up.
    pub max_mount_attempts: Option<u32>,
    pub hook_delay_ms: u32,
    pub navbar_hook: Option<HookPath>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".to_owned(),
            root_attribute: "data-theme".to_owned(),
            nav_selector: ".navbar-nav".to_owned(),
            toggle_class: "theme-toggle".to_owned(),
            retry_interval_ms: 500,
            max_mount_attempts: None,
            hook_delay_ms: 10,
            navbar_hook: Some(HookPath {
                object: "BeautifulJekyllJS".to_owned(),
                method: "initNavbar".to_owned(),
            }),
        }
    }
}

impl ThemeConfig {
    /// Parse a JSON object, filling omitted fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Config`] for malformed JSON or mistyped fields.
    pub fn from_json(raw: &str) -> Result<Self, ThemeError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn toggle_selector(&self) -> String {
        format!(".{}", self.toggle_class)
    }

    pub fn retry_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.retry_interval_ms))
    }

    pub fn hook_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.hook_delay_ms))
    }
}
