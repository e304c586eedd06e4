//! Browser entry points (feature `hydrate`).
//!
//! SYSTEM CONTEXT
//! ==============
//! The page loads the WASM bundle and calls `start_theme_toggle`. The
//! controller is created once per page and kept in a thread-local so click
//! and media-query callbacks (which only hold weak references) stay live.

mod hook;
mod host;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

pub use hook::global_hook;
pub use host::BrowserHost;

use crate::config::ThemeConfig;
use crate::controller::ThemeController;
use crate::error::ThemeError;
use crate::theme::Theme;

thread_local! {
    static CONTROLLER: RefCell<Option<ThemeController<BrowserHost>>> = const { RefCell::new(None) };
}

fn install_logging() {
    console_error_panic_hook::set_once();
    // A second start finds the logger already installed.
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        log::debug!("console logger not installed: {e}");
    }
}

/// Create the page controller (or reuse the existing one) and initialize it
/// once the document has finished parsing.
///
/// # Errors
///
/// Returns [`ThemeError::Unavailable`] without a window or document, and
/// [`ThemeError::Dom`] if the `DOMContentLoaded` listener cannot be attached.
pub fn start(config: ThemeConfig) -> Result<ThemeController<BrowserHost>, ThemeError> {
    if let Some(existing) = CONTROLLER.with(|slot| slot.borrow().clone()) {
        existing.initialize();
        return Ok(existing);
    }

    let host = BrowserHost::from_window()?;
    let loading = host.document().ready_state() == "loading";
    let document = host.document().clone();
    let hook = config.navbar_hook.clone().map(global_hook);
    let controller = ThemeController::new(host, config, hook);
    CONTROLLER.with(|slot| *slot.borrow_mut() = Some(controller.clone()));

    if loading {
        let ready = controller.clone();
        let closure = Closure::once(move || ready.initialize());
        document
            .add_event_listener_with_callback("DOMContentLoaded", closure.as_ref().unchecked_ref())
            .map_err(|e| ThemeError::Dom(format!("{e:?}")))?;
        closure.forget();
    } else {
        controller.initialize();
    }
    Ok(controller)
}

/// JS entry point. `config` is an optional JSON object overriding defaults.
///
/// # Errors
///
/// Rejects with the error message when the config is invalid or [`start`] fails.
#[wasm_bindgen]
pub fn start_theme_toggle(config: Option<String>) -> Result<(), JsValue> {
    install_logging();
    let config = match config.as_deref() {
        Some(raw) => ThemeConfig::from_json(raw),
        None => Ok(ThemeConfig::default()),
    }
    .map_err(|e| JsValue::from_str(&e.to_string()))?;
    start(config)
        .map(drop)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Flip the theme from script, e.g. a keyboard shortcut. Returns the new
/// theme, or `None` before `start_theme_toggle` has run.
#[wasm_bindgen]
pub fn toggle_theme() -> Option<String> {
    CONTROLLER.with(|slot| {
        slot.borrow()
            .as_ref()
            .map(|controller| controller.toggle_theme().as_str().to_owned())
    })
}

/// Theme currently on the document root.
#[wasm_bindgen]
pub fn current_theme() -> String {
    CONTROLLER.with(|slot| {
        slot.borrow()
            .as_ref()
            .map_or(Theme::Light, ThemeController::current_theme)
            .as_str()
            .to_owned()
    })
}
