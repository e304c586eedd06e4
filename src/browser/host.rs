//! `web-sys` implementation of the host traits.

use std::time::Duration;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, MediaQueryList, MediaQueryListEvent, Storage, Window};

use crate::error::ThemeError;
use crate::host::{ColorSchemeQuery, Dom, PreferenceStore, Scheduler};

const PREFERS_DARK_QUERY: &str = "(prefers-color-scheme: dark)";

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

pub struct BrowserHost {
    window: Window,
    document: Document,
}

impl BrowserHost {
    /// Bind to the current window.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Unavailable`] outside a document context (e.g. workers).
    pub fn from_window() -> Result<Self, ThemeError> {
        let window = web_sys::window().ok_or(ThemeError::Unavailable("window"))?;
        let document = window.document().ok_or(ThemeError::Unavailable("document"))?;
        Ok(Self { window, document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn storage(&self) -> Result<Storage, ThemeError> {
        match self.window.local_storage() {
            Ok(Some(storage)) => Ok(storage),
            Ok(None) => Err(ThemeError::Unavailable("localStorage")),
            Err(e) => Err(ThemeError::Storage(describe(&e))),
        }
    }

    fn media_query(&self) -> Option<MediaQueryList> {
        match self.window.match_media(PREFERS_DARK_QUERY) {
            Ok(list) => list,
            Err(e) => {
                log::debug!("matchMedia unsupported: {}", describe(&e));
                None
            }
        }
    }

    fn root(&self) -> Result<Element, ThemeError> {
        self.document
            .document_element()
            .ok_or(ThemeError::Unavailable("document element"))
    }
}

impl PreferenceStore for BrowserHost {
    fn load(&self, key: &str) -> Result<Option<String>, ThemeError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| ThemeError::Storage(describe(&e)))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), ThemeError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| ThemeError::Storage(describe(&e)))
    }
}

impl ColorSchemeQuery for BrowserHost {
    fn prefers_dark(&self) -> Option<bool> {
        self.media_query().map(|list| list.matches())
    }

    fn watch(&self, listener: Box<dyn Fn(bool)>) -> Result<bool, ThemeError> {
        let Some(list) = self.media_query() else {
            return Ok(false);
        };
        let closure = Closure::wrap(Box::new(move |event: MediaQueryListEvent| {
            listener(event.matches());
        }) as Box<dyn FnMut(MediaQueryListEvent)>);
        list.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())
            .map_err(|e| ThemeError::MediaQuery(describe(&e)))?;
        // Lives as long as the page.
        closure.forget();
        Ok(true)
    }
}

impl Dom for BrowserHost {
    type Element = Element;

    fn root_attribute(&self, name: &str) -> Option<String> {
        self.document
            .document_element()
            .and_then(|root| root.get_attribute(name))
    }

    fn set_root_attribute(&self, name: &str, value: &str) -> Result<(), ThemeError> {
        self.root()?
            .set_attribute(name, value)
            .map_err(|e| ThemeError::Dom(describe(&e)))
    }

    fn remove_root_attribute(&self, name: &str) -> Result<(), ThemeError> {
        self.root()?
            .remove_attribute(name)
            .map_err(|e| ThemeError::Dom(describe(&e)))
    }

    fn query(&self, selector: &str) -> Option<Element> {
        match self.document.query_selector(selector) {
            Ok(found) => found,
            Err(e) => {
                log::warn!("bad selector {selector:?}: {}", describe(&e));
                None
            }
        }
    }

    fn create_element(&self, tag: &str) -> Result<Element, ThemeError> {
        self.document
            .create_element(tag)
            .map_err(|e| ThemeError::Dom(describe(&e)))
    }

    fn set_attribute(&self, element: &Element, name: &str, value: &str) -> Result<(), ThemeError> {
        element
            .set_attribute(name, value)
            .map_err(|e| ThemeError::Dom(describe(&e)))
    }

    fn set_inner_html(&self, element: &Element, html: &str) -> Result<(), ThemeError> {
        element.set_inner_html(html);
        Ok(())
    }

    fn append_child(&self, parent: &Element, child: &Element) -> Result<(), ThemeError> {
        parent
            .append_child(child)
            .map(drop)
            .map_err(|e| ThemeError::Dom(describe(&e)))
    }

    fn on_click(&self, element: &Element, handler: Box<dyn Fn()>) -> Result<(), ThemeError> {
        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            // The toggle is an `href="#"` link.
            event.prevent_default();
            handler();
        }) as Box<dyn FnMut(web_sys::Event)>);
        element
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .map_err(|e| ThemeError::Dom(describe(&e)))?;
        closure.forget();
        Ok(())
    }
}

impl Scheduler for BrowserHost {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, task).forget();
    }
}
