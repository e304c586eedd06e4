//! Capabilities the controller needs from its environment.
//!
//! SYSTEM CONTEXT
//! ==============
//! The controller never reaches for globals. Storage, the OS color-scheme
//! signal, the document and timers are all injected through these traits so
//! browser glue stays in `browser` and tests can drive a fake host with a
//! manual clock.

use std::time::Duration;

use crate::error::ThemeError;

/// Durable, synchronous, origin-scoped key-value store.
pub trait PreferenceStore {
    /// # Errors
    ///
    /// Returns [`ThemeError::Storage`] or [`ThemeError::Unavailable`] when the store cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, ThemeError>;

    /// # Errors
    ///
    /// Returns [`ThemeError::Storage`] or [`ThemeError::Unavailable`] when the write is refused.
    fn save(&self, key: &str, value: &str) -> Result<(), ThemeError>;
}

/// The host's "prefers dark" signal.
pub trait ColorSchemeQuery {
    /// `None` when the host has no media-query support.
    fn prefers_dark(&self) -> Option<bool>;

    /// Register `listener` for preference changes. Returns `Ok(false)` when
    /// the host cannot report changes.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::MediaQuery`] when the listener cannot be attached.
    fn watch(&self, listener: Box<dyn Fn(bool)>) -> Result<bool, ThemeError>;
}

/// The slice of the DOM the controller touches.
///
/// Fallible methods return [`ThemeError::Dom`] when the document rejects the
/// mutation, or [`ThemeError::Unavailable`] when there is no root element.
pub trait Dom {
    type Element: Clone;

    fn root_attribute(&self, name: &str) -> Option<String>;
    /// # Errors
    ///
    /// See [`Dom`].
    fn set_root_attribute(&self, name: &str, value: &str) -> Result<(), ThemeError>;
    /// # Errors
    ///
    /// See [`Dom`].
    fn remove_root_attribute(&self, name: &str) -> Result<(), ThemeError>;

    /// First element matching a class selector such as `.navbar-nav`.
    fn query(&self, selector: &str) -> Option<Self::Element>;
    /// # Errors
    ///
    /// See [`Dom`].
    fn create_element(&self, tag: &str) -> Result<Self::Element, ThemeError>;
    /// # Errors
    ///
    /// See [`Dom`].
    fn set_attribute(&self, element: &Self::Element, name: &str, value: &str) -> Result<(), ThemeError>;
    /// # Errors
    ///
    /// See [`Dom`].
    fn set_inner_html(&self, element: &Self::Element, html: &str) -> Result<(), ThemeError>;
    /// # Errors
    ///
    /// See [`Dom`].
    fn append_child(&self, parent: &Self::Element, child: &Self::Element) -> Result<(), ThemeError>;

    /// Run `handler` on activation. Hosts suppress the element's default action.
    ///
    /// # Errors
    ///
    /// See [`Dom`].
    fn on_click(&self, element: &Self::Element, handler: Box<dyn Fn()>) -> Result<(), ThemeError>;
}

/// Fire-and-forget timers on the UI thread.
pub trait Scheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>);
}

/// Everything a [`crate::ThemeController`] runs against.
pub trait Host: PreferenceStore + ColorSchemeQuery + Dom + Scheduler {}

impl<T> Host for T where T: PreferenceStore + ColorSchemeQuery + Dom + Scheduler {}
