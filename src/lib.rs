//! # theme-toggle
//!
//! Light/dark theme switcher for static sites. A single [`ThemeController`]
//! reconciles three loosely coupled sources of truth: the preference persisted
//! in a key-value store, the OS color-scheme signal, and the `data-theme`
//! attribute on the document root. It also mounts a toggle link into the
//! site's navbar, retrying until the navbar exists.
//!
//! The controller talks to its environment only through the capability traits
//! in [`host`], so the same logic runs against `web-sys` in the browser
//! (feature `hydrate`) and against an in-memory fake in tests.

pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod theme;

#[cfg(feature = "hydrate")]
pub mod browser;

#[cfg(test)]
#[path = "fake_test.rs"]
mod fake;

pub use config::{HookPath, ThemeConfig};
pub use controller::{AppliedHook, ThemeController};
pub use error::ThemeError;
pub use host::{ColorSchemeQuery, Dom, Host, PreferenceStore, Scheduler};
pub use theme::{Theme, ToggleIcon};
