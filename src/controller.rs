//! Theme controller: resolves, applies and toggles the page theme.
//!
//! SYSTEM CONTEXT
//! ==============
//! Three sources feed the active theme. The persisted preference wins over
//! the OS signal, and the root attribute is what stylesheets key off. After
//! every apply the root attribute, the persisted value and the toggle icon
//! name the same theme.
//!
//! TRADE-OFFS
//! ==========
//! `apply_theme` always persists, so the first OS-driven change pins the
//! preference and later OS changes are ignored. Mount retries use a fixed
//! interval with an optional attempt cap instead of observing DOM insertions.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::cell::Cell;
use std::rc::{Rc, Weak};

use crate::config::ThemeConfig;
use crate::error::ThemeError;
use crate::host::Host;
use crate::theme::{DARK_ATTRIBUTE_VALUE, Theme};

/// Callback run `hook_delay_ms` after each apply so dependent styling can
/// recompute once the attribute change has landed.
pub type AppliedHook = Rc<dyn Fn(Theme)>;

/// Shared handle to the controller. Clones refer to the same state.
pub struct ThemeController<H: Host + 'static> {
    inner: Rc<Inner<H>>,
}

impl<H: Host + 'static> Clone for ThemeController<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

struct Inner<H> {
    host: H,
    config: ThemeConfig,
    on_applied: Option<AppliedHook>,
    watching: Cell<bool>,
}

impl<H: Host + 'static> ThemeController<H> {
    pub fn new(host: H, config: ThemeConfig, on_applied: Option<AppliedHook>) -> Self {
        Self {
            inner: Rc::new(Inner {
                host,
                config,
                on_applied,
                watching: Cell::new(false),
            }),
        }
    }

    pub fn host(&self) -> &H {
        &self.inner.host
    }

    pub fn config(&self) -> &ThemeConfig {
        &self.inner.config
    }

    /// Mount the toggle, settle the initial theme and follow OS changes.
    ///
    /// Safe to call more than once: the toggle is only created when none is
    /// present and the OS listener is only registered once.
    pub fn initialize(&self) {
        log::debug!("theme toggle initializing");
        self.inner.mount_toggle(1);
        self.inner.load_theme();
        self.inner.watch_system();
    }

    /// Persisted preference if present, else the OS preference.
    pub fn resolve_effective_theme(&self) -> Theme {
        self.inner.resolve_effective_theme()
    }

    pub fn stored_theme(&self) -> Option<Theme> {
        self.inner.stored_theme()
    }

    /// Dark only when the host reports a dark preference.
    pub fn system_theme(&self) -> Theme {
        self.inner.system_theme()
    }

    /// Theme currently marked on the document root.
    pub fn current_theme(&self) -> Theme {
        self.inner.current_theme()
    }

    pub fn apply_theme(&self, theme: Theme) {
        self.inner.apply_theme(theme);
    }

    /// Switch to the inverse of the current theme and return it.
    pub fn toggle_theme(&self) -> Theme {
        self.inner.toggle_theme()
    }

    pub fn toggle_mounted(&self) -> bool {
        self.inner.toggle_mounted()
    }
}

impl<H: Host + 'static> Inner<H> {
    fn resolve_effective_theme(&self) -> Theme {
        self.stored_theme().unwrap_or_else(|| self.system_theme())
    }

    fn stored_theme(&self) -> Option<Theme> {
        let key = &self.config.storage_key;
        match self.host.load(key) {
            Ok(Some(raw)) => {
                let theme = Theme::parse(&raw);
                if theme.is_none() {
                    log::warn!("ignoring stored theme {raw:?} under {key:?}");
                }
                theme
            }
            Ok(None) => None,
            Err(e) => {
                log::warn!("theme preference unreadable: {e}");
                None
            }
        }
    }

    fn system_theme(&self) -> Theme {
        Theme::from_prefers_dark(self.host.prefers_dark().unwrap_or(false))
    }

    fn current_theme(&self) -> Theme {
        let attr = self.host.root_attribute(&self.config.root_attribute);
        Theme::from_attribute(attr.as_deref())
    }

    fn toggle_mounted(&self) -> bool {
        self.host.query(&self.config.toggle_selector()).is_some()
    }

    fn toggle_theme(&self) -> Theme {
        let next = self.current_theme().inverse();
        self.apply_theme(next);
        next
    }

    fn apply_theme(&self, theme: Theme) {
        let attr = &self.config.root_attribute;
        let marked = match theme {
            Theme::Dark => self.host.set_root_attribute(attr, DARK_ATTRIBUTE_VALUE),
            Theme::Light => self.host.remove_root_attribute(attr),
        };
        if let Err(e) = marked {
            log::warn!("failed to mark {theme} theme on document: {e}");
        }

        if let Err(e) = self.sync_toggle(theme) {
            log::warn!("failed to update theme toggle: {e}");
        }

        if let Err(e) = self.host.save(&self.config.storage_key, theme.as_str()) {
            log::warn!("failed to persist {theme} theme: {e}");
        }

        if let Some(hook) = &self.on_applied {
            let hook = Rc::clone(hook);
            self.host
                .schedule(self.config.hook_delay(), Box::new(move || hook(theme)));
        }
        log::info!("applied {theme} theme");
    }

    /// Point the toggle's icon and label at `theme`. A missing toggle is fine.
    fn sync_toggle(&self, theme: Theme) -> Result<(), ThemeError> {
        let Some(toggle) = self.host.query(&self.config.toggle_selector()) else {
            return Ok(());
        };
        let icon = theme.toggle_icon();
        self.host.set_inner_html(&toggle, &icon.markup())?;
        self.host.set_attribute(&toggle, "aria-label", icon.aria_label())
    }

    fn load_theme(&self) {
        // An inline script may have marked the root before first paint.
        if let Some(attr) = self.host.root_attribute(&self.config.root_attribute) {
            let theme = Theme::from_attribute(Some(&attr));
            log::debug!("theme already applied as {theme}");
            if let Err(e) = self.sync_toggle(theme) {
                log::warn!("failed to update theme toggle: {e}");
            }
            return;
        }
        self.apply_theme(self.resolve_effective_theme());
    }

    fn watch_system(self: &Rc<Self>) {
        if self.watching.get() {
            return;
        }
        let weak = Rc::downgrade(self);
        let listener = move |prefers_dark: bool| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            if inner.stored_theme().is_some() {
                log::debug!("ignoring OS theme change, preference is stored");
                return;
            }
            inner.apply_theme(Theme::from_prefers_dark(prefers_dark));
        };
        match self.host.watch(Box::new(listener)) {
            Ok(true) => self.watching.set(true),
            Ok(false) => log::debug!("host cannot report color-scheme changes"),
            Err(e) => log::warn!("failed to watch color-scheme changes: {e}"),
        }
    }

    fn mount_toggle(self: &Rc<Self>, attempt: u32) {
        let Some(nav) = self.host.query(&self.config.nav_selector) else {
            self.retry_mount(attempt);
            return;
        };
        if self.toggle_mounted() {
            log::debug!("theme toggle already exists");
            return;
        }
        match self.build_toggle(&nav) {
            Ok(()) => log::info!("theme toggle mounted after {attempt} attempt(s)"),
            Err(e) => log::warn!("failed to mount theme toggle: {e}"),
        }
    }

    fn retry_mount(self: &Rc<Self>, attempt: u32) {
        if self
            .config
            .max_mount_attempts
            .is_some_and(|max| attempt >= max)
        {
            log::warn!(
                "{} not found after {attempt} attempt(s), giving up",
                self.config.nav_selector
            );
            return;
        }
        log::debug!(
            "{} not found, retrying in {}ms",
            self.config.nav_selector,
            self.config.retry_interval_ms
        );
        let weak = Rc::downgrade(self);
        self.host.schedule(
            self.config.retry_interval(),
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.mount_toggle(attempt.saturating_add(1));
                }
            }),
        );
    }

    fn build_toggle(self: &Rc<Self>, nav: &H::Element) -> Result<(), ThemeError> {
        let host = &self.host;
        let item = host.create_element("li")?;
        host.set_attribute(&item, "class", "nav-item")?;

        // Render from the root so a late mount agrees with an applied theme.
        let icon = self.current_theme().toggle_icon();
        let link = host.create_element("a")?;
        host.set_attribute(&link, "class", &format!("nav-link {}", self.config.toggle_class))?;
        host.set_attribute(&link, "href", "#")?;
        host.set_attribute(&link, "aria-label", icon.aria_label())?;
        host.set_inner_html(&link, &icon.markup())?;

        let weak: Weak<Self> = Rc::downgrade(self);
        host.on_click(
            &link,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.toggle_theme();
                }
            }),
        )?;

        host.append_child(&item, &link)?;
        host.append_child(nav, &item)?;
        log::debug!("theme toggle rendered with {} icon", icon.name());
        Ok(())
    }
}
