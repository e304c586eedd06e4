//! In-memory host for controller tests: a tiny DOM tree, a key-value store,
//! a switchable color-scheme signal and a manual clock.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::time::Duration;

use crate::error::ThemeError;
use crate::host::{ColorSchemeQuery, Dom, PreferenceStore, Scheduler};

#[derive(Default)]
struct Node {
    tag: String,
    attrs: BTreeMap<String, String>,
    inner_html: String,
    parent: Option<usize>,
    /// Top-level node inserted straight into the document.
    root: bool,
}

struct Timer {
    due: u64,
    seq: u64,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
pub struct FakeHost {
    store: RefCell<HashMap<String, String>>,
    store_broken: Cell<bool>,
    prefers_dark: Cell<Option<bool>>,
    listeners: RefCell<Vec<Rc<dyn Fn(bool)>>>,
    root_attrs: RefCell<BTreeMap<String, String>>,
    nodes: RefCell<Vec<Node>>,
    handlers: RefCell<HashMap<usize, Rc<dyn Fn()>>>,
    now: Cell<u64>,
    seq: Cell<u64>,
    timers: RefCell<Vec<Timer>>,
}

impl FakeHost {
    pub fn new() -> Self {
        let host = Self::default();
        host.prefers_dark.set(Some(false));
        host
    }

    pub fn with_stored(self, key: &str, value: &str) -> Self {
        self.store.borrow_mut().insert(key.to_owned(), value.to_owned());
        self
    }

    pub fn with_system_dark(self, dark: bool) -> Self {
        self.prefers_dark.set(Some(dark));
        self
    }

    pub fn without_media_queries(self) -> Self {
        self.prefers_dark.set(None);
        self
    }

    pub fn with_nav(self) -> Self {
        self.insert_nav();
        self
    }

    pub fn with_root_attribute(self, name: &str, value: &str) -> Self {
        self.root_attrs.borrow_mut().insert(name.to_owned(), value.to_owned());
        self
    }

    pub fn break_store(&self) {
        self.store_broken.set(true);
    }

    /// Insert `<ul class="navbar-nav">` into the document.
    pub fn insert_nav(&self) {
        let mut nodes = self.nodes.borrow_mut();
        let mut attrs = BTreeMap::new();
        attrs.insert("class".to_owned(), "navbar-nav".to_owned());
        nodes.push(Node {
            tag: "ul".to_owned(),
            attrs,
            root: true,
            ..Node::default()
        });
    }

    pub fn stored(&self, key: &str) -> Option<String> {
        self.store.borrow().get(key).cloned()
    }

    pub fn root_attr(&self, name: &str) -> Option<String> {
        self.root_attrs.borrow().get(name).cloned()
    }

    /// Flip the OS preference and notify listeners.
    pub fn set_system_dark(&self, dark: bool) {
        self.prefers_dark.set(Some(dark));
        let listeners: Vec<_> = self.listeners.borrow().iter().cloned().collect();
        for listener in listeners {
            listener(dark);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Number of attached elements matching a class selector.
    pub fn count(&self, selector: &str) -> usize {
        let nodes = self.nodes.borrow();
        (0..nodes.len())
            .filter(|&id| attached(&nodes, id) && matches(&nodes[id], selector))
            .count()
    }

    pub fn attr_of(&self, selector: &str, name: &str) -> Option<String> {
        let id = self.query(selector)?;
        self.nodes.borrow()[id].attrs.get(name).cloned()
    }

    pub fn html_of(&self, selector: &str) -> Option<String> {
        let id = self.query(selector)?;
        Some(self.nodes.borrow()[id].inner_html.clone())
    }

    pub fn tag_of_parent(&self, selector: &str) -> Option<String> {
        let id = self.query(selector)?;
        let nodes = self.nodes.borrow();
        nodes[id].parent.map(|p| nodes[p].tag.clone())
    }

    pub fn click(&self, selector: &str) {
        let id = self.query(selector).expect("no element to click");
        let handler = self.handlers.borrow().get(&id).cloned().expect("no click handler");
        handler();
    }

    pub fn now_ms(&self) -> u64 {
        self.now.get()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    /// Advance the clock, running due timers in order. Timers scheduled while
    /// advancing run too if they fall inside the window.
    pub fn advance(&self, ms: u64) {
        let target = self.now.get() + ms;
        loop {
            let next = {
                let mut timers = self.timers.borrow_mut();
                let due = timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.seq))
                    .map(|(i, _)| i);
                due.map(|i| timers.remove(i))
            };
            let Some(timer) = next else {
                break;
            };
            self.now.set(timer.due);
            (timer.task)();
        }
        self.now.set(target);
    }
}

fn matches(node: &Node, selector: &str) -> bool {
    let Some(class) = selector.strip_prefix('.') else {
        return node.tag == selector;
    };
    node.attrs
        .get("class")
        .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
}

fn attached(nodes: &[Node], mut id: usize) -> bool {
    loop {
        let node = &nodes[id];
        if node.root {
            return true;
        }
        match node.parent {
            Some(parent) => id = parent,
            None => return false,
        }
    }
}

impl PreferenceStore for FakeHost {
    fn load(&self, key: &str) -> Result<Option<String>, ThemeError> {
        if self.store_broken.get() {
            return Err(ThemeError::Storage("quota exceeded".to_owned()));
        }
        Ok(self.store.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), ThemeError> {
        if self.store_broken.get() {
            return Err(ThemeError::Storage("quota exceeded".to_owned()));
        }
        self.store.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

impl ColorSchemeQuery for FakeHost {
    fn prefers_dark(&self) -> Option<bool> {
        self.prefers_dark.get()
    }

    fn watch(&self, listener: Box<dyn Fn(bool)>) -> Result<bool, ThemeError> {
        if self.prefers_dark.get().is_none() {
            return Ok(false);
        }
        self.listeners.borrow_mut().push(Rc::from(listener));
        Ok(true)
    }
}

impl Dom for FakeHost {
    type Element = usize;

    fn root_attribute(&self, name: &str) -> Option<String> {
        self.root_attrs.borrow().get(name).cloned()
    }

    fn set_root_attribute(&self, name: &str, value: &str) -> Result<(), ThemeError> {
        self.root_attrs.borrow_mut().insert(name.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_root_attribute(&self, name: &str) -> Result<(), ThemeError> {
        self.root_attrs.borrow_mut().remove(name);
        Ok(())
    }

    fn query(&self, selector: &str) -> Option<usize> {
        let nodes = self.nodes.borrow();
        (0..nodes.len()).find(|&id| attached(&nodes, id) && matches(&nodes[id], selector))
    }

    fn create_element(&self, tag: &str) -> Result<usize, ThemeError> {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(Node {
            tag: tag.to_owned(),
            ..Node::default()
        });
        Ok(nodes.len() - 1)
    }

    fn set_attribute(&self, element: &usize, name: &str, value: &str) -> Result<(), ThemeError> {
        self.nodes.borrow_mut()[*element]
            .attrs
            .insert(name.to_owned(), value.to_owned());
        Ok(())
    }

    fn set_inner_html(&self, element: &usize, html: &str) -> Result<(), ThemeError> {
        self.nodes.borrow_mut()[*element].inner_html = html.to_owned();
        Ok(())
    }

    fn append_child(&self, parent: &usize, child: &usize) -> Result<(), ThemeError> {
        self.nodes.borrow_mut()[*child].parent = Some(*parent);
        Ok(())
    }

    fn on_click(&self, element: &usize, handler: Box<dyn Fn()>) -> Result<(), ThemeError> {
        self.handlers.borrow_mut().insert(*element, Rc::from(handler));
        Ok(())
    }
}

impl Scheduler for FakeHost {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        self.timers.borrow_mut().push(Timer {
            due: self.now.get() + delay_ms,
            seq,
            task,
        });
    }
}
