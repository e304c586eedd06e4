//! Lookup of the optional global hook run after each apply.

use std::rc::Rc;

use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

use crate::config::HookPath;
use crate::controller::AppliedHook;

/// Build a hook that calls `window[object][method]()` if it exists when the
/// hook fires. The lookup is lazy because site scripts may load after us.
pub fn global_hook(path: HookPath) -> AppliedHook {
    Rc::new(move |_theme| {
        let Some(target) = lookup(&js_sys::global().into(), &path.object) else {
            return;
        };
        let Some(method) = lookup(&target, &path.method) else {
            return;
        };
        let Some(method) = method.dyn_ref::<Function>() else {
            log::debug!("{}.{} is not callable", path.object, path.method);
            return;
        };
        if let Err(e) = method.call0(&target) {
            log::warn!("{}.{} threw: {e:?}", path.object, path.method);
        }
    })
}

fn lookup(target: &JsValue, name: &str) -> Option<JsValue> {
    match Reflect::get(target, &JsValue::from_str(name)) {
        Ok(value) if !value.is_undefined() && !value.is_null() => Some(value),
        Ok(_) => None,
        Err(e) => {
            log::debug!("lookup of {name} failed: {e:?}");
            None
        }
    }
}
