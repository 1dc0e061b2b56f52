//! Browser binding (feature `web`).
//!
//! Setup runs in two steps:
//!
//! 1. [`install`] builds one controller for the page, resolves the theme
//!    synchronously and subscribes to `change` on the `prefers-color-scheme`
//!    media query. It only touches `<html>`, so it can run from a blocking
//!    script in `<head>` and finish before first paint.
//! 2. [`ThemeHandle::attach_control`] binds `click` and `keydown` (Enter or
//!    Space) on the toggle control once the body has been parsed.
//!
//! [`install_default`] (`installThemeToggle` in JavaScript) runs step 1 at
//! once and step 2 on `DOMContentLoaded` when the document is still loading.
//!
//! Listeners share the controller through `Rc<RefCell<..>>`; the page is
//! single-threaded and every handler runs to completion.

mod dom;

pub use dom::{HtmlRoot, MediaQueryAppearance, WebStorage, PREFERS_DARK_QUERY};

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, KeyboardEvent, MediaQueryListEvent};

use crate::appearance::SystemAppearance;
use crate::config::DEFAULT_MARKER_CLASS;
use crate::control::{Activation, ControlState};
use crate::controller::{ThemeController, ThemeEvent};
use crate::preference::{ColorMode, DEFAULT_STORAGE_KEY};
use crate::storage::{MemoryStore, PreferenceStore};

/// `id` of the toggle control when none is given.
pub const DEFAULT_CONTROL_ID: &str = "theme-toggle";

type WebController = ThemeController<Box<dyn PreferenceStore>, HtmlRoot>;

/// Options for [`install`].
#[derive(Debug, Clone)]
pub struct WebOptions {
    pub storage_key: String,
    pub marker_class: String,
    pub control_id: String,
}

impl Default for WebOptions {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            marker_class: DEFAULT_MARKER_CLASS.to_string(),
            control_id: DEFAULT_CONTROL_ID.to_string(),
        }
    }
}

/// Keeps the page's controller and listeners alive.
///
/// Dropping the handle drops the listeners; call [`ThemeHandle::forget`] to
/// keep them for the lifetime of the page.
pub struct ThemeHandle {
    controller: Rc<RefCell<WebController>>,
    system: Option<Closure<dyn FnMut(MediaQueryListEvent)>>,
    click: Option<Closure<dyn FnMut(Event)>>,
    keydown: Option<Closure<dyn FnMut(KeyboardEvent)>>,
}

impl ThemeHandle {
    pub fn effective(&self) -> ColorMode {
        self.controller.borrow().effective()
    }

    /// Toggles as if the control had been clicked.
    pub fn toggle(&self) -> ColorMode {
        self.controller.borrow_mut().toggle()
    }

    /// Binds `click` and `keydown` on the element with `id` and syncs its
    /// accessible state. Returns `false` when the element does not exist.
    ///
    /// Listeners registered before a failure stay owned by the handle.
    pub fn attach_control(&mut self, id: &str) -> Result<bool, JsValue> {
        let Some(control) = find_control(id) else {
            tracing::debug!(id, "no toggle control on page");
            return Ok(false);
        };
        sync_control(&control, self.effective());
        self.click = Some(attach_click(&control, &self.controller)?);
        self.keydown = Some(attach_keydown(&control, &self.controller)?);
        Ok(true)
    }

    /// Leaks the listeners so they outlive this handle.
    pub fn forget(self) {
        // Each closure holds its own Rc to the controller.
        if let Some(c) = self.system {
            c.forget();
        }
        if let Some(c) = self.click {
            c.forget();
        }
        if let Some(c) = self.keydown {
            c.forget();
        }
    }
}

fn open_store() -> Box<dyn PreferenceStore> {
    match WebStorage::open() {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            tracing::warn!(error = %e, "localStorage unavailable; theme choice lasts for this session only");
            Box::new(MemoryStore::new())
        }
    }
}

fn sync_control(control: &Element, mode: ColorMode) {
    let state = ControlState::for_mode(mode);
    let pressed = if state.pressed { "true" } else { "false" };
    for (name, value) in [("aria-checked", pressed), ("title", state.tooltip)] {
        if let Err(e) = control.set_attribute(name, value) {
            tracing::warn!(error = ?e, attribute = name, "could not update toggle control");
        }
    }
    control.set_text_content(Some(state.icon));
}

/// Resolves and applies the theme, then subscribes to platform changes.
///
/// The toggle control is not looked up here; see
/// [`ThemeHandle::attach_control`].
pub fn install(options: &WebOptions) -> Result<ThemeHandle, JsValue> {
    let root = HtmlRoot::current(options.marker_class.clone())
        .ok_or_else(|| JsValue::from_str("no document element"))?;
    let appearance = MediaQueryAppearance::new();

    let mut controller = ThemeController::new(open_store(), root).with_key(&options.storage_key);
    controller.load(&appearance);
    let controller = Rc::new(RefCell::new(controller));

    let system = appearance.list().map(|list| {
        let controller = Rc::clone(&controller);
        let control_id = options.control_id.clone();
        let closure = Closure::wrap(Box::new(move |event: MediaQueryListEvent| {
            let transition = controller.borrow_mut().handle(ThemeEvent::SystemChange {
                prefers_dark: event.matches(),
            });
            if let (Some(t), Some(control)) = (transition, find_control(&control_id)) {
                sync_control(&control, t.mode());
            }
        }) as Box<dyn FnMut(MediaQueryListEvent)>);
        if let Err(e) =
            list.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())
        {
            tracing::warn!(error = ?e, "could not subscribe to color-scheme changes");
        }
        closure
    });

    Ok(ThemeHandle {
        controller,
        system,
        click: None,
        keydown: None,
    })
}

/// Whether the toggle control may not have been parsed yet.
fn defer_until_parsed(ready_state: &str) -> bool {
    ready_state == "loading"
}

fn find_control(id: &str) -> Option<Element> {
    web_sys::window()?.document()?.get_element_by_id(id)
}

fn attach_click(
    control: &Element,
    controller: &Rc<RefCell<WebController>>,
) -> Result<Closure<dyn FnMut(Event)>, JsValue> {
    let controller = Rc::clone(controller);
    let target = control.clone();
    let closure = Closure::wrap(Box::new(move |_event: Event| {
        let transition = controller
            .borrow_mut()
            .handle(ThemeEvent::Activate(Activation::Click));
        if let Some(t) = transition {
            sync_control(&target, t.mode());
        }
    }) as Box<dyn FnMut(Event)>);
    control.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    Ok(closure)
}

fn attach_keydown(
    control: &Element,
    controller: &Rc<RefCell<WebController>>,
) -> Result<Closure<dyn FnMut(KeyboardEvent)>, JsValue> {
    let controller = Rc::clone(controller);
    let target = control.clone();
    let closure = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        let activation = Activation::Key(event.key());
        if !activation.activates() {
            return;
        }
        // Space would otherwise scroll, and Enter on a <button> would also
        // fire a click and toggle twice.
        event.prevent_default();
        let transition = controller
            .borrow_mut()
            .handle(ThemeEvent::Activate(activation));
        if let Some(t) = transition {
            sync_control(&target, t.mode());
        }
    }) as Box<dyn FnMut(KeyboardEvent)>);
    control.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
    Ok(closure)
}

/// Installs with default options and keeps the listeners for the page's
/// lifetime.
///
/// Safe to call from a blocking `<head>` script: the theme is applied
/// immediately and the toggle control is bound on `DOMContentLoaded`.
#[wasm_bindgen(js_name = installThemeToggle)]
pub fn install_default() -> Result<(), JsValue> {
    let options = WebOptions::default();
    let mut handle = install(&options)?;
    tracing::debug!(mode = %handle.effective(), "theme installed");

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    if !defer_until_parsed(&document.ready_state()) {
        let attached = handle.attach_control(&options.control_id);
        handle.forget();
        return attached.map(|_| ());
    }

    let controller = Rc::clone(&handle.controller);
    handle.forget();
    let control_id = options.control_id;
    let on_ready = Closure::wrap(Box::new(move |_event: Event| {
        let mut deferred = ThemeHandle {
            controller: Rc::clone(&controller),
            system: None,
            click: None,
            keydown: None,
        };
        if let Err(e) = deferred.attach_control(&control_id) {
            tracing::warn!(error = ?e, "could not bind toggle control");
        }
        deferred.forget();
    }) as Box<dyn FnMut(Event)>);
    document
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
    on_ready.forget();
    Ok(())
}

/// Reports the platform preference as JavaScript sees it.
#[wasm_bindgen(js_name = systemPrefersDark)]
pub fn system_prefers_dark() -> bool {
    MediaQueryAppearance::new().prefers_dark()
}
