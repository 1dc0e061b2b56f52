//! Browser adapters: `localStorage`, `<html>` class list, `matchMedia`.

use wasm_bindgen::JsValue;
use web_sys::{Element, MediaQueryList, Storage};

use crate::appearance::SystemAppearance;
use crate::document::DocumentRoot;
use crate::storage::{PreferenceStore, StorageError};

/// Media query answering "does the platform prefer dark?".
pub const PREFERS_DARK_QUERY: &str = "(prefers-color-scheme: dark)";

fn js_reason(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

/// `window.localStorage` as a [`PreferenceStore`].
#[derive(Debug, Clone)]
pub struct WebStorage {
    storage: Storage,
}

impl WebStorage {
    /// Opens the page's local storage.
    ///
    /// # Errors
    ///
    /// [`StorageError::Unavailable`] when there is no window, or when the
    /// browser denies access (privacy mode, sandboxed iframe).
    pub fn open() -> Result<Self, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(Self { storage }),
            Ok(None) => Err(StorageError::Unavailable(
                "localStorage is not provided".to_string(),
            )),
            Err(e) => Err(StorageError::Unavailable(js_reason(&e))),
        }
    }
}

impl PreferenceStore for WebStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(js_reason(&e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::WriteRejected {
                key: key.to_string(),
                reason: js_reason(&e),
            })
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage
            .remove_item(key)
            .map_err(|e| StorageError::WriteRejected {
                key: key.to_string(),
                reason: js_reason(&e),
            })
    }
}

/// The `<html>` element, marked by a class.
#[derive(Debug, Clone)]
pub struct HtmlRoot {
    element: Element,
    class: String,
}

impl HtmlRoot {
    /// The document element of the current page, or `None` outside a page.
    pub fn current(class: impl Into<String>) -> Option<Self> {
        let element = web_sys::window()?.document()?.document_element()?;
        Some(Self::new(element, class))
    }

    pub fn new(element: Element, class: impl Into<String>) -> Self {
        Self {
            element,
            class: class.into(),
        }
    }
}

impl DocumentRoot for HtmlRoot {
    fn set_marker(&mut self, present: bool) {
        let list = self.element.class_list();
        let result = if present {
            list.add_1(&self.class)
        } else {
            list.remove_1(&self.class)
        };
        if let Err(e) = result {
            tracing::warn!(class = %self.class, error = %js_reason(&e), "could not update root class");
        }
    }

    fn has_marker(&self) -> bool {
        self.element.class_list().contains(&self.class)
    }
}

/// The platform preference through `matchMedia`.
#[derive(Debug, Clone)]
pub struct MediaQueryAppearance {
    list: Option<MediaQueryList>,
}

impl MediaQueryAppearance {
    /// Evaluates [`PREFERS_DARK_QUERY`]. Browsers without media query
    /// support answer light.
    pub fn new() -> Self {
        let list = web_sys::window()
            .and_then(|w| w.match_media(PREFERS_DARK_QUERY).ok().flatten());
        Self { list }
    }

    pub fn list(&self) -> Option<&MediaQueryList> {
        self.list.as_ref()
    }
}

impl Default for MediaQueryAppearance {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemAppearance for MediaQueryAppearance {
    fn prefers_dark(&self) -> bool {
        self.list.as_ref().map_or(false, MediaQueryList::matches)
    }
}
