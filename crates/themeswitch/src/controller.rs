//! The theme controller.
//!
//! [`ThemeController`] owns the document marker and the preference store,
//! and is the only thing that mutates either. It exposes three transitions:
//!
//! | Transition | Trigger | Persists? |
//! |------------|---------|-----------|
//! | load-resolve | page load / startup | never |
//! | toggle | user activation | always |
//! | system-change | platform preference change | never, and only while unset |
//!
//! Automatic paths never write storage. If they did, the first OS change
//! after load would pin a value the user never chose.
//!
//! # Example
//!
//! ```rust
//! use themeswitch::{
//!     ColorMode, FixedAppearance, MemoryRoot, MemoryStore, PreferenceStore, ThemeController,
//! };
//!
//! let mut controller = ThemeController::new(MemoryStore::new(), MemoryRoot::new());
//!
//! // Nothing stored: follow the platform, and leave storage alone.
//! assert_eq!(controller.load(&FixedAppearance(ColorMode::Dark)), ColorMode::Dark);
//! assert_eq!(controller.store().get("theme").unwrap(), None);
//!
//! // Explicit toggle persists.
//! assert_eq!(controller.toggle(), ColorMode::Light);
//! assert_eq!(controller.store().get("theme").unwrap().as_deref(), Some("light"));
//!
//! // The platform no longer wins.
//! assert_eq!(controller.on_system_preference_change(true), None);
//! assert_eq!(controller.effective(), ColorMode::Light);
//! ```

use serde::Serialize;
use tracing::{debug, warn};

use crate::appearance::SystemAppearance;
use crate::control::Activation;
use crate::document::DocumentRoot;
use crate::preference::{ColorMode, ThemePreference, DEFAULT_STORAGE_KEY};
use crate::storage::PreferenceStore;

/// An input the controller subscribes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeEvent {
    /// Initial resolution, before first paint.
    Load { prefers_dark: bool },
    /// The toggle control was clicked or key-activated.
    Activate(Activation),
    /// The platform reported a new color-scheme preference.
    SystemChange { prefers_dark: bool },
    /// The user asked to forget their choice and follow the platform again.
    Reset { prefers_dark: bool },
}

/// A transition the controller performed, with the resulting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "transition", content = "mode", rename_all = "kebab-case")]
pub enum Transition {
    LoadResolve(ColorMode),
    Toggle(ColorMode),
    SystemChange(ColorMode),
    Reset(ColorMode),
}

impl Transition {
    pub fn mode(self) -> ColorMode {
        match self {
            Transition::LoadResolve(mode)
            | Transition::Toggle(mode)
            | Transition::SystemChange(mode)
            | Transition::Reset(mode) => mode,
        }
    }
}

/// Resolves, applies and toggles the light/dark theme.
#[derive(Debug)]
pub struct ThemeController<S, R> {
    store: S,
    root: R,
    key: String,
}

impl<S: PreferenceStore, R: DocumentRoot> ThemeController<S, R> {
    /// Creates a controller using the default `"theme"` storage key.
    pub fn new(store: S, root: R) -> Self {
        Self {
            store,
            root,
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }

    /// Uses `key` instead of `"theme"`.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn root(&self) -> &R {
        &self.root
    }

    /// The mode currently applied to the document root.
    pub fn effective(&self) -> ColorMode {
        self.root.mode()
    }

    /// Reads the persisted preference.
    ///
    /// Unreadable storage and malformed values both come back as
    /// [`ThemePreference::Unset`]; only the former is logged.
    pub fn preference(&self) -> ThemePreference {
        match self.store.get(&self.key) {
            Ok(raw) => ThemePreference::parse(raw.as_deref()),
            Err(e) => {
                warn!(key = %self.key, error = %e, "could not read theme preference; treating as unset");
                ThemePreference::Unset
            }
        }
    }

    /// Load-time resolution, querying `appearance` only if nothing is stored.
    pub fn load<A: SystemAppearance + ?Sized>(&mut self, appearance: &A) -> ColorMode {
        let preference = self.preference();
        let mode = match preference.mode() {
            Some(mode) => mode,
            None => ColorMode::from_prefers_dark(appearance.prefers_dark()),
        };
        debug!(%preference, %mode, "load-resolve");
        self.apply(mode);
        mode
    }

    /// Load-time resolution with the platform answer already in hand.
    pub fn resolve(&mut self, prefers_dark: bool) -> ColorMode {
        let preference = self.preference();
        let mode = preference.resolve(prefers_dark);
        debug!(%preference, prefers_dark, %mode, "load-resolve");
        self.apply(mode);
        mode
    }

    /// Sets or clears the marker. Never touches storage.
    pub fn apply(&mut self, mode: ColorMode) {
        self.root.set_marker(mode.is_dark());
    }

    /// Inverts the applied mode and persists the result.
    ///
    /// The marker flips even if the write fails; the failure is logged and
    /// the session keeps the in-memory state.
    pub fn toggle(&mut self) -> ColorMode {
        let next = self.effective().inverse();
        self.apply(next);
        if let Err(e) = self.store.set(&self.key, next.as_str()) {
            warn!(key = %self.key, error = %e, "could not persist theme preference");
        }
        debug!(mode = %next, "toggle");
        next
    }

    /// Follows a platform change, unless the user has made a choice.
    ///
    /// Returns the applied mode, or `None` when a persisted preference
    /// blocked the change.
    pub fn on_system_preference_change(&mut self, prefers_dark: bool) -> Option<ColorMode> {
        if self.preference().is_set() {
            debug!(prefers_dark, "system-change ignored: preference persisted");
            return None;
        }
        let mode = ColorMode::from_prefers_dark(prefers_dark);
        self.apply(mode);
        debug!(%mode, "system-change");
        Some(mode)
    }

    /// Forgets the persisted choice and resolves from the platform again.
    pub fn reset(&mut self, prefers_dark: bool) -> ColorMode {
        if let Err(e) = self.store.remove(&self.key) {
            warn!(key = %self.key, error = %e, "could not clear theme preference");
        }
        let mode = ColorMode::from_prefers_dark(prefers_dark);
        self.apply(mode);
        debug!(%mode, "reset");
        mode
    }

    /// Dispatches an event to its transition.
    ///
    /// Returns `None` for key presses that are not activation keys and for
    /// platform changes blocked by a persisted preference.
    pub fn handle(&mut self, event: ThemeEvent) -> Option<Transition> {
        match event {
            ThemeEvent::Load { prefers_dark } => {
                Some(Transition::LoadResolve(self.resolve(prefers_dark)))
            }
            ThemeEvent::Activate(activation) => activation
                .activates()
                .then(|| Transition::Toggle(self.toggle())),
            ThemeEvent::SystemChange { prefers_dark } => self
                .on_system_preference_change(prefers_dark)
                .map(Transition::SystemChange),
            ThemeEvent::Reset { prefers_dark } => Some(Transition::Reset(self.reset(prefers_dark))),
        }
    }
}
