//! # themeswitch
//!
//! Light/dark theme resolution with a persisted user choice and live
//! tracking of the platform color-scheme preference.
//!
//! ## The policy
//!
//! At load, before anything is drawn:
//!
//! 1. A stored `"dark"` or `"light"` wins.
//! 2. Otherwise the platform preference decides.
//! 3. The result is applied to the document marker and **not** stored.
//!
//! Afterwards, [`ThemeController::toggle`] inverts the marker and stores the
//! new value, and platform changes are followed only while nothing is stored.
//!
//! ## Quick start
//!
//! ```rust
//! use themeswitch::{
//!     ColorMode, FixedAppearance, MemoryRoot, MemoryStore, ThemeController, ThemeEvent,
//! };
//!
//! let store = MemoryStore::new().with("theme", "dark");
//! let mut controller = ThemeController::new(store, MemoryRoot::new());
//!
//! // The stored choice beats a light OS.
//! assert_eq!(controller.load(&FixedAppearance(ColorMode::Light)), ColorMode::Dark);
//!
//! // And keeps beating it when the OS changes.
//! assert_eq!(
//!     controller.handle(ThemeEvent::SystemChange { prefers_dark: false }),
//!     None,
//! );
//! ```
//!
//! ## Modules
//!
//! - [`preference`]: [`ThemePreference`] and [`ColorMode`]
//! - [`storage`]: [`PreferenceStore`] with memory and file backends
//! - [`appearance`]: platform preference queries and change detection
//! - [`document`]: the marker owner, [`DocumentRoot`]
//! - [`controller`]: [`ThemeController`] and its transitions
//! - [`control`]: the toggle control's activation and accessible state
//! - [`theme`], [`style`], [`render`]: terminal presentation
//! - [`config`]: YAML configuration
//! - `web` (feature `web`): `localStorage`, `<html>` class, `matchMedia`

pub mod appearance;
pub mod config;
pub mod control;
pub mod controller;
pub mod document;
pub mod preference;
pub mod render;
pub mod storage;
pub mod style;
pub mod theme;

#[cfg(feature = "web")]
pub mod web;

pub use appearance::{
    detect_color_mode, reset_appearance_detector, set_appearance_detector, AppearanceWatcher,
    FixedAppearance, OsAppearance, SystemAppearance,
};
pub use config::{Config, ConfigError};
pub use control::{is_activation_key, render_button, Activation, ControlState};
pub use controller::{ThemeController, ThemeEvent, Transition};
pub use document::{DocumentRoot, MemoryRoot};
pub use preference::{ColorMode, ThemePreference, DEFAULT_STORAGE_KEY};
pub use render::{render_status, render_with_output, OutputMode, RenderError, StatusView};
pub use storage::{FileStore, MemoryStore, PreferenceStore, StorageError};
pub use style::{StyleValidationError, StyleValue, Styles};
pub use theme::{AdaptiveTheme, Stylesheet, StylesheetError, Theme};
