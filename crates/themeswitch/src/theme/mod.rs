//! Theme system for organizing and selecting style collections.
//!
//! This module provides:
//!
//! - [`Theme`]: A collection of styles with a fluent builder API
//! - [`AdaptiveTheme`]: Light/dark theme pairs selected by the applied mode
//! - [`Stylesheet`]: YAML stylesheets that build themes
//!
//! The terminal presentation layer consumes only the marker: whichever
//! [`ColorMode`](crate::ColorMode) the controller applied picks the set.

mod adaptive;
mod stylesheet;
#[allow(clippy::module_inception)]
mod theme;

pub use adaptive::AdaptiveTheme;
pub use stylesheet::{Stylesheet, StylesheetError};
pub use theme::Theme;
