//! Platform color-scheme preference: query and change detection.
//!
//! This module provides:
//!
//! - [`SystemAppearance`]: "does the platform prefer dark?"
//! - [`OsAppearance`]: the native answer, via `dark-light`
//! - [`FixedAppearance`]: a constant answer, for forced modes and tests
//! - [`AppearanceWatcher`]: turns repeated queries into change events
//!
//! Browsers deliver change notifications directly; see
//! `themeswitch::web::MediaQueryAppearance` with the `web` feature. Native
//! platforms offer no portable notification, so the watcher polls.

mod detect;

pub use detect::{
    detect_color_mode, reset_appearance_detector, set_appearance_detector, OsAppearance,
};

use crate::preference::ColorMode;

/// A source for the platform's color-scheme preference.
pub trait SystemAppearance {
    fn prefers_dark(&self) -> bool;

    fn color_mode(&self) -> ColorMode {
        ColorMode::from_prefers_dark(self.prefers_dark())
    }
}

impl<A: SystemAppearance + ?Sized> SystemAppearance for &A {
    fn prefers_dark(&self) -> bool {
        (**self).prefers_dark()
    }
}

/// An appearance source that always gives the same answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedAppearance(pub ColorMode);

impl SystemAppearance for FixedAppearance {
    fn prefers_dark(&self) -> bool {
        self.0.is_dark()
    }
}

/// Detects changes in a polled [`SystemAppearance`].
///
/// The first poll only records the baseline; later polls report the new
/// value when it differs from the last one seen.
///
/// # Example
///
/// ```rust
/// use themeswitch::{AppearanceWatcher, ColorMode, FixedAppearance};
///
/// let mut watcher = AppearanceWatcher::new();
/// assert_eq!(watcher.poll(&FixedAppearance(ColorMode::Light)), None);
/// assert_eq!(watcher.poll(&FixedAppearance(ColorMode::Dark)), Some(true));
/// assert_eq!(watcher.poll(&FixedAppearance(ColorMode::Dark)), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AppearanceWatcher {
    last: Option<bool>,
}

impl AppearanceWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A watcher whose baseline is already known, typically the value used
    /// for the initial resolution.
    pub fn with_baseline(prefers_dark: bool) -> Self {
        Self {
            last: Some(prefers_dark),
        }
    }

    /// Queries `source` and returns `Some(prefers_dark)` if it changed.
    pub fn poll<A: SystemAppearance + ?Sized>(&mut self, source: &A) -> Option<bool> {
        let now = source.prefers_dark();
        let previous = self.last.replace(now);
        match previous {
            Some(prev) if prev != now => Some(now),
            _ => None,
        }
    }

    /// The last observed value.
    pub fn last(&self) -> Option<bool> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Scripted {
        answer: Cell<bool>,
    }

    impl SystemAppearance for Scripted {
        fn prefers_dark(&self) -> bool {
            self.answer.get()
        }
    }

    #[test]
    fn test_fixed_appearance() {
        assert!(FixedAppearance(ColorMode::Dark).prefers_dark());
        assert_eq!(FixedAppearance(ColorMode::Light).color_mode(), ColorMode::Light);
    }

    #[test]
    fn test_watcher_reports_only_changes() {
        let source = Scripted {
            answer: Cell::new(false),
        };
        let mut watcher = AppearanceWatcher::new();

        assert_eq!(watcher.poll(&source), None);
        assert_eq!(watcher.poll(&source), None);

        source.answer.set(true);
        assert_eq!(watcher.poll(&source), Some(true));
        assert_eq!(watcher.poll(&source), None);

        source.answer.set(false);
        assert_eq!(watcher.poll(&source), Some(false));
        assert_eq!(watcher.last(), Some(false));
    }

    #[test]
    fn test_watcher_with_baseline_reports_first_difference() {
        let mut watcher = AppearanceWatcher::with_baseline(false);
        assert_eq!(watcher.poll(&FixedAppearance(ColorMode::Dark)), Some(true));
    }
}
