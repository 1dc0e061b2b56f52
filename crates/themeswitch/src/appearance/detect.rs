//! Operating-system color-scheme detection.

use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};
use once_cell::sync::Lazy;
use std::sync::Mutex;

use super::SystemAppearance;
use crate::preference::ColorMode;

type AppearanceDetector = fn() -> ColorMode;

static APPEARANCE_DETECTOR: Lazy<Mutex<AppearanceDetector>> =
    Lazy::new(|| Mutex::new(os_appearance_detector));

/// Overrides the detector used to determine whether the platform prefers a
/// light or dark color scheme.
///
/// This is useful for testing or when you want to force a specific color mode.
/// Call [`reset_appearance_detector`] to go back to asking the OS.
pub fn set_appearance_detector(detector: AppearanceDetector) {
    let mut guard = APPEARANCE_DETECTOR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = detector;
}

/// Restores the OS-backed detector.
pub fn reset_appearance_detector() {
    set_appearance_detector(os_appearance_detector);
}

/// Runs the current detector.
pub fn detect_color_mode() -> ColorMode {
    let detector = APPEARANCE_DETECTOR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    (*detector)()
}

fn os_appearance_detector() -> ColorMode {
    match detect_os_theme() {
        OsThemeMode::Dark => ColorMode::Dark,
        // Platforms without a preference report Light or a default variant.
        #[allow(unreachable_patterns)]
        _ => ColorMode::Light,
    }
}

/// The platform's color-scheme preference, as reported by the OS.
///
/// Each query goes through the process-wide detector, so
/// [`set_appearance_detector`] affects every `OsAppearance`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsAppearance;

impl OsAppearance {
    pub fn new() -> Self {
        Self
    }
}

impl SystemAppearance for OsAppearance {
    fn prefers_dark(&self) -> bool {
        detect_color_mode().is_dark()
    }
}
