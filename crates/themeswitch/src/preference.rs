//! Persisted preference and effective color mode.
//!
//! Two values drive everything else in the crate:
//!
//! - [`ThemePreference`]: what the user explicitly chose, as read back from
//!   storage. Tri-state, because "never chose" is distinct from either mode.
//! - [`ColorMode`]: what is actually applied to the document right now.

use serde::{Deserialize, Serialize};

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "theme";

const DARK: &str = "dark";
const LIGHT: &str = "light";

/// The applied color mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Light,
    Dark,
}

impl ColorMode {
    /// Maps a "platform prefers dark" answer onto a mode.
    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark {
            ColorMode::Dark
        } else {
            ColorMode::Light
        }
    }

    /// The opposite mode.
    pub fn inverse(self) -> Self {
        match self {
            ColorMode::Light => ColorMode::Dark,
            ColorMode::Dark => ColorMode::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ColorMode::Dark
    }

    /// The literal written to storage for this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::Light => LIGHT,
            ColorMode::Dark => DARK,
        }
    }
}

impl From<bool> for ColorMode {
    fn from(prefers_dark: bool) -> Self {
        ColorMode::from_prefers_dark(prefers_dark)
    }
}

impl std::fmt::Display for ColorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user's explicit choice as read from storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Dark,
    Light,
    /// Nothing stored, or something stored that is not one of the two literals.
    #[default]
    Unset,
}

impl ThemePreference {
    /// Parses a raw stored value.
    ///
    /// Only the exact literals `"dark"` and `"light"` are accepted. Anything
    /// else, including case variants and surrounding whitespace, is `Unset`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use themeswitch::ThemePreference;
    ///
    /// assert_eq!(ThemePreference::parse(Some("dark")), ThemePreference::Dark);
    /// assert_eq!(ThemePreference::parse(Some("blue")), ThemePreference::Unset);
    /// assert_eq!(ThemePreference::parse(None), ThemePreference::Unset);
    /// ```
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(DARK) => ThemePreference::Dark,
            Some(LIGHT) => ThemePreference::Light,
            _ => ThemePreference::Unset,
        }
    }

    /// The explicitly chosen mode, if any.
    pub fn mode(self) -> Option<ColorMode> {
        match self {
            ThemePreference::Dark => Some(ColorMode::Dark),
            ThemePreference::Light => Some(ColorMode::Light),
            ThemePreference::Unset => None,
        }
    }

    /// The literal to store, or `None` for `Unset`.
    pub fn as_stored(self) -> Option<&'static str> {
        self.mode().map(ColorMode::as_str)
    }

    pub fn is_set(self) -> bool {
        self != ThemePreference::Unset
    }

    /// Resolves the effective mode, consulting `prefers_dark` only when unset.
    pub fn resolve(self, prefers_dark: bool) -> ColorMode {
        self.mode()
            .unwrap_or_else(|| ColorMode::from_prefers_dark(prefers_dark))
    }
}

impl From<ColorMode> for ThemePreference {
    fn from(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Dark => ThemePreference::Dark,
            ColorMode::Light => ThemePreference::Light,
        }
    }
}

impl std::fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_stored().unwrap_or("unset"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literals() {
        assert_eq!(ThemePreference::parse(Some("dark")), ThemePreference::Dark);
        assert_eq!(ThemePreference::parse(Some("light")), ThemePreference::Light);
    }

    #[test]
    fn test_parse_malformed_is_unset() {
        for raw in ["blue", "", "Dark", "LIGHT", " dark", "dark\n", "true"] {
            assert_eq!(
                ThemePreference::parse(Some(raw)),
                ThemePreference::Unset,
                "{raw:?} should normalize to Unset"
            );
        }
    }

    #[test]
    fn test_resolve_ignores_system_when_set() {
        assert_eq!(ThemePreference::Dark.resolve(false), ColorMode::Dark);
        assert_eq!(ThemePreference::Light.resolve(true), ColorMode::Light);
    }

    #[test]
    fn test_resolve_follows_system_when_unset() {
        assert_eq!(ThemePreference::Unset.resolve(true), ColorMode::Dark);
        assert_eq!(ThemePreference::Unset.resolve(false), ColorMode::Light);
    }

    #[test]
    fn test_as_stored_matches_parse() {
        for mode in [ColorMode::Dark, ColorMode::Light] {
            let pref = ThemePreference::from(mode);
            assert_eq!(ThemePreference::parse(pref.as_stored()), pref);
        }
        assert_eq!(ThemePreference::Unset.as_stored(), None);
    }

    #[test]
    fn test_inverse() {
        assert_eq!(ColorMode::Dark.inverse(), ColorMode::Light);
        assert_eq!(ColorMode::Light.inverse().inverse(), ColorMode::Light);
    }

    #[test]
    fn test_display() {
        assert_eq!(ColorMode::Dark.to_string(), "dark");
        assert_eq!(ThemePreference::Unset.to_string(), "unset");
    }
}
