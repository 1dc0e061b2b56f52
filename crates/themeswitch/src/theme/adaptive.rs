//! Light/dark theme pairs selected by the document marker.

use console::{Color, Style};

use super::theme::Theme;
use crate::preference::ColorMode;

/// Two parallel style sets, one per color mode.
///
/// The renderer never asks the OS or the store which one to use: it is handed
/// the mode the controller applied, so terminal output always agrees with
/// the marker.
///
/// # Example
///
/// ```rust
/// use themeswitch::{AdaptiveTheme, ColorMode, Theme};
/// use console::Style;
///
/// let light = Theme::new().add("mode", Style::new().blue());
/// let dark = Theme::new().add("mode", Style::new().yellow());
/// let adaptive = AdaptiveTheme::new(light, dark);
///
/// assert!(adaptive.select(ColorMode::Dark).styles().has("mode"));
/// ```
#[derive(Debug, Clone)]
pub struct AdaptiveTheme {
    light: Theme,
    dark: Theme,
}

impl AdaptiveTheme {
    /// Creates an adaptive theme with separate light and dark variants.
    pub fn new(light: Theme, dark: Theme) -> Self {
        Self { light, dark }
    }

    /// The style set for `mode`.
    pub fn select(&self, mode: ColorMode) -> &Theme {
        match mode {
            ColorMode::Light => &self.light,
            ColorMode::Dark => &self.dark,
        }
    }

    pub fn light(&self) -> &Theme {
        &self.light
    }

    pub fn dark(&self) -> &Theme {
        &self.dark
    }
}

impl Default for AdaptiveTheme {
    /// The built-in pair used by the CLI when no stylesheet is configured.
    fn default() -> Self {
        let light = Theme::new()
            .add("accent", Style::new().fg(Color::Blue).bold())
            .add("muted", Style::new().fg(Color::Black).dim())
            .add("on", Style::new().fg(Color::Green))
            .add("off", Style::new().fg(Color::Red))
            .add("mode", "accent")
            .add("label", "muted")
            .add("hint", "muted");
        let dark = Theme::new()
            .add("accent", Style::new().fg(Color::Yellow).bold())
            .add("muted", Style::new().fg(Color::White).dim())
            .add("on", Style::new().fg(Color::Cyan))
            .add("off", Style::new().fg(Color::Magenta))
            .add("mode", "accent")
            .add("label", "muted")
            .add("hint", "muted");
        Self::new(light, dark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_follows_mode() {
        let light = Theme::new().add("only-light", Style::new());
        let dark = Theme::new().add("only-dark", Style::new());
        let adaptive = AdaptiveTheme::new(light, dark);

        assert!(adaptive.select(ColorMode::Light).styles().has("only-light"));
        assert!(adaptive.select(ColorMode::Dark).styles().has("only-dark"));
    }

    #[test]
    fn test_default_pair_is_valid() {
        let adaptive = AdaptiveTheme::default();
        assert!(adaptive.light().validate().is_ok());
        assert!(adaptive.dark().validate().is_ok());
    }
}
