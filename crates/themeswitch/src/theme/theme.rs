//! Theme struct for building style collections.

use crate::style::{StyleValidationError, StyleValue, Styles};

/// A named collection of styles used when rendering terminal output.
///
/// # Example
///
/// ```rust
/// use themeswitch::Theme;
/// use console::Style;
///
/// let theme = Theme::new()
///     .add("accent", Style::new().cyan().bold())
///     .add("muted", Style::new().dim())
///     // Roles alias visual styles
///     .add("mode", "accent")
///     .add("hint", "muted");
/// assert!(theme.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Theme {
    pub(crate) styles: Styles,
}

impl Theme {
    /// Creates an empty theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a concrete style or an alias, returning the theme for chaining.
    pub fn add<V: Into<StyleValue>>(mut self, name: &str, value: V) -> Self {
        self.styles = self.styles.add(name, value);
        self
    }

    pub fn styles(&self) -> &Styles {
        &self.styles
    }

    /// Validates that all style aliases in this theme resolve.
    ///
    /// Rendering calls this too; calling it early surfaces stylesheet
    /// mistakes at startup.
    pub fn validate(&self) -> Result<(), StyleValidationError> {
        self.styles.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use console::Style;

    #[test]
    fn test_theme_add_concrete_and_alias() {
        let theme = Theme::new()
            .add("base", Style::new().dim())
            .add("alias", String::from("base"));
        assert!(theme.styles().has("base"));
        assert!(theme.styles().has("alias"));
        assert!(theme.validate().is_ok());
    }

    #[test]
    fn test_theme_validate_invalid() {
        let theme = Theme::new().add("orphan", "missing");
        assert!(theme.validate().is_err());
    }

    #[test]
    fn test_theme_default_is_empty() {
        assert!(Theme::default().styles().is_empty());
    }
}
