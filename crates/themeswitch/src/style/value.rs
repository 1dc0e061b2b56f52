//! Style values: concrete styles or aliases.

use console::Style;

/// A style registry entry.
///
/// Either a concrete `console::Style`, or the name of another entry to
/// resolve through. Aliases let a stylesheet name things by role
/// (`"marker"`) while sharing one visual definition (`"accent"`).
#[derive(Debug, Clone)]
pub enum StyleValue {
    Concrete(Style),
    Alias(String),
}

impl From<Style> for StyleValue {
    fn from(style: Style) -> Self {
        StyleValue::Concrete(style)
    }
}

impl From<&str> for StyleValue {
    fn from(name: &str) -> Self {
        StyleValue::Alias(name.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(name: String) -> Self {
        StyleValue::Alias(name)
    }
}
