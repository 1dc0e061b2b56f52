//! YAML stylesheets.
//!
//! A stylesheet maps style names to either an alias (a plain string) or a
//! set of attributes:
//!
//! ```yaml
//! accent:
//!   fg: yellow
//!   bold: true
//! muted: { fg: 245, dim: true }
//! mode: accent
//! ```
//!
//! Colors are the eight basic names or an ANSI 256 palette index.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use console::{Color, Style};
use serde::Deserialize;

use super::theme::Theme;
use crate::style::StyleValidationError;

/// Error loading a stylesheet.
#[derive(Debug, thiserror::Error)]
pub enum StylesheetError {
    #[error("could not read stylesheet {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid stylesheet YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("style '{style}' uses unknown color '{color}'")]
    UnknownColor { style: String, color: String },

    #[error(transparent)]
    Invalid(#[from] StyleValidationError),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Entry {
    Alias(String),
    Attributes(Attributes),
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct Attributes {
    fg: Option<ColorSpec>,
    bg: Option<ColorSpec>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
    #[serde(default)]
    italic: bool,
    #[serde(default)]
    underline: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ColorSpec {
    Index(u8),
    Name(String),
}

/// A parsed stylesheet, ready to become a [`Theme`].
#[derive(Debug)]
pub struct Stylesheet {
    entries: BTreeMap<String, Entry>,
}

impl Stylesheet {
    /// Parses YAML source.
    pub fn parse(source: &str) -> Result<Self, StylesheetError> {
        let entries: BTreeMap<String, Entry> = serde_yaml::from_str(source)?;
        Ok(Self { entries })
    }

    /// Reads and parses a file.
    pub fn load(path: &Path) -> Result<Self, StylesheetError> {
        let source = fs::read_to_string(path).map_err(|source| StylesheetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&source)
    }

    /// Builds a validated theme.
    pub fn into_theme(self) -> Result<Theme, StylesheetError> {
        let mut theme = Theme::new();
        for (name, entry) in self.entries {
            theme = match entry {
                Entry::Alias(target) => theme.add(&name, target),
                Entry::Attributes(attrs) => {
                    let style = build_style(&name, attrs)?;
                    theme.add(&name, style)
                }
            };
        }
        theme.validate()?;
        Ok(theme)
    }
}

fn build_style(name: &str, attrs: Attributes) -> Result<Style, StylesheetError> {
    let mut style = Style::new();
    if let Some(fg) = attrs.fg {
        style = style.fg(parse_color(name, fg)?);
    }
    if let Some(bg) = attrs.bg {
        style = style.bg(parse_color(name, bg)?);
    }
    if attrs.bold {
        style = style.bold();
    }
    if attrs.dim {
        style = style.dim();
    }
    if attrs.italic {
        style = style.italic();
    }
    if attrs.underline {
        style = style.underlined();
    }
    Ok(style)
}

fn parse_color(style: &str, spec: ColorSpec) -> Result<Color, StylesheetError> {
    let name = match spec {
        ColorSpec::Index(index) => return Ok(Color::Color256(index)),
        ColorSpec::Name(name) => name,
    };
    let color = match name.to_ascii_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        _ => {
            return Err(StylesheetError::UnknownColor {
                style: style.to_string(),
                color: name,
            })
        }
    };
    Ok(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_attributes_and_aliases() {
        let theme = Stylesheet::parse(
            r#"
accent:
  fg: yellow
  bold: true
muted: { fg: 245, dim: true }
mode: accent
"#,
        )
        .unwrap()
        .into_theme()
        .unwrap();

        assert!(theme.styles().has("accent"));
        assert!(theme.styles().has("muted"));
        assert!(theme.styles().resolve("mode").is_some());
    }

    #[test]
    fn test_unknown_color() {
        let err = Stylesheet::parse("accent: { fg: mauve }")
            .unwrap()
            .into_theme()
            .unwrap_err();
        assert!(matches!(err, StylesheetError::UnknownColor { .. }));
        assert!(err.to_string().contains("mauve"));
    }

    #[test]
    fn test_dangling_alias_rejected() {
        let err = Stylesheet::parse("mode: accent")
            .unwrap()
            .into_theme()
            .unwrap_err();
        assert!(matches!(err, StylesheetError::Invalid(_)));
    }

    #[test]
    fn test_unknown_attribute_rejected() {
        assert!(Stylesheet::parse("accent: { blink: true }").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dark.yaml");
        fs::write(&path, "accent: { fg: cyan }\n").unwrap();
        let theme = Stylesheet::load(&path).unwrap().into_theme().unwrap();
        assert!(theme.styles().has("accent"));
    }
}
