//! Output modes.

use serde::{Deserialize, Serialize};

/// How rendered output should be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Color when the terminal supports it.
    #[default]
    Auto,
    /// Always emit ANSI styling.
    Term,
    /// Plain text.
    Text,
    /// Serialize the data as JSON instead of rendering the template.
    Json,
}

impl OutputMode {
    pub fn should_use_color(self) -> bool {
        match self {
            OutputMode::Auto => console::colors_enabled(),
            OutputMode::Term => true,
            OutputMode::Text | OutputMode::Json => false,
        }
    }

    pub fn is_structured(self) -> bool {
        self == OutputMode::Json
    }
}

impl std::str::FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(OutputMode::Auto),
            "term" => Ok(OutputMode::Term),
            "text" => Ok(OutputMode::Text),
            "json" => Ok(OutputMode::Json),
            other => Err(format!(
                "unknown output mode '{}' (expected auto, term, text or json)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("term".parse::<OutputMode>(), Ok(OutputMode::Term));
        assert!("fancy".parse::<OutputMode>().is_err());
    }

    #[test]
    fn test_color_policy() {
        assert!(OutputMode::Term.should_use_color());
        assert!(!OutputMode::Text.should_use_color());
        assert!(!OutputMode::Json.should_use_color());
    }
}
