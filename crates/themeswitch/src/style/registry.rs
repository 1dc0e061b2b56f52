//! Style registry with alias resolution.

use std::collections::{HashMap, HashSet};

use console::Style;

use super::{StyleValidationError, StyleValue};

/// Shown in front of text whose style name is not registered.
pub const DEFAULT_MISSING_STYLE_INDICATOR: &str = "(!?)";

/// A registry of named styles.
#[derive(Debug, Clone, Default)]
pub struct Styles {
    entries: HashMap<String, StyleValue>,
}

impl Styles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named entry, returning the registry for chaining.
    pub fn add<V: Into<StyleValue>>(mut self, name: &str, value: V) -> Self {
        self.entries.insert(name.to_string(), value.into());
        self
    }

    pub fn has(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Follows aliases to a concrete style.
    ///
    /// Returns `None` for unknown names, dangling aliases and cycles.
    pub fn resolve(&self, name: &str) -> Option<&Style> {
        let mut seen = HashSet::new();
        let mut current = name;
        loop {
            if !seen.insert(current) {
                return None;
            }
            match self.entries.get(current)? {
                StyleValue::Concrete(style) => return Some(style),
                StyleValue::Alias(target) => current = target.as_str(),
            }
        }
    }

    /// Checks every alias chain ends in a concrete style.
    pub fn validate(&self) -> Result<(), StyleValidationError> {
        let mut names: Vec<&String> = self.entries.keys().collect();
        // Deterministic error reporting.
        names.sort();

        for name in names {
            let mut path = vec![name.clone()];
            let mut current = name;
            while let Some(StyleValue::Alias(target)) = self.entries.get(current) {
                if path.contains(target) {
                    path.push(target.clone());
                    return Err(StyleValidationError::CycleDetected { path });
                }
                if !self.entries.contains_key(target) {
                    return Err(StyleValidationError::UnresolvedAlias {
                        from: current.clone(),
                        to: target.clone(),
                    });
                }
                path.push(target.clone());
                current = target;
            }
        }
        Ok(())
    }

    /// Applies the named style, or plain text when color is off.
    ///
    /// Unknown names are prefixed with [`DEFAULT_MISSING_STYLE_INDICATOR`]
    /// so template mistakes are visible rather than silently unstyled.
    pub fn apply_with_mode(&self, name: &str, text: &str, use_color: bool) -> String {
        match self.resolve(name) {
            Some(style) if use_color => style
                .clone()
                .force_styling(true)
                .apply_to(text)
                .to_string(),
            Some(_) => text.to_string(),
            None => format!("{} {}", DEFAULT_MISSING_STYLE_INDICATOR, text),
        }
    }
}
