//! Terminal rendering with minijinja templates and a `style` filter.
//!
//! Templates name styles by role (`{{ effective | style("mode") }}`); which
//! concrete style a role maps to depends on the theme handed in. For status
//! output that theme is chosen from an [`AdaptiveTheme`] by the mode the
//! controller applied.

mod filters;
mod output;

pub use output::OutputMode;

use minijinja::Environment;
use serde::Serialize;

use crate::control::ControlState;
use crate::preference::{ColorMode, ThemePreference};
use crate::style::StyleValidationError;
use crate::theme::{AdaptiveTheme, Theme};
use filters::register_filters;

const STATUS_TEMPLATE: &str = "\
{{ \"theme\" | style(\"label\") }}       {{ effective | style(\"mode\") }}
{{ \"preference\" | style(\"label\") }}  {{ preference | style(\"on\" if preference != \"unset\" else \"off\") }}
{{ \"system\" | style(\"label\") }}      {{ system }}
{{ \"toggle\" | style(\"label\") }}      {{ control.tooltip | style(\"hint\") }}";

/// Error rendering output.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Template(#[from] minijinja::Error),
    #[error(transparent)]
    Style(#[from] StyleValidationError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Everything `themeswitch status` reports.
#[derive(Debug, Clone, Serialize)]
pub struct StatusView {
    pub effective: ColorMode,
    pub preference: ThemePreference,
    pub system: ColorMode,
    pub control: ControlState,
}

impl StatusView {
    pub fn new(effective: ColorMode, preference: ThemePreference, system: ColorMode) -> Self {
        Self {
            effective,
            preference,
            system,
            control: ControlState::for_mode(effective),
        }
    }
}

/// Renders `template` with `data`, styling through `theme`.
///
/// In [`OutputMode::Json`] the template is skipped and `data` is serialized.
///
/// # Example
///
/// ```rust
/// use themeswitch::{render_with_output, OutputMode, Theme};
/// use console::Style;
///
/// let theme = Theme::new().add("mode", Style::new().bold());
/// let out = render_with_output(
///     r#"Theme: {{ mode | style("mode") }}"#,
///     &serde_json::json!({ "mode": "dark" }),
///     &theme,
///     OutputMode::Text,
/// )
/// .unwrap();
/// assert_eq!(out, "Theme: dark");
/// ```
pub fn render_with_output<T: Serialize>(
    template: &str,
    data: &T,
    theme: &Theme,
    mode: OutputMode,
) -> Result<String, RenderError> {
    if mode.is_structured() {
        return Ok(serde_json::to_string_pretty(data)?);
    }
    theme.validate()?;

    let mut env = Environment::new();
    register_filters(&mut env, theme, mode);
    env.add_template_owned("_inline".to_string(), template.to_string())?;
    Ok(env.get_template("_inline")?.render(data)?)
}

/// Renders a status report in the style set matching `view.effective`.
pub fn render_status(
    view: &StatusView,
    themes: &AdaptiveTheme,
    mode: OutputMode,
) -> Result<String, RenderError> {
    render_with_output(STATUS_TEMPLATE, view, themes.select(view.effective), mode)
}
