//! The toggle control: activation input and accessible state.

use minijinja::{context, Environment};
use serde::Serialize;

use crate::preference::ColorMode;

/// Key values that activate the control, as reported by `KeyboardEvent.key`.
/// `"Spacebar"` is what older browsers report for the space bar.
pub const ACTIVATION_KEYS: &[&str] = &["Enter", " ", "Spacebar"];

const BUTTON_TEMPLATE: &str = r#"<button type="button" id="{{ id }}" class="theme-toggle" role="switch" aria-checked="{{ pressed }}" aria-label="Dark mode" title="{{ tooltip }}">{{ icon }}</button>"#;

/// A user interaction with the toggle control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// Pointer click.
    Click,
    /// Key press, carrying the `KeyboardEvent.key` value.
    Key(String),
}

impl Activation {
    /// Whether this interaction should toggle the theme.
    pub fn activates(&self) -> bool {
        match self {
            Activation::Click => true,
            Activation::Key(key) => is_activation_key(key),
        }
    }
}

/// Returns true for Enter and Space.
pub fn is_activation_key(key: &str) -> bool {
    ACTIVATION_KEYS.contains(&key)
}

/// What the control exposes for the current mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlState {
    /// `aria-checked`: true while dark mode is applied.
    pub pressed: bool,
    /// Describes the action the next activation performs.
    pub tooltip: &'static str,
    pub icon: &'static str,
}

impl ControlState {
    pub fn for_mode(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Dark => Self {
                pressed: true,
                tooltip: "Switch to light mode",
                icon: "\u{2600}",
            },
            ColorMode::Light => Self {
                pressed: false,
                tooltip: "Switch to dark mode",
                icon: "\u{263E}",
            },
        }
    }
}

/// Renders the control as an HTML `<button>`.
///
/// # Example
///
/// ```rust
/// use themeswitch::{render_button, ColorMode, ControlState};
///
/// let html = render_button(&ControlState::for_mode(ColorMode::Dark), "theme-toggle").unwrap();
/// assert!(html.contains(r#"aria-checked="true""#));
/// assert!(html.contains("Switch to light mode"));
/// ```
pub fn render_button(state: &ControlState, id: &str) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    // The .html suffix turns on HTML auto-escaping.
    env.add_template("toggle.html", BUTTON_TEMPLATE)?;
    env.get_template("toggle.html")?.render(context! {
        id => id,
        pressed => state.pressed,
        tooltip => state.tooltip,
        icon => state.icon,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activation_keys() {
        assert!(is_activation_key("Enter"));
        assert!(is_activation_key(" "));
        assert!(!is_activation_key("Escape"));
        assert!(!is_activation_key("enter"));
    }

    #[test]
    fn test_click_always_activates() {
        assert!(Activation::Click.activates());
        assert!(!Activation::Key("Tab".into()).activates());
    }

    #[test]
    fn test_state_tracks_mode() {
        let dark = ControlState::for_mode(ColorMode::Dark);
        assert!(dark.pressed);
        assert_eq!(dark.tooltip, "Switch to light mode");

        let light = ControlState::for_mode(ColorMode::Light);
        assert!(!light.pressed);
        assert_eq!(light.tooltip, "Switch to dark mode");
    }

    #[test]
    fn test_render_button_light() {
        let html = render_button(&ControlState::for_mode(ColorMode::Light), "toggle").unwrap();
        assert!(html.starts_with("<button"));
        assert!(html.contains(r#"id="toggle""#));
        assert!(html.contains(r#"role="switch""#));
        assert!(html.contains(r#"aria-checked="false""#));
        assert!(html.contains(r#"title="Switch to dark mode""#));
    }

    #[test]
    fn test_render_button_escapes_id() {
        let html =
            render_button(&ControlState::for_mode(ColorMode::Light), r#"x" onclick="y"#).unwrap();
        assert!(!html.contains(r#"onclick="y""#));
        assert!(html.contains("&quot;"));
    }
}
