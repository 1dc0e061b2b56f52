//! MiniJinja filter registration.

use minijinja::{Environment, Value};

use super::OutputMode;
use crate::theme::Theme;

/// Registers the `style` filter for `theme` on `env`.
pub(crate) fn register_filters(env: &mut Environment<'static>, theme: &Theme, mode: OutputMode) {
    let styles = theme.styles.clone();
    let use_color = mode.should_use_color();

    env.add_filter("style", move |value: Value, name: String| -> String {
        styles.apply_with_mode(&name, &value.to_string(), use_color)
    });
}
