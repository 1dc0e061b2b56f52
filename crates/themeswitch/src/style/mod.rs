//! Named styles and aliases for terminal output.
//!
//! - [`StyleValue`]: a concrete style or an alias
//! - [`Styles`]: the registry, with alias resolution and validation
//! - [`StyleValidationError`]: dangling aliases and cycles

mod error;
mod registry;
mod value;

pub use error::StyleValidationError;
pub use registry::{Styles, DEFAULT_MISSING_STYLE_INDICATOR};
pub use value::StyleValue;
