//! The document root that carries the dark marker.
//!
//! The presentation layer reads exactly one bit: is the marker present? In a
//! browser that is a class on `<html>` (see `themeswitch::web::HtmlRoot`);
//! in a terminal it selects the style set used by the renderer.

use crate::preference::ColorMode;

/// Owner of the presence/absence marker.
pub trait DocumentRoot {
    /// Sets (`true`) or clears (`false`) the dark marker.
    fn set_marker(&mut self, present: bool);

    fn has_marker(&self) -> bool;

    /// The mode the marker currently represents.
    fn mode(&self) -> ColorMode {
        ColorMode::from_prefers_dark(self.has_marker())
    }
}

impl<R: DocumentRoot + ?Sized> DocumentRoot for Box<R> {
    fn set_marker(&mut self, present: bool) {
        (**self).set_marker(present)
    }

    fn has_marker(&self) -> bool {
        (**self).has_marker()
    }
}

/// A marker held in memory.
///
/// Counts writes so callers can observe redundant applications.
#[derive(Debug, Clone, Default)]
pub struct MemoryRoot {
    marker: bool,
    writes: usize,
}

impl MemoryRoot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set_marker` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl DocumentRoot for MemoryRoot {
    fn set_marker(&mut self, present: bool) {
        self.marker = present;
        self.writes += 1;
    }

    fn has_marker(&self) -> bool {
        self.marker
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_root_starts_light() {
        let root = MemoryRoot::new();
        assert!(!root.has_marker());
        assert_eq!(root.mode(), ColorMode::Light);
    }

    #[test]
    fn test_memory_root_counts_writes() {
        let mut root = MemoryRoot::new();
        root.set_marker(true);
        root.set_marker(true);
        assert!(root.has_marker());
        assert_eq!(root.writes(), 2);
    }
}
