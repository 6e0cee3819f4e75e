//! Text layout
//!
//! Widths are estimated as `characters × char_width`. Exact glyph metrics
//! belong to the renderer; the estimate only has to be the same one the
//! card geometry was designed with.

pub mod wrap;

use alloc::string::String;
use alloc::vec::Vec;

pub use wrap::wrap_text;

/// Width estimate and line advance of one font
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FontMetrics {
    /// Average glyph width in pixels
    pub char_width: u16,
    /// Vertical advance per line in pixels
    pub line_height: u16,
}

impl FontMetrics {
    pub const fn new(char_width: u16, line_height: u16) -> Self {
        Self {
            char_width,
            line_height,
        }
    }

    /// Estimated pixel width of `chars` characters
    pub fn estimate_width(&self, chars: usize) -> i64 {
        (chars as i64).saturating_mul(i64::from(self.char_width))
    }
}

/// One line of text at its draw position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutLine {
    pub text: String,
    pub x: i32,
    pub y: i32,
}

/// Wrapped text plus the cursor below it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    /// Lines in draw order
    pub lines: Vec<LayoutLine>,
    /// Y position after the last line
    pub end_y: i32,
}

impl Layout {
    /// Check whether any line is estimated wider than `max_width`
    ///
    /// This happens for single words longer than a line, and for lines
    /// that had a single-character word forced onto them.
    pub fn overflows(&self, metrics: FontMetrics, max_width: i32) -> bool {
        self.lines
            .iter()
            .any(|line| metrics.estimate_width(line.text.chars().count()) > i64::from(max_width))
    }

    /// Line texts in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|line| line.text.as_str())
    }
}

/// Layout errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LayoutError {
    /// A line buffer could not be allocated
    OutOfMemory,
}

impl From<alloc::collections::TryReserveError> for LayoutError {
    fn from(_: alloc::collections::TryReserveError) -> Self {
        LayoutError::OutOfMemory
    }
}
