//! Panel geometry configuration
//!
//! Coordinates are in portrait orientation: the 7.5" panel is 480 pixels
//! wide and 800 pixels tall once rotated.

use serde::{Deserialize, Serialize};

use super::types::ConfigIssue;
use crate::layout::FontMetrics;

/// Card layout geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default)]
pub struct DisplayGeometry {
    /// Panel width in pixels (portrait)
    pub width: i32,
    /// Panel height in pixels (portrait)
    pub height: i32,
    /// Left edge of every text block
    pub margin_left: i32,
    /// Space kept free at the right edge of the body text
    pub margin_right: i32,
    /// Baseline row of the title
    pub title_y: i32,
    /// Space reserved for the title; the body starts here
    pub title_height: i32,
    /// Space reserved for the source line at the bottom
    pub source_height: i32,
    /// Distance of the narrator line above the body
    pub narrator_gap: i32,
    /// Margin of the number label from the bottom-right corner
    pub corner_margin: i32,
    /// Horizontal room reserved for the number label
    pub number_width: i32,
    /// Extra vertical offset of the number label
    pub number_drop: i32,
    /// Estimated average glyph width of the body font
    pub body_char_width: u16,
    /// Extra space between body lines, on top of the glyph height
    pub line_spacing: u16,
}

impl Default for DisplayGeometry {
    fn default() -> Self {
        Self {
            width: 480,
            height: 800,
            margin_left: 10,
            margin_right: 10,
            title_y: 20,
            title_height: 100,
            source_height: 50,
            narrator_gap: 20,
            corner_margin: 30,
            number_width: 110,
            number_drop: 5,
            // Conservative estimate for the 32px body font
            body_char_width: 16,
            line_spacing: 20,
        }
    }
}

impl DisplayGeometry {
    /// Widest body line in pixels
    pub fn body_max_width(&self) -> i32 {
        self.width - self.margin_left - self.margin_right
    }

    /// First body line position
    pub fn body_origin(&self) -> (i32, i32) {
        (self.margin_left, self.title_height)
    }

    /// Narrator line position, just above the body
    pub fn narrator_origin(&self) -> (i32, i32) {
        (self.margin_left, self.title_height - self.narrator_gap)
    }

    /// Source line position, anchored to the bottom
    pub fn source_origin(&self) -> (i32, i32) {
        (self.margin_left, self.height - self.source_height)
    }

    /// Number label position, bottom-right corner
    pub fn number_origin(&self) -> (i32, i32) {
        (
            self.width - self.corner_margin - self.number_width,
            self.height - self.corner_margin - self.number_drop,
        )
    }

    /// Body font metrics for a font of the given glyph height
    pub fn body_metrics(&self, glyph_height: u16) -> FontMetrics {
        FontMetrics::new(
            self.body_char_width,
            glyph_height.saturating_add(self.line_spacing),
        )
    }

    pub fn validate(&self) -> Result<(), ConfigIssue> {
        if self.body_char_width == 0 {
            return Err(ConfigIssue::ZeroCharWidth);
        }
        if self.body_max_width() < i32::from(self.body_char_width) {
            return Err(ConfigIssue::PanelTooNarrow);
        }
        Ok(())
    }
}
