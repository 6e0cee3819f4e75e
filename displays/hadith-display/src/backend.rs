//! Panel backend trait
//!
//! Defines the interface to a two-plane e-paper panel.

/// Panel backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with the panel
    Communication,
    /// Text placed outside the panel
    InvalidCoordinates,
    /// Panel not initialized
    NotInitialized,
}

/// Ink plane of a bi-color panel
///
/// Each plane is a separate 1-bit frame buffer; white is the background
/// of both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Plane {
    /// Primary ink
    Black,
    /// Accent ink
    Red,
}

/// Panel backend trait
///
/// Draw calls only touch frame buffers; nothing reaches the glass until
/// [`refresh`](PanelBackend::refresh). Coordinates are pixels in portrait
/// orientation, `(x, y)` being the top-left corner of the text.
pub trait PanelBackend {
    /// Fill both planes with white
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text on one plane
    ///
    /// - `plane`: ink plane to draw into
    /// - `x`, `y`: top-left corner in pixels
    /// - `font`: panel font
    /// - `text`: basic ASCII text
    fn draw_text(
        &mut self,
        plane: Plane,
        x: i32,
        y: i32,
        font: crate::font::FontId,
        text: &str,
    ) -> Result<(), DisplayError>;

    /// Send both planes to the panel and run one full refresh
    fn refresh(&mut self) -> Result<(), DisplayError>;

    /// Panel size in pixels, `(width, height)` in portrait orientation
    fn dimensions(&self) -> (u16, u16);

    /// Check if the panel is ready for drawing
    fn is_ready(&self) -> bool;
}
