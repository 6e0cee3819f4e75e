//! Panel fonts

/// Bitmap fonts available on the panel, named by glyph height
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontId {
    Font16,
    Font24,
    Font32,
    Font48,
}

impl FontId {
    /// Glyph height in pixels
    pub const fn height(self) -> u16 {
        match self {
            FontId::Font16 => 16,
            FontId::Font24 => 24,
            FontId::Font32 => 32,
            FontId::Font48 => 48,
        }
    }
}
