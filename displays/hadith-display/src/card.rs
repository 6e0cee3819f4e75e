//! Card composition
//!
//! Turns an accepted hadith into positioned text draws:
//!
//! ```text
//! Hourly Hadith:                  (black, title font)
//! Narrated ...                    (red, caption font)
//! body text, wrapped              (black, body font)
//! ...
//! Book - Chapter                  (red, caption font)
//!                     Hadith #N   (black, caption font)
//! ```
//!
//! All positions come from [`DisplayGeometry`]; nothing here knows the
//! panel size.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

use hadith_core::config::DisplayGeometry;
use hadith_core::layout::{wrap_text, LayoutError};
use hadith_core::AcceptedItem;

use crate::backend::{DisplayError, PanelBackend, Plane};
use crate::font::FontId;

/// Card heading
pub const TITLE: &str = "Hourly Hadith:";

/// Shown when the fetch loop gives up
pub const FETCH_FAILED_TEXT: &str = "Error fetching hadith";

/// Shown when the board could not join the network
pub const NETWORK_DOWN_TEXT: &str = "Failed to connect to WiFi.";

/// "Hadith #" plus a u32
const NUMBER_LABEL_LEN: usize = 24;

/// Network notice sits this far above the vertical center
const CENTER_RISE: i32 = 20;

/// Fonts used for each part of the card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CardFonts {
    pub title: FontId,
    pub body: FontId,
    /// Narrator, source and number label
    pub caption: FontId,
    /// Fetch failure notice
    pub notice: FontId,
    /// Network failure notice
    pub banner: FontId,
}

impl Default for CardFonts {
    fn default() -> Self {
        Self {
            title: FontId::Font48,
            body: FontId::Font32,
            caption: FontId::Font16,
            notice: FontId::Font24,
            banner: FontId::Font32,
        }
    }
}

/// One text draw on one plane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawOp {
    pub plane: Plane,
    pub x: i32,
    pub y: i32,
    pub font: FontId,
    pub text: String,
}

impl DrawOp {
    fn new(plane: Plane, (x, y): (i32, i32), font: FontId, text: impl Into<String>) -> Self {
        Self {
            plane,
            x,
            y,
            font,
            text: text.into(),
        }
    }
}

/// A composed card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Draws in panel order
    pub ops: Vec<DrawOp>,
    /// Y cursor below the last drawn body line
    pub body_end_y: i32,
    /// Body lines dropped because they would run into the source line
    pub clipped: usize,
    /// A body line is estimated wider than the text area, or lines were clipped
    pub overflows: bool,
}

/// Failure notices drawn instead of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Notice {
    /// Fetch budget spent without an accepted item
    FetchFailed,
    /// Network could not be joined
    NetworkDown,
}

/// Lay out a full card for an accepted item
///
/// `number` is the catalog identifier shown in the corner label.
pub fn compose_card(
    item: &AcceptedItem,
    number: u32,
    geometry: &DisplayGeometry,
    fonts: &CardFonts,
) -> Result<Card, LayoutError> {
    let metrics = geometry.body_metrics(fonts.body.height());
    let max_width = geometry.body_max_width();
    let body = wrap_text(item.text(), geometry.body_origin(), metrics, max_width)?;
    let too_wide = body.overflows(metrics, max_width);

    // Body glyphs must end above the source line
    let floor = geometry.source_origin().1;
    let glyph_height = i32::from(fonts.body.height());
    let kept = body
        .lines
        .iter()
        .take_while(|line| line.y + glyph_height <= floor)
        .count();
    let clipped = body.lines.len() - kept;
    let body_end_y = match kept.checked_sub(1).and_then(|last| body.lines.get(last)) {
        Some(last) => last.y + i32::from(metrics.line_height),
        None => geometry.body_origin().1,
    };

    #[cfg(feature = "defmt")]
    if clipped > 0 {
        defmt::debug!("Clipped {} body line(s)", clipped);
    }

    let mut ops = Vec::new();
    ops.try_reserve(kept + 4)?;

    ops.push(DrawOp::new(
        Plane::Black,
        (geometry.margin_left, geometry.title_y),
        fonts.title,
        TITLE,
    ));

    for line in body.lines.into_iter().take(kept) {
        ops.push(DrawOp::new(Plane::Black, (line.x, line.y), fonts.body, line.text));
    }

    if !item.narrator().is_empty() {
        ops.push(DrawOp::new(
            Plane::Red,
            geometry.narrator_origin(),
            fonts.caption,
            item.narrator(),
        ));
    }

    ops.push(DrawOp::new(
        Plane::Red,
        geometry.source_origin(),
        fonts.caption,
        item.source(),
    ));

    let mut label: heapless::String<NUMBER_LABEL_LEN> = heapless::String::new();
    // "Hadith #4294967295" always fits
    let _ = write!(label, "Hadith #{}", number);
    ops.push(DrawOp::new(
        Plane::Black,
        geometry.number_origin(),
        fonts.caption,
        label.as_str(),
    ));

    Ok(Card {
        ops,
        body_end_y,
        clipped,
        overflows: too_wide || clipped > 0,
    })
}

/// Draws for a failure notice
pub fn compose_notice(notice: Notice, geometry: &DisplayGeometry, fonts: &CardFonts) -> Vec<DrawOp> {
    let op = match notice {
        Notice::FetchFailed => DrawOp::new(
            Plane::Red,
            geometry.narrator_origin(),
            fonts.notice,
            FETCH_FAILED_TEXT,
        ),
        Notice::NetworkDown => DrawOp::new(
            Plane::Black,
            (geometry.margin_left, geometry.height / 2 - CENTER_RISE),
            fonts.banner,
            NETWORK_DOWN_TEXT,
        ),
    };
    alloc::vec![op]
}

/// Put draws on the panel: clear both planes, draw, refresh once
///
/// Every draw is checked against the panel bounds before anything is
/// drawn, so a bad layout never reaches the panel half-finished.
pub fn present<B: PanelBackend>(backend: &mut B, ops: &[DrawOp]) -> Result<(), DisplayError> {
    if !backend.is_ready() {
        return Err(DisplayError::NotInitialized);
    }

    let (width, height) = backend.dimensions();
    let inside = |op: &DrawOp| {
        (0..i32::from(width)).contains(&op.x) && (0..i32::from(height)).contains(&op.y)
    };
    if !ops.iter().all(inside) {
        return Err(DisplayError::InvalidCoordinates);
    }

    #[cfg(feature = "defmt")]
    defmt::debug!("Presenting {} draw(s)", ops.len());

    backend.clear()?;
    for op in ops {
        backend.draw_text(op.plane, op.x, op.y, op.font, &op.text)?;
    }
    backend.refresh()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use hadith_core::config::AcceptancePolicy;
    use hadith_core::item::Screening;
    use hadith_core::Candidate;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Clear,
        Draw(Plane, i32, i32, FontId, String),
        Refresh,
    }

    struct MockPanel {
        ready: bool,
        calls: Vec<Call>,
    }

    impl MockPanel {
        fn new() -> Self {
            Self {
                ready: true,
                calls: Vec::new(),
            }
        }
    }

    impl PanelBackend for MockPanel {
        fn clear(&mut self) -> Result<(), DisplayError> {
            self.calls.push(Call::Clear);
            Ok(())
        }

        fn draw_text(
            &mut self,
            plane: Plane,
            x: i32,
            y: i32,
            font: FontId,
            text: &str,
        ) -> Result<(), DisplayError> {
            self.calls.push(Call::Draw(plane, x, y, font, text.to_string()));
            Ok(())
        }

        fn refresh(&mut self) -> Result<(), DisplayError> {
            self.calls.push(Call::Refresh);
            Ok(())
        }

        fn dimensions(&self) -> (u16, u16) {
            (480, 800)
        }

        fn is_ready(&self) -> bool {
            self.ready
        }
    }

    fn item(text: &str, narrator: &str) -> AcceptedItem {
        let candidate = Candidate {
            text: text.to_string(),
            book: "Sahih Bukhari".to_string(),
            chapter: "Revelation".to_string(),
            narrator: narrator.to_string(),
            identifier: 1,
        };
        match AcceptedItem::screen(&candidate, &AcceptancePolicy::new(1, 300)) {
            Ok(Screening::Accepted(item)) => item,
            other => panic!("not accepted: {other:?}"),
        }
    }

    fn find<'a>(card: &'a Card, text: &str) -> &'a DrawOp {
        card.ops
            .iter()
            .find(|op| op.text == text)
            .unwrap_or_else(|| panic!("no draw for {text:?}"))
    }

    const TEXT: &str = "Actions are judged by intentions, so each man will have what he intended.";

    #[test]
    fn test_card_positions() {
        let geometry = DisplayGeometry::default();
        let card = compose_card(&item(TEXT, "Narrated Umar:"), 42, &geometry, &CardFonts::default())
            .unwrap();

        let title = &card.ops[0];
        assert_eq!((title.plane, title.x, title.y, title.font), (Plane::Black, 10, 20, FontId::Font48));

        let body = &card.ops[1];
        assert_eq!((body.plane, body.x, body.y, body.font), (Plane::Black, 10, 100, FontId::Font32));

        let narrator = find(&card, "Narrated Umar:");
        assert_eq!((narrator.plane, narrator.x, narrator.y), (Plane::Red, 10, 80));

        let source = find(&card, "Sahih Bukhari - Revelation");
        assert_eq!((source.plane, source.x, source.y, source.font), (Plane::Red, 10, 750, FontId::Font16));

        let number = find(&card, "Hadith #42");
        assert_eq!((number.plane, number.x, number.y), (Plane::Black, 340, 765));
    }

    #[test]
    fn test_source_anchored_to_panel_bottom() {
        let geometry = DisplayGeometry {
            height: 640,
            source_height: 40,
            ..DisplayGeometry::default()
        };
        let card = compose_card(&item(TEXT, ""), 7, &geometry, &CardFonts::default()).unwrap();

        assert_eq!(find(&card, "Sahih Bukhari - Revelation").y, 600);
        let number = find(&card, "Hadith #7");
        assert_eq!((number.x, number.y), (480 - 30 - 110, 640 - 30 - 5));
    }

    #[test]
    fn test_body_lines_advance_by_line_height() {
        let card = compose_card(&item(TEXT, ""), 1, &DisplayGeometry::default(), &CardFonts::default())
            .unwrap();

        let body: Vec<&DrawOp> = card.ops.iter().filter(|op| op.font == FontId::Font32).collect();
        assert!(body.len() > 1);
        for (i, op) in body.iter().enumerate() {
            assert_eq!(op.y, 100 + 52 * i as i32);
            assert!(op.text.len() <= 28);
        }
        assert_eq!(card.body_end_y, 100 + 52 * body.len() as i32);
        assert!(!card.overflows);
    }

    #[test]
    fn test_empty_narrator_not_drawn() {
        let card = compose_card(&item(TEXT, ""), 1, &DisplayGeometry::default(), &CardFonts::default())
            .unwrap();
        assert!(card.ops.iter().all(|op| !op.text.is_empty()));
        assert_eq!(card.ops.iter().filter(|op| op.plane == Plane::Red).count(), 1);
    }

    #[test]
    fn test_overlong_word_flagged() {
        let text = "see https://sunnah.com/bukhari/1/1/very/long/reference/path";
        let card = compose_card(&item(text, ""), 1, &DisplayGeometry::default(), &CardFonts::default())
            .unwrap();
        assert!(card.overflows);
    }

    #[test]
    fn test_long_body_clipped_above_source() {
        // One 15-letter word per line, 18 lines
        let words: Vec<&str> = core::iter::repeat("abcdefghijklmno").take(18).collect();
        let text = words.join(" ");
        let card = compose_card(&item(&text, ""), 9, &DisplayGeometry::default(), &CardFonts::default())
            .unwrap();

        let body: Vec<&DrawOp> = card.ops.iter().filter(|op| op.font == FontId::Font32).collect();
        assert_eq!(body.len(), 12);
        assert_eq!(body.last().map(|op| op.y), Some(100 + 52 * 11));
        assert!(body.iter().all(|op| op.y + 32 <= 750));
        assert_eq!(card.clipped, 6);
        assert_eq!(card.body_end_y, 100 + 52 * 12);
        assert!(card.overflows);

        let mut panel = MockPanel::new();
        present(&mut panel, &card.ops).unwrap();
        assert_eq!(panel.calls.len(), card.ops.len() + 2);
        assert!(panel
            .calls
            .contains(&Call::Draw(Plane::Black, 340, 765, FontId::Font16, "Hadith #9".to_string())));
    }

    #[test]
    fn test_notices() {
        let geometry = DisplayGeometry::default();
        let fonts = CardFonts::default();

        let fetch = compose_notice(Notice::FetchFailed, &geometry, &fonts);
        assert_eq!(
            fetch,
            [DrawOp::new(Plane::Red, (10, 80), FontId::Font24, FETCH_FAILED_TEXT)]
        );

        let network = compose_notice(Notice::NetworkDown, &geometry, &fonts);
        assert_eq!(
            network,
            [DrawOp::new(Plane::Black, (10, 380), FontId::Font32, NETWORK_DOWN_TEXT)]
        );
    }

    #[test]
    fn test_present_clears_draws_then_refreshes_once() {
        let mut panel = MockPanel::new();
        let card = compose_card(&item(TEXT, "N"), 3, &DisplayGeometry::default(), &CardFonts::default())
            .unwrap();

        present(&mut panel, &card.ops).unwrap();

        assert_eq!(panel.calls.first(), Some(&Call::Clear));
        assert_eq!(panel.calls.last(), Some(&Call::Refresh));
        assert_eq!(panel.calls.iter().filter(|c| **c == Call::Refresh).count(), 1);
        assert_eq!(panel.calls.len(), card.ops.len() + 2);
    }

    #[test]
    fn test_present_requires_ready_panel() {
        let mut panel = MockPanel::new();
        panel.ready = false;
        let ops = compose_notice(Notice::FetchFailed, &DisplayGeometry::default(), &CardFonts::default());

        assert_eq!(present(&mut panel, &ops), Err(DisplayError::NotInitialized));
        assert!(panel.calls.is_empty());
    }

    #[test]
    fn test_present_rejects_off_panel_draw() {
        let mut panel = MockPanel::new();
        let ops = [DrawOp::new(Plane::Black, (10, 900), FontId::Font16, "below")];

        assert_eq!(present(&mut panel, &ops), Err(DisplayError::InvalidCoordinates));
        assert!(panel.calls.is_empty());
    }
}
