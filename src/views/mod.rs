// Terminal view components. Each view is a thin `Widget` over borrowed
// state; views do no fetching and hold no timers.

pub mod carousel;
pub mod footer;
pub mod header;
pub mod rail;

pub use carousel::CarouselView;
pub use footer::FooterView;
pub use header::{HeaderState, HeaderView};
pub use rail::RailView;

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Color;

use crate::model::{BadgeTier, Gradient};
use crate::utils::lead_hex_color;

pub const HEADER_HEIGHT: u16 = 3;
pub const RAIL_HEIGHT: u16 = 10;
pub const FOOTER_HEIGHT: u16 = 6;
/// Columns taken by the rail's two arrow gutters.
pub const RAIL_ARROW_COLUMNS: u16 = 3;

/// Screen regions, computed once per frame and reused for mouse hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenLayout {
    pub header: Rect,
    pub carousel_main: Rect,
    pub carousel_thumbs: Rect,
    pub rail: Rect,
    pub footer: Rect,
}

pub fn screen_layout(area: Rect, menu_open: bool) -> ScreenLayout {
    let header_height = if menu_open { HEADER_HEIGHT + 1 } else { HEADER_HEIGHT };
    let rows = Layout::vertical([
        Constraint::Length(header_height),
        Constraint::Min(12),
        Constraint::Length(RAIL_HEIGHT),
        Constraint::Length(FOOTER_HEIGHT),
    ])
    .split(area);

    let carousel = Layout::horizontal([Constraint::Percentage(70), Constraint::Percentage(30)]).split(rows[1]);

    ScreenLayout {
        header: rows[0],
        carousel_main: carousel[0],
        carousel_thumbs: carousel[1],
        rail: rows[2],
        footer: rows[3],
    }
}

/// Columns available to cards inside the rail: borders and both arrow gutters removed.
pub fn rail_viewport_columns(rail: Rect) -> u16 {
    rail.width.saturating_sub(2 + 2 * RAIL_ARROW_COLUMNS)
}

pub(crate) fn gradient_color(gradient: Gradient) -> Color {
    lead_hex_color(gradient.0)
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::Cyan)
}

pub(crate) fn badge_color(badge: BadgeTier) -> Color {
    match badge {
        BadgeTier::MegaDeal => Color::Magenta,
        BadgeTier::GreatDeal => Color::Green,
        BadgeTier::GoodDeal => Color::Cyan,
        BadgeTier::Deal | BadgeTier::OnSale => Color::Blue,
        BadgeTier::Featured => Color::Yellow,
        BadgeTier::Error => Color::Red,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use ratatui::buffer::Buffer;

    /// Flattens a buffer into one string per row.
    pub fn rows(buf: &Buffer) -> Vec<String> {
        let area = buf.area;
        (area.top()..area.bottom())
            .map(|y| (area.left()..area.right()).map(|x| buf[(x, y)].symbol()).collect::<String>())
            .collect()
    }

    pub fn contains(buf: &Buffer, needle: &str) -> bool {
        rows(buf).iter().any(|row| row.contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_fills_the_screen() {
        let layout = screen_layout(Rect::new(0, 0, 120, 40), false);
        assert_eq!(layout.header.height, HEADER_HEIGHT);
        assert_eq!(layout.rail.height, RAIL_HEIGHT);
        assert_eq!(layout.footer.height, FOOTER_HEIGHT);
        assert_eq!(layout.carousel_main.height, 40 - HEADER_HEIGHT - RAIL_HEIGHT - FOOTER_HEIGHT);
        assert_eq!(layout.carousel_main.width + layout.carousel_thumbs.width, 120);
    }

    #[test]
    fn open_menu_grows_header() {
        let layout = screen_layout(Rect::new(0, 0, 120, 40), true);
        assert_eq!(layout.header.height, HEADER_HEIGHT + 1);
    }

    #[test]
    fn rail_viewport() {
        assert_eq!(rail_viewport_columns(Rect::new(0, 0, 100, 10)), 92);
        assert_eq!(rail_viewport_columns(Rect::new(0, 0, 4, 10)), 0);
    }

    #[test]
    fn gradient_to_color() {
        assert_eq!(gradient_color(Gradient("linear-gradient(135deg, #667eea)")), Color::Rgb(0x66, 0x7e, 0xea));
    }
}
