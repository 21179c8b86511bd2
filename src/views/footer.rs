// Footer: copyright, blurb, links, back-to-top hint and key help.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub const COPYRIGHT: &str = "© 2025, SteamSaver+. All rights reserved.";
pub const DESCRIPTION: &str = "SteamSaver+ lets you browse the latest discounted games on Steam, \
combining live deal tracking from a public Steam-related API with a quick way to jump to the store.";
pub const LINKS: [&str; 6] = [
    "Terms of Service",
    "Privacy Policy",
    "Safety & Security",
    "Refund Policy",
    "API Documentation",
    "Contact Us",
];
pub const KEY_HELP: &str =
    "q quit · ←/→ slide · space autoplay · 1-5 jump · h/l scroll · tab focus · enter open · s steam · r retry · / search · m menu";

/// Rail offset, in layout units, past which the back-to-top hint appears.
pub const BACK_TO_TOP_THRESHOLD: i32 = 300;

pub struct FooterView {
    show_back_to_top: bool,
}

impl FooterView {
    pub fn new(show_back_to_top: bool) -> Self {
        Self { show_back_to_top }
    }
}

impl Widget for FooterView {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().borders(Borders::TOP).border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

        Paragraph::new(Span::styled(COPYRIGHT, Style::default().add_modifier(Modifier::BOLD))).render(rows[0], buf);
        Paragraph::new(Span::styled(DESCRIPTION, Style::default().add_modifier(Modifier::DIM)))
            .wrap(Wrap { trim: true })
            .render(rows[1], buf);

        let links = Layout::horizontal([Constraint::Min(10), Constraint::Length(20)]).split(rows[2]);
        Paragraph::new(LINKS.join(" · ")).render(links[0], buf);
        if self.show_back_to_top {
            Paragraph::new(Line::styled("↑ Back to top [g]", Style::default().fg(Color::Cyan)))
                .alignment(Alignment::Right)
                .render(links[1], buf);
        }

        Paragraph::new(Span::styled(KEY_HELP, Style::default().fg(Color::Yellow))).render(rows[3], buf);
    }
}
