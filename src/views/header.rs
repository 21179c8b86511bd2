// Header: brand, search box, navigation and the compact menu toggle.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub const BRAND: &str = "SteamSaver+";
pub const SEARCH_PLACEHOLDER: &str = "Search games, deals, genres...";
pub const NAV_ITEMS: [&str; 3] = ["Discover", "Wishlist", "Sign In"];

/// Header UI state. The search text is presentational only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderState {
    pub search_focused: bool,
    pub search_value: String,
    pub menu_open: bool,
}

impl HeaderState {
    pub fn focus_search(&mut self) {
        self.search_focused = true;
    }

    pub fn blur_search(&mut self) {
        self.search_focused = false;
    }

    pub fn push_char(&mut self, c: char) {
        self.search_value.push(c);
    }

    pub fn backspace(&mut self) {
        self.search_value.pop();
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }
}

pub struct HeaderView<'a> {
    state: &'a HeaderState,
}

impl<'a> HeaderView<'a> {
    pub fn new(state: &'a HeaderState) -> Self {
        Self { state }
    }

    fn nav_line(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for item in &NAV_ITEMS[..2] {
            spans.push(Span::raw(format!(" {} ", item)));
        }
        spans.push(Span::styled(
            format!(" {} ", NAV_ITEMS[2]),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ));
        Line::from(spans)
    }
}

impl<'a> Widget for HeaderView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = if self.state.menu_open {
            Layout::vertical([Constraint::Length(3), Constraint::Length(1)]).split(area)
        } else {
            Layout::vertical([Constraint::Length(3)]).split(area)
        };

        let columns = Layout::horizontal([
            Constraint::Length(16),
            Constraint::Min(20),
            Constraint::Length(34),
            Constraint::Length(5),
        ])
        .split(rows[0]);

        let brand = Line::from(vec![
            Span::styled("🎮 ", Style::default()),
            Span::styled(BRAND, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        ]);
        Paragraph::new(vec![Line::default(), brand]).render(columns[0], buf);

        let border_color = if self.state.search_focused { Color::Yellow } else { Color::DarkGray };
        let search_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));
        let search_line = if self.state.search_value.is_empty() && !self.state.search_focused {
            Line::from(vec![
                Span::raw("🔍 "),
                Span::styled(SEARCH_PLACEHOLDER, Style::default().add_modifier(Modifier::DIM)),
            ])
        } else {
            let cursor = if self.state.search_focused { "_" } else { "" };
            Line::from(vec![
                Span::raw("🔍 "),
                Span::raw(self.state.search_value.as_str()),
                Span::styled(cursor, Style::default().fg(Color::Yellow)),
            ])
        };
        Paragraph::new(search_line).block(search_block).render(columns[1], buf);

        Paragraph::new(vec![Line::default(), self.nav_line()]).render(columns[2], buf);

        let toggle = if self.state.menu_open { " ✕ " } else { " ☰ " };
        Paragraph::new(vec![Line::default(), Line::from(toggle)]).render(columns[3], buf);

        if self.state.menu_open {
            Paragraph::new(self.nav_line()).render(rows[1], buf);
        }
    }
}
