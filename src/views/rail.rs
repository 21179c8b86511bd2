// Top Discounts rail: cards positioned by the scroll region's offset.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::app::components::{DiscountsComponent, DiscountsState};
use crate::model::DiscountCard;
use crate::rail::{CARD_GAP, CARD_WIDTH, UNITS_PER_COLUMN};
use crate::utils::format_usd;

use super::RAIL_ARROW_COLUMNS;

pub const TITLE: &str = " Top Discounts › ";
pub const EMPTY_TEXT: &str = "No deals available at the moment";
const SKELETON_CARDS: i32 = 6;

pub struct RailView<'a> {
    component: &'a DiscountsComponent,
    focused: bool,
}

impl<'a> RailView<'a> {
    pub fn new(component: &'a DiscountsComponent, focused: bool) -> Self {
        Self { component, focused }
    }
}

/// Column span of card `index` relative to the viewport, before clipping.
fn card_columns(index: usize, offset: i32) -> (i32, i32) {
    let start = (index as i32 * (CARD_WIDTH + CARD_GAP) - offset).div_euclid(UNITS_PER_COLUMN);
    (start, start + CARD_WIDTH / UNITS_PER_COLUMN)
}

/// Intersects a card span with the viewport.
fn clip(viewport: Rect, (start, end): (i32, i32)) -> Option<Rect> {
    let left = start.max(0);
    let right = end.min(i32::from(viewport.width));
    (left < right).then(|| Rect::new(viewport.x + left as u16, viewport.y, (right - left) as u16, viewport.height))
}

fn price_line(card: &DiscountCard) -> Line<'static> {
    if card.current_price == 0.0 {
        Line::from(Span::styled("FREE", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)))
    } else if card.discount > 0 {
        Line::from(vec![
            Span::styled(
                format_usd(card.original_price),
                Style::default().add_modifier(Modifier::CROSSED_OUT | Modifier::DIM),
            ),
            Span::raw(" "),
            Span::styled(format_usd(card.current_price), Style::default().add_modifier(Modifier::BOLD)),
        ])
    } else {
        Line::from(format_usd(card.current_price))
    }
}

/// Critic score and Steam rating, e.g. `MC 85 · Very Positive 92%`.
fn rating_line(card: &DiscountCard) -> Line<'static> {
    let mut parts = Vec::new();
    if let Some(score) = card.metacritic_score.as_deref().filter(|s| *s != "0") {
        parts.push(format!("MC {}", score));
    }
    match (&card.steam_rating_text, &card.steam_rating_percent) {
        (Some(text), Some(percent)) => parts.push(format!("{} {}%", text, percent)),
        (Some(text), None) => parts.push(text.clone()),
        _ => {}
    }
    Line::styled(parts.join(" · "), Style::default().fg(Color::Gray))
}

fn render_card(card: &DiscountCard, selected: bool, area: Rect, buf: &mut Buffer) {
    let border = if selected { Color::Yellow } else { Color::DarkGray };
    let mut lines = Vec::new();
    if card.discount > 0 {
        lines.push(Line::from(Span::styled(
            format!(" -{}% ", card.discount),
            Style::default().fg(Color::Black).bg(Color::Green),
        )));
    } else {
        lines.push(Line::default());
    }
    lines.push(Line::from(Span::styled(card.category.label(), Style::default().add_modifier(Modifier::DIM))));
    lines.push(Line::from(Span::styled(card.title.clone(), Style::default().add_modifier(Modifier::BOLD))));
    lines.push(rating_line(card));
    lines.push(price_line(card));
    lines.push(Line::styled(card.image.clone(), Style::default().add_modifier(Modifier::DIM)));
    Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(border)))
        .render(area, buf);
}

impl<'a> Widget for RailView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title_style = if self.focused { Style::default().fg(Color::Yellow) } else { Style::default() };
        let block = Block::default()
            .title(Span::styled(TITLE, title_style.add_modifier(Modifier::BOLD)))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        block.render(area, buf);

        let message = match &self.component.state {
            DiscountsState::Failed(msg) => Some(format!("Error: {}", msg)),
            DiscountsState::Empty => Some(EMPTY_TEXT.to_string()),
            _ => None,
        };
        if let Some(message) = message {
            Paragraph::new(message).alignment(Alignment::Center).render(inner, buf);
            return;
        }

        if inner.width <= 2 * RAIL_ARROW_COLUMNS {
            return;
        }
        let viewport = Rect::new(
            inner.x + RAIL_ARROW_COLUMNS,
            inner.y,
            inner.width - 2 * RAIL_ARROW_COLUMNS,
            inner.height,
        );

        if let DiscountsState::Loading = self.component.state {
            let shade = Style::default().fg(Color::DarkGray);
            for index in 0..SKELETON_CARDS as usize {
                if let Some(rect) = clip(viewport, card_columns(index, 0)) {
                    Paragraph::new(vec![Line::styled("▒".repeat(rect.width as usize), shade); rect.height as usize])
                        .render(rect, buf);
                }
            }
            return;
        }

        let rail = &self.component.rail;
        let arrow = |enabled: bool, symbol: &'static str| {
            let style = if enabled { Style::default().fg(Color::White) } else { Style::default().fg(Color::DarkGray) };
            Paragraph::new(vec![Line::default(), Line::default(), Line::styled(symbol, style)]).alignment(Alignment::Center)
        };
        arrow(rail.can_scroll_left(), "‹").render(Rect::new(inner.x, inner.y, RAIL_ARROW_COLUMNS, inner.height), buf);
        arrow(rail.can_scroll_right(), "›").render(
            Rect::new(viewport.right(), inner.y, RAIL_ARROW_COLUMNS, inner.height),
            buf,
        );

        let offset = self.component.region.offset();
        for (index, card) in self.component.state.cards().iter().enumerate() {
            if let Some(rect) = clip(viewport, card_columns(index, offset)) {
                let selected = self.focused && index == self.component.selected_index();
                render_card(card, selected, rect, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;
    use crate::transform::CARD_PLACEHOLDER;
    use crate::views::test_support::contains;

    fn card(id: usize, current: f64, discount: i64) -> DiscountCard {
        DiscountCard {
            title: format!("Game {id}"),
            category: Category::VeryPositive,
            image: CARD_PLACEHOLDER.to_string(),
            discount,
            original_price: 19.99,
            current_price: current,
            deal_id: Some(id.to_string()),
            steam_app_id: None,
            metacritic_score: Some("88".into()),
            steam_rating_text: Some("Very Positive".into()),
            steam_rating_percent: Some("91".into()),
        }
    }

    fn render(component: &DiscountsComponent) -> Buffer {
        let area = Rect::new(0, 0, 100, 10);
        let mut buf = Buffer::empty(area);
        RailView::new(component, true).render(area, &mut buf);
        buf
    }

    fn loaded(cards: Vec<DiscountCard>) -> DiscountsComponent {
        let mut component = DiscountsComponent::new();
        component.region.set_card_count(cards.len());
        component.set_visible_columns(92);
        component.state = DiscountsState::Loaded(cards);
        component.rail.check(&component.region);
        component
    }

    #[test]
    fn card_geometry() {
        assert_eq!(card_columns(0, 0), (0, 25));
        assert_eq!(card_columns(1, 0), (26, 51));
        assert_eq!(card_columns(3, 798), (0, 25));
        let viewport = Rect::new(3, 1, 40, 8);
        assert_eq!(clip(viewport, (-5, 20)), Some(Rect::new(3, 1, 20, 8)));
        assert_eq!(clip(viewport, (30, 55)), Some(Rect::new(33, 1, 10, 8)));
        assert_eq!(clip(viewport, (50, 75)), None);
    }

    #[test]
    fn cards_show_category_and_prices() {
        let buf = render(&loaded(vec![card(1, 4.99, 75), card(2, 0.0, 100), card(3, 9.99, 0)]));
        assert!(contains(&buf, "Top Discounts"));
        assert!(contains(&buf, "VERY POSITIVE"));
        assert!(contains(&buf, "-75%"));
        assert!(contains(&buf, "$19.99 $4.99"));
        assert!(contains(&buf, "FREE"));
        assert!(contains(&buf, "$9.99"));
        assert!(contains(&buf, "MC 88 · Very"));
        assert!(contains(&buf, "/placeholder.svg"));
    }

    #[test]
    fn rating_line_skips_missing_parts() {
        let mut c = card(1, 4.99, 75);
        assert_eq!(rating_line(&c).to_string(), "MC 88 · Very Positive 91%");
        c.metacritic_score = Some("0".into());
        c.steam_rating_percent = None;
        assert_eq!(rating_line(&c).to_string(), "Very Positive");
    }

    #[test]
    fn error_and_empty_states_are_distinct() {
        let mut component = DiscountsComponent::new();
        component.state = DiscountsState::Failed("Network error: down".into());
        let buf = render(&component);
        assert!(contains(&buf, "Error: Network error: down"));
        assert!(!contains(&buf, EMPTY_TEXT));

        component.state = DiscountsState::Empty;
        let buf = render(&component);
        assert!(contains(&buf, EMPTY_TEXT));
        assert!(!contains(&buf, "Error"));
    }
}
