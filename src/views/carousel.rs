// Featured carousel: current slide, thumbnail list with progress, dots.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::app::components::FeaturedState;
use crate::carousel::CarouselController;
use crate::config::AppConfig;
use crate::model::{FeaturedDeal, RatingMeta};

use super::{badge_color, gradient_color};

pub const EMPTY_TEXT: &str = "No games available";
const SKELETON_THUMBS: usize = 5;

pub struct CarouselView<'a> {
    state: &'a FeaturedState,
    controller: &'a CarouselController,
    config: &'a AppConfig,
    thumbs_area: Rect,
}

impl<'a> CarouselView<'a> {
    /// Renders the slide into the area given to `render` and the thumbnails into `thumbs_area`.
    pub fn new(
        state: &'a FeaturedState,
        controller: &'a CarouselController,
        config: &'a AppConfig,
        thumbs_area: Rect,
    ) -> Self {
        Self { state, controller, config, thumbs_area }
    }

    fn render_skeleton(&self, area: Rect, buf: &mut Buffer) {
        let shade = Style::default().fg(Color::DarkGray);
        let lines = vec![
            Line::default(),
            Line::styled("████████████████████████", shade),
            Line::styled("████████████", shade),
            Line::default(),
            Line::styled("██████████████████████████████████████", shade),
            Line::styled("████████████████████████████", shade),
            Line::default(),
            Line::styled("██████████   ██████████", shade),
        ];
        Paragraph::new(lines)
            .block(Block::default().title(" Featured ").borders(Borders::ALL))
            .render(area, buf);

        let thumbs: Vec<Line> = (0..SKELETON_THUMBS)
            .flat_map(|_| [Line::styled("▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒", shade), Line::default()])
            .collect();
        Paragraph::new(thumbs)
            .block(Block::default().borders(Borders::ALL))
            .render(self.thumbs_area, buf);
    }

    fn slide_lines(&self, deal: &'a FeaturedDeal, failure: Option<&'a str>) -> Vec<Line<'a>> {
        let accent = gradient_color(deal.gradient);
        let mut lines = vec![
            Line::from(Span::styled(
                format!(" {} ", deal.badge.label()),
                Style::default().fg(Color::Black).bg(badge_color(deal.badge)).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(Span::styled(deal.title.as_str(), Style::default().add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(deal.subtitle.as_str(), Style::default().fg(accent).add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(deal.date_range.as_str(), Style::default().add_modifier(Modifier::DIM))),
        ];
        if let Some(meta) = meta_line(&deal.meta) {
            lines.push(meta);
        }
        lines.push(Line::default());
        lines.push(Line::from(deal.description.as_str()));
        lines.push(Line::default());
        if let Some(message) = failure {
            lines.push(Line::styled(message, Style::default().fg(Color::Red)));
            lines.push(Line::default());
        }

        if let Some(price) = &deal.price {
            let mut spans = Vec::new();
            if let Some(discount) = &deal.discount {
                spans.push(Span::styled(
                    format!(" -{} ", discount),
                    Style::default().fg(Color::Black).bg(Color::Green),
                ));
                spans.push(Span::raw(" "));
            }
            if let Some(original) = &deal.original_price {
                spans.push(Span::styled(
                    original.as_str(),
                    Style::default().add_modifier(Modifier::CROSSED_OUT | Modifier::DIM),
                ));
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(price.as_str(), Style::default().add_modifier(Modifier::BOLD)));
            lines.push(Line::from(spans));
            lines.push(Line::default());
        }

        lines.push(Line::from(vec![
            Span::styled("[Enter] ", Style::default().fg(Color::Yellow)),
            Span::styled(deal.cta_text.as_str(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("   "),
            Span::styled("[s] ", Style::default().fg(Color::Yellow)),
            Span::raw(deal.cta_secondary.as_str()),
        ]));

        let art = match &deal.steam_app_id {
            Some(id) => self.config.header_image_url(id),
            None => deal.image.clone(),
        };
        lines.push(Line::from(Span::styled(art, Style::default().add_modifier(Modifier::DIM))));
        lines
    }

    fn indicator_line(&self, count: usize) -> Line<'static> {
        let mut spans: Vec<Span> = (0..count)
            .map(|i| {
                if i == self.controller.current_slide() {
                    Span::styled("● ", Style::default().fg(Color::White))
                } else {
                    Span::styled("○ ", Style::default().fg(Color::DarkGray))
                }
            })
            .collect();
        let autoplay = if self.controller.is_auto_playing() { "  ⏸ autoplay" } else { "  ▶ paused" };
        spans.push(Span::styled(autoplay, Style::default().fg(Color::Yellow)));
        Line::from(spans)
    }

    fn render_thumbnails(&self, deals: &[FeaturedDeal], buf: &mut Buffer) {
        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(self.thumbs_area);
        block.render(self.thumbs_area, buf);

        let bar_width = inner.width.saturating_sub(2) as usize;
        let mut lines = Vec::new();
        for (index, deal) in deals.iter().enumerate() {
            let active = index == self.controller.current_slide();
            let title_style = if active {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::DIM)
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{} ", index + 1), Style::default().fg(Color::Yellow)),
                Span::styled(deal.title.as_str(), title_style),
            ]));
            lines.push(Line::from(Span::styled(
                format!("  {}", deal.subtitle),
                Style::default().fg(gradient_color(deal.gradient)),
            )));
            let filled = if active { bar_width * usize::from(self.controller.progress()) / 100 } else { 0 };
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled("━".repeat(filled), Style::default().fg(Color::Cyan)),
            ]));
        }
        Paragraph::new(lines).render(inner, buf);
    }
}

/// Rating, critic score, deal rating and dates; `None` when the record carried none of them.
fn meta_line(meta: &RatingMeta) -> Option<Line<'static>> {
    let mut parts = Vec::new();
    if let Some(text) = &meta.steam_rating_text {
        let mut rating = text.clone();
        if let Some(percent) = &meta.steam_rating_percent {
            rating.push_str(&format!(" {}%", percent));
        }
        if let Some(count) = &meta.steam_rating_count {
            rating.push_str(&format!(" of {} reviews", count));
        }
        parts.push(rating);
    }
    if let Some(score) = meta.metacritic_score.as_deref().filter(|s| *s != "0") {
        parts.push(format!("Metacritic {}", score));
    }
    if let Some(rating) = &meta.deal_rating {
        parts.push(format!("Deal rating {}", rating));
    }
    if let Some(date) = meta.release_date {
        parts.push(format!("Released {}", date.format("%Y-%m-%d")));
    }
    if let Some(date) = meta.last_change {
        parts.push(format!("Price updated {}", date.format("%Y-%m-%d")));
    }
    (!parts.is_empty()).then(|| Line::styled(parts.join(" · "), Style::default().fg(Color::Gray)))
}

impl<'a> Widget for CarouselView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (deals, failure) = match self.state {
            FeaturedState::Loading => {
                self.render_skeleton(area, buf);
                return;
            }
            FeaturedState::Empty => {
                Paragraph::new(EMPTY_TEXT)
                    .block(Block::default().title(" Featured ").borders(Borders::ALL))
                    .render(area, buf);
                return;
            }
            FeaturedState::Loaded(deals) => (deals, None),
            FeaturedState::Failed { deals, message } => (deals, Some(message.as_str())),
        };
        let Some(deal) = deals.get(self.controller.current_slide()).or_else(|| deals.first()) else {
            return;
        };

        let block = Block::default()
            .title(" Featured ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(gradient_color(deal.gradient)));
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);
        Paragraph::new(self.slide_lines(deal, failure))
            .wrap(Wrap { trim: true })
            .render(rows[0], buf);
        Paragraph::new(self.indicator_line(deals.len())).render(rows[1], buf);

        self.render_thumbnails(deals, buf);
    }
}
