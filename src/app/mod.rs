pub mod components;
pub mod events;
pub mod input;
pub mod navigate;
pub mod terminal;

use std::io;
use std::sync::Arc;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Position, Rect},
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::carousel::CarouselController;
use crate::config::AppConfig;
use crate::fetcher::DealSource;
use crate::model::{AppError, FeaturedDeal};
use crate::rail::ScrollDirection;
use crate::views::footer::BACK_TO_TOP_THRESHOLD;
use crate::views::{
    CarouselView, FooterView, HeaderState, HeaderView, RailView, ScreenLayout, rail_viewport_columns, screen_layout,
};

use components::{DiscountsComponent, FeaturedComponent};
use events::AppEvent;
use input::InputPump;
use navigate::{deal_url, open_in_browser, store_url};

/// Which section Enter acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Carousel,
    Rail,
}

type Opener = Box<dyn Fn(&str) -> io::Result<()> + Send>;

pub struct App {
    config: Arc<AppConfig>,
    source: Arc<dyn DealSource>,
    header: HeaderState,
    featured: FeaturedComponent,
    discounts: DiscountsComponent,
    carousel: CarouselController,
    focus: Focus,
    hovering: bool,
    layout: ScreenLayout,
    should_quit: bool,
    opener: Opener,
    tx: UnboundedSender<AppEvent>,
    rx: UnboundedReceiver<AppEvent>,
}

impl App {
    pub fn new(config: Arc<AppConfig>, source: Arc<dyn DealSource>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            config,
            source,
            header: HeaderState::default(),
            featured: FeaturedComponent::new(),
            discounts: DiscountsComponent::new(),
            carousel: CarouselController::new(),
            focus: Focus::Carousel,
            hovering: false,
            layout: ScreenLayout::default(),
            should_quit: false,
            opener: Box::new(open_in_browser),
            tx,
            rx,
        }
    }

    /// Starts both fetches. The rail begins with an empty exclusion set and
    /// re-fetches once the featured ids are known.
    fn mount(&mut self) {
        self.featured.mount(self.source.clone(), self.tx.clone());
        self.discounts.set_exclusions(&[], self.source.clone(), self.tx.clone());
    }

    /// Full reload: UI state back to its initial values, then both fetches again.
    fn reload(&mut self) {
        info!("Reloading deals");
        self.carousel.reset();
        self.header = HeaderState::default();
        self.focus = Focus::Carousel;
        self.hovering = false;
        self.featured.mount(self.source.clone(), self.tx.clone());
        self.discounts.remount(self.source.clone(), self.tx.clone());
    }

    pub async fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        self.mount();
        let _input = InputPump::spawn(self.tx.clone());
        let result = self.event_loop(terminal).await;
        self.teardown();
        result
    }

    async fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        while !self.should_quit {
            self.draw(terminal)?;
            tokio::select! {
                Some(event) = self.rx.recv() => self.handle_event(event),
                tick = self.carousel.next_tick() => self.carousel.apply_tick(tick),
            }
        }
        Ok(())
    }

    /// Measures the screen, feeds the rail its viewport width, then renders.
    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let size = terminal.size()?;
        self.layout = screen_layout(Rect::new(0, 0, size.width, size.height), self.header.menu_open);
        self.discounts.set_visible_columns(rail_viewport_columns(self.layout.rail));
        terminal.draw(|frame| self.render(frame))?;
        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        let layout = self.layout;
        frame.render_widget(HeaderView::new(&self.header), layout.header);
        frame.render_widget(
            CarouselView::new(&self.featured.state, &self.carousel, &self.config, layout.carousel_thumbs),
            layout.carousel_main,
        );
        frame.render_widget(RailView::new(&self.discounts, self.focus == Focus::Rail), layout.rail);
        frame.render_widget(
            FooterView::new(self.discounts.region.offset() > BACK_TO_TOP_THRESHOLD),
            layout.footer,
        );
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(Event::Key(key)) => self.handle_key(key),
            AppEvent::Input(Event::Mouse(mouse)) => self.handle_mouse(mouse),
            // Resizes are picked up by the next draw.
            AppEvent::Input(_) => {}
            AppEvent::FeaturedLoaded { generation, result } => {
                if self.featured.finish(generation, result) {
                    self.carousel.set_len(self.featured.state.deals().len());
                    let ids = self.featured.shown_ids();
                    self.discounts.set_exclusions(&ids, self.source.clone(), self.tx.clone());
                }
            }
            AppEvent::DiscountsLoaded { generation, result } => {
                self.discounts.finish(generation, result);
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.header.search_focused {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => self.header.blur_search(),
                KeyCode::Backspace => self.header.backspace(),
                KeyCode::Char(c) => self.header.push_char(c),
                _ => {}
            }
            return;
        }

        if self.carousel.handle_key(key.code) {
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc if self.header.menu_open => self.header.toggle_menu(),
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('/') => self.header.focus_search(),
            KeyCode::Char('m') => self.header.toggle_menu(),
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::Carousel => Focus::Rail,
                    Focus::Rail => Focus::Carousel,
                };
            }
            KeyCode::Char('h') => self.discounts.scroll(ScrollDirection::Left),
            KeyCode::Char('l') => self.discounts.scroll(ScrollDirection::Right),
            KeyCode::Char('g') | KeyCode::Home => self.discounts.scroll_to_start(),
            KeyCode::Enter => match self.focus {
                Focus::Carousel => self.primary_action(),
                Focus::Rail => self.open_selected_card(),
            },
            KeyCode::Char('s') => match self.focus {
                Focus::Carousel => self.secondary_action(),
                Focus::Rail => self.open_selected_store_page(),
            },
            KeyCode::Char('r') => self.reload(),
            KeyCode::Char(c @ '1'..='5') => {
                self.carousel.go_to_slide(c as usize - '1' as usize);
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let position = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved => {
                let inside = self.layout.carousel_main.contains(position);
                if inside != self.hovering {
                    self.hovering = inside;
                    if inside {
                        self.carousel.hover_enter();
                    } else {
                        self.carousel.hover_leave();
                    }
                }
            }
            MouseEventKind::Down(MouseButton::Left) if self.layout.carousel_thumbs.contains(position) => {
                // Three rows per thumbnail below the top border.
                let row = position.y.saturating_sub(self.layout.carousel_thumbs.y + 1);
                self.carousel.go_to_slide(usize::from(row / 3));
            }
            MouseEventKind::ScrollDown | MouseEventKind::ScrollRight if self.layout.rail.contains(position) => {
                self.discounts.scroll(ScrollDirection::Right);
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft if self.layout.rail.contains(position) => {
                self.discounts.scroll(ScrollDirection::Left);
            }
            _ => {}
        }
    }

    fn current_deal(&self) -> Option<&FeaturedDeal> {
        self.featured.state.deals().get(self.carousel.current_slide())
    }

    /// "Get Deal" on a normal slide, "Retry" on the error slide.
    fn primary_action(&mut self) {
        if self.featured.state.is_error() {
            self.reload();
            return;
        }
        let url = self
            .current_deal()
            .and_then(|deal| deal.deal_id.as_deref())
            .map(|id| deal_url(&self.config, id));
        match url {
            Some(url) => self.open(&url),
            None => debug!("No deal link on the current slide"),
        }
    }

    fn secondary_action(&mut self) {
        let url = self
            .current_deal()
            .and_then(|deal| deal.steam_app_id.as_deref())
            .map(|id| store_url(&self.config, id));
        if let Some(url) = url {
            self.open(&url);
        }
    }

    fn open_selected_card(&mut self) {
        let url = self
            .discounts
            .selected_card()
            .and_then(|card| card.deal_id.as_deref())
            .map(|id| deal_url(&self.config, id));
        if let Some(url) = url {
            self.open(&url);
        }
    }

    fn open_selected_store_page(&mut self) {
        let url = self
            .discounts
            .selected_card()
            .and_then(|card| card.steam_app_id.as_deref())
            .map(|id| store_url(&self.config, id));
        if let Some(url) = url {
            self.open(&url);
        }
    }

    fn open(&self, url: &str) {
        if let Err(e) = (self.opener)(url) {
            warn!("Could not open link: {}", e);
        }
    }

    fn teardown(&mut self) {
        self.carousel.stop();
        self.featured.teardown();
        self.discounts.teardown();
        info!("Shut down");
    }
}
