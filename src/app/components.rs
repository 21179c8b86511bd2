// Per-component fetch lifecycle. Each component owns at most one in-flight
// request; starting another aborts it and late results from it are dropped.
use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::fetcher::DealSource;
use crate::model::{DiscountCard, FeaturedDeal, FetchError};
use crate::rail::{CARD_GAP, CARD_WIDTH, ScrollDirection, ScrollRail, ScrollRegion};
use crate::transform::discounts::load_discounts;
use crate::transform::featured::{FeaturedOutcome, LOAD_ERROR_MESSAGE, error_deal, load_featured};

/// Generation counter plus the handle of the request it belongs to.
#[derive(Default)]
pub struct FetchTask {
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl FetchTask {
    /// Aborts whatever is in flight and returns the generation for the next request.
    pub fn begin(&mut self) -> u64 {
        self.cancel();
        self.generation += 1;
        self.generation
    }

    pub fn attach(&mut self, handle: JoinHandle<()>) {
        self.handle = Some(handle);
    }

    /// Accepts a completion only if it belongs to the latest request.
    pub fn finish(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            debug!("Dropping stale response (generation {} < {})", generation, self.generation);
            return false;
        }
        self.handle = None;
        true
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    #[cfg(test)]
    pub fn in_flight(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for FetchTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeaturedState {
    Loading,
    Loaded(Vec<FeaturedDeal>),
    /// Holds the single error slide.
    Failed { deals: Vec<FeaturedDeal>, message: String },
    Empty,
}

impl FeaturedState {
    pub fn deals(&self) -> &[FeaturedDeal] {
        match self {
            FeaturedState::Loaded(deals) | FeaturedState::Failed { deals, .. } => deals,
            FeaturedState::Loading | FeaturedState::Empty => &[],
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, FeaturedState::Failed { .. })
    }
}

pub struct FeaturedComponent {
    pub state: FeaturedState,
    task: FetchTask,
}

impl FeaturedComponent {
    pub fn new() -> Self {
        Self { state: FeaturedState::Loading, task: FetchTask::default() }
    }

    pub fn mount(&mut self, source: Arc<dyn DealSource>, tx: UnboundedSender<AppEvent>) {
        let generation = self.task.begin();
        self.state = FeaturedState::Loading;
        info!("Featured: fetching (generation {})", generation);
        let handle = tokio::spawn(async move {
            let result = load_featured(source.as_ref()).await;
            let _ = tx.send(AppEvent::FeaturedLoaded { generation, result });
        });
        self.task.attach(handle);
    }

    /// Applies a completion. Returns false when it was stale.
    pub fn finish(&mut self, generation: u64, result: Result<FeaturedOutcome, FetchError>) -> bool {
        if !self.task.finish(generation) {
            return false;
        }
        self.state = match result {
            Ok(FeaturedOutcome::Empty) => FeaturedState::Empty,
            Ok(outcome) => FeaturedState::Loaded(outcome.into_deals()),
            Err(e) => {
                warn!("Error fetching featured deals: {}", e);
                FeaturedState::Failed { deals: vec![error_deal()], message: LOAD_ERROR_MESSAGE.to_string() }
            }
        };
        true
    }

    /// Deal ids currently on screen, used as the rail's exclusion set.
    pub fn shown_ids(&self) -> Vec<String> {
        match &self.state {
            FeaturedState::Loaded(deals) => deals.iter().filter_map(|d| d.deal_id.clone()).collect(),
            _ => Vec::new(),
        }
    }

    pub fn teardown(&mut self) {
        self.task.cancel();
    }
}

impl Default for FeaturedComponent {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DiscountsState {
    Loading,
    Loaded(Vec<DiscountCard>),
    Empty,
    Failed(String),
}

impl DiscountsState {
    pub fn cards(&self) -> &[DiscountCard] {
        match self {
            DiscountsState::Loaded(cards) => cards,
            _ => &[],
        }
    }
}

pub struct DiscountsComponent {
    pub state: DiscountsState,
    pub region: ScrollRegion,
    pub rail: ScrollRail,
    excluded: HashSet<String>,
    exclusions_key: Option<String>,
    task: FetchTask,
}

impl DiscountsComponent {
    pub fn new() -> Self {
        Self {
            state: DiscountsState::Loading,
            region: ScrollRegion::default(),
            rail: ScrollRail::new(),
            excluded: HashSet::new(),
            exclusions_key: None,
            task: FetchTask::default(),
        }
    }

    /// Sets the exclusion set and fetches if it changed (compared by joined key)
    /// or if nothing has been fetched yet.
    pub fn set_exclusions(&mut self, ids: &[String], source: Arc<dyn DealSource>, tx: UnboundedSender<AppEvent>) {
        let key = ids.join(",");
        if self.exclusions_key.as_deref() == Some(key.as_str()) {
            return;
        }
        self.exclusions_key = Some(key);
        self.excluded = ids.iter().cloned().collect();
        self.refetch(source, tx);
    }

    pub fn refetch(&mut self, source: Arc<dyn DealSource>, tx: UnboundedSender<AppEvent>) {
        let generation = self.task.begin();
        self.state = DiscountsState::Loading;
        let excluded = self.excluded.clone();
        info!("Top discounts: fetching (generation {}, {} excluded)", generation, excluded.len());
        let handle = tokio::spawn(async move {
            let result = load_discounts(source.as_ref(), &excluded).await;
            let _ = tx.send(AppEvent::DiscountsLoaded { generation, result });
        });
        self.task.attach(handle);
    }

    pub fn finish(&mut self, generation: u64, result: Result<Vec<DiscountCard>, FetchError>) -> bool {
        if !self.task.finish(generation) {
            return false;
        }
        self.state = match result {
            Ok(cards) if cards.is_empty() => DiscountsState::Empty,
            Ok(cards) => DiscountsState::Loaded(cards),
            Err(e) => {
                warn!("Error fetching deals: {}", e);
                DiscountsState::Failed(e.to_string())
            }
        };
        self.region.set_card_count(self.state.cards().len());
        self.region.set_offset(0);
        self.rail.check(&self.region);
        true
    }

    /// Viewport measurement from the view layer; re-checks only when the geometry changed.
    pub fn set_visible_columns(&mut self, columns: u16) {
        let before = self.region.visible_width();
        let moved = self.region.set_visible_columns(columns);
        if moved || before != self.region.visible_width() {
            self.rail.check(&self.region);
        }
    }

    pub fn scroll(&mut self, direction: ScrollDirection) {
        if self.state.cards().is_empty() {
            return;
        }
        let allowed = match direction {
            ScrollDirection::Left => self.rail.can_scroll_left(),
            ScrollDirection::Right => self.rail.can_scroll_right(),
        };
        if allowed {
            self.rail.scroll_by(&mut self.region, direction);
        }
    }

    pub fn scroll_to_start(&mut self) {
        if self.region.set_offset(0) {
            self.rail.check(&self.region);
        }
    }

    /// First card that starts inside the viewport; this is the card Enter opens.
    pub fn selected_index(&self) -> usize {
        let stride = CARD_WIDTH + CARD_GAP;
        let index = ((self.region.offset() + stride - 1) / stride) as usize;
        index.min(self.state.cards().len().saturating_sub(1))
    }

    pub fn selected_card(&self) -> Option<&DiscountCard> {
        self.state.cards().get(self.selected_index())
    }

    /// Starts over as on first mount: empty exclusion set, fresh fetch.
    pub fn remount(&mut self, source: Arc<dyn DealSource>, tx: UnboundedSender<AppEvent>) {
        self.exclusions_key = None;
        self.set_exclusions(&[], source, tx);
    }

    pub fn teardown(&mut self) {
        self.task.cancel();
    }
}

impl Default for DiscountsComponent {
    fn default() -> Self {
        Self::new()
    }
}
