use crossterm::event::Event;

use crate::model::{DiscountCard, FetchError};
use crate::transform::featured::FeaturedOutcome;

/// Everything the event loop reacts to besides carousel ticks.
pub enum AppEvent {
    Input(Event),
    FeaturedLoaded {
        generation: u64,
        result: Result<FeaturedOutcome, FetchError>,
    },
    DiscountsLoaded {
        generation: u64,
        result: Result<Vec<DiscountCard>, FetchError>,
    },
}
