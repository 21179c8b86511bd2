use tokio::time::{Duration, Instant, Interval, MissedTickBehavior, interval_at};

pub const PROGRESS_PERIOD: Duration = Duration::from_millis(100);
pub const SLIDE_PERIOD: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Progress,
    Slide,
}

/// The progress/slide timer pair. Both are created together and released
/// together when the value is dropped, so a stopped pair can never fire.
pub struct AutoplayTimers {
    progress: Interval,
    slide: Interval,
}

impl AutoplayTimers {
    /// Starts a fresh window: first progress tick after 100ms, first slide tick after 5s.
    pub fn start() -> Self {
        let now = Instant::now();
        let mut progress = interval_at(now + PROGRESS_PERIOD, PROGRESS_PERIOD);
        let mut slide = interval_at(now + SLIDE_PERIOD, SLIDE_PERIOD);
        progress.set_missed_tick_behavior(MissedTickBehavior::Skip);
        slide.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { progress, slide }
    }

    /// Waits for the next tick. When both are due at the same instant the
    /// progress tick is reported first.
    pub async fn next(&mut self) -> Tick {
        tokio::select! {
            biased;
            _ = self.progress.tick() => Tick::Progress,
            _ = self.slide.tick() => Tick::Slide,
        }
    }
}
