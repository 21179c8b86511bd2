// Carousel controller: slide index, autoplay flag and progress, plus the owned timer pair.

pub mod timers;

use crossterm::event::KeyCode;
use tracing::debug;

pub use timers::{AutoplayTimers, Tick};

pub const PROGRESS_STEP: u8 = 2;
pub const PROGRESS_MAX: u8 = 100;

pub struct CarouselController {
    current_slide: usize,
    is_auto_playing: bool,
    progress: u8,
    len: usize,
    timers: Option<AutoplayTimers>,
}

impl CarouselController {
    pub fn new() -> Self {
        Self {
            current_slide: 0,
            is_auto_playing: true,
            progress: 0,
            len: 0,
            timers: None,
        }
    }

    pub fn current_slide(&self) -> usize {
        self.current_slide
    }

    pub fn is_auto_playing(&self) -> bool {
        self.is_auto_playing
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    pub fn has_timers(&self) -> bool {
        self.timers.is_some()
    }

    /// Called whenever a new list lands. A changed count restarts the timers.
    pub fn set_len(&mut self, len: usize) {
        if len == self.len {
            return;
        }
        self.len = len;
        if self.current_slide >= len {
            self.current_slide = 0;
        }
        self.restart();
    }

    /// Jumps to `index`; out-of-range indices are ignored.
    pub fn go_to_slide(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        debug!("Carousel: go to slide {}", index);
        self.current_slide = index;
        self.progress = 0;
        if self.is_auto_playing {
            self.restart();
        }
        true
    }

    pub fn next(&mut self) -> bool {
        if self.len == 0 {
            return false;
        }
        self.go_to_slide((self.current_slide + 1) % self.len)
    }

    pub fn prev(&mut self) -> bool {
        if self.len == 0 {
            return false;
        }
        let index = if self.current_slide == 0 { self.len - 1 } else { self.current_slide - 1 };
        self.go_to_slide(index)
    }

    pub fn set_auto_playing(&mut self, on: bool) {
        if self.is_auto_playing == on {
            return;
        }
        debug!("Carousel: autoplay {}", if on { "on" } else { "off" });
        self.is_auto_playing = on;
        self.restart();
    }

    pub fn toggle_auto_playing(&mut self) {
        self.set_auto_playing(!self.is_auto_playing);
    }

    pub fn hover_enter(&mut self) {
        self.set_auto_playing(false);
    }

    pub fn hover_leave(&mut self) {
        self.set_auto_playing(true);
    }

    /// Handles Left/Right/Space. Returns true when the key was consumed, in
    /// which case no other component should act on it.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.len == 0 {
            return false;
        }
        match code {
            KeyCode::Left => self.prev(),
            KeyCode::Right => self.next(),
            KeyCode::Char(' ') => {
                self.toggle_auto_playing();
                true
            }
            _ => false,
        }
    }

    /// Waits for the next timer tick; never resolves while stopped.
    pub async fn next_tick(&mut self) -> Tick {
        match self.timers.as_mut() {
            Some(timers) => timers.next().await,
            None => std::future::pending().await,
        }
    }

    pub fn apply_tick(&mut self, tick: Tick) {
        match tick {
            Tick::Progress => {
                self.progress = if self.progress >= PROGRESS_MAX {
                    0
                } else {
                    (self.progress + PROGRESS_STEP).min(PROGRESS_MAX)
                };
            }
            Tick::Slide => {
                if self.len > 0 {
                    self.current_slide = (self.current_slide + 1) % self.len;
                }
                self.progress = 0;
            }
        }
    }

    /// Back to the freshly mounted state: no slides, first index, autoplay on.
    pub fn reset(&mut self) {
        self.timers = None;
        self.current_slide = 0;
        self.progress = 0;
        self.len = 0;
        self.is_auto_playing = true;
    }

    /// Cancels both timers. Used on teardown; dropping the controller does the same.
    pub fn stop(&mut self) {
        self.timers = None;
    }

    /// Drops the running pair before creating a new one, so at most one pair ever exists.
    fn restart(&mut self) {
        self.timers = None;
        if self.is_auto_playing && self.len > 0 {
            self.progress = 0;
            self.timers = Some(AutoplayTimers::start());
        }
    }
}

impl Default for CarouselController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{Duration, Instant, advance};

    async fn step(c: &mut CarouselController) -> Tick {
        let tick = c.next_tick().await;
        c.apply_tick(tick);
        tick
    }

    #[tokio::test(start_paused = true)]
    async fn fifty_progress_ticks_then_one_slide_advance() {
        let mut c = CarouselController::new();
        let started = Instant::now();
        c.set_len(3);

        for i in 1..=50u8 {
            assert_eq!(step(&mut c).await, Tick::Progress);
            assert_eq!(c.progress(), i * 2);
            assert_eq!(c.current_slide(), 0);
        }
        assert_eq!(step(&mut c).await, Tick::Slide);
        assert_eq!(c.current_slide(), 1);
        assert_eq!(c.progress(), 0);
        assert_eq!(started.elapsed(), Duration::from_millis(5000));

        assert_eq!(step(&mut c).await, Tick::Progress);
        assert_eq!(c.progress(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn go_to_slide_resets_progress_and_window() {
        let mut c = CarouselController::new();
        c.set_len(5);
        for _ in 0..30 {
            step(&mut c).await;
        }
        assert_eq!(c.progress(), 60);

        let jumped_at = Instant::now();
        assert!(c.go_to_slide(3));
        assert_eq!(c.progress(), 0);
        assert_eq!(step(&mut c).await, Tick::Progress);
        assert_eq!(c.progress(), 2);

        loop {
            if step(&mut c).await == Tick::Slide {
                break;
            }
        }
        assert_eq!(jumped_at.elapsed(), Duration::from_millis(5000));
        assert_eq!(c.current_slide(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn paused_carousel_never_ticks() {
        let mut c = CarouselController::new();
        c.set_len(2);
        c.hover_enter();
        assert!(!c.is_auto_playing());
        assert!(!c.has_timers());
        let waited = tokio::time::timeout(Duration::from_secs(60), c.next_tick()).await;
        assert!(waited.is_err());
        assert_eq!(c.current_slide(), 0);

        c.hover_leave();
        assert!(c.has_timers());
        assert_eq!(step(&mut c).await, Tick::Progress);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_timers() {
        let mut c = CarouselController::new();
        c.set_len(4);
        advance(Duration::from_millis(250)).await;
        c.stop();
        assert!(!c.has_timers());
        assert!(tokio::time::timeout(Duration::from_secs(10), c.next_tick()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn empty_list_starts_nothing() {
        let mut c = CarouselController::new();
        c.set_len(0);
        assert!(!c.has_timers());
        assert!(!c.handle_key(KeyCode::Right));
        assert!(!c.next());
    }

    #[tokio::test(start_paused = true)]
    async fn arrow_keys_wrap() {
        let mut c = CarouselController::new();
        c.set_len(5);
        assert!(c.go_to_slide(4));
        assert!(c.handle_key(KeyCode::Right));
        assert_eq!(c.current_slide(), 0);
        assert!(c.handle_key(KeyCode::Left));
        assert_eq!(c.current_slide(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn space_toggles_autoplay_and_is_consumed() {
        let mut c = CarouselController::new();
        c.set_len(2);
        assert!(c.handle_key(KeyCode::Char(' ')));
        assert!(!c.is_auto_playing());
        assert!(!c.has_timers());
        assert!(c.handle_key(KeyCode::Char(' ')));
        assert!(c.is_auto_playing());
        assert!(c.has_timers());
        assert!(!c.handle_key(KeyCode::Char('x')));
    }

    #[tokio::test(start_paused = true)]
    async fn shrinking_list_clamps_index() {
        let mut c = CarouselController::new();
        c.set_len(5);
        c.go_to_slide(4);
        c.set_len(1);
        assert_eq!(c.current_slide(), 0);
        assert!(!c.go_to_slide(1));
    }

    #[tokio::test(start_paused = true)]
    async fn count_change_restarts_window() {
        let mut c = CarouselController::new();
        c.set_len(3);
        for _ in 0..30 {
            step(&mut c).await;
        }
        assert_eq!(c.progress(), 60);

        let changed_at = Instant::now();
        c.set_len(4);
        assert_eq!(c.progress(), 0);
        loop {
            if step(&mut c).await == Tick::Slide {
                break;
            }
        }
        assert_eq!(changed_at.elapsed(), Duration::from_millis(5000));
        assert_eq!(c.current_slide(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_turns_autoplay_back_on() {
        let mut c = CarouselController::new();
        c.set_len(3);
        c.go_to_slide(2);
        c.toggle_auto_playing();
        c.reset();
        assert!(c.is_auto_playing());
        assert_eq!(c.current_slide(), 0);
        assert_eq!(c.len(), 0);
        assert!(!c.has_timers());

        c.set_len(2);
        assert!(c.has_timers());
    }

    #[test]
    fn progress_wraps_at_hundred() {
        let mut c = CarouselController::new();
        c.len = 1;
        c.progress = 100;
        c.apply_tick(Tick::Progress);
        assert_eq!(c.progress(), 0);
    }
}
