//! Slide carousel with autoplay.
//!
//! [`Carousel`] is a pure state machine: it holds the active slide and the
//! autoplay state, and is driven by navigation calls plus [`Carousel::advance`]
//! for elapsed time. [`AutoplayDriver`] runs it against the tokio clock.
//!
//! Autoplay is either `Running`, with time accumulated towards the next
//! automatic step, or `Suspended` while the pointer hovers, focus is inside
//! the carousel or a touch is in progress. Each reason is tracked on its own;
//! autoplay resumes with a fresh timer once the last one ends. Manual
//! navigation restarts the timer.

mod driver;

pub use driver::{AutoplayDriver, CarouselEvent};

use std::time::Duration;

use tracing::{debug, info};

/// Transition easing for the slide track.
pub const EASING: &str = "cubic-bezier(.22,.9,.28,1)";

/// Carousel timings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselConfig {
    /// Delay between automatic steps.
    pub autoplay_interval: Duration,
    /// Duration of the slide transition.
    pub transition: Duration,
    /// Minimum horizontal drag, in pixels, that counts as a swipe.
    pub swipe_threshold_px: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay_interval: Duration::from_millis(4500),
            transition: Duration::from_millis(600),
            swipe_threshold_px: 40.0,
        }
    }
}

/// Why autoplay is paused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuspendReason {
    /// Pointer over the carousel.
    Hover,
    /// Keyboard focus inside the carousel.
    Focus,
    /// A touch is in progress on the track.
    Touch,
}

/// The set of active suspend reasons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuspendReasons {
    hover: bool,
    focus: bool,
    touch: bool,
}

impl SuspendReasons {
    /// A set holding only `reason`.
    #[must_use]
    pub fn only(reason: SuspendReason) -> Self {
        let mut reasons = Self::default();
        reasons.insert(reason);
        reasons
    }

    const fn flag(&mut self, reason: SuspendReason) -> &mut bool {
        match reason {
            SuspendReason::Hover => &mut self.hover,
            SuspendReason::Focus => &mut self.focus,
            SuspendReason::Touch => &mut self.touch,
        }
    }

    /// Add `reason`.
    pub const fn insert(&mut self, reason: SuspendReason) {
        *self.flag(reason) = true;
    }

    /// Drop `reason`.
    pub const fn remove(&mut self, reason: SuspendReason) {
        *self.flag(reason) = false;
    }

    /// Whether `reason` is active.
    #[must_use]
    pub const fn contains(&self, reason: SuspendReason) -> bool {
        match reason {
            SuspendReason::Hover => self.hover,
            SuspendReason::Focus => self.focus,
            SuspendReason::Touch => self.touch,
        }
    }

    /// Whether no reason is active.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.hover || self.focus || self.touch)
    }
}

/// Autoplay state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Autoplay {
    /// The timer is running; `elapsed` is time since the last step or restart.
    Running { elapsed: Duration },
    /// No timer exists until every reason is gone.
    Suspended { reasons: SuspendReasons },
}

impl Autoplay {
    const fn fresh() -> Self {
        Self::Running {
            elapsed: Duration::ZERO,
        }
    }
}

/// Carousel state machine.
#[derive(Debug, Clone)]
pub struct Carousel {
    slide_count: usize,
    index: usize,
    autoplay: Autoplay,
    config: CarouselConfig,
    touch_start_x: Option<f64>,
}

impl Carousel {
    /// Create a carousel on slide 0 with autoplay running.
    ///
    /// Returns `None` (and logs) when there are no slides.
    #[must_use]
    pub fn new(slide_count: usize, config: CarouselConfig) -> Option<Self> {
        if slide_count == 0 {
            info!("No carousel slides on page, carousel disabled");
            return None;
        }
        info!(slides = slide_count, "Carousel initialized");
        Some(Self {
            slide_count,
            index: 0,
            autoplay: Autoplay::fresh(),
            config,
            touch_start_x: None,
        })
    }

    /// Number of slides.
    #[must_use]
    pub const fn slide_count(&self) -> usize {
        self.slide_count
    }

    /// Active slide index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Current autoplay state.
    #[must_use]
    pub const fn autoplay(&self) -> Autoplay {
        self.autoplay
    }

    /// Carousel timings.
    #[must_use]
    pub const fn config(&self) -> &CarouselConfig {
        &self.config
    }

    // Navigation

    /// Go to slide `i`; below 0 wraps to the last slide, past the end to 0.
    ///
    /// Counts as manual navigation and restarts the autoplay timer.
    pub fn go_to(&mut self, i: isize) -> usize {
        self.set_index(i);
        self.restart_timer();
        self.index
    }

    /// Next slide, wrapping to 0. Restarts the autoplay timer.
    pub fn next(&mut self) -> usize {
        self.step(1);
        self.restart_timer();
        self.index
    }

    /// Previous slide, wrapping to the last. Restarts the autoplay timer.
    pub fn prev(&mut self) -> usize {
        self.step(-1);
        self.restart_timer();
        self.index
    }

    /// Handle a key press; only the arrow keys navigate.
    pub fn on_key(&mut self, key: &str) -> Option<usize> {
        match key {
            "ArrowLeft" => Some(self.prev()),
            "ArrowRight" => Some(self.next()),
            _ => None,
        }
    }

    // Autoplay

    /// Feed elapsed time into the autoplay timer.
    ///
    /// Returns the new index if one or more automatic steps happened.
    pub fn advance(&mut self, dt: Duration) -> Option<usize> {
        let interval = self.config.autoplay_interval;
        let Autoplay::Running { elapsed } = &mut self.autoplay else {
            return None;
        };
        if interval.is_zero() {
            return None;
        }

        *elapsed += dt;
        let mut steps = 0usize;
        while *elapsed >= interval {
            *elapsed -= interval;
            steps += 1;
        }
        if steps == 0 {
            return None;
        }

        let offset = isize::try_from(steps % self.slide_count).unwrap_or(0);
        self.step(offset);
        debug!(index = self.index, "Autoplay step");
        Some(self.index)
    }

    /// Time until the next automatic step, or `None` while suspended.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        match self.autoplay {
            Autoplay::Running { elapsed } => {
                Some(self.config.autoplay_interval.saturating_sub(elapsed))
            }
            Autoplay::Suspended { .. } => None,
        }
    }

    /// Pause autoplay for `reason`.
    pub fn suspend(&mut self, reason: SuspendReason) {
        self.autoplay = match self.autoplay {
            Autoplay::Running { .. } => {
                debug!(?reason, "Autoplay suspended");
                Autoplay::Suspended {
                    reasons: SuspendReasons::only(reason),
                }
            }
            Autoplay::Suspended { mut reasons } => {
                reasons.insert(reason);
                Autoplay::Suspended { reasons }
            }
        };
    }

    /// End `reason`; autoplay restarts from zero once no reason remains.
    pub fn resume(&mut self, reason: SuspendReason) {
        if let Autoplay::Suspended { mut reasons } = self.autoplay {
            reasons.remove(reason);
            self.autoplay = if reasons.is_empty() {
                debug!(?reason, "Autoplay resumed");
                Autoplay::fresh()
            } else {
                Autoplay::Suspended { reasons }
            };
        }
    }

    // Touch

    /// A touch began at horizontal position `x`.
    pub fn touch_start(&mut self, x: f64) {
        self.touch_start_x = Some(x);
        self.suspend(SuspendReason::Touch);
    }

    /// The touch ended at `x`.
    ///
    /// A rightward drag beyond the threshold goes to the previous slide, a
    /// leftward one to the next. Returns the new index if the slide changed.
    pub fn touch_end(&mut self, x: f64) -> Option<usize> {
        let start = self.touch_start_x.take().unwrap_or(x);
        self.resume(SuspendReason::Touch);

        let dx = x - start;
        let threshold = self.config.swipe_threshold_px;
        if dx > threshold {
            Some(self.prev())
        } else if dx < -threshold {
            Some(self.next())
        } else {
            self.restart_timer();
            None
        }
    }

    // View helpers

    /// CSS transform for the slide track.
    #[must_use]
    pub fn track_transform(&self) -> String {
        let offset = i64::try_from(self.index).unwrap_or(0) * -100;
        format!("translateX({offset}%)")
    }

    /// CSS transition for the slide track.
    #[must_use]
    pub fn transition_css(&self) -> String {
        format!(
            "transform {}ms {EASING}",
            self.config.transition.as_millis()
        )
    }

    fn step(&mut self, offset: isize) {
        let target = isize::try_from(self.index)
            .unwrap_or(0)
            .saturating_add(offset);
        self.set_index(target);
    }

    fn set_index(&mut self, i: isize) {
        let last = self.slide_count.saturating_sub(1);
        self.index = match usize::try_from(i) {
            Err(_) => last,
            Ok(i) if i > last => 0,
            Ok(i) => i,
        };
    }

    const fn restart_timer(&mut self) {
        if let Autoplay::Running { elapsed } = &mut self.autoplay {
            *elapsed = Duration::ZERO;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn carousel(slides: usize) -> Carousel {
        Carousel::new(slides, CarouselConfig::default()).unwrap()
    }

    #[test]
    fn test_no_slides_does_not_initialize() {
        assert!(Carousel::new(0, CarouselConfig::default()).is_none());
    }

    #[test]
    fn test_wraparound() {
        let mut c = carousel(3);
        assert_eq!(c.prev(), 2);
        assert_eq!(c.next(), 0);

        assert_eq!(c.go_to(-1), 2);
        assert_eq!(c.next(), 0);
        assert_eq!(c.go_to(3), 0);
        assert_eq!(c.go_to(1), 1);
    }

    #[test]
    fn test_autoplay_steps_every_interval() {
        let mut c = carousel(3);
        assert_eq!(c.advance(Duration::from_millis(4499)), None);
        assert_eq!(c.remaining(), Some(Duration::from_millis(1)));
        assert_eq!(c.advance(Duration::from_millis(1)), Some(1));
        assert_eq!(c.advance(Duration::from_millis(9000)), Some(0));
    }

    #[test]
    fn test_manual_navigation_restarts_timer() {
        let mut c = carousel(3);
        c.advance(Duration::from_millis(4000));
        c.next();
        assert_eq!(c.remaining(), Some(Duration::from_millis(4500)));
        assert_eq!(c.advance(Duration::from_millis(1000)), None);
    }

    #[test]
    fn test_suspend_reasons_are_independent() {
        let mut c = carousel(3);
        c.suspend(SuspendReason::Hover);
        c.suspend(SuspendReason::Focus);
        assert_eq!(c.remaining(), None);
        assert_eq!(c.advance(Duration::from_secs(60)), None);

        c.resume(SuspendReason::Hover);
        assert!(matches!(c.autoplay(), Autoplay::Suspended { reasons } if reasons.contains(SuspendReason::Focus)));

        c.resume(SuspendReason::Focus);
        assert_eq!(c.remaining(), Some(Duration::from_millis(4500)));
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn test_swipe_threshold() {
        let mut c = carousel(3);

        c.touch_start(100.0);
        assert_eq!(c.remaining(), None);
        assert_eq!(c.touch_end(130.0), None);
        assert!(matches!(c.autoplay(), Autoplay::Running { .. }));

        c.touch_start(100.0);
        assert_eq!(c.touch_end(50.0), Some(1));

        c.touch_start(100.0);
        assert_eq!(c.touch_end(150.0), Some(0));
    }

    #[test]
    fn test_arrow_keys() {
        let mut c = carousel(2);
        assert_eq!(c.on_key("ArrowRight"), Some(1));
        assert_eq!(c.on_key("ArrowRight"), Some(0));
        assert_eq!(c.on_key("ArrowLeft"), Some(1));
        assert_eq!(c.on_key("Enter"), None);
    }

    #[test]
    fn test_css() {
        let mut c = carousel(3);
        assert_eq!(c.track_transform(), "translateX(0%)");
        c.go_to(2);
        assert_eq!(c.track_transform(), "translateX(-200%)");
        assert_eq!(
            c.transition_css(),
            "transform 600ms cubic-bezier(.22,.9,.28,1)"
        );
    }
}
