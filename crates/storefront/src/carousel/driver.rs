//! Tokio driver for carousel autoplay.

use std::future;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{self, Instant};
use tracing::{debug, info};

use super::{Carousel, SuspendReason};

/// Capacity of the event channel returned by [`AutoplayDriver::new`].
const EVENT_BUFFER: usize = 32;

/// User interaction with the carousel.
#[derive(Debug, Clone, PartialEq)]
pub enum CarouselEvent {
    Next,
    Prev,
    /// Dot `i` was activated.
    GoTo(isize),
    /// A key was pressed while the page had focus.
    Key(String),
    Suspend(SuspendReason),
    Resume(SuspendReason),
    TouchStart(f64),
    TouchEnd(f64),
}

/// Runs a [`Carousel`] against the tokio clock.
///
/// Events come in on an `mpsc` channel and the active slide index goes out
/// on a `watch` channel. The driver stops once every event sender is dropped.
pub struct AutoplayDriver {
    carousel: Carousel,
    events: mpsc::Receiver<CarouselEvent>,
    index: watch::Sender<usize>,
}

impl AutoplayDriver {
    /// Wrap `carousel`, returning the driver, an event sender and an index
    /// receiver.
    #[must_use]
    pub fn new(
        carousel: Carousel,
    ) -> (Self, mpsc::Sender<CarouselEvent>, watch::Receiver<usize>) {
        let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);
        let (index_tx, index_rx) = watch::channel(carousel.index());
        let driver = Self {
            carousel,
            events: event_rx,
            index: index_tx,
        };
        (driver, event_tx, index_rx)
    }

    /// Run until the event channel closes, then hand the carousel back.
    pub async fn run(mut self) -> Carousel {
        info!(
            slides = self.carousel.slide_count(),
            interval_ms = self.carousel.config().autoplay_interval.as_millis(),
            "Carousel autoplay started"
        );

        loop {
            let wait = self.carousel.remaining();
            let started = Instant::now();

            tokio::select! {
                event = self.events.recv() => {
                    let Some(event) = event else {
                        break;
                    };
                    self.carousel.advance(started.elapsed());
                    self.apply(event);
                }
                () = sleep_for(wait) => {
                    if let Some(wait) = wait {
                        self.carousel.advance(wait);
                    }
                }
            }

            self.publish();
        }

        info!(index = self.carousel.index(), "Carousel autoplay stopped");
        self.carousel
    }

    fn apply(&mut self, event: CarouselEvent) {
        debug!(?event, "Carousel event");
        match event {
            CarouselEvent::Next => {
                self.carousel.next();
            }
            CarouselEvent::Prev => {
                self.carousel.prev();
            }
            CarouselEvent::GoTo(i) => {
                self.carousel.go_to(i);
            }
            CarouselEvent::Key(key) => {
                self.carousel.on_key(&key);
            }
            CarouselEvent::Suspend(reason) => self.carousel.suspend(reason),
            CarouselEvent::Resume(reason) => self.carousel.resume(reason),
            CarouselEvent::TouchStart(x) => self.carousel.touch_start(x),
            CarouselEvent::TouchEnd(x) => {
                self.carousel.touch_end(x);
            }
        }
    }

    fn publish(&self) {
        let index = self.carousel.index();
        self.index.send_if_modified(|current| {
            if *current == index {
                false
            } else {
                *current = index;
                true
            }
        });
    }
}

/// Sleep for `wait`, or forever when there is no timer.
async fn sleep_for(wait: Option<Duration>) {
    match wait {
        Some(wait) => time::sleep(wait).await,
        None => future::pending().await,
    }
}
