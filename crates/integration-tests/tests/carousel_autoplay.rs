//! Autoplay driver on a paused clock.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use tokio::time::{self, Instant};

use vitrine_storefront::carousel::{
    AutoplayDriver, Carousel, CarouselConfig, CarouselEvent, SuspendReason,
};

fn config(interval_ms: u64) -> CarouselConfig {
    CarouselConfig {
        autoplay_interval: Duration::from_millis(interval_ms),
        ..CarouselConfig::default()
    }
}

#[tokio::test(start_paused = true)]
async fn test_full_cycle_wraps_to_first_slide() {
    let carousel = Carousel::new(3, config(1000)).unwrap();
    let (driver, _events, mut index) = AutoplayDriver::new(carousel);
    tokio::spawn(driver.run());

    let mut seen = Vec::new();
    for _ in 0..3 {
        index.changed().await.unwrap();
        seen.push(*index.borrow_and_update());
    }
    assert_eq!(seen, vec![1, 2, 0]);
}

#[tokio::test(start_paused = true)]
async fn test_focus_and_hover_must_both_end() {
    let carousel = Carousel::new(2, config(1000)).unwrap();
    let (driver, events, mut index) = AutoplayDriver::new(carousel);
    let handle = tokio::spawn(driver.run());

    events
        .send(CarouselEvent::Suspend(SuspendReason::Hover))
        .await
        .unwrap();
    events
        .send(CarouselEvent::Suspend(SuspendReason::Focus))
        .await
        .unwrap();
    events
        .send(CarouselEvent::Resume(SuspendReason::Hover))
        .await
        .unwrap();

    time::sleep(Duration::from_secs(10)).await;
    assert!(!index.has_changed().unwrap());

    events
        .send(CarouselEvent::Resume(SuspendReason::Focus))
        .await
        .unwrap();
    let resumed = Instant::now();
    index.changed().await.unwrap();
    assert_eq!(resumed.elapsed(), Duration::from_secs(1));

    drop(events);
    assert_eq!(handle.await.unwrap().index(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_swipe_navigates_and_restarts_timer() {
    let carousel = Carousel::new(4, config(1000)).unwrap();
    let (driver, events, mut index) = AutoplayDriver::new(carousel);
    tokio::spawn(driver.run());

    time::sleep(Duration::from_millis(900)).await;
    events.send(CarouselEvent::TouchStart(200.0)).await.unwrap();
    events.send(CarouselEvent::TouchEnd(100.0)).await.unwrap();
    index.changed().await.unwrap();
    assert_eq!(*index.borrow_and_update(), 1);

    // The timer restarted at the swipe, so the next step is a full interval away
    let swiped = Instant::now();
    index.changed().await.unwrap();
    assert_eq!(*index.borrow_and_update(), 2);
    assert_eq!(swiped.elapsed(), Duration::from_secs(1));
}
