mod common;

use common::controller_with;
use storefront_widgets::domain::carousel::{
    CarouselOptions, EnterDirection, IntervalPolicy, Measurements, SlideLayout, TimerKind,
};
use storefront_widgets::infrastructure::run_for;
use wasm_bindgen_test::*;

fn rotator(samples: &[f64]) -> common::TestController {
    let options = CarouselOptions::new(SlideLayout::Stacked).with_randomized_interval();
    controller_with(3, options, Measurements::with_width(900.0), false, samples).expect("non-empty")
}

fn scroller(delta: f64, extent: f64) -> common::TestController {
    let mut options = CarouselOptions::new(SlideLayout::Continuous);
    options.frame_delta_px = delta;
    let measurements = Measurements { container_width: 800.0, scroll_extent: extent };
    controller_with(6, options, measurements, false, &[0.5]).expect("non-empty")
}

fn advance_due(carousel: &common::TestController) -> Option<u64> {
    carousel
        .scheduler()
        .pending()
        .find(|(_, timer)| timer.kind == TimerKind::Advance)
        .map(|(_, timer)| timer.due_ms)
}

#[wasm_bindgen_test]
fn rotator_defaults_to_randomized_interval() {
    let carousel = rotator(&[0.5]);
    assert_eq!(
        carousel.options().interval,
        IntervalPolicy::Randomized { min_ms: 5200, max_ms: 9000 }
    );
    assert_eq!(advance_due(&carousel), Some(5200));
}

#[wasm_bindgen_test]
fn rotator_draws_direction_then_next_delay() {
    let mut carousel = rotator(&[0.2, 0.5, 0.9, 0.0]);

    run_for(&mut carousel, 5200);
    let change = carousel.renderer().last();
    assert_eq!(change.index, 1);
    assert_eq!(change.direction, Some(EnterDirection::Left));
    assert_eq!(change.transition_ms, Some(700));
    assert_eq!(advance_due(&carousel), Some(5200 + 7100));

    run_for(&mut carousel, 7100);
    let change = carousel.renderer().last();
    assert_eq!(change.index, 2);
    assert_eq!(change.direction, Some(EnterDirection::Right));
    assert_eq!(advance_due(&carousel), Some(12_300 + 5200));
}

#[wasm_bindgen_test]
fn rotator_attributes_set_custom_range() {
    let options = CarouselOptions::from_attributes(SlideLayout::Stacked, |key| match key {
        "interval-min" => Some("1000".to_string()),
        "interval-max" => Some("2000".to_string()),
        "duration" => Some("300".to_string()),
        _ => None,
    });
    let mut carousel = controller_with(3, options, Measurements::default(), false, &[0.5]).expect("non-empty");

    run_for(&mut carousel, 1000);

    assert_eq!(carousel.current_index(), 1);
    assert_eq!(carousel.renderer().last().transition_ms, Some(300));
    assert_eq!(advance_due(&carousel), Some(1000 + 1500));
}

#[wasm_bindgen_test]
fn fixed_stack_has_no_enter_direction() {
    let options = CarouselOptions::new(SlideLayout::Stacked);
    let mut carousel = controller_with(3, options, Measurements::default(), false, &[0.1]).expect("non-empty");

    run_for(&mut carousel, 3500);

    assert_eq!(carousel.current_index(), 1);
    assert_eq!(carousel.renderer().last().direction, None);
}

#[wasm_bindgen_test]
fn continuous_track_scrolls_one_delta_per_frame() {
    let mut marquee = scroller(1.0, 100.0);
    assert_eq!(marquee.renderer().offsets, vec![0.0]);
    assert!(marquee.has_pending_frame());

    run_for(&mut marquee, 16 * 10);

    assert_eq!(marquee.frames(), 10);
    assert_eq!(marquee.renderer().offsets.last(), Some(&10.0));
    assert!(!marquee.has_pending_advance());
}

#[wasm_bindgen_test]
fn continuous_track_wraps_at_extent() {
    let mut strip = scroller(-0.5, 10.0);

    run_for(&mut strip, 16 * 23);

    assert_eq!(strip.frames(), 23);
    assert_eq!(strip.offset_px(), -1.5);
}

#[wasm_bindgen_test]
fn continuous_pause_and_resume() {
    let mut marquee = scroller(1.0, 100.0);
    run_for(&mut marquee, 16 * 5);

    marquee.pause();
    assert!(!marquee.has_pending_frame());
    run_for(&mut marquee, 1000);
    assert_eq!(marquee.frames(), 5);

    marquee.resume();
    marquee.resume();
    assert_eq!(marquee.scheduler().pending_count(TimerKind::Frame), 1);
    run_for(&mut marquee, 16);
    assert_eq!(marquee.frames(), 6);
}

#[wasm_bindgen_test]
fn continuous_track_ignores_discrete_navigation() {
    let mut marquee = scroller(1.0, 100.0);

    marquee.advance();
    marquee.go_to(3);

    assert_eq!(marquee.current_index(), 0);
    assert!(marquee.renderer().changes.is_empty());
}

#[wasm_bindgen_test]
fn continuous_resize_keeps_offset_in_new_extent() {
    let mut marquee = scroller(1.0, 100.0);
    run_for(&mut marquee, 16 * 30);

    marquee.on_resize(Measurements { container_width: 400.0, scroll_extent: 25.0 });

    assert_eq!(marquee.renderer().offsets.last(), Some(&5.0));
}

#[wasm_bindgen_test]
fn continuous_track_stays_still_with_reduced_motion() {
    let measurements = Measurements { container_width: 800.0, scroll_extent: 100.0 };
    let mut marquee =
        controller_with(6, CarouselOptions::new(SlideLayout::Continuous), measurements, true, &[0.5])
            .expect("non-empty");

    run_for(&mut marquee, 1000);

    assert_eq!(marquee.frames(), 0);
    assert!(!marquee.has_pending_frame());
}
