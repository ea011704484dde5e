use super::value_objects::{EnterDirection, SlideChange, TimerId, TimerKind};

/// Deferred-callback port. Implementations call back into the owner with the
/// returned id once the delay (or the next animation frame) has elapsed.
pub trait TimerScheduler {
    /// `delay_ms` is ignored for [`TimerKind::Frame`].
    fn schedule(&mut self, kind: TimerKind, delay_ms: u32) -> TimerId;
    /// Cancelling an unknown or already fired id is a no-op.
    fn cancel(&mut self, id: TimerId);
}

/// Turns controller state into visual state.
pub trait SlideRenderer {
    fn show(&mut self, change: &SlideChange);
    /// Drop transition styling once a transition has run its course.
    fn settle(&mut self);
    fn scroll_to(&mut self, offset_px: f64);
}

/// Source of uniform samples in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

/// Highest reachable index for a track: `max(0, len - visible)`.
pub fn max_index(slide_count: usize, visible_count: usize) -> usize {
    slide_count.saturating_sub(visible_count)
}

/// `clamp(n, 0, max_index)`, accepting the negative targets `prev()` produces.
pub fn clamp_index(target: isize, slide_count: usize, visible_count: usize) -> usize {
    let max = max_index(slide_count, visible_count);
    if target <= 0 { 0 } else { (target as usize).min(max) }
}

/// `min + floor(r * (max - min))`, so the result lies in `[min, max)` (or is
/// exactly `min` when the range is empty).
pub fn random_delay(min_ms: u32, max_ms: u32, sample: f64) -> u32 {
    let span = max_ms.saturating_sub(min_ms);
    if span == 0 {
        return min_ms;
    }
    let offset = (sample.clamp(0.0, 1.0) * span as f64).floor() as u32;
    min_ms + offset.min(span - 1)
}

pub fn random_direction(sample: f64) -> EnterDirection {
    if sample < 0.5 { EnterDirection::Left } else { EnterDirection::Right }
}

/// Offset of a continuously scrolling track after `frames` ticks.
///
/// The track moves `|delta|` px per frame and snaps back to 0 on reaching
/// `extent`; the sign of `delta` gives the direction. Sampling the function
/// rather than accumulating avoids float drift over long sessions.
pub fn scroll_offset(frames: u64, delta_px: f64, extent_px: f64) -> f64 {
    if extent_px <= 0.0 || delta_px == 0.0 || !extent_px.is_finite() || !delta_px.is_finite() {
        return 0.0;
    }
    let travelled = (frames as f64 * delta_px.abs()) % extent_px;
    if delta_px < 0.0 && travelled != 0.0 { -travelled } else { travelled }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_handles_negative_and_overflow() {
        assert_eq!(clamp_index(-1, 5, 2), 0);
        assert_eq!(clamp_index(10, 5, 2), 3);
        assert_eq!(clamp_index(2, 5, 2), 2);
        assert_eq!(clamp_index(1, 3, 4), 0);
    }

    #[test]
    fn random_delay_stays_in_half_open_range() {
        assert_eq!(random_delay(5200, 9000, 0.0), 5200);
        assert_eq!(random_delay(5200, 9000, 0.5), 7100);
        assert_eq!(random_delay(5200, 9000, 0.999_999_9), 8999);
        assert_eq!(random_delay(5200, 9000, 1.0), 8999);
        assert_eq!(random_delay(300, 300, 0.7), 300);
    }

    #[test]
    fn scroll_offset_wraps_at_extent() {
        let offsets: Vec<f64> = (1..=4).map(|f| scroll_offset(f, 1.0, 3.0)).collect();
        assert_eq!(offsets, vec![1.0, 2.0, 0.0, 1.0]);
        assert_eq!(scroll_offset(3, -0.5, 10.0), -1.5);
        assert_eq!(scroll_offset(20, -0.5, 10.0), 0.0);
        assert_eq!(scroll_offset(7, 1.0, 0.0), 0.0);
    }

    #[test]
    fn direction_split_is_even() {
        assert_eq!(random_direction(0.1), EnterDirection::Left);
        assert_eq!(random_direction(0.5), EnterDirection::Right);
    }
}
