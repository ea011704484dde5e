use super::services::{
    RandomSource, SlideRenderer, TimerScheduler, clamp_index, max_index, random_delay,
    random_direction, scroll_offset,
};
use super::value_objects::{
    CarouselOptions, ControllerPhase, IntervalPolicy, Measurements, SlideChange, SlideLayout,
    TimerId, TimerKind, visible_count_for_width,
};
use crate::domain::logging::LogComponent;
use crate::{log_debug, log_trace};

const COMPONENT: LogComponent = LogComponent::Domain("SlideController");

/// Everything a controller talks to outside itself.
pub struct ControllerPorts<S, R> {
    pub scheduler: S,
    pub renderer: R,
    pub random: Box<dyn RandomSource>,
}

impl<S, R> ControllerPorts<S, R> {
    pub fn new(scheduler: S, renderer: R, random: Box<dyn RandomSource>) -> Self {
        Self { scheduler, renderer, random }
    }
}

/// Index state, timers and hover pause for one track of slides.
///
/// A single type serves every carousel-like widget; [`SlideLayout`] decides
/// whether it moves cards, swaps stacked panels or scrolls continuously.
/// The controller never touches the DOM or the clock itself: it asks its
/// [`TimerScheduler`] for callbacks and is driven through
/// [`SlideController::handle_timer`] when they fire.
pub struct SlideController<S: TimerScheduler, R: SlideRenderer> {
    options: CarouselOptions,
    slide_count: usize,
    /// `-1` only between the wrap reset and the following `go_to(0)`.
    current_index: isize,
    visible_count: usize,
    measurements: Measurements,
    paused: bool,
    static_mode: bool,
    advance_timer: Option<TimerId>,
    settle_timer: Option<TimerId>,
    frame_timer: Option<TimerId>,
    frames: u64,
    scheduler: S,
    renderer: R,
    random: Box<dyn RandomSource>,
}

impl<S: TimerScheduler, R: SlideRenderer> SlideController<S, R> {
    /// Build a controller and show the first slide. Returns `None` for an
    /// empty track, leaving the widget inactive.
    pub fn initialize(
        slide_count: usize,
        options: CarouselOptions,
        measurements: Measurements,
        prefers_reduced_motion: bool,
        ports: ControllerPorts<S, R>,
    ) -> Option<Self> {
        if slide_count < 1 {
            log_debug!(COMPONENT, "empty {} track, staying inactive", options.layout);
            return None;
        }

        let static_mode = options.respect_reduced_motion && prefers_reduced_motion;
        let visible_count = Self::visible_for(options.layout, measurements.container_width);
        let mut controller = Self {
            options,
            slide_count,
            current_index: 0,
            visible_count,
            measurements,
            paused: false,
            static_mode,
            advance_timer: None,
            settle_timer: None,
            frame_timer: None,
            frames: 0,
            scheduler: ports.scheduler,
            renderer: ports.renderer,
            random: ports.random,
        };

        if controller.options.layout == SlideLayout::Continuous {
            controller.renderer.scroll_to(0.0);
        } else {
            let change = controller.change(0, 0, None, false);
            controller.renderer.show(&change);
        }
        controller.arm(controller.options.interval.initial_delay());

        log_debug!(
            COMPONENT,
            "{} controller ready: {} slides, {} visible, static={}",
            controller.options.layout,
            slide_count,
            visible_count,
            static_mode
        );
        Some(controller)
    }

    fn visible_for(layout: SlideLayout, width: f64) -> usize {
        match layout {
            SlideLayout::Track => visible_count_for_width(width),
            SlideLayout::Stacked | SlideLayout::Continuous => 1,
        }
    }

    /// Jump to `target`, clamped to the reachable range, with a transition.
    pub fn go_to(&mut self, target: isize) {
        let previous = self.current_index.max(0) as usize;
        self.move_to(target, previous, true, false);
    }

    /// Step forward, jumping back to 0 once the last position is showing.
    pub fn advance(&mut self) {
        if self.options.layout == SlideLayout::Continuous {
            return;
        }
        let previous = self.current_index.max(0) as usize;
        if self.current_index + self.visible_count as isize >= self.slide_count as isize {
            self.current_index = -1;
            log_trace!(COMPONENT, "wrap from {} to start", previous);
            self.move_to(0, previous, true, true);
        } else {
            self.move_to(self.current_index + 1, previous, true, false);
        }
    }

    /// "Next" button: no wrap, restarts the auto-advance countdown.
    pub fn next(&mut self) {
        self.go_to(self.current_index + 1);
        self.restart();
    }

    /// "Previous" button: no wrap, restarts the auto-advance countdown.
    pub fn prev(&mut self) {
        self.go_to(self.current_index - 1);
        self.restart();
    }

    pub fn pause(&mut self) {
        self.paused = true;
        self.cancel_advance();
        if let Some(id) = self.frame_timer.take() {
            self.scheduler.cancel(id);
        }
    }

    pub fn resume(&mut self) {
        self.paused = false;
        self.arm(self.options.interval.initial_delay());
    }

    /// Re-measure after a viewport change and re-clamp without animating.
    pub fn on_resize(&mut self, measurements: Measurements) {
        self.measurements = measurements;
        match self.options.layout {
            SlideLayout::Continuous => {
                let offset = self.offset_px();
                self.renderer.scroll_to(offset);
            }
            layout => {
                self.visible_count = Self::visible_for(layout, measurements.container_width);
                let current = self.current_index.max(0);
                self.move_to(current, current as usize, false, false);
            }
        }
    }

    /// Dispatch a fired timer. Ids the controller no longer tracks are ignored.
    pub fn handle_timer(&mut self, id: TimerId) {
        if self.advance_timer == Some(id) {
            self.advance_timer = None;
            if self.paused {
                return;
            }
            self.advance();
            let delay = self.next_delay();
            self.arm(delay);
        } else if self.settle_timer == Some(id) {
            self.settle_timer = None;
            self.renderer.settle();
        } else if self.frame_timer == Some(id) {
            self.frame_timer = None;
            if self.paused || self.static_mode {
                return;
            }
            self.frames += 1;
            let offset = self.offset_px();
            self.renderer.scroll_to(offset);
            self.frame_timer = Some(self.scheduler.schedule(TimerKind::Frame, 0));
        } else {
            log_trace!(COMPONENT, "ignoring stale {}", id);
        }
    }

    fn move_to(&mut self, target: isize, previous: usize, animate: bool, wrapped: bool) {
        if self.options.layout == SlideLayout::Continuous {
            return;
        }
        let index = clamp_index(target, self.slide_count, self.visible_count);
        self.current_index = index as isize;

        let transition = if animate && !self.static_mode {
            let ms = match self.options.layout {
                SlideLayout::Stacked => self.options.duration_ms,
                _ => self.options.speed_ms,
            };
            (ms > 0).then_some(ms)
        } else {
            None
        };

        let change = self.change(index, previous, transition, wrapped);
        self.renderer.show(&change);

        if let Some(ms) = transition {
            if let Some(id) = self.settle_timer.take() {
                self.scheduler.cancel(id);
            }
            self.settle_timer = Some(self.scheduler.schedule(TimerKind::Settle, ms));
        }
    }

    fn change(&mut self, index: usize, previous: usize, transition_ms: Option<u32>, wrapped: bool) -> SlideChange {
        let direction = match (self.options.layout, self.options.interval, transition_ms) {
            (SlideLayout::Stacked, IntervalPolicy::Randomized { .. }, Some(_)) => {
                Some(random_direction(self.random.next_unit()))
            }
            _ => None,
        };
        SlideChange {
            index,
            previous,
            visible_count: self.visible_count,
            transition_ms,
            wrapped,
            direction,
        }
    }

    fn next_delay(&mut self) -> u32 {
        match self.options.interval {
            IntervalPolicy::Fixed(ms) => ms,
            IntervalPolicy::Randomized { min_ms, max_ms } => {
                random_delay(min_ms, max_ms, self.random.next_unit())
            }
        }
    }

    /// Schedule the next auto step unless paused, static or pointless.
    fn arm(&mut self, delay_ms: u32) {
        if self.paused || self.static_mode {
            return;
        }
        if self.options.layout == SlideLayout::Continuous {
            if self.frame_timer.is_none() {
                self.frame_timer = Some(self.scheduler.schedule(TimerKind::Frame, 0));
            }
            return;
        }
        if !self.options.auto_advance || self.slide_count <= 1 {
            return;
        }
        self.cancel_advance();
        self.advance_timer = Some(self.scheduler.schedule(TimerKind::Advance, delay_ms));
    }

    fn restart(&mut self) {
        self.arm(self.options.interval.initial_delay());
    }

    fn cancel_advance(&mut self) {
        if let Some(id) = self.advance_timer.take() {
            self.scheduler.cancel(id);
        }
    }

    pub fn current_index(&self) -> isize {
        self.current_index
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn max_index(&self) -> usize {
        max_index(self.slide_count, self.visible_count)
    }

    pub fn options(&self) -> &CarouselOptions {
        &self.options
    }

    pub fn phase(&self) -> ControllerPhase {
        if self.paused {
            ControllerPhase::Paused
        } else if self.settle_timer.is_some() {
            ControllerPhase::Advancing
        } else {
            ControllerPhase::Idle
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Reduced motion was requested and honoured.
    pub fn is_static(&self) -> bool {
        self.static_mode
    }

    pub fn has_pending_advance(&self) -> bool {
        self.advance_timer.is_some()
    }

    pub fn has_pending_frame(&self) -> bool {
        self.frame_timer.is_some()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Current continuous scroll offset in px.
    pub fn offset_px(&self) -> f64 {
        scroll_offset(self.frames, self.options.frame_delta_px, self.measurements.scroll_extent)
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}
