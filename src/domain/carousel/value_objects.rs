use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

/// Width thresholds (px) mapped to how many cards fit side by side.
pub const BREAKPOINTS: [(f64, usize); 3] = [(1200.0, 4), (992.0, 3), (640.0, 2)];

pub const DEFAULT_SPEED_MS: u32 = 450;
pub const DEFAULT_INTERVAL_MS: u32 = 3500;
pub const DEFAULT_INTERVAL_MIN_MS: u32 = 5200;
pub const DEFAULT_INTERVAL_MAX_MS: u32 = 9000;
pub const DEFAULT_DURATION_MS: u32 = 700;
/// Gap between cards in the product track template.
pub const DEFAULT_CARD_GAP_PX: f64 = 24.0;
pub const DEFAULT_FRAME_DELTA_PX: f64 = 1.0;

/// Number of cards visible for a container width.
pub fn visible_count_for_width(width: f64) -> usize {
    BREAKPOINTS
        .iter()
        .find(|(min_width, _)| width >= *min_width)
        .map(|(_, count)| *count)
        .unwrap_or(1)
}

/// Opaque handle to a scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, From, Into, Display)]
#[display(fmt = "timer#{}", _0)]
pub struct TimerId(u64);

impl TimerId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// What a scheduled callback is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TimerKind {
    #[display(fmt = "advance")]
    Advance,
    #[display(fmt = "settle")]
    Settle,
    #[display(fmt = "frame")]
    Frame,
}

/// How slides are laid out, which decides how an index becomes pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, AsRefStr, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlideLayout {
    /// Fixed-width cards translated along a track; several visible at once.
    #[display(fmt = "track")]
    #[strum(serialize = "track")]
    Track,
    /// Full panels stacked on top of each other; one visible at a time.
    #[display(fmt = "stacked")]
    #[strum(serialize = "stacked")]
    Stacked,
    /// No index at all, a pixel offset scrolled every animation frame.
    #[display(fmt = "continuous")]
    #[strum(serialize = "continuous")]
    Continuous,
}

/// Side a rotator panel enters from. Cosmetic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, AsRefStr, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnterDirection {
    #[display(fmt = "left")]
    #[strum(serialize = "left")]
    Left,
    #[display(fmt = "right")]
    #[strum(serialize = "right")]
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntervalPolicy {
    Fixed(u32),
    /// Next delay drawn from `[min_ms, max_ms)` after every advance.
    Randomized { min_ms: u32, max_ms: u32 },
}

impl IntervalPolicy {
    /// Delay before the first auto-advance after mounting or resuming.
    pub fn initial_delay(&self) -> u32 {
        match *self {
            IntervalPolicy::Fixed(ms) => ms,
            IntervalPolicy::Randomized { min_ms, .. } => min_ms,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ControllerPhase {
    #[display(fmt = "idle")]
    Idle,
    #[display(fmt = "advancing")]
    Advancing,
    #[display(fmt = "paused")]
    Paused,
}

/// Geometry read from the DOM whenever the controller needs it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Measurements {
    /// Client width of the widget root.
    pub container_width: f64,
    /// Distance a continuous track scrolls before wrapping to 0.
    pub scroll_extent: f64,
}

impl Measurements {
    pub fn with_width(container_width: f64) -> Self {
        Self { container_width, scroll_extent: 0.0 }
    }
}

/// Typed view of the data attributes on a widget root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselOptions {
    pub layout: SlideLayout,
    pub speed_ms: u32,
    pub interval: IntervalPolicy,
    pub auto_advance: bool,
    pub respect_reduced_motion: bool,
    /// Transition length of the stacked rotator panels.
    pub duration_ms: u32,
    /// Signed pixels per animation frame for the continuous layout.
    pub frame_delta_px: f64,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            layout: SlideLayout::Track,
            speed_ms: DEFAULT_SPEED_MS,
            interval: IntervalPolicy::Fixed(DEFAULT_INTERVAL_MS),
            auto_advance: true,
            respect_reduced_motion: true,
            duration_ms: DEFAULT_DURATION_MS,
            frame_delta_px: DEFAULT_FRAME_DELTA_PX,
        }
    }
}

impl CarouselOptions {
    pub fn new(layout: SlideLayout) -> Self {
        Self { layout, ..Default::default() }
    }

    /// Parse `data-*` attributes. `lookup` receives the attribute suffix
    /// (`"speed"`, `"interval-min"`, ...). Unparseable numbers keep the default.
    pub fn from_attributes(layout: SlideLayout, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let ms = |key: &str, default: u32| -> u32 {
            lookup(key).and_then(|raw| parse_ms(&raw)).unwrap_or(default)
        };

        let min_ms = lookup("interval-min").and_then(|raw| parse_ms(&raw));
        let max_ms = lookup("interval-max").and_then(|raw| parse_ms(&raw));
        let interval = match (min_ms, max_ms) {
            (None, None) => IntervalPolicy::Fixed(ms("interval", DEFAULT_INTERVAL_MS)),
            (min_ms, max_ms) => randomized(min_ms, max_ms),
        };

        Self {
            layout,
            speed_ms: ms("speed", DEFAULT_SPEED_MS),
            interval,
            auto_advance: lookup("auto").as_deref() != Some("false"),
            respect_reduced_motion: lookup("reduced-motion").as_deref() != Some("ignore"),
            duration_ms: ms("duration", DEFAULT_DURATION_MS),
            frame_delta_px: lookup("delta")
                .and_then(|raw| raw.trim().parse::<f64>().ok())
                .filter(|delta| delta.is_finite())
                .unwrap_or(DEFAULT_FRAME_DELTA_PX),
        }
    }

    /// Rotator panels always draw their delay from a range, defaulting to
    /// 5.2s..9s when the markup sets none.
    pub fn with_randomized_interval(mut self) -> Self {
        if let IntervalPolicy::Fixed(_) = self.interval {
            self.interval = randomized(None, None);
        }
        self
    }
}

fn randomized(min_ms: Option<u32>, max_ms: Option<u32>) -> IntervalPolicy {
    let min_ms = min_ms.unwrap_or(DEFAULT_INTERVAL_MIN_MS);
    let max_ms = max_ms.unwrap_or(DEFAULT_INTERVAL_MAX_MS).max(min_ms);
    IntervalPolicy::Randomized { min_ms, max_ms }
}

/// Leading-integer parse of a millisecond attribute.
pub fn parse_ms(raw: &str) -> Option<u32> {
    let digits: String = raw.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// One index change handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlideChange {
    pub index: usize,
    pub previous: usize,
    pub visible_count: usize,
    /// Transition length, `None` for an instant jump.
    pub transition_ms: Option<u32>,
    /// Set when the change is the jump back to 0 after the last position.
    pub wrapped: bool,
    pub direction: Option<EnterDirection>,
}
