#![allow(dead_code)]

use storefront_widgets::domain::carousel::{
    CarouselOptions, ControllerPorts, Measurements, RandomSource, SlideChange, SlideController,
    SlideRenderer,
};
use storefront_widgets::domain::ribbon::RibbonSurface;
use storefront_widgets::infrastructure::VirtualScheduler;

/// Remembers everything the controller asked it to draw.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub changes: Vec<SlideChange>,
    pub offsets: Vec<f64>,
    pub settles: usize,
}

impl RecordingRenderer {
    pub fn shown_indices(&self) -> Vec<usize> {
        self.changes.iter().map(|change| change.index).collect()
    }

    pub fn last(&self) -> &SlideChange {
        self.changes.last().expect("at least one slide shown")
    }
}

impl SlideRenderer for RecordingRenderer {
    fn show(&mut self, change: &SlideChange) {
        self.changes.push(change.clone());
    }

    fn settle(&mut self) {
        self.settles += 1;
    }

    fn scroll_to(&mut self, offset_px: f64) {
        self.offsets.push(offset_px);
    }
}

/// Replays a fixed list of samples, cycling when exhausted.
pub struct ScriptedRandom {
    samples: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(samples: &[f64]) -> Self {
        Self { samples: samples.to_vec(), cursor: 0 }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        let sample = self.samples[self.cursor % self.samples.len()];
        self.cursor += 1;
        sample
    }
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub events: Vec<(&'static str, bool)>,
}

impl RibbonSurface for RecordingSurface {
    fn set_entering(&mut self, on: bool) {
        self.events.push(("entering", on));
    }

    fn set_pulsing(&mut self, on: bool) {
        self.events.push(("pulsing", on));
    }
}

pub type TestController = SlideController<VirtualScheduler, RecordingRenderer>;

pub fn controller_with(
    slide_count: usize,
    options: CarouselOptions,
    measurements: Measurements,
    reduced_motion: bool,
    samples: &[f64],
) -> Option<TestController> {
    let ports = ControllerPorts::new(
        VirtualScheduler::new(),
        RecordingRenderer::default(),
        Box::new(ScriptedRandom::new(samples)),
    );
    SlideController::initialize(slide_count, options, measurements, reduced_motion, ports)
}

/// Track carousel of `slide_count` cards in a container `width` px wide.
pub fn track(slide_count: usize, width: f64) -> TestController {
    controller_with(slide_count, CarouselOptions::default(), Measurements::with_width(width), false, &[0.5])
        .expect("non-empty track")
}
