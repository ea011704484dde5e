use crate::domain::carousel::{TimerId, TimerKind, TimerScheduler};

pub const ENTRANCE_MS: u32 = 450;
pub const PULSE_MS: u32 = 900;
pub const PULSE_EVERY_MS: u32 = 2400;

pub trait RibbonSurface {
    fn set_entering(&mut self, on: bool);
    fn set_pulsing(&mut self, on: bool);
}

/// Promo ribbon: one entrance, then a short pulse on a fixed period.
pub struct RibbonPulse<S: TimerScheduler, V: RibbonSurface> {
    scheduler: S,
    surface: V,
    entrance: Option<TimerId>,
    pulse_end: Option<TimerId>,
    next_pulse: Option<TimerId>,
    pulses: u32,
}

impl<S: TimerScheduler, V: RibbonSurface> RibbonPulse<S, V> {
    /// With reduced motion the ribbon is left as rendered and nothing is scheduled.
    pub fn start(scheduler: S, surface: V, reduced_motion: bool) -> Self {
        let mut ribbon = Self {
            scheduler,
            surface,
            entrance: None,
            pulse_end: None,
            next_pulse: None,
            pulses: 0,
        };
        if !reduced_motion {
            ribbon.surface.set_entering(true);
            ribbon.entrance = Some(ribbon.scheduler.schedule(TimerKind::Settle, ENTRANCE_MS));
            ribbon.next_pulse = Some(ribbon.scheduler.schedule(TimerKind::Advance, PULSE_EVERY_MS));
        }
        ribbon
    }

    pub fn handle_timer(&mut self, id: TimerId) {
        if self.entrance == Some(id) {
            self.entrance = None;
            self.surface.set_entering(false);
        } else if self.pulse_end == Some(id) {
            self.pulse_end = None;
            self.surface.set_pulsing(false);
        } else if self.next_pulse == Some(id) {
            self.pulses += 1;
            self.surface.set_pulsing(true);
            if let Some(stale) = self.pulse_end.take() {
                self.scheduler.cancel(stale);
            }
            self.pulse_end = Some(self.scheduler.schedule(TimerKind::Settle, PULSE_MS));
            self.next_pulse = Some(self.scheduler.schedule(TimerKind::Advance, PULSE_EVERY_MS));
        }
    }

    pub fn pulses(&self) -> u32 {
        self.pulses
    }

    pub fn is_animated(&self) -> bool {
        self.next_pulse.is_some()
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn surface(&self) -> &V {
        &self.surface
    }
}
