use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use gloo::render::{AnimationFrame, request_animation_frame};
use gloo_timers::callback::Timeout;

use crate::domain::carousel::{SlideController, SlideRenderer, TimerId, TimerKind, TimerScheduler};
use crate::domain::ribbon::{RibbonPulse, RibbonSurface};

/// Virtual frame length used for [`TimerKind::Frame`] requests.
pub const FRAME_MS: u64 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTimer {
    pub kind: TimerKind,
    pub due_ms: u64,
}

/// Deterministic scheduler on a virtual clock. Nothing fires on its own:
/// callers pull due timers with [`VirtualScheduler::pop_due`] or [`run_for`].
#[derive(Debug, Default)]
pub struct VirtualScheduler {
    now_ms: u64,
    next_id: u64,
    pending: BTreeMap<TimerId, PendingTimer>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn pending_count(&self, kind: TimerKind) -> usize {
        self.pending.values().filter(|timer| timer.kind == kind).count()
    }

    pub fn pending(&self) -> impl Iterator<Item = (&TimerId, &PendingTimer)> {
        self.pending.iter()
    }

    /// Remove and return the earliest timer due at or before `until_ms`,
    /// moving the clock to its due time. Ties go to the older timer.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<TimerId> {
        let (id, timer) = self
            .pending
            .iter()
            .filter(|(_, timer)| timer.due_ms <= until_ms)
            .min_by_key(|(id, timer)| (timer.due_ms, **id))
            .map(|(id, timer)| (*id, *timer))?;
        self.pending.remove(&id);
        self.now_ms = self.now_ms.max(timer.due_ms);
        Some(id)
    }

    pub fn advance_clock_to(&mut self, ms: u64) {
        self.now_ms = self.now_ms.max(ms);
    }
}

impl TimerScheduler for VirtualScheduler {
    fn schedule(&mut self, kind: TimerKind, delay_ms: u32) -> TimerId {
        self.next_id += 1;
        let id = TimerId::from(self.next_id);
        let delay = match kind {
            TimerKind::Frame => FRAME_MS,
            _ => delay_ms as u64,
        };
        self.pending.insert(id, PendingTimer { kind, due_ms: self.now_ms + delay });
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.pending.remove(&id);
    }
}

/// Anything that owns a [`VirtualScheduler`] and reacts to its timers.
pub trait VirtualClockDriven {
    fn virtual_scheduler(&mut self) -> &mut VirtualScheduler;
    fn fire(&mut self, id: TimerId);
}

impl<R: SlideRenderer> VirtualClockDriven for SlideController<VirtualScheduler, R> {
    fn virtual_scheduler(&mut self) -> &mut VirtualScheduler {
        self.scheduler_mut()
    }

    fn fire(&mut self, id: TimerId) {
        self.handle_timer(id);
    }
}

impl<V: RibbonSurface> VirtualClockDriven for RibbonPulse<VirtualScheduler, V> {
    fn virtual_scheduler(&mut self) -> &mut VirtualScheduler {
        self.scheduler_mut()
    }

    fn fire(&mut self, id: TimerId) {
        self.handle_timer(id);
    }
}

/// Let `ms` of virtual time pass, firing every timer that falls due
/// (including ones scheduled along the way). Returns how many fired.
pub fn run_for(target: &mut impl VirtualClockDriven, ms: u64) -> usize {
    let until = target.virtual_scheduler().now_ms() + ms;
    let mut fired = 0;
    while let Some(id) = target.virtual_scheduler().pop_due(until) {
        target.fire(id);
        fired += 1;
    }
    target.virtual_scheduler().advance_clock_to(until);
    fired
}

type FireCallback = Rc<dyn Fn(TimerId)>;

enum BrowserHandle {
    Timeout(Timeout),
    Frame(AnimationFrame),
}

#[derive(Default)]
struct TimerBook {
    live: HashMap<TimerId, BrowserHandle>,
    /// Handles of callbacks that already ran. Kept one dispatch longer so a
    /// closure is never dropped while it is executing.
    retired: Vec<BrowserHandle>,
    target: Option<FireCallback>,
}

/// Shared between a [`BrowserScheduler`] and the callbacks it registers.
#[derive(Clone, Default)]
pub struct TimerDispatch(Rc<RefCell<TimerBook>>);

impl TimerDispatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route fired timers to `target`. Until connected, fired timers are dropped.
    pub fn connect(&self, target: impl Fn(TimerId) + 'static) {
        self.0.borrow_mut().target = Some(Rc::new(target));
    }

    fn dispatch(&self, id: TimerId) {
        let target = {
            let mut book = self.0.borrow_mut();
            book.retired.clear();
            if let Some(handle) = book.live.remove(&id) {
                book.retired.push(handle);
            }
            book.target.clone()
        };
        if let Some(target) = target {
            target(id);
        }
    }
}

/// `setTimeout` / `requestAnimationFrame` backed scheduler.
pub struct BrowserScheduler {
    dispatch: TimerDispatch,
    next_id: u64,
}

impl BrowserScheduler {
    pub fn new(dispatch: TimerDispatch) -> Self {
        Self { dispatch, next_id: 0 }
    }
}

impl TimerScheduler for BrowserScheduler {
    fn schedule(&mut self, kind: TimerKind, delay_ms: u32) -> TimerId {
        self.next_id += 1;
        let id = TimerId::from(self.next_id);
        let dispatch = self.dispatch.clone();
        let handle = match kind {
            TimerKind::Frame => {
                BrowserHandle::Frame(request_animation_frame(move |_timestamp| dispatch.dispatch(id)))
            }
            TimerKind::Advance | TimerKind::Settle => {
                BrowserHandle::Timeout(Timeout::new(delay_ms, move || dispatch.dispatch(id)))
            }
        };
        self.dispatch.0.borrow_mut().live.insert(id, handle);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        // Dropping the handle clears the timeout / cancels the frame.
        let handle = self.dispatch.0.borrow_mut().live.remove(&id);
        drop(handle);
    }
}

impl Drop for BrowserScheduler {
    fn drop(&mut self) {
        // Pending callbacks hold the dispatch; drop them to break the cycle.
        let (live, target) = {
            let mut book = self.dispatch.0.borrow_mut();
            (std::mem::take(&mut book.live), book.target.take())
        };
        drop(live);
        drop(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pop_due_orders_by_due_time_then_age() {
        let mut scheduler = VirtualScheduler::new();
        let late = scheduler.schedule(TimerKind::Advance, 500);
        let early = scheduler.schedule(TimerKind::Settle, 100);
        let tie = scheduler.schedule(TimerKind::Settle, 500);

        assert_eq!(scheduler.pop_due(1_000), Some(early));
        assert_eq!(scheduler.now_ms(), 100);
        assert_eq!(scheduler.pop_due(1_000), Some(late));
        assert_eq!(scheduler.pop_due(1_000), Some(tie));
        assert_eq!(scheduler.pop_due(1_000), None);
    }

    #[test]
    fn cancel_removes_pending() {
        let mut scheduler = VirtualScheduler::new();
        let id = scheduler.schedule(TimerKind::Advance, 10);
        scheduler.cancel(id);
        scheduler.cancel(id);
        assert_eq!(scheduler.pending_count(TimerKind::Advance), 0);
        assert_eq!(scheduler.pop_due(100), None);
    }
}
