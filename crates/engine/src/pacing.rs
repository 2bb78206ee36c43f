//! Frame pacing: a fixed per-frame budget, sleep off what is left, never catch up.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Time source for the scheduler.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&mut self, duration: Duration);
}

/// Wall clock and `thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[derive(Debug)]
struct ManualState {
    now: Instant,
    sleeps: Vec<Duration>,
}

/// Clock that only moves when told to. Sleeping advances it instantly and is
/// recorded. Clones share the same time line.
#[derive(Debug, Clone)]
pub struct ManualClock {
    state: Rc<RefCell<ManualState>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(ManualState {
                now: Instant::now(),
                sleeps: Vec::new(),
            })),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.state.borrow_mut().now += by;
    }

    /// Every sleep requested so far, oldest first.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.state.borrow().sleeps.clone()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.state.borrow().now
    }

    fn sleep(&mut self, duration: Duration) {
        let mut state = self.state.borrow_mut();
        state.now += duration;
        state.sleeps.push(duration);
    }
}

/// Per-frame time budget.
#[derive(Debug, Clone)]
pub struct FramePacer {
    budget: Duration,
    overruns: u64,
}

impl FramePacer {
    pub fn new(fps: u32) -> Self {
        Self {
            budget: Duration::from_secs(1) / fps.max(1),
            overruns: 0,
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Frames that took longer than the budget so far.
    pub fn overruns(&self) -> u64 {
        self.overruns
    }

    /// How long to sleep after a frame whose work took `elapsed`.
    ///
    /// `None` when the budget is used up; an overrun is not paid back later.
    pub fn remaining(&mut self, elapsed: Duration) -> Option<Duration> {
        if elapsed > self.budget {
            self.overruns += 1;
            return None;
        }
        let rest = self.budget - elapsed;
        (!rest.is_zero()).then_some(rest)
    }
}
