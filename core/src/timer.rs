use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use log::debug;

use crate::constants::TIMER_PERIOD;
use crate::state::State;

/// A source of the current time for the timer gate
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock time
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same time so a driver or test can keep a handle after
/// boxing one into a `Chip8`.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        ManualClock {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// # Timer Gate
/// Decrements the delay and sound timers at 60Hz of real time, independent of
/// how many instructions run in between.
#[derive(Copy, Clone, Debug)]
pub struct TimerGate {
    last_tick: Instant,
}

impl TimerGate {
    pub fn new(now: Instant) -> Self {
        TimerGate { last_tick: now }
    }

    /// Decrements both timers by one (stopping at 0) if a full timer period
    /// has elapsed since the last decrement.
    /// Returns whether a decrement happened.
    pub fn tick(&mut self, now: Instant, state: &mut State) -> bool {
        if now.saturating_duration_since(self.last_tick) < TIMER_PERIOD {
            return false;
        }
        // Carry any overshoot into the next period, but only one tick's worth
        self.last_tick += TIMER_PERIOD;
        if now.saturating_duration_since(self.last_tick) >= TIMER_PERIOD {
            self.last_tick = now;
        }

        state.delay_timer = state.delay_timer.saturating_sub(1);
        if state.sound_timer > 0 {
            state.sound_timer -= 1;
            if state.sound_timer == 0 {
                debug!("sound timer expired");
            }
        }
        true
    }

    pub fn last_tick(&self) -> Instant {
        self.last_tick
    }
}
