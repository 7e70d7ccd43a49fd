use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Period of the animation timer. Hosts schedule ticks at this rate.
pub const TICK_PERIOD: Duration = Duration::from_millis(500);

/// Number of discrete time steps in one animation cycle.
pub const TIME_STEPS: u8 = 10;

/// Discrete animation time, always in `0..TIME_STEPS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnimationClock {
    index: u8,
}

impl AnimationClock {
    /// A clock at `index`, wrapped into range.
    pub fn at(index: u32) -> Self {
        // The remainder is below TIME_STEPS, so it fits in a u8.
        let wrapped = (index % u32::from(TIME_STEPS)) as u8;
        Self { index: wrapped }
    }

    pub fn index(&self) -> u8 {
        self.index
    }

    /// Position within the cycle as a fraction in `[0, 0.9]`.
    pub fn fraction(&self) -> f64 {
        f64::from(self.index) / f64::from(TIME_STEPS)
    }

    pub fn advance(&mut self) {
        self.index = (self.index + 1) % TIME_STEPS;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverState {
    /// No drawing surface yet; ticks are ignored.
    Idle,
    /// Surface acquired; every tick advances time and redraws.
    Ticking,
}

/// Owns the animation clock and decides when a tick produces a redraw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationDriver {
    state: DriverState,
    clock: AnimationClock,
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self {
            state: DriverState::Idle,
            clock: AnimationClock::default(),
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn clock(&self) -> AnimationClock {
        self.clock
    }

    /// Move to `Ticking`. Called once the host has a drawing surface.
    pub fn start(&mut self) {
        if self.state == DriverState::Idle {
            log::info!("animation started, period {TICK_PERIOD:?}");
        }
        self.state = DriverState::Ticking;
    }

    /// Handle one timer tick. Returns `true` when the scene must be rebuilt.
    pub fn on_tick(&mut self) -> bool {
        match self.state {
            DriverState::Idle => false,
            DriverState::Ticking => {
                self.clock.advance();
                log::trace!("tick -> time {}", self.clock.index());
                true
            }
        }
    }

    /// Jump to a given time step (used for still exports).
    pub fn seek(&mut self, clock: AnimationClock) {
        self.clock = clock;
    }
}
