//! Per-instance animation clock and the step contract shared by every generator.

use crate::input::state::{HostSignals, PauseReason};
use crate::render::grid::{Grid, GridSize};
use crate::render::Generator;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AnimationClock {
    tick: u64,
}

impl AnimationClock {
    pub fn tick(&self) -> u64 {
        self.tick
    }

    fn advance(&mut self) -> u64 {
        self.tick = self.tick.saturating_add(1);
        self.tick
    }

    fn reset(&mut self) {
        self.tick = 0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Advanced(u64),
    Paused(PauseReason),
}

/// Drives one generator instance: owns its clock and current grid size.
#[derive(Debug)]
pub struct Animator {
    clock: AnimationClock,
    size: GridSize,
}

impl Animator {
    pub fn new(size: GridSize) -> Self {
        Self {
            clock: AnimationClock::default(),
            size,
        }
    }

    pub fn tick(&self) -> u64 {
        self.clock.tick()
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Adopts a new grid size. The clock restarts only when the size changes.
    pub fn resize(&mut self, size: GridSize) -> bool {
        if size == self.size {
            return false;
        }
        self.size = size;
        self.clock.reset();
        true
    }

    /// Advances by exactly one tick, or does nothing while any pause condition holds.
    pub fn step(&mut self, signals: &HostSignals, ready: bool) -> StepOutcome {
        if let Some(reason) = signals.pause_reason() {
            return StepOutcome::Paused(reason);
        }
        if !ready {
            return StepOutcome::Paused(PauseReason::NotReady);
        }
        StepOutcome::Advanced(self.clock.advance())
    }

    /// Tick the frame should be drawn at: reduced motion pins the generator's static tick.
    pub fn display_tick(&self, generator: &dyn Generator, signals: &HostSignals) -> u64 {
        if signals.reduced_motion {
            generator.static_tick()
        } else {
            self.clock.tick()
        }
    }

    pub fn render(&self, generator: &mut dyn Generator, signals: &HostSignals) -> Grid {
        let tick = self.display_tick(generator, signals);
        generator.build_frame(self.size, tick)
    }
}
