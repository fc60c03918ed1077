//! Resources and systems for the simulation clock.

use specs::prelude::*;

/// Tracks the number of the current simulation step.
pub struct Step {
    pub n: u64,
}
impl Default for Step {
    fn default() -> Self {
        Step { n: 0 }
    }
}

/// The timestep used to advance the simulation.
///
/// The duration of the timestep should be sufficiently small to resolve the optical
/// oscillation of the injected pulses, otherwise the sampled field will alias.
/// For an 800 nm pulse the optical period is about 2.7 fs, so a timestep of
/// around 0.1 fs is a reasonable starting point.
pub struct Timestep {
    /// Duration of the simulation timestep, in SI units of seconds.
    pub delta: f64,
}
impl Default for Timestep {
    fn default() -> Self {
        Timestep { delta: 1.0e-16 }
    }
}

pub const ADVANCE_CLOCK_SYSTEM_NAME: &str = "advance_clock";

/// Increments the step counter once per frame.
///
/// This system runs after all field sampling and output systems, so during a
/// dispatch every system observes the same step number.
pub struct AdvanceClockSystem;

impl<'a> System<'a> for AdvanceClockSystem {
    type SystemData = WriteExpect<'a, Step>;

    fn run(&mut self, mut step: Self::SystemData) {
        step.n += 1;
    }
}
