//! Plane-wave laser pulses with gaussian ramps and an optional plateau.
//!
//! The pulse is an amplitude-modulated oscillation. The envelope rises from a
//! gaussian tail to full amplitude and falls off along a matching gaussian
//! tail, optionally held constant for a plateau between the two ramps.
//! Because the injected field
//! must not deposit net charge at the boundary, the oscillation carries an
//! additional quadrature term proportional to the time derivative of the
//! envelope; with it, the time integral of the field stays near zero for any
//! phase offset. A plane wave has no transverse envelope, so injection is only
//! physical when the consuming simulation uses periodic transverse boundaries.

extern crate nalgebra;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use specs::prelude::*;

use crate::constant::PI;

/// Which axes of the field vector carry the oscillation.
///
/// The pulse propagates along `y`. Linear polarizations place the whole field
/// on a single transverse axis; circular polarization splits it across both
/// transverse axes with a quarter-period offset between them.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq)]
pub enum Polarization {
    LinearX,
    LinearZ,
    Circular,
}

/// The portion of the pulse a given time falls into.
///
/// Derived from the simulation time on every evaluation, never stored. Times
/// exactly on a threshold count as [Plateau](EnvelopeRegime::Plateau); the
/// gaussian tails meet the plateau with matching value and slope, so the regime
/// label changes without a discontinuity in the envelope or its derivative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EnvelopeRegime {
    UpRamp,
    Plateau,
    DownRamp,
}

/// A component representing a plane-wave laser pulse.
///
/// The parameters are fixed for the lifetime of a run. Several pulse entities
/// may coexist; their field contributions superpose at each injection site.
#[derive(Deserialize, Serialize, Clone, Copy)]
pub struct PlaneWave {
    /// Peak electric field amplitude E_0, SI units of V/m.
    pub amplitude: f64,

    /// Wavelength of the oscillation, SI units of m.
    pub wavelength: f64,

    /// Characteristic duration tau of the gaussian ramps, SI units of s.
    pub pulse_length: f64,

    /// Length of the up-ramp in units of half the pulse length: the envelope
    /// reaches full amplitude at `0.5 * ramp_factor * pulse_length`.
    pub ramp_factor: f64,

    /// Duration for which the envelope is held at full amplitude, SI units of s.
    ///
    /// The time integral of the field only vanishes when the plateau spans a
    /// whole number of oscillation periods. This is a property of the pulse
    /// shape, not an implementation error.
    pub plateau_length: f64,

    /// Phase offset of the oscillation at the start of the plateau, in rad.
    pub phase: f64,

    /// Propagation speed of the wave, SI units of m/s.
    ///
    /// [constant::C](crate::constant::C) for vacuum. Carried as a pulse
    /// parameter so that simulations in normalised unit systems can rescale it.
    pub speed_of_light: f64,

    /// Polarization of the pulse.
    pub polarization: Polarization,
}
impl Component for PlaneWave {
    type Storage = HashMapStorage<Self>;
}

/// The field contribution of a pulse at a single instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldSample {
    /// Electric field components along the cartesian x,y,z axes, SI units of V/m.
    pub field: Vector3<f64>,

    /// Auxiliary oscillation phase.
    ///
    /// Always zero for this pulse shape. The slot exists so that chirped pulse
    /// profiles can report a time-varying phase without changing the sampler
    /// interface.
    pub phase: f64,
}

impl PlaneWave {
    /// Time at which the up-ramp hands over to the plateau, in seconds.
    pub fn end_upramp(&self) -> f64 {
        0.5 * self.ramp_factor * self.pulse_length
    }

    /// Time at which the plateau hands over to the down-ramp, in seconds.
    pub fn start_downramp(&self) -> f64 {
        self.end_upramp() + self.plateau_length
    }

    /// Envelope regime the given time falls into.
    pub fn regime(&self, run_time: f64) -> EnvelopeRegime {
        if run_time > self.start_downramp() {
            EnvelopeRegime::DownRamp
        } else if run_time < self.end_upramp() {
            EnvelopeRegime::UpRamp
        } else {
            EnvelopeRegime::Plateau
        }
    }

    /// Envelope amplitude and integration correction factor at `run_time`.
    ///
    /// The correction factor is the negative logarithmic time derivative of the
    /// envelope. Mixed into the quadrature of the oscillation it keeps the time
    /// integral of the field near zero over the whole pulse, not just for a
    /// symmetric gaussian. On the plateau the envelope equals the amplitude
    /// exactly and the correction factor is zero.
    pub fn envelope(&self, run_time: f64) -> (f64, f64) {
        let mut envelope = self.amplitude;
        let correction_factor;
        match self.regime(run_time) {
            EnvelopeRegime::DownRamp => {
                let exponent =
                    (run_time - self.start_downramp()) / (self.pulse_length * 2.0_f64.sqrt());
                envelope *= (-0.5 * exponent * exponent).exp();
                correction_factor = (run_time - self.start_downramp())
                    / (2.0 * self.pulse_length * self.pulse_length);
            }
            EnvelopeRegime::UpRamp => {
                let exponent =
                    (run_time - self.end_upramp()) / (self.pulse_length * 2.0_f64.sqrt());
                envelope *= (-0.5 * exponent * exponent).exp();
                correction_factor = (run_time - self.end_upramp())
                    / (2.0 * self.pulse_length * self.pulse_length);
            }
            EnvelopeRegime::Plateau => {
                correction_factor = 0.0;
            }
        }
        (envelope, correction_factor)
    }

    /// Longitudinal field of the pulse at the given integration step.
    ///
    /// Pure function of the step index and the pulse parameters: the same
    /// inputs always produce the same sample, so the evaluation can run
    /// concurrently for every injection site without synchronisation.
    pub fn longitudinal(&self, current_step: u64, delta_t: f64) -> FieldSample {
        let run_time = delta_t * current_step as f64;
        let omega = 2.0 * PI * self.speed_of_light / self.wavelength;
        let (envelope, correction_factor) = self.envelope(run_time);

        let theta = omega * (run_time - self.end_upramp()) + self.phase;
        let in_phase = theta.sin() + theta.cos() * correction_factor;
        let quadrature = theta.cos() - theta.sin() * correction_factor;

        let field = match self.polarization {
            Polarization::LinearX => Vector3::new(envelope * in_phase, 0.0, 0.0),
            Polarization::LinearZ => Vector3::new(0.0, 0.0, envelope * in_phase),
            Polarization::Circular => Vector3::new(
                envelope / 2.0_f64.sqrt() * in_phase,
                0.0,
                envelope / 2.0_f64.sqrt() * quadrature,
            ),
        };
        // A non-finite run time or an overflowing exponent must saturate to
        // zero; NaN in the field state is fatal to the consuming simulation.
        let field = field.map(|e| if e.is_finite() { e } else { 0.0 });

        FieldSample { field, phase: 0.0 }
    }
}
