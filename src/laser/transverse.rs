//! Transverse spatial profiles of pulse sources.

extern crate nalgebra;
use nalgebra::Vector3;

use super::plane_wave::PlaneWave;

/// The transverse spatial envelope of a pulse source.
///
/// Implementors reshape the longitudinal field according to the transverse
/// coordinates of the injection site. The sampler systems call this for every
/// boundary cell, so a focused-beam profile can be introduced without touching
/// the deposition machinery.
pub trait TransverseProfile {
    /// Returns the field at transverse coordinates `(pos_x, pos_z)` of the
    /// injection plane, given the longitudinal field `elong`.
    fn apply(&self, elong: Vector3<f64>, pos_x: f64, pos_z: f64) -> Vector3<f64>;
}

/// A plane wave has no transverse envelope: the field is uniform across the
/// injection plane. Only physical when the consuming simulation applies
/// periodic boundary conditions along the transverse axes.
impl TransverseProfile for PlaneWave {
    fn apply(&self, elong: Vector3<f64>, _pos_x: f64, _pos_z: f64) -> Vector3<f64> {
        elong
    }
}

#[cfg(test)]
pub mod tests {

    use super::*;
    use crate::laser::plane_wave::Polarization;

    #[test]
    fn test_plane_wave_transverse_profile_is_identity() {
        let pulse = PlaneWave {
            amplitude: 2.0,
            wavelength: 0.8,
            pulse_length: 10.0,
            ramp_factor: 2.0,
            plateau_length: 0.0,
            phase: 0.0,
            speed_of_light: 1.0,
            polarization: Polarization::LinearX,
        };
        let elong = Vector3::new(1.5, 0.0, -0.5);
        for &(x, z) in [(0.0, 0.0), (1.0e-6, -3.0e-6), (5.0e3, 7.0e3)].iter() {
            assert_eq!(pulse.apply(elong, x, z), elong);
        }
    }
}
