//! Laser pulse injection.
//!
//! Entities carrying a pulse profile component, such as
//! [PlaneWave](crate::laser::plane_wave::PlaneWave), act as field sources. Grid
//! cells flagged as [BoundaryCell](crate::cell::BoundaryCell) carry a
//! [LaserFieldSampler](struct.LaserFieldSampler.html), into which the systems of
//! this module deposit the electric field of every source once per step. The
//! consuming field solver reads the samplers back out as its boundary source
//! term.

extern crate nalgebra;
use nalgebra::Vector3;
use specs::prelude::*;
use std::fmt;

use crate::cell::{BoundaryCell, Position};
use crate::clock::{Step, Timestep};
use crate::initiate::NewlyCreated;

pub mod plane_wave;
pub mod transverse;

use self::plane_wave::PlaneWave;
use self::transverse::TransverseProfile;

/// A component that stores the injected laser field at a cell's location.
#[derive(Copy, Clone)]
pub struct LaserFieldSampler {
    /// Vector representing the electric field components along x,y,z in units of V/m.
    pub field: Vector3<f64>,

    /// Auxiliary oscillation phase reported by the pulse profile.
    ///
    /// Zero for every profile in this crate; see
    /// [FieldSample](crate::laser::plane_wave::FieldSample).
    pub phase: f64,
}
impl Component for LaserFieldSampler {
    type Storage = VecStorage<Self>;
}
impl Default for LaserFieldSampler {
    fn default() -> Self {
        LaserFieldSampler {
            field: Vector3::new(0.0, 0.0, 0.0),
            phase: 0.0,
        }
    }
}
impl fmt::Display for LaserFieldSampler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:?},{:?},{:?})",
            self.field[0], self.field[1], self.field[2]
        )
    }
}

/// System that clears the laser field samplers each frame.
pub struct ClearLaserFieldSamplersSystem;

impl<'a> System<'a> for ClearLaserFieldSamplersSystem {
    type SystemData = WriteStorage<'a, LaserFieldSampler>;
    fn run(&mut self, mut samplers: Self::SystemData) {
        use rayon::prelude::*;

        (&mut samplers).par_join().for_each(|sampler| {
            sampler.field = Vector3::new(0.0, 0.0, 0.0);
            sampler.phase = 0.0;
        });
    }
}

/// System that deposits the field of every pulse into the boundary cell samplers.
///
/// The longitudinal field of a pulse depends only on the step number, so it is
/// evaluated once per pulse; the transverse profile is then applied per cell.
/// Contributions of separate pulse entities accumulate, so pulses superpose.
pub struct SampleLaserFieldSystem;

impl<'a> System<'a> for SampleLaserFieldSystem {
    type SystemData = (
        ReadStorage<'a, PlaneWave>,
        ReadStorage<'a, Position>,
        ReadStorage<'a, BoundaryCell>,
        WriteStorage<'a, LaserFieldSampler>,
        ReadExpect<'a, Step>,
        ReadExpect<'a, Timestep>,
    );

    fn run(&mut self, (pulses, positions, cells, mut samplers, step, timestep): Self::SystemData) {
        for pulse in (&pulses).join() {
            let sample = pulse.longitudinal(step.n, timestep.delta);
            for (pos, _, sampler) in (&positions, &cells, &mut samplers).join() {
                let field = pulse.apply(sample.field, pos.pos[0], pos.pos[2]);
                sampler.field += field;
                sampler.phase = sample.phase;
            }
        }
    }
}

/// Attaches `LaserFieldSampler` components to newly created boundary cells.
pub struct AttachLaserFieldSamplersToNewCellsSystem;

impl<'a> System<'a> for AttachLaserFieldSamplersToNewCellsSystem {
    type SystemData = (
        Entities<'a>,
        ReadStorage<'a, NewlyCreated>,
        ReadStorage<'a, BoundaryCell>,
        Read<'a, LazyUpdate>,
    );

    fn run(&mut self, (ent, newly_created, cells, updater): Self::SystemData) {
        for (ent, _, _) in (&ent, &newly_created, &cells).join() {
            updater.insert(ent, LaserFieldSampler::default());
        }
    }
}

/// Adds the systems required by the laser module to the dispatcher.
///
/// #Arguments
///
/// `builder`: the dispatch builder to modify
///
/// `deps`: any dependencies that must be completed before the laser systems run.
pub fn add_systems_to_dispatch(builder: &mut DispatcherBuilder<'static, 'static>, deps: &[&str]) {
    builder.add(ClearLaserFieldSamplersSystem, "clear_laser_samplers", deps);
    builder.add(
        SampleLaserFieldSystem,
        "sample_laser_field",
        &["clear_laser_samplers"],
    );
    builder.add(
        AttachLaserFieldSamplersToNewCellsSystem,
        "attach_laser_samplers",
        &[],
    );
}

/// Registers the components required by the laser module.
pub fn register_components(world: &mut World) {
    world.register::<PlaneWave>();
    world.register::<LaserFieldSampler>();
}

#[cfg(test)]
pub mod tests {

    use super::*;
    use crate::laser::plane_wave::Polarization;
    use assert_approx_eq::assert_approx_eq;
    use specs::{Builder, DispatcherBuilder, World};

    fn test_pulse(polarization: Polarization) -> PlaneWave {
        PlaneWave {
            amplitude: 1.0,
            wavelength: 0.8,
            pulse_length: 10.0,
            ramp_factor: 2.0,
            plateau_length: 20.0,
            phase: 0.0,
            speed_of_light: 1.0,
            polarization,
        }
    }

    fn build_test_world() -> (World, Dispatcher<'static, 'static>) {
        let mut test_world = World::new();
        register_components(&mut test_world);
        test_world.register::<Position>();
        test_world.register::<BoundaryCell>();
        test_world.register::<NewlyCreated>();
        let mut builder = DispatcherBuilder::new();
        add_systems_to_dispatch(&mut builder, &[]);
        let mut dispatcher = builder.build();
        dispatcher.setup(&mut test_world);
        test_world.insert(Step { n: 0 });
        test_world.insert(Timestep { delta: 1.0 });
        (test_world, dispatcher)
    }

    /// Tests that field samplers are added to newly created boundary cells.
    #[test]
    fn test_samplers_are_added_to_new_cells() {
        let (mut test_world, mut dispatcher) = build_test_world();

        let cell = test_world
            .create_entity()
            .with(Position::default())
            .with(BoundaryCell)
            .with(NewlyCreated)
            .build();
        let plain_entity = test_world.create_entity().with(NewlyCreated).build();

        dispatcher.dispatch(&test_world);
        test_world.maintain();

        let samplers = test_world.read_storage::<LaserFieldSampler>();
        assert_eq!(samplers.contains(cell), true);
        assert_eq!(samplers.contains(plain_entity), false);
    }

    /// Tests that the sampled field matches the pure evaluator output.
    #[test]
    fn test_sampled_field_matches_longitudinal_evaluation() {
        let (mut test_world, mut dispatcher) = build_test_world();

        let pulse = test_pulse(Polarization::LinearX);
        test_world.create_entity().with(pulse).build();
        let cell = test_world
            .create_entity()
            .with(Position::default())
            .with(BoundaryCell)
            .with(LaserFieldSampler::default())
            .build();

        test_world.insert(Step { n: 15 });
        dispatcher.dispatch(&test_world);
        test_world.maintain();

        let expected = pulse.longitudinal(15, 1.0);
        let samplers = test_world.read_storage::<LaserFieldSampler>();
        let sampler = samplers.get(cell).expect("entity not found");
        assert_approx_eq!(sampler.field[0], expected.field[0], 1.0e-12);
        assert_eq!(sampler.field[1], 0.0);
        assert_eq!(sampler.field[2], 0.0);
        assert_eq!(sampler.phase, 0.0);
    }

    /// Tests that two pulse entities superpose at the sampler.
    #[test]
    fn test_pulses_superpose() {
        let (mut test_world, mut dispatcher) = build_test_world();

        let pulse = test_pulse(Polarization::LinearX);
        test_world.create_entity().with(pulse).build();
        test_world.create_entity().with(pulse).build();
        let cell = test_world
            .create_entity()
            .with(Position::default())
            .with(BoundaryCell)
            .with(LaserFieldSampler::default())
            .build();

        test_world.insert(Step { n: 17 });
        dispatcher.dispatch(&test_world);
        test_world.maintain();

        let expected = pulse.longitudinal(17, 1.0);
        let samplers = test_world.read_storage::<LaserFieldSampler>();
        let sampler = samplers.get(cell).expect("entity not found");
        assert_approx_eq!(sampler.field[0], 2.0 * expected.field[0], 1.0e-12);
    }

    /// Tests that samplers are cleared before the new frame's field is deposited.
    #[test]
    fn test_samplers_are_cleared_each_frame() {
        let (mut test_world, mut dispatcher) = build_test_world();

        let pulse = test_pulse(Polarization::LinearX);
        test_world.create_entity().with(pulse).build();
        let cell = test_world
            .create_entity()
            .with(Position::default())
            .with(BoundaryCell)
            .with(LaserFieldSampler {
                field: Vector3::new(1.0e10, 1.0e10, 1.0e10),
                phase: 0.5,
            })
            .build();

        test_world.insert(Step { n: 15 });
        dispatcher.dispatch(&test_world);
        test_world.maintain();

        let expected = pulse.longitudinal(15, 1.0);
        let samplers = test_world.read_storage::<LaserFieldSampler>();
        let sampler = samplers.get(cell).expect("entity not found");
        assert_approx_eq!(sampler.field[0], expected.field[0], 1.0e-12);
        assert_eq!(sampler.field[1], 0.0);
        assert_eq!(sampler.field[2], 0.0);
    }
}
