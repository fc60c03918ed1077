//! Inject a plane-wave pulse at a line of boundary cells.
//!
//! An 800 nm, 10 fs pulse is deposited into the samplers of 32 boundary cells
//! each frame. One cell carries a probe that records the field time series to
//! `probe.csv`; integrating that series shows the pulse carries no net charge
//! displacement. The plateau spans a whole number of optical periods, which is
//! required for the integral to vanish when the plateau is nonzero.

extern crate laserecs as lib;
extern crate nalgebra;
use lib::cell::{BoundaryCell, Position};
use lib::clock::Timestep;
use lib::constant;
use lib::ecs;
use lib::initiate::NewlyCreated;
use lib::laser::plane_wave::{PlaneWave, Polarization};
use lib::output::probe::FieldProbe;
use nalgebra::Vector3;
use specs::prelude::*;

fn main() {
    let mut world = World::new();
    ecs::register_components(&mut world);
    ecs::register_resources(&mut world);
    let mut dispatcher = ecs::create_simulation_dispatcher_builder().build();
    dispatcher.setup(&mut world);

    world.insert(Timestep { delta: 1.0e-16 });

    let wavelength = 0.8e-6;
    let period = wavelength / constant::C;
    world
        .create_entity()
        .with(PlaneWave {
            amplitude: 3.2e12,
            wavelength,
            pulse_length: 1.0e-14,
            ramp_factor: 16.0,
            plateau_length: 10.0 * period,
            phase: 0.0,
            speed_of_light: constant::C,
            polarization: Polarization::LinearX,
        })
        .build();

    // A line of injection cells across the boundary plane.
    for i in 0..32 {
        world
            .create_entity()
            .with(Position {
                pos: Vector3::new(i as f64 * 0.1e-6, 0.0, 0.0),
            })
            .with(BoundaryCell)
            .with(NewlyCreated)
            .build();
    }

    // Record the field time series at one probe cell.
    world
        .create_entity()
        .with(Position {
            pos: Vector3::new(0.0, 0.0, 0.0),
        })
        .with(BoundaryCell)
        .with(NewlyCreated)
        .with(FieldProbe {
            filename: "probe.csv".to_string(),
        })
        .build();

    for _ in 0..4000 {
        dispatcher.dispatch(&world);
        world.maintain();
    }
}
