//! Records the injected field at probe cells as a CSV time series.

extern crate csv;
use specs::prelude::*;
use std::error::Error;
use std::fs::OpenOptions;

use crate::clock::{Step, Timestep};
use crate::laser::LaserFieldSampler;

/// A component marking a cell whose field should be recorded every step.
///
/// One `(step, time, ex, ey, ez)` row is appended to the named file per step.
/// Integrating the recorded series offline is the standard check that the
/// injected pulse carries no net charge displacement.
pub struct FieldProbe {
    /// Name of the file the series is appended to.
    pub filename: String,
}
impl Component for FieldProbe {
    type Storage = HashMapStorage<Self>;
}

/// System that appends the sampled field at each probe cell to its record file.
pub struct RecordFieldProbesSystem;

impl<'a> System<'a> for RecordFieldProbesSystem {
    type SystemData = (
        ReadStorage<'a, FieldProbe>,
        ReadStorage<'a, LaserFieldSampler>,
        ReadExpect<'a, Step>,
        ReadExpect<'a, Timestep>,
    );

    fn run(&mut self, (probes, samplers, step, timestep): Self::SystemData) {
        let time = step.n as f64 * timestep.delta;
        for (probe, sampler) in (&probes, &samplers).join() {
            match append_record(&probe.filename, step.n, time, sampler) {
                Ok(()) => (),
                Err(why) => panic!("could not write probe record: {}", why),
            }
        }
    }
}

fn append_record(
    filename: &str,
    step: u64,
    time: f64,
    sampler: &LaserFieldSampler,
) -> Result<(), Box<dyn Error>> {
    let file = OpenOptions::new().append(true).create(true).open(filename)?;
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
    writer.serialize((
        step,
        time,
        sampler.field[0],
        sampler.field[1],
        sampler.field[2],
    ))?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
pub mod tests {

    use super::*;
    use nalgebra::Vector3;
    use specs::{Builder, RunNow, World};

    #[test]
    fn test_probe_appends_one_row_per_step() {
        let mut path = std::env::temp_dir();
        path.push("laserecs_probe_test.csv");
        let filename = path.to_str().expect("temp path was not utf8").to_string();
        let _ = std::fs::remove_file(&filename);

        let mut test_world = World::new();
        test_world.register::<FieldProbe>();
        test_world.register::<LaserFieldSampler>();
        test_world.insert(Step { n: 0 });
        test_world.insert(Timestep { delta: 1.0e-16 });

        test_world
            .create_entity()
            .with(FieldProbe {
                filename: filename.clone(),
            })
            .with(LaserFieldSampler {
                field: Vector3::new(1.0, 0.0, 0.0),
                phase: 0.0,
            })
            .build();

        let mut system = RecordFieldProbesSystem;
        system.run_now(&test_world);
        test_world.insert(Step { n: 1 });
        system.run_now(&test_world);

        let contents = std::fs::read_to_string(&filename).expect("probe file missing");
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.lines().next().expect("no rows").starts_with("0,"));

        let _ = std::fs::remove_file(&filename);
    }
}
