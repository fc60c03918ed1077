//! Assembles the component registry and system dispatcher for a simulation.

use specs::prelude::*;

use crate::cell::{BoundaryCell, Position};
use crate::clock::{AdvanceClockSystem, Step, Timestep, ADVANCE_CLOCK_SYSTEM_NAME};
use crate::initiate::{DeflagNewCellsSystem, NewlyCreated};
use crate::laser;
use crate::output::console_output::ConsoleOutputSystem;
use crate::output::probe::{FieldProbe, RecordFieldProbesSystem};

/// Registers all components used by the modules of the program.
pub fn register_components(world: &mut World) {
    world.register::<Position>();
    world.register::<BoundaryCell>();
    world.register::<NewlyCreated>();
    world.register::<FieldProbe>();
    laser::register_components(world);
}

/// Adds resources used by the modules of the program.
pub fn register_resources(world: &mut World) {
    world.insert(Step::default());
    world.insert(Timestep::default());
}

/// Creates a [DispatcherBuilder] wired with every system required to run a
/// simulation frame.
///
/// Each dispatch deposits the pulse fields of the current step into the
/// boundary cell samplers, records output, and then advances the clock, so
/// all systems within one frame observe the same step number.
pub fn create_simulation_dispatcher_builder() -> DispatcherBuilder<'static, 'static> {
    let mut builder = DispatcherBuilder::new();
    builder.add(DeflagNewCellsSystem, "deflag_new_cells", &[]);
    builder.add_barrier();
    laser::add_systems_to_dispatch(&mut builder, &[]);
    builder.add_barrier();
    builder.add(RecordFieldProbesSystem, "record_field_probes", &[]);
    builder.add(ConsoleOutputSystem, "console_output", &[]);
    builder.add_barrier();
    builder.add(AdvanceClockSystem, ADVANCE_CLOCK_SYSTEM_NAME, &[]);
    builder
}
