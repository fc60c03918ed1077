//! A module responsible for initiating newly created cells.
//!
//! When new boundary cells are added to the simulation, a
//! [NewlyCreated](struct.NewlyCreated.html) component is attached. This provides
//! a signal that modules can use to identify which cells are new, and thus to
//! attach any required components. For instance, the `laser` module attaches a
//! [LaserFieldSampler](crate::laser::LaserFieldSampler) to new cells so that the
//! laser systems can deposit the pulse field at each cell's location.
//!
//! This module defines the [NewlyCreated](struct.NewlyCreated.html) component,
//! and also the [DeflagNewCellsSystem](struct.DeflagNewCellsSystem.html) which is
//! responsible for cleaning up these components each step.

use specs::prelude::*;

/// A marker component that indicates an entity has been `NewlyCreated`.
///
/// The main use of this component is to allow different modules to identify when
/// a cell has been created and to attach any appropriate components required.
#[derive(Component, Default)]
#[storage(NullStorage)]
pub struct NewlyCreated;

/// This system is responsible for removing the `NewlyCreated` marker component from cells.
///
/// The marker is originally added to cells when they are first added to the simulation,
/// which allows other systems to add any required components.
///
/// ## When should this system run?
///
/// This system runs *before* new cells are added to the world. Thus, any cells flagged
/// as `NewlyCreated` from the previous frame are deflagged before new flagged cells are
/// created. Be careful of properly maintaining the world at the correct time;
/// LazyUpdate is used, so changes to remove the `NewlyCreated` components will only be
/// enacted after the call to `world.maintain()`.
pub struct DeflagNewCellsSystem;

impl<'a> System<'a> for DeflagNewCellsSystem {
    type SystemData = (
        Entities<'a>,
        ReadStorage<'a, NewlyCreated>,
        Read<'a, LazyUpdate>,
    );

    fn run(&mut self, (ent, newly_created, updater): Self::SystemData) {
        for (ent, _newly_created) in (&ent, &newly_created).join() {
            updater.remove::<NewlyCreated>(ent);
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use specs::{Builder, DispatcherBuilder, World};

    /// Tests that the NewlyCreated component is properly removed via the DeflagNewCellsSystem.
    #[test]
    fn test_deflag_new_cells_system() {
        let mut test_world = World::new();
        test_world.register::<NewlyCreated>();

        let mut dispatcher = DispatcherBuilder::new()
            .with(DeflagNewCellsSystem, "deflag", &[])
            .build();
        dispatcher.setup(&mut test_world);

        let test_entity = test_world.create_entity().with(NewlyCreated).build();

        dispatcher.dispatch(&test_world);
        test_world.maintain();

        let flags = test_world.read_storage::<NewlyCreated>();
        assert_eq!(flags.contains(test_entity), false);
    }
}
