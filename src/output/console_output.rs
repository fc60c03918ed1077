//! Writes diagnostic output to the console window.

use specs::prelude::*;

use crate::cell::BoundaryCell;
use crate::clock::Step;

/// A system that writes diagnostic output to the console window.
pub struct ConsoleOutputSystem;

impl<'a> System<'a> for ConsoleOutputSystem {
    type SystemData = (ReadExpect<'a, Step>, ReadStorage<'a, BoundaryCell>);

    fn run(&mut self, (step, cells): Self::SystemData) {
        if step.n % 100 == 0 {
            let cell_number = (&cells).join().count();
            println!(
                "Step {}: injecting field at {} boundary cells.",
                step.n, cell_number
            );
        }
    }
}
