//! Components describing the field injection sites.
//!
//! The electromagnetic grid itself belongs to the consuming field solver; this
//! crate only sees the cells that lie on the injection boundary. Each such cell
//! is an entity carrying a [Position](struct.Position.html) and the
//! [BoundaryCell](struct.BoundaryCell.html) marker.

extern crate nalgebra;
use nalgebra::Vector3;
use specs::prelude::*;

/// Position of an entity in space, with respect to cartesian x,y,z axes.
///
/// SI units (metres)
#[derive(Clone, Copy)]
pub struct Position {
    pub pos: Vector3<f64>,
}
impl Component for Position {
    type Storage = VecStorage<Self>;
}
impl Default for Position {
    fn default() -> Self {
        Position {
            pos: Vector3::new(0.0, 0.0, 0.0),
        }
    }
}

/// A marker component for grid cells that receive the injected laser field.
///
/// The consuming simulation decides which cells form the injection boundary
/// and attaches this marker to them.
#[derive(Component, Default)]
#[storage(NullStorage)]
pub struct BoundaryCell;
