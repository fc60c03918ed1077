#[macro_use]
extern crate specs_derive;
pub mod cell;
pub mod clock;
pub mod config;
pub mod constant;
pub mod ecs;
pub mod initiate;
pub mod laser;
pub mod output;
