//! Writes output files containing per-cell field data.

use specs::prelude::*;
use std::fmt::Display;
use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::marker::PhantomData;
use std::path::Path;

extern crate byteorder;
use byteorder::{LittleEndian, WriteBytesExt};

use crate::cell::BoundaryCell;
use crate::clock::Step;

/// A system that writes simulation data to file.
///
/// This system writes per-cell data `C` to a file at a defined interval.
/// The data type `C` must be a [Component](specs::Component) and implement the
/// [Clone](std::clone::Clone) trait.
pub struct OutputSystem<C: Component + Clone, W: Write, F: Format<C, W>> {
    /// Number of integration steps between each file output.
    interval: u64,
    /// The [Write](std::io::Write)able output stream.
    stream: W,
    formatter: PhantomData<F>,
    marker: PhantomData<C>,
}

/// Creates a new [OutputSystem](struct.OutputSystem.html) to write per-cell
/// [Component](specs::Component) data according to the specified
/// [Format](trait.Format.html).
///
/// The interval specifies how often, in integration steps, the file is written.
///
/// For example, `new::<LaserFieldSampler, Text>("field.txt".to_string(), 10)`.
pub fn new<C, F>(file_name: String, interval: u64) -> OutputSystem<C, BufWriter<File>, F>
where
    C: Component + Clone,
    F: Format<C, BufWriter<File>>,
{
    let path = Path::new(&file_name);
    let display = path.display();
    let file = match File::create(&path) {
        Err(why) => panic!("couldn't open {}: {}", display, why),
        Ok(file) => file,
    };
    let writer = BufWriter::new(file);
    OutputSystem {
        interval,
        stream: writer,
        formatter: PhantomData,
        marker: PhantomData,
    }
}

impl<'a, C, W, F> System<'a> for OutputSystem<C, W, F>
where
    C: Component + Clone,
    W: Write,
    F: Format<C, W>,
{
    type SystemData = (
        Entities<'a>,
        ReadStorage<'a, C>,
        ReadStorage<'a, BoundaryCell>,
        ReadExpect<'a, Step>,
    );

    fn run(&mut self, (entities, data, cells, step): Self::SystemData) {
        if step.n % self.interval == 0 {
            let cell_number = (&cells).join().count();
            F::write_frame_header(&mut self.stream, step.n, cell_number);

            // write each cell
            for (data, _, ent) in (&data, &cells, &entities).join() {
                F::write_cell(&mut self.stream, ent, data.clone());
            }
        }
    }
}

/// A trait implemented for each file output format.
pub trait Format<C, W>
where
    C: Component + Clone,
    W: Write,
{
    /// Writes data indicating the start of a frame.
    fn write_frame_header(writer: &mut W, step: u64, cell_number: usize);

    /// Writes data associated with a cell.
    fn write_cell(writer: &mut W, cell: Entity, data: C);
}

/// Prints files in a [Format](trait.Format.html) that is human readable.
///
/// Each frame begins with the line `step n, cellNumber`, followed by one line
/// per cell in the format `gen id: data`, where `gen` and `id` are the
/// [Entity](specs::Entity) generation and id.
///
/// Components printed using text must implement the [Display](std::fmt::Display) trait.
pub struct Text {}
impl<C, W> Format<C, W> for Text
where
    C: Component + Clone + Display,
    W: Write,
{
    fn write_frame_header(writer: &mut W, step: u64, cell_number: usize) {
        match write!(writer, "step {:?}, {:?}\n", step, cell_number) {
            Err(why) => panic!("Could not write to output: {}", why),
            Ok(_) => (),
        };
    }

    fn write_cell(writer: &mut W, cell: Entity, data: C) {
        match write!(writer, "{:?},{:?}: {}\n", cell.gen().id(), cell.id(), data) {
            Err(why) => panic!("Could not write to output: {}", why),
            Ok(_) => (),
        }
    }
}

/// Trait implemented by components that can be serialised into a flat list of values.
pub trait BinaryData {
    fn data(&self) -> Vec<f64>;
}

impl BinaryData for crate::laser::LaserFieldSampler {
    fn data(&self) -> Vec<f64> {
        vec![self.field[0], self.field[1], self.field[2], self.phase]
    }
}

/// Prints files in a compact little-endian binary [Format](trait.Format.html).
///
/// Each frame consists of the step number and cell count as `u64`, followed by
/// the cell id as `u32` and the component payload as consecutive `f64` values.
pub struct Binary {}
impl<C, W> Format<C, W> for Binary
where
    C: Component + Clone + BinaryData,
    W: Write,
{
    fn write_frame_header(writer: &mut W, step: u64, cell_number: usize) {
        let result = writer
            .write_u64::<LittleEndian>(step)
            .and_then(|()| writer.write_u64::<LittleEndian>(cell_number as u64));
        if let Err(why) = result {
            panic!("Could not write to output: {}", why);
        }
    }

    fn write_cell(writer: &mut W, cell: Entity, data: C) {
        if let Err(why) = writer.write_u32::<LittleEndian>(cell.id()) {
            panic!("Could not write to output: {}", why);
        }
        for value in data.data() {
            if let Err(why) = writer.write_f64::<LittleEndian>(value) {
                panic!("Could not write to output: {}", why);
            }
        }
    }
}
