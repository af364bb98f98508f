//! XYZ file format reader
//!
//! Reads single geometries and multi-frame trajectories.

mod parser;

pub use parser::XyzReader;

use std::io::Read;
use std::path::Path;

use crate::error::IoResult;
use crate::sequence::StepSequence;
use crate::traits::{ReadOptions, StepReader};

/// Read an XYZ file from a path
pub fn read_xyz(path: &Path) -> IoResult<StepSequence> {
    let file = crate::compress::open_file(path)?;
    XyzReader::new(file, ReadOptions::default()).read_steps()
}

/// Read an XYZ file from a string
pub fn read_xyz_str(content: &str) -> IoResult<StepSequence> {
    XyzReader::new(content.as_bytes(), ReadOptions::default()).read_steps()
}

/// Read an XYZ file from a reader
pub fn read_xyz_from<R: Read>(reader: R, options: ReadOptions) -> IoResult<StepSequence> {
    XyzReader::new(reader, options).read_steps()
}
