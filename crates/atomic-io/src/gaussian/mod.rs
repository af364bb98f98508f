//! Gaussian input and log readers

mod echo;
mod input;
mod job;
mod logfile;

pub use input::{element_from_label, GjfJob, GjfReader};
pub use job::{JobInfo, Termination};
pub use logfile::LogReader;

use std::io::Read;
use std::path::Path;

use crate::error::IoResult;
use crate::sequence::StepSequence;
use crate::traits::{ReadOptions, StepReader};

/// Read a Gaussian input file from a path
pub fn read_gjf(path: &Path) -> IoResult<StepSequence> {
    let file = crate::compress::open_file(path)?;
    GjfReader::new(file).read_steps()
}

/// Read a Gaussian input file from a string
pub fn read_gjf_str(content: &str) -> IoResult<StepSequence> {
    GjfReader::new(content.as_bytes()).read_steps()
}

/// Read a Gaussian log file from a path
pub fn read_log(path: &Path, options: ReadOptions) -> IoResult<StepSequence> {
    let file = crate::compress::open_file(path)?;
    LogReader::new(file, options).read_steps()
}

/// Read a Gaussian log file from a string
pub fn read_log_str(content: &str, options: ReadOptions) -> IoResult<StepSequence> {
    LogReader::new(content.as_bytes(), options).read_steps()
}

/// Read a Gaussian log file from a reader
pub fn read_log_from<R: Read>(reader: R, options: ReadOptions) -> IoResult<StepSequence> {
    LogReader::new(reader, options).read_steps()
}
