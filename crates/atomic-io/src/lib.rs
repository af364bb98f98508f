//! Geometry and trajectory readers
//!
//! This crate turns the text output of computational chemistry programs into
//! an ordered, non-empty sequence of geometry [`Step`](atomic_mol::Step)s:
//!
//! - **XYZ** - Single geometries and multi-frame trajectories
//! - **Gaussian input** (`.gjf`, `.com`) - Cartesian input decks
//! - **Gaussian log** (`.log`, `.qfi`) - Optimizations, frequencies, multi-job logs
//! - **PDB** - Protein atoms, backbone and residues
//!
//! # Quick Start
//!
//! ```rust
//! use std::path::Path;
//!
//! let text = "3\nWater\nO 0.0 0.0 0.0\nH 0.0 0.0 1.0\nH 0.0 1.0 0.0\n";
//! let steps = atomic_io::parse(Path::new("water.xyz"), text).unwrap();
//!
//! assert_eq!(steps.len(), 1);
//! assert!(steps.steps[0].is_final_step);
//! ```
//!
//! # Errors
//!
//! Every failure is an [`IoError`] whose [`kind`](IoError::kind) follows one
//! taxonomy and whose [`line`](IoError::line) is 1-based. A Gaussian job that
//! did not terminate normally is not an error: the steps are returned with a
//! [`ParseWarning::BadTermination`] attached.

pub mod builder;
pub mod compress;
pub mod detect;
pub mod error;
pub mod gaussian;
pub mod lines;
pub mod pdb;
pub mod sequence;
pub mod traits;
pub mod xyz;

// Re-exports
pub use builder::{StepFields, StepSequenceBuilder};
pub use detect::LogDialect;
pub use error::{ErrorKind, IoError, IoResult};
pub use gaussian::{JobInfo, Termination};
pub use sequence::{ParseWarning, StepSequence};
pub use traits::{create_reader, FileFormat, Orientation, ReadOptions, StepReader};

use std::path::Path;

/// Parse file content, choosing the reader from the file's extension
pub fn parse(path: &Path, content: &str) -> IoResult<StepSequence> {
    parse_with(path, content, &ReadOptions::default())
}

/// Parse file content with explicit options
pub fn parse_with(path: &Path, content: &str, options: &ReadOptions) -> IoResult<StepSequence> {
    let format = detect::detect_from_path(path)?;
    parse_str(content, format, options)
}

/// Parse a string with the given format
pub fn parse_str(content: &str, format: FileFormat, options: &ReadOptions) -> IoResult<StepSequence> {
    let bytes = content.as_bytes();
    match format {
        FileFormat::Pdb => pdb::PdbReader::new(bytes, options.clone()).read_steps(),
        FileFormat::Xyz => xyz::XyzReader::new(bytes, options.clone()).read_steps(),
        FileFormat::Gjf => gaussian::GjfReader::new(bytes).read_steps(),
        FileFormat::Log => gaussian::LogReader::new(bytes, options.clone()).read_steps(),
    }
}

/// Read a file from disk, auto-detecting the format
///
/// Files ending in `.gz` are decompressed transparently.
pub fn read_file(path: &Path) -> IoResult<StepSequence> {
    read_file_with(path, ReadOptions::default())
}

/// Read a file from disk with explicit options
pub fn read_file_with(path: &Path, options: ReadOptions) -> IoResult<StepSequence> {
    let format = detect::detect_from_path(path)?;
    read_file_format(path, format, options)
}

/// Read a file from disk with a specific format
pub fn read_file_format(path: &Path, format: FileFormat, options: ReadOptions) -> IoResult<StepSequence> {
    let file = compress::open_file(path)?;
    log::debug!("Reading {} as {}", path.display(), format);
    create_reader(file, format, options)
        .read_steps()
        .map_err(|e| match e {
            IoError::Io(io) if compress::is_gzip_path(path) => {
                IoError::Decompression(format!("{}: {}", path.display(), io))
            }
            other => other,
        })
}
