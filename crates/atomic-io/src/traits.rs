//! Reader trait, file formats and read options
//!
//! Defines the common interface every geometry reader implements.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::path::Path;

use crate::error::IoResult;
use crate::sequence::StepSequence;

/// Supported file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileFormat {
    /// Protein Data Bank format
    Pdb,
    /// XYZ coordinate format (single geometry or trajectory)
    Xyz,
    /// Gaussian input deck (`.gjf`, `.com`)
    Gjf,
    /// Quantum chemistry output log (`.log`, `.qfi`)
    Log,
}

impl FileFormat {
    /// Every extension a file picker should offer
    pub const SUPPORTED_EXTENSIONS: [&'static str; 6] = ["pdb", "xyz", "gjf", "com", "log", "qfi"];

    /// Every format, in picker order
    pub const ALL: [FileFormat; 4] = [
        FileFormat::Pdb,
        FileFormat::Xyz,
        FileFormat::Gjf,
        FileFormat::Log,
    ];

    /// Get the file format from a file extension (case-insensitive)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdb" => Some(FileFormat::Pdb),
            "xyz" => Some(FileFormat::Xyz),
            "gjf" | "com" => Some(FileFormat::Gjf),
            "log" | "qfi" => Some(FileFormat::Log),
            _ => None,
        }
    }

    /// Get the file format from a path, looking through a trailing `.gz`
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension().and_then(|s| s.to_str())?;
        if ext.eq_ignore_ascii_case("gz") {
            return path
                .file_stem()
                .map(Path::new)
                .and_then(FileFormat::from_path);
        }
        FileFormat::from_extension(ext)
    }

    /// Extensions that map to this format
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            FileFormat::Pdb => &["pdb"],
            FileFormat::Xyz => &["xyz"],
            FileFormat::Gjf => &["gjf", "com"],
            FileFormat::Log => &["log", "qfi"],
        }
    }

    /// Get a human-readable name for the format
    pub fn name(&self) -> &'static str {
        match self {
            FileFormat::Pdb => "PDB",
            FileFormat::Xyz => "XYZ",
            FileFormat::Gjf => "Gaussian input",
            FileFormat::Log => "Gaussian log",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Trait for reading a step sequence from a source
pub trait StepReader {
    /// Read every step of the source
    ///
    /// Fails rather than returning an empty sequence.
    fn read_steps(&mut self) -> IoResult<StepSequence>;
}

/// Which Gaussian orientation block feeds the step sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// `Input orientation:` (and `Z-Matrix orientation:`) blocks
    #[default]
    Input,
    /// `Standard orientation:` blocks
    Standard,
}

impl Orientation {
    /// Whether a trimmed log line is the header of a block of this kind
    pub fn matches_header(&self, line: &str) -> bool {
        match self {
            Orientation::Input => line == "Input orientation:" || line == "Z-Matrix orientation:",
            Orientation::Standard => line == "Standard orientation:",
        }
    }
}

/// Options for reading geometry files
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Gaussian log orientation block to read
    pub orientation: Orientation,
    /// Prepend the echoed input geometry of a Gaussian log as its own step
    pub include_input_geometry: bool,
    /// Reject XYZ frames whose atom count differs from the declared count
    pub strict_frame_counts: bool,
    /// Extract PDB `HETATM` records alongside `ATOM` records
    pub include_hetero: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            orientation: Orientation::default(),
            include_input_geometry: false,
            strict_frame_counts: true,
            include_hetero: false,
        }
    }
}

impl ReadOptions {
    /// Create default read options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set which Gaussian orientation block to read
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set whether to prepend the echoed input geometry
    pub fn with_input_geometry(mut self, include: bool) -> Self {
        self.include_input_geometry = include;
        self
    }

    /// Set whether XYZ frame counts are enforced
    pub fn with_strict_frame_counts(mut self, strict: bool) -> Self {
        self.strict_frame_counts = strict;
        self
    }

    /// Set whether PDB `HETATM` records are read
    pub fn with_hetero(mut self, include: bool) -> Self {
        self.include_hetero = include;
        self
    }
}

/// Create a reader for the given format from a Read source
pub fn create_reader<R: Read + 'static>(
    reader: R,
    format: FileFormat,
    options: ReadOptions,
) -> Box<dyn StepReader> {
    match format {
        FileFormat::Pdb => Box::new(crate::pdb::PdbReader::new(reader, options)),
        FileFormat::Xyz => Box::new(crate::xyz::XyzReader::new(reader, options)),
        FileFormat::Gjf => Box::new(crate::gaussian::GjfReader::new(reader)),
        FileFormat::Log => Box::new(crate::gaussian::LogReader::new(reader, options)),
    }
}
