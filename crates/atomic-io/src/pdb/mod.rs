//! PDB file format reader
//!
//! Provides reading of Protein Data Bank (PDB) atom records.

mod parser;
mod records;

pub use parser::PdbReader;
pub use records::*;

use std::io::Read;
use std::path::Path;

use atomic_mol::SecondaryStructureAssigner;

use crate::error::IoResult;
use crate::sequence::StepSequence;
use crate::traits::{ReadOptions, StepReader};

/// Read a PDB file from a path
pub fn read_pdb(path: &Path) -> IoResult<StepSequence> {
    let file = crate::compress::open_file(path)?;
    PdbReader::new(file, ReadOptions::default()).read_steps()
}

/// Read a PDB file from a string
pub fn read_pdb_str(content: &str) -> IoResult<StepSequence> {
    PdbReader::new(content.as_bytes(), ReadOptions::default()).read_steps()
}

/// Read a PDB file from a reader
pub fn read_pdb_from<R: Read>(reader: R, options: ReadOptions) -> IoResult<StepSequence> {
    PdbReader::new(reader, options).read_steps()
}

/// Read a PDB file from a string and classify its residues
pub fn read_pdb_str_with(
    content: &str,
    options: ReadOptions,
    assigner: &dyn SecondaryStructureAssigner,
) -> IoResult<StepSequence> {
    let mut seq = PdbReader::new(content.as_bytes(), options).read_steps()?;
    assign_secondary_structure(&mut seq, assigner);
    Ok(seq)
}

/// Run a secondary structure assigner over every protein step
pub fn assign_secondary_structure(seq: &mut StepSequence, assigner: &dyn SecondaryStructureAssigner) {
    for step in seq.steps.iter_mut().filter(|s| s.is_protein) {
        if let (Some(molecule), Some(backbone), Some(residues)) = (
            step.molecule.as_ref(),
            step.backbone.as_ref(),
            step.residues.as_mut(),
        ) {
            assigner.assign(molecule, backbone, residues);
        }
    }
}
