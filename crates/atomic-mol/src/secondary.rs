//! Secondary structure types
//!
//! The readers never classify residues themselves. Classification is
//! delegated to a [`SecondaryStructureAssigner`] supplied by the caller.

use serde::{Deserialize, Serialize};

use crate::molecule::Molecule;
use crate::residue::Residue;

/// Secondary structure type for protein residues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SecondaryStructure {
    /// Loop, turn, or coil (no regular secondary structure)
    #[default]
    Loop,
    /// Alpha helix
    Helix,
    /// Beta sheet/strand
    Sheet,
}

/// External collaborator that classifies residues of a protein step
///
/// Implementations fill in [`Residue::structure`]. `molecule` holds every
/// extracted atom and `backbone` the N/CA/C subset in file order.
pub trait SecondaryStructureAssigner {
    /// Assign a structure to each residue
    fn assign(&self, molecule: &Molecule, backbone: &Molecule, residues: &mut [Residue]);
}
