//! Geometry steps
//!
//! A `Step` is one geometry snapshot of a file: an optimization cycle, a
//! trajectory frame, an input geometry or a protein structure. Readers
//! produce an ordered sequence of steps; consumers treat them as read-only.

use crate::molecule::Molecule;
use crate::residue::Residue;

/// One molecular-geometry snapshot plus its metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// 1-based position in a trajectory; `None` for single-geometry formats
    pub step_number: Option<u32>,

    /// Atoms of the snapshot; `None` only for a blank placeholder step
    pub molecule: Option<Molecule>,

    /// Energy in Hartree, when the source reports one
    pub energy: Option<f64>,

    /// Vibrational frequencies in cm^-1
    pub frequencies: Option<Vec<f64>>,

    /// Set on the last step of a sequence that ended normally
    pub is_final_step: bool,

    /// 1-based job index within a multi-job file
    pub job_number: u32,

    /// Simulation timestep reported by a trajectory frame
    pub timestep: Option<i64>,

    /// Whether the geometry is an input geometry rather than a computed one
    pub is_input: Option<bool>,

    /// Whether the step was read from a protein structure file
    pub is_protein: bool,

    /// Backbone (N, CA, C) atoms of a protein step, in file order
    pub backbone: Option<Molecule>,

    /// Residues of a protein step
    pub residues: Option<Vec<Residue>>,
}

impl Default for Step {
    fn default() -> Self {
        Step {
            step_number: None,
            molecule: None,
            energy: None,
            frequencies: None,
            is_final_step: false,
            job_number: 1,
            timestep: None,
            is_input: None,
            is_protein: false,
            backbone: None,
            residues: None,
        }
    }
}

impl Step {
    /// Create a step holding `molecule`
    pub fn new(molecule: Molecule) -> Self {
        Step {
            molecule: Some(molecule),
            ..Default::default()
        }
    }

    /// Create the placeholder step of a new, blank document
    pub fn placeholder() -> Self {
        Step::default()
    }

    /// Number of atoms, 0 for a placeholder
    pub fn atom_count(&self) -> usize {
        self.molecule.as_ref().map_or(0, Molecule::len)
    }

    /// Append frequencies, creating the list on first use
    pub fn push_frequencies(&mut self, values: impl IntoIterator<Item = f64>) {
        self.frequencies.get_or_insert_with(Vec::new).extend(values);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;
    use crate::position::Position;

    #[test]
    fn test_step_defaults() {
        let step = Step::placeholder();
        assert!(step.molecule.is_none());
        assert_eq!(step.job_number, 1);
        assert!(!step.is_final_step);
        assert!(!step.is_protein);
        assert_eq!(step.atom_count(), 0);
    }

    #[test]
    fn test_push_frequencies() {
        let mut mol = Molecule::new();
        mol.add_atom(Element::Oxygen, Position::new(0.0, 0.0, 0.0));
        let mut step = Step::new(mol);
        assert_eq!(step.atom_count(), 1);

        step.push_frequencies([1600.5, 3650.0]);
        step.push_frequencies([3750.25]);
        assert_eq!(step.frequencies, Some(vec![1600.5, 3650.0, 3750.25]));
    }
}
