//! Molecule container
//!
//! A `Molecule` is the ordered, append-only list of atoms of one geometry
//! snapshot. Sequence numbers are assigned on insertion, so they always run
//! `1..=len` in insertion order.

use crate::atom::Atom;
use crate::element::Element;
use crate::error::{MolError, MolResult};
use crate::position::Position;

/// Ordered collection of atoms belonging to one step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Molecule {
    atoms: Vec<Atom>,
}

impl Molecule {
    /// Create an empty molecule
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty molecule with room for `atoms` atoms
    pub fn with_capacity(atoms: usize) -> Self {
        Molecule {
            atoms: Vec::with_capacity(atoms),
        }
    }

    /// Append an atom and return its sequence number
    pub fn add_atom(&mut self, element: Element, position: Position) -> u32 {
        let sequence_number = self.next_sequence_number();
        self.atoms.push(Atom::new(element, position, sequence_number));
        sequence_number
    }

    /// Append an annotated atom and return its sequence number
    pub fn add_annotated_atom(
        &mut self,
        element: Element,
        position: Position,
        annotation: impl Into<String>,
    ) -> u32 {
        let sequence_number = self.next_sequence_number();
        self.atoms
            .push(Atom::new(element, position, sequence_number).with_annotation(annotation));
        sequence_number
    }

    #[inline]
    fn next_sequence_number(&self) -> u32 {
        self.atoms.len() as u32 + 1
    }

    /// Get an atom by its 1-based sequence number
    pub fn get(&self, sequence_number: u32) -> MolResult<&Atom> {
        sequence_number
            .checked_sub(1)
            .and_then(|i| self.atoms.get(i as usize))
            .ok_or(MolError::AtomOutOfBounds(sequence_number, self.atoms.len()))
    }

    /// Number of atoms
    #[inline]
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Whether the molecule has no atoms
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Iterate over atoms in insertion order
    pub fn atoms(&self) -> impl Iterator<Item = &Atom> {
        self.atoms.iter()
    }

    /// Geometric center of all atoms, `None` for an empty molecule
    pub fn centroid(&self) -> Option<Position> {
        if self.atoms.is_empty() {
            return None;
        }
        let sum = self
            .atoms
            .iter()
            .fold(Position::new(0.0, 0.0, 0.0), |acc, atom| acc + atom.position);
        Some(sum * (1.0 / self.atoms.len() as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_numbers_follow_insertion_order() {
        let mut mol = Molecule::new();
        assert_eq!(mol.add_atom(Element::Oxygen, Position::new(0.0, 0.0, 0.0)), 1);
        assert_eq!(mol.add_atom(Element::Hydrogen, Position::new(0.0, 0.0, 1.0)), 2);
        assert_eq!(
            mol.add_annotated_atom(Element::Carbon, Position::new(1.0, 0.0, 0.0), "CA"),
            3
        );

        let numbers: Vec<u32> = mol.atoms().map(|a| a.sequence_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(mol.get(3).unwrap().annotation.as_deref(), Some("CA"));
        assert!(mol.get(3).unwrap().is_backbone());
        assert!(!mol.get(1).unwrap().is_backbone());
    }

    #[test]
    fn test_get_out_of_bounds() {
        let mut mol = Molecule::new();
        mol.add_atom(Element::Helium, Position::new(0.0, 0.0, 0.0));
        assert_eq!(mol.get(0), Err(MolError::AtomOutOfBounds(0, 1)));
        assert_eq!(mol.get(2), Err(MolError::AtomOutOfBounds(2, 1)));
    }

    #[test]
    fn test_centroid() {
        let mut mol = Molecule::new();
        assert!(mol.centroid().is_none());
        mol.add_atom(Element::Carbon, Position::new(0.0, 0.0, 0.0));
        mol.add_atom(Element::Carbon, Position::new(2.0, 4.0, -2.0));
        let c = mol.centroid().unwrap();
        assert!((c.x - 1.0).abs() < 1e-12);
        assert!((c.y - 2.0).abs() < 1e-12);
        assert!((c.z + 1.0).abs() < 1e-12);
    }
}
