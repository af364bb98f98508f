//! Atom data structure

use crate::element::Element;
use crate::position::Position;

/// A single atom of a parsed geometry
///
/// Atoms are created by the file readers and are not changed once their
/// step has been built. The sequence number is 1-based and unique within the
/// owning [`Molecule`](crate::Molecule).
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Chemical element
    pub element: Element,

    /// Cartesian position in Angstroms
    pub position: Position,

    /// 1-based position of the atom in its molecule
    pub sequence_number: u32,

    /// Free-form tag; PDB backbone atoms carry their atom name (`N`, `CA`, `C`)
    pub annotation: Option<String>,
}

impl Atom {
    /// Create an atom with no annotation
    pub fn new(element: Element, position: Position, sequence_number: u32) -> Self {
        Atom {
            element,
            position,
            sequence_number,
            annotation: None,
        }
    }

    /// Attach an annotation
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    /// Whether the atom has been tagged as part of a protein backbone
    #[inline]
    pub fn is_backbone(&self) -> bool {
        matches!(self.annotation.as_deref(), Some("N" | "CA" | "C"))
    }
}
