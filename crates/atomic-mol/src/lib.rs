//! Atomic molecular data structures
//!
//! This crate provides the data model shared by the Atomic file readers and
//! the viewer that renders their output:
//!
//! - [`Element`] - Static element table (symbol, name, atomic number)
//! - [`Position`] - Cartesian position (a `lin_alg` double-precision vector)
//! - [`Atom`] - Element, position, 1-based sequence number and annotation
//! - [`Molecule`] - Ordered, append-only list of atoms
//! - [`Step`] - One geometry snapshot with energy, frequencies and job metadata
//! - [`Residue`] - Protein residue grouping, classified by an external
//!   [`SecondaryStructureAssigner`]
//!
//! # Example
//!
//! ```rust
//! use atomic_mol::{Element, Molecule, Position, Step};
//!
//! let mut water = Molecule::new();
//! water.add_atom(Element::Oxygen, Position::new(0.0, 0.0, 0.0));
//! water.add_atom(Element::Hydrogen, Position::new(0.0, 0.0, 1.0));
//! water.add_atom(Element::Hydrogen, Position::new(0.0, 1.0, 0.0));
//!
//! let step = Step::new(water);
//! assert_eq!(step.atom_count(), 3);
//! ```

mod atom;
mod element;
mod error;
mod molecule;
pub mod position;
mod residue;
mod secondary;
mod step;

pub use atom::Atom;
pub use element::{Element, ELEMENTS, ELEMENT_COUNT};
pub use error::{MolError, MolResult};
pub use molecule::Molecule;
pub use position::{distance, Position};
pub use residue::{Residue, ResidueKey};
pub use secondary::{SecondaryStructure, SecondaryStructureAssigner};
pub use step::Step;
