//! Residue grouping for protein structures

use serde::{Deserialize, Serialize};

use crate::secondary::SecondaryStructure;

/// Key for uniquely identifying a residue within a structure
///
/// A residue is identified by its chain, name and sequence number. Files
/// without a chain column use an empty chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResidueKey {
    /// Chain identifier
    pub chain: String,
    /// Residue name (e.g., "ALA", "GLY")
    pub resn: String,
    /// Residue sequence number
    pub resv: i32,
}

impl ResidueKey {
    /// Create a new residue key
    pub fn new(chain: impl Into<String>, resn: impl Into<String>, resv: i32) -> Self {
        ResidueKey {
            chain: chain.into(),
            resn: resn.into(),
            resv,
        }
    }
}

impl std::fmt::Display for ResidueKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.chain.is_empty() {
            write!(f, "{}`{}", self.resn, self.resv)
        } else {
            write!(f, "{}/{}`{}", self.chain, self.resn, self.resv)
        }
    }
}

/// One residue of a protein step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Residue {
    /// Residue identity
    pub key: ResidueKey,
    /// Sequence numbers of the residue's atoms in the step molecule
    pub atoms: Vec<u32>,
    /// Classification, `None` until an assigner has run
    pub structure: Option<SecondaryStructure>,
}

impl Residue {
    /// Create a residue with no atoms
    pub fn new(key: ResidueKey) -> Self {
        Residue {
            key,
            atoms: Vec::new(),
            structure: None,
        }
    }
}
