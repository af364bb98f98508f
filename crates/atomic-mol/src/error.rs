//! Error types for molecular data
//!
//! Provides error types for element lookup and molecule access.

use thiserror::Error;

/// Errors that can occur when working with molecular data
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MolError {
    /// Symbol not present in the element table
    #[error("Invalid element symbol: {0}")]
    InvalidElement(String),

    /// Atomic number not present in the element table
    #[error("Invalid atomic number: {0}")]
    InvalidAtomicNumber(u32),

    /// Atom sequence number does not exist in the molecule
    #[error("Atom {0} does not exist (molecule has {1} atoms)")]
    AtomOutOfBounds(u32, usize),
}

/// Result type for molecular operations
pub type MolResult<T> = Result<T, MolError>;
