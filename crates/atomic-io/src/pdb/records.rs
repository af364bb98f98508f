//! PDB record types
//!
//! Atom records are split on whitespace. The column layout is fixed once per
//! file from the token count of its first atom record.

use phf::phf_set;

use atomic_mol::{Element, Position, ResidueKey};

/// Water residue names, never read as protein atoms
static WATER_NAMES: phf::Set<&str> = phf_set! {
    "HOH", "WAT", "H2O", "DOD", "TIP", "TIP3", "SPC", "SOL",
};

/// Backbone atom names
static BACKBONE_NAMES: phf::Set<&str> = phf_set! { "N", "CA", "C" };

/// Check if a residue name is water
pub fn is_water(resn: &str) -> bool {
    WATER_NAMES.contains(resn)
}

/// Check if an atom name is a backbone atom name
pub fn is_backbone_name(name: &str) -> bool {
    BACKBONE_NAMES.contains(name)
}

/// Token positions of an atom record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Index of the x coordinate
    pub coords: usize,
    /// Index of the chain identifier, if the layout has one
    pub chain: Option<usize>,
    /// Index of the residue sequence number
    pub resv: usize,
}

impl ColumnLayout {
    /// `ATOM serial name resn chain resv x y z occ b element`
    pub const WITH_CHAIN: ColumnLayout = ColumnLayout {
        coords: 6,
        chain: Some(4),
        resv: 5,
    };

    /// `ATOM serial name resn resv x y z occ b`
    pub const WITHOUT_CHAIN: ColumnLayout = ColumnLayout {
        coords: 5,
        chain: None,
        resv: 4,
    };

    /// Layout for a record with `count` tokens
    pub fn from_token_count(count: usize) -> Option<Self> {
        match count {
            12 => Some(Self::WITH_CHAIN),
            10 => Some(Self::WITHOUT_CHAIN),
            _ => None,
        }
    }

    /// Fewest tokens a record needs under this layout
    pub fn min_tokens(&self) -> usize {
        self.coords + 3
    }
}

/// Parsed ATOM or HETATM record
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    /// Record type: true for HETATM, false for ATOM
    pub hetatm: bool,
    /// Atom name (`CA`, `OG1`, ...)
    pub name: String,
    /// Residue name (3 characters)
    pub resn: String,
    /// Chain identifier, empty when the layout has none
    pub chain: String,
    /// Residue sequence number
    pub resv: i32,
    /// Cartesian position (Angstroms)
    pub position: Position,
}

/// Why a record could not be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Fewer tokens than the layout needs
    TooShort(usize),
    /// A numeric field failed to parse
    Invalid(&'static str, String),
}

impl std::fmt::Display for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordError::TooShort(n) => write!(f, "Atom record has only {} fields", n),
            RecordError::Invalid(what, token) => write!(f, "Invalid {} '{}'", what, token),
        }
    }
}

impl AtomRecord {
    /// Parse whitespace-split tokens of an `ATOM`/`HETATM` line
    pub fn parse(tokens: &[&str], layout: ColumnLayout) -> Result<Self, RecordError> {
        if tokens.len() < layout.min_tokens() {
            return Err(RecordError::TooShort(tokens.len()));
        }

        let field = |i: usize, what: &'static str| -> Result<f64, RecordError> {
            tokens[i]
                .parse()
                .map_err(|_| RecordError::Invalid(what, tokens[i].to_string()))
        };
        let resv = tokens[layout.resv]
            .parse::<i32>()
            .map_err(|_| RecordError::Invalid("residue number", tokens[layout.resv].to_string()))?;

        Ok(AtomRecord {
            hetatm: tokens[0] == "HETATM",
            name: tokens[2].to_string(),
            resn: tokens[3].to_string(),
            chain: layout
                .chain
                .map(|i| tokens[i].to_string())
                .unwrap_or_default(),
            resv,
            position: Position::new(
                field(layout.coords, "x coordinate")?,
                field(layout.coords + 1, "y coordinate")?,
                field(layout.coords + 2, "z coordinate")?,
            ),
        })
    }

    /// Element from the first letter of the atom name
    pub fn element(&self) -> Option<Element> {
        element_from_atom_name(&self.name)
    }

    /// Residue this atom belongs to
    pub fn residue_key(&self) -> ResidueKey {
        ResidueKey::new(self.chain.clone(), self.resn.clone(), self.resv)
    }

    /// Whether this is an N, CA or C atom
    pub fn is_backbone(&self) -> bool {
        !self.hetatm && is_backbone_name(&self.name)
    }
}

/// Resolve an element from the first letter of a PDB atom name
///
/// Leading digits are skipped (`1HB` is hydrogen). Only the first letter is
/// used, so `CA` is carbon.
pub fn element_from_atom_name(name: &str) -> Option<Element> {
    let first = name.chars().find(|c| c.is_ascii_alphabetic())?;
    let mut buf = [0u8; 4];
    Element::from_symbol(first.to_ascii_uppercase().encode_utf8(&mut buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_from_token_count() {
        assert_eq!(ColumnLayout::from_token_count(12), Some(ColumnLayout::WITH_CHAIN));
        assert_eq!(ColumnLayout::from_token_count(10), Some(ColumnLayout::WITHOUT_CHAIN));
        assert_eq!(ColumnLayout::from_token_count(11), None);
    }

    #[test]
    fn test_parse_record_with_chain() {
        let line = "ATOM      2  CA  ALA A   1      11.639   6.071  -5.147  1.00 19.61           C";
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let record = AtomRecord::parse(&tokens, ColumnLayout::WITH_CHAIN).unwrap();
        assert_eq!(record.name, "CA");
        assert_eq!(record.resn, "ALA");
        assert_eq!(record.chain, "A");
        assert_eq!(record.resv, 1);
        assert_eq!(record.position, Position::new(11.639, 6.071, -5.147));
        assert_eq!(record.element(), Some(Element::Carbon));
        assert!(record.is_backbone());
        assert_eq!(record.residue_key().to_string(), "A/ALA`1");
    }

    #[test]
    fn test_parse_record_without_chain() {
        let line = "ATOM      5  CB  ALA     1      12.000   7.000  -4.000  1.00 20.00";
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let record = AtomRecord::parse(&tokens, ColumnLayout::WITHOUT_CHAIN).unwrap();
        assert_eq!(record.chain, "");
        assert_eq!(record.position, Position::new(12.0, 7.0, -4.0));
        assert!(!record.is_backbone());
    }

    #[test]
    fn test_parse_record_errors() {
        let tokens = ["ATOM", "1", "N", "ALA", "A", "1", "1.0", "x", "2.0"];
        assert_eq!(
            AtomRecord::parse(&tokens, ColumnLayout::WITH_CHAIN),
            Err(RecordError::Invalid("y coordinate", "x".to_string()))
        );
        assert_eq!(
            AtomRecord::parse(&tokens[..5], ColumnLayout::WITH_CHAIN),
            Err(RecordError::TooShort(5))
        );
    }

    #[test]
    fn test_element_from_atom_name() {
        assert_eq!(element_from_atom_name("N"), Some(Element::Nitrogen));
        assert_eq!(element_from_atom_name("OG1"), Some(Element::Oxygen));
        assert_eq!(element_from_atom_name("1HB"), Some(Element::Hydrogen));
        assert_eq!(element_from_atom_name("SD"), Some(Element::Sulfur));
        assert_eq!(element_from_atom_name("123"), None);
    }

    #[test]
    fn test_water_names() {
        assert!(is_water("HOH"));
        assert!(is_water("WAT"));
        assert!(!is_water("ALA"));
    }
}
