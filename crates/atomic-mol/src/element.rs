//! Chemical element table
//!
//! Provides the `Element` enum for the elements the viewer can display
//! (hydrogen through radon), with symbols, display names, atomic numbers and
//! the double-bond eligibility flag used when perceiving bond orders.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::MolError;

/// Chemical element, discriminant equal to the atomic number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Element {
    /// Hydrogen (atomic number 1)
    Hydrogen = 1,
    /// Helium (atomic number 2)
    Helium = 2,
    /// Lithium (atomic number 3)
    Lithium = 3,
    /// Beryllium (atomic number 4)
    Beryllium = 4,
    /// Boron (atomic number 5)
    Boron = 5,
    /// Carbon (atomic number 6)
    Carbon = 6,
    /// Nitrogen (atomic number 7)
    Nitrogen = 7,
    /// Oxygen (atomic number 8)
    Oxygen = 8,
    /// Fluorine (atomic number 9)
    Fluorine = 9,
    /// Neon (atomic number 10)
    Neon = 10,
    /// Sodium (atomic number 11)
    Sodium = 11,
    /// Magnesium (atomic number 12)
    Magnesium = 12,
    /// Aluminum (atomic number 13)
    Aluminum = 13,
    /// Silicon (atomic number 14)
    Silicon = 14,
    /// Phosphorus (atomic number 15)
    Phosphorus = 15,
    /// Sulfur (atomic number 16)
    Sulfur = 16,
    /// Chlorine (atomic number 17)
    Chlorine = 17,
    /// Argon (atomic number 18)
    Argon = 18,
    /// Potassium (atomic number 19)
    Potassium = 19,
    /// Calcium (atomic number 20)
    Calcium = 20,
    /// Scandium (atomic number 21)
    Scandium = 21,
    /// Titanium (atomic number 22)
    Titanium = 22,
    /// Vanadium (atomic number 23)
    Vanadium = 23,
    /// Chromium (atomic number 24)
    Chromium = 24,
    /// Manganese (atomic number 25)
    Manganese = 25,
    /// Iron (atomic number 26)
    Iron = 26,
    /// Cobalt (atomic number 27)
    Cobalt = 27,
    /// Nickel (atomic number 28)
    Nickel = 28,
    /// Copper (atomic number 29)
    Copper = 29,
    /// Zinc (atomic number 30)
    Zinc = 30,
    /// Gallium (atomic number 31)
    Gallium = 31,
    /// Germanium (atomic number 32)
    Germanium = 32,
    /// Arsenic (atomic number 33)
    Arsenic = 33,
    /// Selenium (atomic number 34)
    Selenium = 34,
    /// Bromine (atomic number 35)
    Bromine = 35,
    /// Krypton (atomic number 36)
    Krypton = 36,
    /// Rubidium (atomic number 37)
    Rubidium = 37,
    /// Strontium (atomic number 38)
    Strontium = 38,
    /// Yttrium (atomic number 39)
    Yttrium = 39,
    /// Zirconium (atomic number 40)
    Zirconium = 40,
    /// Niobium (atomic number 41)
    Niobium = 41,
    /// Molybdenum (atomic number 42)
    Molybdenum = 42,
    /// Technetium (atomic number 43)
    Technetium = 43,
    /// Ruthenium (atomic number 44)
    Ruthenium = 44,
    /// Rhodium (atomic number 45)
    Rhodium = 45,
    /// Palladium (atomic number 46)
    Palladium = 46,
    /// Silver (atomic number 47)
    Silver = 47,
    /// Cadmium (atomic number 48)
    Cadmium = 48,
    /// Indium (atomic number 49)
    Indium = 49,
    /// Tin (atomic number 50)
    Tin = 50,
    /// Antimony (atomic number 51)
    Antimony = 51,
    /// Tellurium (atomic number 52)
    Tellurium = 52,
    /// Iodine (atomic number 53)
    Iodine = 53,
    /// Xenon (atomic number 54)
    Xenon = 54,
    /// Cesium (atomic number 55)
    Cesium = 55,
    /// Barium (atomic number 56)
    Barium = 56,
    /// Lanthanum (atomic number 57)
    Lanthanum = 57,
    /// Cerium (atomic number 58)
    Cerium = 58,
    /// Praseodymium (atomic number 59)
    Praseodymium = 59,
    /// Neodymium (atomic number 60)
    Neodymium = 60,
    /// Promethium (atomic number 61)
    Promethium = 61,
    /// Samarium (atomic number 62)
    Samarium = 62,
    /// Europium (atomic number 63)
    Europium = 63,
    /// Gadolinium (atomic number 64)
    Gadolinium = 64,
    /// Terbium (atomic number 65)
    Terbium = 65,
    /// Dysprosium (atomic number 66)
    Dysprosium = 66,
    /// Holmium (atomic number 67)
    Holmium = 67,
    /// Erbium (atomic number 68)
    Erbium = 68,
    /// Thulium (atomic number 69)
    Thulium = 69,
    /// Ytterbium (atomic number 70)
    Ytterbium = 70,
    /// Lutetium (atomic number 71)
    Lutetium = 71,
    /// Hafnium (atomic number 72)
    Hafnium = 72,
    /// Tantalum (atomic number 73)
    Tantalum = 73,
    /// Tungsten (atomic number 74)
    Tungsten = 74,
    /// Rhenium (atomic number 75)
    Rhenium = 75,
    /// Osmium (atomic number 76)
    Osmium = 76,
    /// Iridium (atomic number 77)
    Iridium = 77,
    /// Platinum (atomic number 78)
    Platinum = 78,
    /// Gold (atomic number 79)
    Gold = 79,
    /// Mercury (atomic number 80)
    Mercury = 80,
    /// Thallium (atomic number 81)
    Thallium = 81,
    /// Lead (atomic number 82)
    Lead = 82,
    /// Bismuth (atomic number 83)
    Bismuth = 83,
    /// Polonium (atomic number 84)
    Polonium = 84,
    /// Astatine (atomic number 85)
    Astatine = 85,
    /// Radon (atomic number 86)
    Radon = 86,
}

/// Element data table entry
struct ElementData {
    name: &'static str,
    symbol: &'static str,
    can_double_bond: bool,
}

/// Element data table indexed by `atomic_number - 1`
static ELEMENT_DATA: &[ElementData] = &[
    ElementData { name: "Hydrogen", symbol: "H", can_double_bond: false },            // 1
    ElementData { name: "Helium", symbol: "He", can_double_bond: false },             // 2
    ElementData { name: "Lithium", symbol: "Li", can_double_bond: false },            // 3
    ElementData { name: "Beryllium", symbol: "Be", can_double_bond: false },          // 4
    ElementData { name: "Boron", symbol: "B", can_double_bond: false },               // 5
    ElementData { name: "Carbon", symbol: "C", can_double_bond: true },               // 6
    ElementData { name: "Nitrogen", symbol: "N", can_double_bond: true },             // 7
    ElementData { name: "Oxygen", symbol: "O", can_double_bond: true },               // 8
    ElementData { name: "Fluorine", symbol: "F", can_double_bond: false },            // 9
    ElementData { name: "Neon", symbol: "Ne", can_double_bond: false },               // 10
    ElementData { name: "Sodium", symbol: "Na", can_double_bond: false },             // 11
    ElementData { name: "Magnesium", symbol: "Mg", can_double_bond: false },          // 12
    ElementData { name: "Aluminum", symbol: "Al", can_double_bond: false },           // 13
    ElementData { name: "Silicon", symbol: "Si", can_double_bond: false },            // 14
    ElementData { name: "Phosphorus", symbol: "P", can_double_bond: true },           // 15
    ElementData { name: "Sulfur", symbol: "S", can_double_bond: true },               // 16
    ElementData { name: "Chlorine", symbol: "Cl", can_double_bond: false },           // 17
    ElementData { name: "Argon", symbol: "Ar", can_double_bond: false },              // 18
    ElementData { name: "Potassium", symbol: "K", can_double_bond: false },           // 19
    ElementData { name: "Calcium", symbol: "Ca", can_double_bond: false },            // 20
    ElementData { name: "Scandium", symbol: "Sc", can_double_bond: false },           // 21
    ElementData { name: "Titanium", symbol: "Ti", can_double_bond: false },           // 22
    ElementData { name: "Vanadium", symbol: "V", can_double_bond: false },            // 23
    ElementData { name: "Chromium", symbol: "Cr", can_double_bond: false },           // 24
    ElementData { name: "Manganese", symbol: "Mn", can_double_bond: false },          // 25
    ElementData { name: "Iron", symbol: "Fe", can_double_bond: false },               // 26
    ElementData { name: "Cobalt", symbol: "Co", can_double_bond: false },             // 27
    ElementData { name: "Nickel", symbol: "Ni", can_double_bond: false },             // 28
    ElementData { name: "Copper", symbol: "Cu", can_double_bond: false },             // 29
    ElementData { name: "Zinc", symbol: "Zn", can_double_bond: false },               // 30
    ElementData { name: "Gallium", symbol: "Ga", can_double_bond: false },            // 31
    ElementData { name: "Germanium", symbol: "Ge", can_double_bond: false },          // 32
    ElementData { name: "Arsenic", symbol: "As", can_double_bond: false },            // 33
    ElementData { name: "Selenium", symbol: "Se", can_double_bond: true },            // 34
    ElementData { name: "Bromine", symbol: "Br", can_double_bond: false },            // 35
    ElementData { name: "Krypton", symbol: "Kr", can_double_bond: false },            // 36
    ElementData { name: "Rubidium", symbol: "Rb", can_double_bond: false },           // 37
    ElementData { name: "Strontium", symbol: "Sr", can_double_bond: false },          // 38
    ElementData { name: "Yttrium", symbol: "Y", can_double_bond: false },             // 39
    ElementData { name: "Zirconium", symbol: "Zr", can_double_bond: false },          // 40
    ElementData { name: "Niobium", symbol: "Nb", can_double_bond: false },            // 41
    ElementData { name: "Molybdenum", symbol: "Mo", can_double_bond: false },         // 42
    ElementData { name: "Technetium", symbol: "Tc", can_double_bond: false },         // 43
    ElementData { name: "Ruthenium", symbol: "Ru", can_double_bond: false },          // 44
    ElementData { name: "Rhodium", symbol: "Rh", can_double_bond: false },            // 45
    ElementData { name: "Palladium", symbol: "Pd", can_double_bond: false },          // 46
    ElementData { name: "Silver", symbol: "Ag", can_double_bond: false },             // 47
    ElementData { name: "Cadmium", symbol: "Cd", can_double_bond: false },            // 48
    ElementData { name: "Indium", symbol: "In", can_double_bond: false },             // 49
    ElementData { name: "Tin", symbol: "Sn", can_double_bond: false },                // 50
    ElementData { name: "Antimony", symbol: "Sb", can_double_bond: false },           // 51
    ElementData { name: "Tellurium", symbol: "Te", can_double_bond: false },          // 52
    ElementData { name: "Iodine", symbol: "I", can_double_bond: false },              // 53
    ElementData { name: "Xenon", symbol: "Xe", can_double_bond: false },              // 54
    ElementData { name: "Cesium", symbol: "Cs", can_double_bond: false },             // 55
    ElementData { name: "Barium", symbol: "Ba", can_double_bond: false },             // 56
    ElementData { name: "Lanthanum", symbol: "La", can_double_bond: false },          // 57
    ElementData { name: "Cerium", symbol: "Ce", can_double_bond: false },             // 58
    ElementData { name: "Praseodymium", symbol: "Pr", can_double_bond: false },       // 59
    ElementData { name: "Neodymium", symbol: "Nd", can_double_bond: false },          // 60
    ElementData { name: "Promethium", symbol: "Pm", can_double_bond: false },         // 61
    ElementData { name: "Samarium", symbol: "Sm", can_double_bond: false },           // 62
    ElementData { name: "Europium", symbol: "Eu", can_double_bond: false },           // 63
    ElementData { name: "Gadolinium", symbol: "Gd", can_double_bond: false },         // 64
    ElementData { name: "Terbium", symbol: "Tb", can_double_bond: false },            // 65
    ElementData { name: "Dysprosium", symbol: "Dy", can_double_bond: false },         // 66
    ElementData { name: "Holmium", symbol: "Ho", can_double_bond: false },            // 67
    ElementData { name: "Erbium", symbol: "Er", can_double_bond: false },             // 68
    ElementData { name: "Thulium", symbol: "Tm", can_double_bond: false },            // 69
    ElementData { name: "Ytterbium", symbol: "Yb", can_double_bond: false },          // 70
    ElementData { name: "Lutetium", symbol: "Lu", can_double_bond: false },           // 71
    ElementData { name: "Hafnium", symbol: "Hf", can_double_bond: false },            // 72
    ElementData { name: "Tantalum", symbol: "Ta", can_double_bond: false },           // 73
    ElementData { name: "Tungsten", symbol: "W", can_double_bond: false },            // 74
    ElementData { name: "Rhenium", symbol: "Re", can_double_bond: false },            // 75
    ElementData { name: "Osmium", symbol: "Os", can_double_bond: false },             // 76
    ElementData { name: "Iridium", symbol: "Ir", can_double_bond: false },            // 77
    ElementData { name: "Platinum", symbol: "Pt", can_double_bond: false },           // 78
    ElementData { name: "Gold", symbol: "Au", can_double_bond: false },               // 79
    ElementData { name: "Mercury", symbol: "Hg", can_double_bond: false },            // 80
    ElementData { name: "Thallium", symbol: "Tl", can_double_bond: false },           // 81
    ElementData { name: "Lead", symbol: "Pb", can_double_bond: false },               // 82
    ElementData { name: "Bismuth", symbol: "Bi", can_double_bond: false },            // 83
    ElementData { name: "Polonium", symbol: "Po", can_double_bond: false },           // 84
    ElementData { name: "Astatine", symbol: "At", can_double_bond: false },           // 85
    ElementData { name: "Radon", symbol: "Rn", can_double_bond: false },              // 86
];

/// Every supported element, ordered by atomic number
pub static ELEMENTS: [Element; ELEMENT_COUNT] = [
    Element::Hydrogen, Element::Helium, Element::Lithium, Element::Beryllium,
    Element::Boron, Element::Carbon, Element::Nitrogen, Element::Oxygen,
    Element::Fluorine, Element::Neon, Element::Sodium, Element::Magnesium,
    Element::Aluminum, Element::Silicon, Element::Phosphorus, Element::Sulfur,
    Element::Chlorine, Element::Argon, Element::Potassium, Element::Calcium,
    Element::Scandium, Element::Titanium, Element::Vanadium, Element::Chromium,
    Element::Manganese, Element::Iron, Element::Cobalt, Element::Nickel,
    Element::Copper, Element::Zinc, Element::Gallium, Element::Germanium,
    Element::Arsenic, Element::Selenium, Element::Bromine, Element::Krypton,
    Element::Rubidium, Element::Strontium, Element::Yttrium, Element::Zirconium,
    Element::Niobium, Element::Molybdenum, Element::Technetium, Element::Ruthenium,
    Element::Rhodium, Element::Palladium, Element::Silver, Element::Cadmium,
    Element::Indium, Element::Tin, Element::Antimony, Element::Tellurium,
    Element::Iodine, Element::Xenon, Element::Cesium, Element::Barium,
    Element::Lanthanum, Element::Cerium, Element::Praseodymium, Element::Neodymium,
    Element::Promethium, Element::Samarium, Element::Europium, Element::Gadolinium,
    Element::Terbium, Element::Dysprosium, Element::Holmium, Element::Erbium,
    Element::Thulium, Element::Ytterbium, Element::Lutetium, Element::Hafnium,
    Element::Tantalum, Element::Tungsten, Element::Rhenium, Element::Osmium,
    Element::Iridium, Element::Platinum, Element::Gold, Element::Mercury,
    Element::Thallium, Element::Lead, Element::Bismuth, Element::Polonium,
    Element::Astatine, Element::Radon,
];
/// Number of elements in the table
pub const ELEMENT_COUNT: usize = 86;

/// Static symbol lookup map for O(1) symbol-to-element conversion.
/// Initialized lazily on first access.
static SYMBOL_MAP: OnceLock<AHashMap<&'static str, Element>> = OnceLock::new();

fn symbol_map() -> &'static AHashMap<&'static str, Element> {
    SYMBOL_MAP.get_or_init(|| {
        ELEMENTS
            .iter()
            .map(|&element| (element.symbol(), element))
            .collect()
    })
}

impl Element {
    /// Create an element from its atomic number
    ///
    /// Returns `None` for 0 and for anything past the end of the table.
    #[inline]
    pub fn from_atomic_number(n: u32) -> Option<Self> {
        let index = usize::try_from(n).ok()?.checked_sub(1)?;
        ELEMENTS.get(index).copied()
    }

    /// Create an element from its symbol
    ///
    /// Matching is exact and case-sensitive, following chemistry notation:
    /// `"Na"` is sodium, `"NA"` and `"na"` are not found.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        symbol_map().get(symbol).copied()
    }

    /// Resolve a coordinate-file token that is either a symbol or an
    /// atomic number written as an integer (`"O"` or `"8"`)
    pub fn from_token(token: &str) -> Option<Self> {
        if token.bytes().all(|b| b.is_ascii_digit()) {
            return token.parse().ok().and_then(Element::from_atomic_number);
        }
        Element::from_symbol(token)
    }

    /// Get the atomic number
    #[inline]
    pub const fn atomic_number(&self) -> u32 {
        *self as u32
    }

    #[inline]
    fn data(&self) -> &'static ElementData {
        &ELEMENT_DATA[*self as usize - 1]
    }

    /// Get the element symbol (e.g., "H", "He", "Li")
    #[inline]
    pub fn symbol(&self) -> &'static str {
        self.data().symbol
    }

    /// Get the display name (e.g., "Hydrogen", "Helium", "Lithium")
    #[inline]
    pub fn name(&self) -> &'static str {
        self.data().name
    }

    /// Whether bonds to this element may be drawn as double bonds
    #[inline]
    pub fn can_double_bond(&self) -> bool {
        self.data().can_double_bond
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Element {
    type Err = MolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Element::from_symbol(s).ok_or_else(|| MolError::InvalidElement(s.to_string()))
    }
}

impl From<Element> for u32 {
    fn from(e: Element) -> Self {
        e.atomic_number()
    }
}

impl TryFrom<u32> for Element {
    type Error = MolError;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        Element::from_atomic_number(n).ok_or(MolError::InvalidAtomicNumber(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_from_atomic_number() {
        assert_eq!(Element::from_atomic_number(1), Some(Element::Hydrogen));
        assert_eq!(Element::from_atomic_number(6), Some(Element::Carbon));
        assert_eq!(Element::from_atomic_number(86), Some(Element::Radon));
        assert_eq!(Element::from_atomic_number(0), None);
        assert_eq!(Element::from_atomic_number(87), None);
    }

    #[test]
    fn test_element_from_symbol_is_case_sensitive() {
        assert_eq!(Element::from_symbol("Na"), Some(Element::Sodium));
        assert_eq!(Element::from_symbol("NA"), None);
        assert_eq!(Element::from_symbol("na"), None);
        assert_eq!(Element::from_symbol("C"), Some(Element::Carbon));
        assert_eq!(Element::from_symbol("Cl"), Some(Element::Chlorine));
        assert_eq!(Element::from_symbol(" C"), None);
        assert_eq!(Element::from_symbol("Xx"), None);
    }

    #[test]
    fn test_element_from_token() {
        assert_eq!(Element::from_token("O"), Some(Element::Oxygen));
        assert_eq!(Element::from_token("8"), Some(Element::Oxygen));
        assert_eq!(Element::from_token("26"), Some(Element::Iron));
        assert_eq!(Element::from_token("0"), None);
        assert_eq!(Element::from_token("999"), None);
        assert_eq!(Element::from_token(""), None);
    }

    #[test]
    fn test_table_is_bijective() {
        for (i, element) in ELEMENTS.iter().enumerate() {
            let n = i as u32 + 1;
            assert_eq!(element.atomic_number(), n);
            assert_eq!(Element::from_atomic_number(n), Some(*element));
            assert_eq!(Element::from_symbol(element.symbol()), Some(*element));
        }
        let mut symbols: Vec<_> = ELEMENTS.iter().map(|e| e.symbol()).collect();
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), ELEMENT_COUNT);
    }

    #[test]
    fn test_element_properties() {
        let carbon = Element::Carbon;
        assert_eq!(carbon.atomic_number(), 6);
        assert_eq!(carbon.symbol(), "C");
        assert_eq!(carbon.name(), "Carbon");
        assert!(carbon.can_double_bond());
        assert!(!Element::Hydrogen.can_double_bond());
        assert!(Element::Selenium.can_double_bond());
    }

    #[test]
    fn test_element_parse_errors() {
        assert_eq!("Fe".parse::<Element>().unwrap(), Element::Iron);
        assert!(matches!(
            "Qq".parse::<Element>(),
            Err(MolError::InvalidElement(s)) if s == "Qq"
        ));
        assert!(Element::try_from(200).is_err());
    }

    #[test]
    fn test_element_display() {
        assert_eq!(format!("{}", Element::Carbon), "C");
        assert_eq!(format!("{}", Element::Helium), "He");
    }
}
