//! Fixed vocabularies accepted by the mindat geomaterials search.
//!
//! - [`CrystalSystem`]: the nine crystal systems (`csystem` filter)
//! - [`ELEMENT_SYMBOLS`]: chemical elements and common complex ions
//!   accepted by the `el_inc` / `el_exc` filters

use serde::{Deserialize, Serialize};

/// Lowest value on the Mohs hardness scale
pub const MOHS_MIN: f64 = 1.0;

/// Highest value on the Mohs hardness scale
pub const MOHS_MAX: f64 = 10.0;

/// Element and complex-ion symbols in their canonical spelling.
///
/// `[]` denotes a structural vacancy.
pub const ELEMENT_SYMBOLS: &[&str] = &[
    "H", "Li", "Be", "B", "C", "N", "O", "F", "Na", "Mg", "Al", "Si", "P", "S", "Cl", "K", "Ca",
    "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As", "Se", "Br", "Rb",
    "Sr", "Y", "Zr", "Nb", "Mo", "Ru", "Rh", "Pd", "Ag", "Cd", "In", "Sn", "Sb", "Te", "I", "Cs",
    "Ba", "La", "Ce", "Pr", "Nd", "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf",
    "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl", "Pb", "Bi", "Ra", "Th", "U", "[]", "OH",
    "H2O", "H3O", "BO3", "NH4", "NH2", "NO3", "CO3", "PO4", "SO4", "SO3", "AsO4", "AsO3", "VO4",
    "CrO4", "SeO4", "SeO3", "MoO4", "SnOH", "SbO4", "SbO3", "TeO4", "TeO3", "IO3", "WO4", "UO2",
    "SiO4", "SiO3", "Si3O9", "CH3COO", "HCOO", "C2O4",
];

/// Look up the canonical spelling of a symbol, ignoring case.
///
/// ```
/// use mindat_query_domain::query::vocabulary::canonical_symbol;
///
/// assert_eq!(canonical_symbol("fe"), Some("Fe"));
/// assert_eq!(canonical_symbol("SO4"), Some("SO4"));
/// assert_eq!(canonical_symbol("Xx"), None);
/// ```
pub fn canonical_symbol(token: &str) -> Option<&'static str> {
    ELEMENT_SYMBOLS
        .iter()
        .copied()
        .find(|symbol| symbol.eq_ignore_ascii_case(token))
}

/// Split a comma-joined symbol list into trimmed, non-empty tokens.
pub fn split_symbols(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Crystal system (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CrystalSystem {
    Amorphous,
    Hexagonal,
    Icosahedral,
    Isometric,
    Monoclinic,
    Orthorhombic,
    Tetragonal,
    Triclinic,
    Trigonal,
}

impl CrystalSystem {
    /// All crystal systems in alphabetical order
    pub const ALL: [CrystalSystem; 9] = [
        CrystalSystem::Amorphous,
        CrystalSystem::Hexagonal,
        CrystalSystem::Icosahedral,
        CrystalSystem::Isometric,
        CrystalSystem::Monoclinic,
        CrystalSystem::Orthorhombic,
        CrystalSystem::Tetragonal,
        CrystalSystem::Triclinic,
        CrystalSystem::Trigonal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CrystalSystem::Amorphous => "Amorphous",
            CrystalSystem::Hexagonal => "Hexagonal",
            CrystalSystem::Icosahedral => "Icosahedral",
            CrystalSystem::Isometric => "Isometric",
            CrystalSystem::Monoclinic => "Monoclinic",
            CrystalSystem::Orthorhombic => "Orthorhombic",
            CrystalSystem::Tetragonal => "Tetragonal",
            CrystalSystem::Triclinic => "Triclinic",
            CrystalSystem::Trigonal => "Trigonal",
        }
    }

    /// Names of all crystal systems, as accepted on the wire
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.as_str()).collect()
    }
}

impl std::fmt::Display for CrystalSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CrystalSystem {
    type Err = crate::core::error::DomainError;

    /// Exact, case-sensitive match against the wire names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| crate::core::error::DomainError::UnknownCrystalSystem(s.to_string()))
    }
}
