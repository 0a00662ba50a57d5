use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The order of a covalent bond.
///
/// Conjugated, aromatic, and resonance-delocalized bonds (such as the two C–O bonds of a
/// carboxylate) are all represented by [`BondOrder::Resonance`] with a numeric order of 1.5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Triple,
    Resonance,
}

#[derive(Debug, Error, PartialEq)]
#[error("Invalid bond order: '{0}'")]
pub struct ParseBondOrderError(pub String);

impl FromStr for BondOrder {
    type Err = ParseBondOrderError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "1.0" | "s" | "single" => Ok(Self::Single),
            "2" | "2.0" | "d" | "double" => Ok(Self::Double),
            "3" | "3.0" | "t" | "triple" => Ok(Self::Triple),
            "1.5" | "ar" | "aromatic" | "resonance" | "conjugated" => Ok(Self::Resonance),
            _ => Err(ParseBondOrderError(s.to_string())),
        }
    }
}

impl TryFrom<f64> for BondOrder {
    type Error = ParseBondOrderError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        match value {
            v if v == 1.0 => Ok(Self::Single),
            v if v == 2.0 => Ok(Self::Double),
            v if v == 3.0 => Ok(Self::Triple),
            v if v == 1.5 => Ok(Self::Resonance),
            _ => Err(ParseBondOrderError(value.to_string())),
        }
    }
}

impl fmt::Display for BondOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Single => "Single",
                Self::Double => "Double",
                Self::Triple => "Triple",
                Self::Resonance => "Resonance",
            }
        )
    }
}

/// A bond between two atoms of the same molecule, addressed by their positions in the
/// molecule's atom sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub atom1: usize,     // Index of the first atom
    pub atom2: usize,     // Index of the second atom
    pub order: BondOrder, // Bond order (e.g., single, double, etc.)
}

impl Bond {
    pub fn new(atom1: usize, atom2: usize, order: BondOrder) -> Self {
        Self {
            atom1,
            atom2,
            order,
        }
    }

    /// Returns a copy of this bond with both endpoints moved by `offset` positions.
    pub fn shifted(&self, offset: usize) -> Self {
        Self {
            atom1: self.atom1 + offset,
            atom2: self.atom2 + offset,
            order: self.order,
        }
    }
}
