//! Built-in model fragments for charged amino-acid side chains.
//!
//! Each template is a small capped molecule that reproduces the chemistry of one side-chain
//! motif. Geometries are approximate gas-phase structures with standard bond lengths,
//! centred near the origin; use [`Molecule::translated`] to position fragments relative to
//! one another before composing them.

use super::models::atom::Atom;
use super::models::molecule::Molecule;
use super::models::topology::{Bond, BondOrder};
use nalgebra::Point3;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentTemplate {
    /// CH3NH3+, a model of the lysine side chain.
    Methylammonium,
    /// CH3COO-, a model of the aspartate and glutamate side chains.
    Acetate,
    /// CH3NHC(NH2)2+, a model of the arginine side chain.
    Methylguanidinium,
}

#[derive(Debug, Error, PartialEq)]
#[error("Unknown fragment template: '{0}'")]
pub struct ParseFragmentTemplateError(pub String);

impl FromStr for FragmentTemplate {
    type Err = ParseFragmentTemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "methylammonium" | "lys" | "lysine" => Ok(Self::Methylammonium),
            "acetate" | "asp" | "glu" => Ok(Self::Acetate),
            "methylguanidinium" | "arg" | "arginine" => Ok(Self::Methylguanidinium),
            _ => Err(ParseFragmentTemplateError(s.to_string())),
        }
    }
}

impl fmt::Display for FragmentTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Methylammonium => "methylammonium",
            Self::Acetate => "acetate",
            Self::Methylguanidinium => "methylguanidinium",
        })
    }
}

impl FragmentTemplate {
    /// Builds the template molecule, named after the template.
    pub fn build(&self) -> Molecule {
        match self {
            Self::Methylammonium => methylammonium(),
            Self::Acetate => acetate(),
            Self::Methylguanidinium => methylguanidinium(),
        }
    }
}

fn assemble(
    name: &str,
    atoms: &[(&str, [f64; 3])],
    bonds: &[(usize, usize, BondOrder)],
    charge: i32,
) -> Molecule {
    let atoms = atoms
        .iter()
        .map(|&(element, [x, y, z])| Atom::new(element, Point3::new(x, y, z)))
        .collect();
    let bonds = bonds
        .iter()
        .map(|&(a, b, order)| Bond::new(a, b, order))
        .collect();
    Molecule::new(name, atoms, bonds, charge, 1)
        .expect("built-in fragment templates are well-formed")
}

/// Methylammonium (CH3NH3+), charge +1, singlet.
pub fn methylammonium() -> Molecule {
    use BondOrder::Single;
    assemble(
        "methylammonium",
        &[
            ("C", [0.000, 0.000, 0.000]),
            ("N", [1.490, 0.000, 0.000]),
            ("H", [-0.363, 1.028, 0.000]),
            ("H", [-0.363, -0.514, 0.890]),
            ("H", [-0.363, -0.514, -0.890]),
            ("H", [1.833, 0.971, 0.000]),
            ("H", [1.833, -0.486, 0.841]),
            ("H", [1.833, -0.486, -0.841]),
        ],
        &[
            (0, 1, Single),
            (0, 2, Single),
            (0, 3, Single),
            (0, 4, Single),
            (1, 5, Single),
            (1, 6, Single),
            (1, 7, Single),
        ],
        1,
    )
}

/// Acetate (CH3COO-), charge -1, singlet. Both C–O bonds are resonance bonds.
pub fn acetate() -> Molecule {
    use BondOrder::{Resonance, Single};
    assemble(
        "acetate",
        &[
            ("C", [0.000, 0.000, 0.000]),
            ("C", [1.520, 0.000, 0.000]),
            ("O", [2.150, 1.090, 0.000]),
            ("O", [2.150, -1.090, 0.000]),
            ("H", [-0.363, 1.028, 0.000]),
            ("H", [-0.363, -0.514, 0.890]),
            ("H", [-0.363, -0.514, -0.890]),
        ],
        &[
            (0, 1, Single),
            (1, 2, Resonance),
            (1, 3, Resonance),
            (0, 4, Single),
            (0, 5, Single),
            (0, 6, Single),
        ],
        -1,
    )
}

/// Methylguanidinium (CH3NHC(NH2)2+), charge +1, singlet. The three C–N bonds of the
/// guanidinium core are resonance bonds.
pub fn methylguanidinium() -> Molecule {
    use BondOrder::{Resonance, Single};
    assemble(
        "methylguanidinium",
        &[
            ("C", [0.000, 0.000, 0.000]),
            ("N", [0.000, 1.330, 0.000]),
            ("N", [1.152, -0.665, 0.000]),
            ("N", [-1.152, -0.665, 0.000]),
            ("C", [-1.260, 2.060, 0.000]),
            ("H", [0.870, 1.830, 0.000]),
            ("H", [2.020, -0.160, 0.000]),
            ("H", [1.180, -1.680, 0.000]),
            ("H", [-2.020, -0.160, 0.000]),
            ("H", [-1.180, -1.680, 0.000]),
            ("H", [-1.100, 3.140, 0.000]),
            ("H", [-1.840, 1.780, 0.890]),
            ("H", [-1.840, 1.780, -0.890]),
        ],
        &[
            (0, 1, Resonance),
            (0, 2, Resonance),
            (0, 3, Resonance),
            (1, 4, Single),
            (1, 5, Single),
            (2, 6, Single),
            (2, 7, Single),
            (3, 8, Single),
            (3, 9, Single),
            (4, 10, Single),
            (4, 11, Single),
            (4, 12, Single),
        ],
        1,
    )
}
