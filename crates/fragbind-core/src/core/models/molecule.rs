use super::atom::Atom;
use super::topology::Bond;
use crate::core::utils::elements;
use nalgebra::Vector3;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MoleculeError {
    #[error("Unknown element symbol: '{0}'")]
    UnknownElement(String),

    #[error(
        "Bond {index} ({atom1}-{atom2}) does not reference two distinct atoms of a molecule with {atom_count} atoms"
    )]
    InvalidBond {
        index: usize,
        atom1: usize,
        atom2: usize,
        atom_count: usize,
    },

    #[error("Spin multiplicity must be a positive integer (2S+1), got {0}")]
    InvalidMultiplicity(u32),
}

/// An immutable molecular fragment or complex.
///
/// A molecule owns an ordered sequence of atoms and an ordered sequence of bonds whose
/// endpoints are positions in that atom sequence, together with a net charge and a spin
/// multiplicity (2S+1). All fields are fixed at construction; operations that change the
/// structure, such as [`Molecule::translated`] or fragment composition, return a new value.
///
/// The electron count is derived rather than stored, see [`Molecule::count_electrons`].
#[derive(Debug, Clone, PartialEq)]
pub struct Molecule {
    name: String,
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    charge: i32,
    multiplicity: u32,
}

impl Molecule {
    /// Creates a new molecule after validating its connectivity.
    ///
    /// # Arguments
    ///
    /// * `name` - A human-readable label, also used to key recorded energies.
    /// * `atoms` - The atoms in their canonical order.
    /// * `bonds` - Bonds whose endpoints index into `atoms`.
    /// * `charge` - The net charge in elementary charge units.
    /// * `multiplicity` - The spin multiplicity 2S+1.
    ///
    /// # Errors
    ///
    /// Returns [`MoleculeError::InvalidBond`] if a bond endpoint is out of range or a bond
    /// joins an atom to itself, and [`MoleculeError::InvalidMultiplicity`] for a
    /// multiplicity of zero.
    pub fn new(
        name: impl Into<String>,
        atoms: Vec<Atom>,
        bonds: Vec<Bond>,
        charge: i32,
        multiplicity: u32,
    ) -> Result<Self, MoleculeError> {
        if multiplicity == 0 {
            return Err(MoleculeError::InvalidMultiplicity(multiplicity));
        }

        let atom_count = atoms.len();
        if let Some((index, bond)) = bonds.iter().enumerate().find(|(_, b)| {
            b.atom1 >= atom_count || b.atom2 >= atom_count || b.atom1 == b.atom2
        }) {
            return Err(MoleculeError::InvalidBond {
                index,
                atom1: bond.atom1,
                atom2: bond.atom2,
                atom_count,
            });
        }

        Ok(Self {
            name: name.into(),
            atoms,
            bonds,
            charge,
            multiplicity,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn charge(&self) -> i32 {
        self.charge
    }

    pub fn multiplicity(&self) -> u32 {
        self.multiplicity
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Counts the electrons of the molecule: the sum of the atomic numbers minus the net
    /// charge.
    ///
    /// # Errors
    ///
    /// Returns [`MoleculeError::UnknownElement`] for the first atom whose symbol is not in
    /// the element table.
    pub fn count_electrons(&self) -> Result<i64, MoleculeError> {
        let nuclear_charge = self.atoms.iter().try_fold(0i64, |acc, atom| {
            atom.atomic_number()
                .map(|z| acc + i64::from(z))
                .ok_or_else(|| MoleculeError::UnknownElement(atom.element.clone()))
        })?;
        Ok(nuclear_charge - i64::from(self.charge))
    }

    /// Checks that the electron count parity agrees with the multiplicity.
    ///
    /// An even number of electrons requires an odd multiplicity (singlet, triplet, ...)
    /// and vice versa.
    pub fn is_spin_consistent(&self) -> Result<bool, MoleculeError> {
        let electrons = self.count_electrons()?;
        let unpaired = i64::from(self.multiplicity) - 1;
        Ok(electrons >= unpaired && (electrons - unpaired) % 2 == 0)
    }

    /// Returns the molecular formula in Hill order (C, then H, then alphabetical).
    ///
    /// # Errors
    ///
    /// Returns [`MoleculeError::UnknownElement`] if any symbol is not a known element.
    pub fn molecular_formula(&self) -> Result<String, MoleculeError> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for atom in &self.atoms {
            if atom.atomic_number().is_none() {
                return Err(MoleculeError::UnknownElement(atom.element.clone()));
            }
            *counts
                .entry(elements::normalize_symbol(&atom.element))
                .or_default() += 1;
        }

        let mut formula = String::new();
        let mut push = |symbol: &str, count: usize| {
            formula.push_str(symbol);
            if count > 1 {
                formula.push_str(&count.to_string());
            }
        };

        let has_carbon = counts.contains_key("C");
        if has_carbon {
            for symbol in ["C", "H"] {
                if let Some(count) = counts.remove(symbol) {
                    push(symbol, count);
                }
            }
        }
        for (symbol, count) in counts {
            push(&symbol, count);
        }
        Ok(formula)
    }

    /// Returns a copy of this molecule with every atom shifted by `offset` (Angstroms).
    pub fn translated(&self, offset: &Vector3<f64>) -> Self {
        Self {
            name: self.name.clone(),
            atoms: self.atoms.iter().map(|a| a.translated(offset)).collect(),
            bonds: self.bonds.clone(),
            charge: self.charge,
            multiplicity: self.multiplicity,
        }
    }

    /// Returns a copy of this molecule under a different name.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }
}
