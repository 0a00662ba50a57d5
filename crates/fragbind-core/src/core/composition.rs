//! Index-safe composition of molecular fragments into a single complex.
//!
//! Composition concatenates the atoms of every fragment in order and re-bases each
//! fragment's bonds onto the merged atom numbering. Bonds copied from the k-th fragment are
//! shifted by the total atom count of fragments `0..k`.
//!
//! The net charge and spin multiplicity of the composed molecule are **not** derived from
//! the fragments. Complexation can change both (a proton transfer between a +1 and a -1
//! fragment, or a different spin coupling of two open-shell fragments), so the caller
//! always supplies them explicitly.

use super::models::molecule::{Molecule, MoleculeError};
use thiserror::Error;
use tracing::debug;

/// The identity the caller assigns to a composed complex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexSpec {
    pub name: String,
    pub charge: i32,
    pub multiplicity: u32,
}

impl ComplexSpec {
    pub fn new(name: &str, charge: i32, multiplicity: u32) -> Self {
        Self {
            name: name.to_string(),
            charge,
            multiplicity,
        }
    }

    /// Composes `fragments` into a complex carrying this name, charge, and multiplicity.
    pub fn compose(&self, fragments: &[Molecule]) -> Result<Molecule, CompositionError> {
        compose(fragments, &self.name, self.charge, self.multiplicity)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum CompositionError {
    #[error("Cannot compose a complex from an empty fragment list")]
    EmptyFragmentList,

    #[error("Composed molecule is invalid: {0}")]
    Molecule(#[from] MoleculeError),
}

/// Merges `fragments` into a new molecule named `result_name`.
///
/// # Arguments
///
/// * `fragments` - The fragments in the order their atoms should appear.
/// * `result_name` - The name of the composed molecule.
/// * `result_charge` - The net charge of the complex, chosen by the caller.
/// * `result_multiplicity` - The spin multiplicity of the complex, chosen by the caller.
///
/// # Errors
///
/// Returns [`CompositionError::EmptyFragmentList`] when `fragments` is empty, or
/// [`CompositionError::Molecule`] if the supplied multiplicity is invalid.
pub fn compose(
    fragments: &[Molecule],
    result_name: &str,
    result_charge: i32,
    result_multiplicity: u32,
) -> Result<Molecule, CompositionError> {
    if fragments.is_empty() {
        return Err(CompositionError::EmptyFragmentList);
    }

    let total_atoms: usize = fragments.iter().map(Molecule::atom_count).sum();
    let total_bonds: usize = fragments.iter().map(|f| f.bonds().len()).sum();
    let mut atoms = Vec::with_capacity(total_atoms);
    let mut bonds = Vec::with_capacity(total_bonds);

    for fragment in fragments {
        let offset = atoms.len();
        bonds.extend(fragment.bonds().iter().map(|bond| bond.shifted(offset)));
        atoms.extend_from_slice(fragment.atoms());
    }

    let input_charge: i32 = fragments.iter().map(Molecule::charge).sum();
    debug!(
        name = result_name,
        fragments = fragments.len(),
        atoms = atoms.len(),
        bonds = bonds.len(),
        input_charge,
        result_charge,
        "Composed fragments into complex."
    );

    Ok(Molecule::new(
        result_name,
        atoms,
        bonds,
        result_charge,
        result_multiplicity,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::topology::{Bond, BondOrder};
    use nalgebra::Point3;

    fn chain(name: &str, elements: &[&str], charge: i32) -> Molecule {
        let atoms = elements
            .iter()
            .enumerate()
            .map(|(i, e)| Atom::new(e, Point3::new(i as f64, 0.0, 0.0)))
            .collect();
        let bonds = (1..elements.len())
            .map(|i| Bond::new(i - 1, i, BondOrder::Single))
            .collect();
        Molecule::new(name, atoms, bonds, charge, 1).unwrap()
    }

    #[test]
    fn compose_concatenates_atoms_in_fragment_order() {
        let a = chain("a", &["C", "N", "H"], 1);
        let b = chain("b", &["O", "C"], -1);
        let complex = compose(&[a.clone(), b.clone()], "ab", 0, 1).unwrap();

        let expected: Vec<Atom> = a.atoms().iter().chain(b.atoms()).cloned().collect();
        assert_eq!(complex.atoms(), expected.as_slice());
        assert_eq!(complex.name(), "ab");
    }

    #[test]
    fn compose_shifts_bonds_of_later_fragments_by_preceding_atom_count() {
        let a = chain("a", &["C", "N", "H"], 0);
        let b = chain("b", &["O", "C", "H"], 0);
        let complex = compose(&[a.clone(), b.clone()], "ab", 0, 1).unwrap();

        assert_eq!(&complex.bonds()[..a.bonds().len()], a.bonds());
        for (original, merged) in b.bonds().iter().zip(&complex.bonds()[a.bonds().len()..]) {
            assert_eq!(merged.atom1, original.atom1 + a.atom_count());
            assert_eq!(merged.atom2, original.atom2 + a.atom_count());
            assert_eq!(merged.order, original.order);
        }

        let max_index = a.atom_count() + b.atom_count() - 1;
        assert!(
            complex
                .bonds()
                .iter()
                .all(|bond| bond.atom1 <= max_index && bond.atom2 <= max_index)
        );
    }

    #[test]
    fn compose_uses_cumulative_offsets_for_three_fragments() {
        let a = chain("a", &["C", "C"], 0);
        let b = chain("b", &["N", "N", "N"], 0);
        let c = chain("c", &["O", "O"], 0);
        let complex = compose(&[a, b, c], "abc", 0, 1).unwrap();

        assert_eq!(complex.atom_count(), 7);
        assert_eq!(
            complex.bonds(),
            &[
                Bond::new(0, 1, BondOrder::Single),
                Bond::new(2, 3, BondOrder::Single),
                Bond::new(3, 4, BondOrder::Single),
                Bond::new(5, 6, BondOrder::Single),
            ]
        );
    }

    #[test]
    fn compose_uses_caller_supplied_charge_and_multiplicity() {
        let a = chain("a", &["N", "H"], 1);
        let b = chain("b", &["O", "H"], -1);
        let complex = compose(&[a.clone(), b.clone()], "ab", 1, 3).unwrap();
        assert_eq!(complex.charge(), 1);
        assert_eq!(complex.multiplicity(), 3);
    }

    #[test]
    fn composed_electron_count_is_linear_in_charges() {
        let a = chain("a", &["C", "N", "H", "H"], 1);
        let b = chain("b", &["C", "O", "O"], -1);
        for result_charge in [-1, 0, 1, 2] {
            let complex = compose(&[a.clone(), b.clone()], "ab", result_charge, 1).unwrap();
            let expected = a.count_electrons().unwrap()
                + b.count_electrons().unwrap()
                + i64::from(a.charge() + b.charge() - result_charge);
            assert_eq!(complex.count_electrons().unwrap(), expected);
        }
    }

    #[test]
    fn compose_single_fragment_copies_its_structure() {
        let a = chain("a", &["C", "O"], 0);
        let complex = compose(std::slice::from_ref(&a), "copy", 0, 1).unwrap();
        assert_eq!(complex.atoms(), a.atoms());
        assert_eq!(complex.bonds(), a.bonds());
    }

    #[test]
    fn complex_spec_compose_applies_its_identity() {
        let a = chain("a", &["N", "H"], 1);
        let b = chain("b", &["O", "H"], -1);
        let spec = ComplexSpec::new("pair", 0, 1);
        let complex = spec.compose(&[a, b]).unwrap();
        assert_eq!(complex.name(), "pair");
        assert_eq!(complex.charge(), 0);
        assert_eq!(complex.multiplicity(), 1);
        assert_eq!(complex.atom_count(), 4);
    }

    #[test]
    fn compose_fails_for_empty_fragment_list() {
        assert_eq!(
            compose(&[], "nothing", 0, 1),
            Err(CompositionError::EmptyFragmentList)
        );
    }

    #[test]
    fn compose_rejects_zero_multiplicity() {
        let a = chain("a", &["H", "H"], 0);
        assert_eq!(
            compose(&[a], "h2", 0, 0),
            Err(CompositionError::Molecule(
                MoleculeError::InvalidMultiplicity(0)
            ))
        );
    }
}
