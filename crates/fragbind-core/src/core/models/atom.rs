use crate::core::utils::elements;
use nalgebra::{Point3, Vector3};

/// Represents a single atom of a molecular fragment.
///
/// An atom is identified only by its chemical element and its position; every other
/// property (charge, connectivity, spin) belongs to the owning molecule.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The chemical element symbol (e.g., "C", "N", "Cl").
    pub element: String,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
}

impl Atom {
    /// Creates a new `Atom` from an element symbol and a position.
    ///
    /// The symbol is stored as given; it is validated lazily when the atomic number
    /// is requested.
    ///
    /// # Arguments
    ///
    /// * `element` - The chemical element symbol.
    /// * `position` - The 3D coordinates of the atom in Angstroms.
    pub fn new(element: &str, position: Point3<f64>) -> Self {
        Self {
            element: element.to_string(),
            position,
        }
    }

    /// Returns the atomic number of this atom's element, or `None` if the symbol is unknown.
    pub fn atomic_number(&self) -> Option<u8> {
        elements::atomic_number(&self.element)
    }

    /// Returns a copy of this atom shifted by `offset`.
    pub fn translated(&self, offset: &Vector3<f64>) -> Self {
        Self {
            element: self.element.clone(),
            position: self.position + offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_atom_stores_element_and_position() {
        let atom = Atom::new("N", Point3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.element, "N");
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn atomic_number_resolves_known_and_unknown_elements() {
        assert_eq!(Atom::new("O", Point3::origin()).atomic_number(), Some(8));
        assert_eq!(Atom::new("cl", Point3::origin()).atomic_number(), Some(17));
        assert_eq!(Atom::new("Qq", Point3::origin()).atomic_number(), None);
    }

    #[test]
    fn translated_moves_position_and_keeps_element() {
        let atom = Atom::new("C", Point3::new(1.0, 0.0, -1.0));
        let moved = atom.translated(&Vector3::new(0.5, 2.0, 1.0));
        assert_eq!(moved.element, "C");
        assert_eq!(moved.position, Point3::new(1.5, 2.0, 0.0));
        assert_eq!(atom.position, Point3::new(1.0, 0.0, -1.0));
    }
}
