//! # Core Models Module
//!
//! The immutable data structures used to describe molecular fragments and the
//! complexes composed from them.
//!
//! ## Key Components
//!
//! - [`atom`] - An element symbol with Cartesian coordinates
//! - [`topology`] - Bonds between atoms, addressed by position in the owning molecule
//! - [`molecule`] - A named, charged set of atoms and bonds with a spin multiplicity
//!
//! ## Usage
//!
//! Molecules are constructed once and never mutated. Operations such as translation or
//! composition return a new [`molecule::Molecule`].
//!
//! ```ignore
//! use fragbind::core::models::{atom::Atom, molecule::Molecule, topology::{Bond, BondOrder}};
//! use nalgebra::Point3;
//!
//! let atoms = vec![
//!     Atom::new("H", Point3::new(0.0, 0.0, 0.0)),
//!     Atom::new("H", Point3::new(0.74, 0.0, 0.0)),
//! ];
//! let bonds = vec![Bond::new(0, 1, BondOrder::Single)];
//! let h2 = Molecule::new("H2", atoms, bonds, 0, 1)?;
//! assert_eq!(h2.count_electrons()?, 2);
//! ```

pub mod atom;
pub mod molecule;
pub mod topology;
