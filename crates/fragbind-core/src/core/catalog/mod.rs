//! # Interface Contact Catalog
//!
//! A descriptive model of antibody/antigen interface contacts. Each contact pairs an
//! antibody residue with an antigen residue, records which complementarity-determining
//! region (CDR) it belongs to, the category of the non-covalent interaction, and the
//! contact distance.
//!
//! The catalog produces no energies. It exists to enumerate and label contacts so that
//! they can be cross-referenced with fragment binding energies when reporting.

pub mod registry;
pub mod contact;

pub use registry::{CatalogError, InterfaceContactCatalog};
pub use contact::{CdrRegion, InteractionType, InterfaceContact};
