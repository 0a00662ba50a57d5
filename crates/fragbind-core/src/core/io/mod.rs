//! # File I/O Module
//!
//! Readers and writers for the file formats fragbind works with:
//!
//! - [`system`] - TOML system files describing fragments, the complex, and recorded energies
//! - [`xyz`] - XYZ coordinate export for molecules
//!
//! Interface contact catalogs are read by [`crate::core::catalog::InterfaceContactCatalog::load`].

pub mod system;
pub mod xyz;
