//! # Core Module
//!
//! The fundamental building blocks of fragbind: immutable molecular data models,
//! fragment composition, ready-made side-chain fragment templates, the interface
//! contact catalog, and the file formats used to describe fragment systems.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms, bonds, and immutable molecules
//! - **Composition** ([`composition`]) - Index-safe merging of fragments into a complex
//! - **Fragment Templates** ([`fragments`]) - Side-chain model fragments with approximate geometries
//! - **Contact Catalog** ([`catalog`]) - Descriptive antibody/antigen interface contacts
//! - **File I/O** ([`io`]) - System files (TOML), XYZ export, and catalog CSV loading
//! - **Utilities** ([`utils`]) - Element tables and other lookups

pub mod catalog;
pub mod composition;
pub mod fragments;
pub mod io;
pub mod models;
pub mod utils;
