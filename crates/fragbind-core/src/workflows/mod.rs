//! # Workflows Module
//!
//! High-level procedures that tie the data models of [`crate::core`] to the estimation and
//! aggregation machinery of [`crate::engine`].
//!
//! - **Binding Workflow** ([`binding`]) - Composes fragments into a complex, estimates every
//!   ground-state energy, and aggregates and classifies the binding energy.

pub mod binding;
