//! # fragbind Core Library
//!
//! A library for fragment-based binding energy composition. Small molecular fragments
//! modelling interacting chemical motifs (for example an ionic side-chain pair) are built,
//! merged into a complex, scored with a pluggable ground-state energy estimator, and the
//! resulting binding energy is converted and classified.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same three-layer split used throughout the codebase:
//!
//! - **[`core`]: The Foundation.** Immutable data models (`Molecule`, `Bond`), fragment
//!   composition, built-in fragment templates, the interface contact catalog, and file I/O.
//!
//! - **[`engine`]: The Logic Core.** Estimation configuration, the `EnergyEstimator`
//!   capability and its implementations, the estimation client, and the binding energy
//!   aggregator.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures that tie `core` and `engine`
//!   together, such as computing the binding energy of a set of fragments.

pub mod core;
pub mod engine;
pub mod workflows;
