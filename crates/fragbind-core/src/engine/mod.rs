//! # Engine Module
//!
//! The orchestration layer between immutable molecules and the external ground-state
//! energy solver.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Estimation method and convergence parameters, passed per call
//! - **Capability** ([`estimator`]) - The `EnergyEstimator` trait and the `EnergyResult` outcome
//! - **Implementations** ([`estimators`]) - Recorded, external-command, and closure estimators
//! - **Client** ([`client`]) - Invokes an estimator once per molecule and never fails out of band
//! - **Aggregation** ([`binding`]) - Binding energy, unit conversion, and strength classification
//! - **Progress Monitoring** ([`progress`]) - Progress events for user interfaces
//! - **Error Handling** ([`error`]) - Engine error types and propagation
//!
//! ## Key Properties
//!
//! - **No ambient state**: every estimation receives its configuration explicitly
//! - **Failures are data**: a failed estimate is returned as a value and propagated, never
//!   replaced by a placeholder energy
//! - **Independent estimations**: fragment and complex estimations share nothing mutable and
//!   run in parallel when the `parallel` feature is enabled

pub mod binding;
pub mod client;
pub mod config;
pub mod error;
pub mod estimator;
pub mod estimators;
pub mod progress;
pub(crate) mod tasks;
