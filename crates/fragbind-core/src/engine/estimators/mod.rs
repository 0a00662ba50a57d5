//! Implementations of the [`EnergyEstimator`](super::estimator::EnergyEstimator) capability.
//!
//! - [`recorded::RecordedEstimator`] - Serves energies computed ahead of time, keyed by molecule name
//! - [`command::CommandEstimator`] - Runs an external solver program per molecule
//! - [`function::FnEstimator`] - Adapts a closure, for embedding and tests

pub mod command;
pub mod function;
pub mod recorded;

pub use command::CommandEstimator;
pub use function::FnEstimator;
pub use recorded::RecordedEstimator;
