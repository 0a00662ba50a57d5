use super::config::EstimationConfig;
use super::error::EngineError;
use crate::core::models::molecule::Molecule;

/// The outcome of one ground-state energy estimation.
///
/// Estimation never signals failure out of band: a solver that diverges, crashes, or is
/// unreachable produces a [`EnergyResult::Failure`] carrying its message.
#[derive(Debug, Clone, PartialEq)]
pub enum EnergyResult {
    /// The estimated ground-state energy in Hartree.
    Success { energy: f64 },
    Failure { message: String },
}

impl EnergyResult {
    pub fn success(energy: f64) -> Self {
        Self::Success { energy }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn energy(&self) -> Option<f64> {
        match self {
            Self::Success { energy } => Some(*energy),
            Self::Failure { .. } => None,
        }
    }

    /// Converts the outcome into the energy, attributing a failure to `molecule`.
    pub fn into_energy(self, molecule: &str) -> Result<f64, EngineError> {
        match self {
            Self::Success { energy } => Ok(energy),
            Self::Failure { message } => Err(EngineError::EstimationFailure {
                molecule: molecule.to_string(),
                message,
            }),
        }
    }
}

/// The estimation outcome for a named molecule.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimationRecord {
    pub molecule: String,
    pub result: EnergyResult,
}

impl EstimationRecord {
    pub fn new(molecule: &str, result: EnergyResult) -> Self {
        Self {
            molecule: molecule.to_string(),
            result,
        }
    }

    pub fn energy(&self) -> Result<f64, EngineError> {
        self.result.clone().into_energy(&self.molecule)
    }
}

/// A ground-state energy capability.
///
/// Implementations wrap whatever actually computes energies: a local solver, a remote
/// service, a subprocess, or a table of previously computed values. A call may block for a
/// long time and must eventually return exactly one [`EnergyResult`]. Any timeout or
/// cancellation policy belongs to the implementation.
pub trait EnergyEstimator: Send + Sync {
    /// A short identifier used in logs.
    fn name(&self) -> &str;

    fn estimate(&self, molecule: &Molecule, config: &EstimationConfig) -> EnergyResult;
}
