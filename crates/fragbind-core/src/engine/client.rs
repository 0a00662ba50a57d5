use super::config::EstimationConfig;
use super::estimator::{EnergyEstimator, EnergyResult};
use crate::core::models::molecule::Molecule;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, instrument, warn};

/// Invokes an [`EnergyEstimator`] for one molecule at a time.
///
/// The client calls the estimator exactly once per request and never retries: the solver
/// already runs its own convergence loop bounded by `max_iterations` and `tolerance`, so a
/// failure is handed back verbatim and the caller chooses any fallback. Every outcome is
/// returned as an [`EnergyResult`]; an invalid configuration, a panicking estimator, or a
/// non-finite energy all become [`EnergyResult::Failure`].
#[derive(Clone, Copy)]
pub struct EstimationClient<'a> {
    estimator: &'a dyn EnergyEstimator,
}

impl<'a> EstimationClient<'a> {
    pub fn new(estimator: &'a dyn EnergyEstimator) -> Self {
        Self { estimator }
    }

    pub fn estimator_name(&self) -> &str {
        self.estimator.name()
    }

    #[instrument(skip_all, name = "estimate", fields(molecule = molecule.name(), estimator = self.estimator.name()))]
    pub fn estimate(&self, molecule: &Molecule, config: &EstimationConfig) -> EnergyResult {
        if let Err(e) = config.validate() {
            warn!("Refusing to run estimator with invalid configuration: {}", e);
            return EnergyResult::failure(format!("invalid estimation configuration: {e}"));
        }

        debug!(
            method = %config.method,
            max_iterations = config.max_iterations,
            tolerance = config.tolerance,
            atoms = molecule.atom_count(),
            "Requesting ground-state energy."
        );

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.estimator.estimate(molecule, config)
        }));

        let result = match outcome {
            Ok(EnergyResult::Success { energy }) if !energy.is_finite() => {
                EnergyResult::failure(format!("estimator returned a non-finite energy: {energy}"))
            }
            Ok(result) => result,
            Err(payload) => EnergyResult::failure(format!(
                "estimator panicked: {}",
                panic_message(payload.as_ref())
            )),
        };

        match &result {
            EnergyResult::Success { energy } => debug!(energy, "Estimation succeeded."),
            EnergyResult::Failure { message } => warn!("Estimation failed: {}", message),
        }
        result
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
