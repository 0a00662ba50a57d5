use crate::core::models::molecule::Molecule;
use crate::engine::config::EstimationConfig;
use crate::engine::estimator::{EnergyEstimator, EnergyResult};

/// An estimator backed by a closure.
pub struct FnEstimator<F> {
    name: String,
    function: F,
}

impl<F> FnEstimator<F>
where
    F: Fn(&Molecule, &EstimationConfig) -> EnergyResult + Send + Sync,
{
    pub fn new(name: &str, function: F) -> Self {
        Self {
            name: name.to_string(),
            function,
        }
    }
}

impl<F> EnergyEstimator for FnEstimator<F>
where
    F: Fn(&Molecule, &EstimationConfig) -> EnergyResult + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn estimate(&self, molecule: &Molecule, config: &EstimationConfig) -> EnergyResult {
        (self.function)(molecule, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::{EstimationConfigBuilder, EstimationMethod};

    #[test]
    fn fn_estimator_forwards_molecule_and_config() {
        let estimator = FnEstimator::new(
            "electron-count",
            |molecule: &Molecule, config: &EstimationConfig| match molecule.count_electrons() {
                Ok(n) => EnergyResult::success(-(n as f64) * config.tolerance),
                Err(e) => EnergyResult::failure(e.to_string()),
            },
        );
        let config = EstimationConfigBuilder::new()
            .method(EstimationMethod::ExactDiagonalization)
            .max_iterations(1)
            .tolerance(0.5)
            .build()
            .unwrap();
        let molecule = Molecule::new("empty", vec![], vec![], -4, 1).unwrap();

        assert_eq!(estimator.name(), "electron-count");
        assert_eq!(
            estimator.estimate(&molecule, &config),
            EnergyResult::success(-2.0)
        );
    }
}
