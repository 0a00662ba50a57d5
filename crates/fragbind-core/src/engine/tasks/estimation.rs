use crate::core::models::molecule::Molecule;
use crate::engine::client::EstimationClient;
use crate::engine::config::EstimationConfig;
use crate::engine::estimator::EstimationRecord;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Estimation records for every fragment and for the complex.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimationRecords {
    /// One record per fragment, in fragment order.
    pub fragments: Vec<EstimationRecord>,
    pub complex: EstimationRecord,
}

/// Estimates the ground-state energy of every fragment and of the complex.
///
/// Estimations share nothing mutable and may run concurrently, but fragment records are
/// always returned in the order of `fragments`.
#[instrument(skip_all, name = "estimation_task")]
pub fn run(
    fragments: &[Molecule],
    complex: &Molecule,
    client: EstimationClient<'_>,
    config: &EstimationConfig,
    reporter: &ProgressReporter,
) -> EstimationRecords {
    info!(
        count = fragments.len() + 1,
        estimator = client.estimator_name(),
        "Estimating ground-state energies."
    );
    reporter.report(Progress::PhaseStart {
        name: "Energy Estimation",
    });
    reporter.report(Progress::TaskStart {
        total_steps: fragments.len() as u64 + 1,
    });

    let estimate_one = |molecule: &Molecule| {
        let result = client.estimate(molecule, config);
        reporter.report(Progress::EstimationFinished {
            molecule: molecule.name().to_string(),
            success: result.is_success(),
        });
        reporter.report(Progress::TaskIncrement);
        EstimationRecord::new(molecule.name(), result)
    };

    #[cfg(not(feature = "parallel"))]
    let (fragment_records, complex_record): (Vec<_>, _) = (
        fragments.iter().map(estimate_one).collect(),
        estimate_one(complex),
    );

    #[cfg(feature = "parallel")]
    let (fragment_records, complex_record): (Vec<_>, _) = rayon::join(
        || fragments.par_iter().map(estimate_one).collect(),
        || estimate_one(complex),
    );

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    let failures = fragment_records
        .iter()
        .chain([&complex_record])
        .filter(|r| !r.result.is_success())
        .count();
    info!(failures, "Energy estimation complete.");

    EstimationRecords {
        fragments: fragment_records,
        complex: complex_record,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::composition::ComplexSpec;
    use crate::core::fragments::{acetate, methylammonium};
    use crate::engine::config::{EstimationConfigBuilder, EstimationMethod};
    use crate::engine::estimator::EnergyResult;
    use crate::engine::estimators::RecordedEstimator;
    use std::sync::Mutex;

    fn config() -> EstimationConfig {
        EstimationConfigBuilder::new()
            .method(EstimationMethod::Variational)
            .max_iterations(50)
            .tolerance(1e-6)
            .build()
            .unwrap()
    }

    fn salt_bridge() -> (Vec<Molecule>, Molecule) {
        let fragments = vec![methylammonium(), acetate()];
        let complex = ComplexSpec::new("salt-bridge", 0, 1)
            .compose(&fragments)
            .unwrap();
        (fragments, complex)
    }

    #[test]
    fn records_preserve_fragment_order() {
        let (fragments, complex) = salt_bridge();
        let estimator: RecordedEstimator = [
            ("salt-bridge", -323.6),
            ("acetate", -227.8),
            ("methylammonium", -95.7),
        ]
        .into_iter()
        .collect();

        let records = run(
            &fragments,
            &complex,
            EstimationClient::new(&estimator),
            &config(),
            &ProgressReporter::new(),
        );

        assert_eq!(records.fragments.len(), 2);
        assert_eq!(records.fragments[0].molecule, "methylammonium");
        assert_eq!(records.fragments[0].result, EnergyResult::success(-95.7));
        assert_eq!(records.fragments[1].molecule, "acetate");
        assert_eq!(records.fragments[1].result, EnergyResult::success(-227.8));
        assert_eq!(records.complex.molecule, "salt-bridge");
        assert_eq!(records.complex.result, EnergyResult::success(-323.6));
    }

    #[test]
    fn failures_are_recorded_not_raised() {
        let (fragments, complex) = salt_bridge();
        let estimator = RecordedEstimator::new().with_energy("methylammonium", -95.7);

        let records = run(
            &fragments,
            &complex,
            EstimationClient::new(&estimator),
            &config(),
            &ProgressReporter::new(),
        );

        assert!(records.fragments[0].result.is_success());
        assert!(!records.fragments[1].result.is_success());
        assert!(!records.complex.result.is_success());
    }

    #[test]
    fn reports_one_increment_per_molecule() {
        let (fragments, complex) = salt_bridge();
        let estimator = RecordedEstimator::new()
            .with_energy("methylammonium", -95.7)
            .with_energy("acetate", -227.8);
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            events.lock().unwrap().push(event);
        }));

        run(
            &fragments,
            &complex,
            EstimationClient::new(&estimator),
            &config(),
            &reporter,
        );
        drop(reporter);

        let events = events.into_inner().unwrap();
        assert_eq!(
            events.first(),
            Some(&Progress::PhaseStart {
                name: "Energy Estimation"
            })
        );
        assert_eq!(events[1], Progress::TaskStart { total_steps: 3 });
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, Progress::TaskIncrement))
                .count(),
            3
        );
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, Progress::EstimationFinished { success: true, .. }))
                .count(),
            2
        );
        assert_eq!(events.last(), Some(&Progress::PhaseFinish));
    }
}
