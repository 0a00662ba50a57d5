use crate::core::composition::ComplexSpec;
use crate::core::models::molecule::Molecule;
use crate::engine::binding::BindingEnergy;
use crate::engine::client::EstimationClient;
use crate::engine::config::EstimationConfig;
use crate::engine::error::EngineError;
use crate::engine::estimator::{EnergyEstimator, EstimationRecord};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks;
use tracing::{info, instrument, warn};

/// The ground-state energy of one molecule, in Hartree.
#[derive(Debug, Clone, PartialEq)]
pub struct MoleculeEnergy {
    pub molecule: String,
    pub energy: f64,
}

impl MoleculeEnergy {
    fn from_record(record: &EstimationRecord) -> Result<Self, EngineError> {
        Ok(Self {
            molecule: record.molecule.clone(),
            energy: record.energy()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BindingReport {
    /// The composed complex that was estimated.
    pub complex: Molecule,
    /// Fragment energies, in fragment order.
    pub fragment_energies: Vec<MoleculeEnergy>,
    pub complex_energy: MoleculeEnergy,
    pub binding: BindingEnergy,
}

/// Computes the binding energy of `fragments` in the complex described by `complex`.
///
/// The fragments are composed into one molecule carrying the caller's charge and
/// multiplicity, every fragment and the complex are estimated once, and the energies are
/// aggregated. Any failed estimate aborts the workflow with
/// [`EngineError::EstimationFailure`].
#[instrument(skip_all, name = "binding_workflow", fields(complex = %complex.name))]
pub fn run(
    fragments: &[Molecule],
    complex: &ComplexSpec,
    estimator: &dyn EnergyEstimator,
    config: &EstimationConfig,
    reporter: &ProgressReporter,
) -> Result<BindingReport, EngineError> {
    config.validate()?;

    // === Phase 1: Composition ===
    reporter.report(Progress::PhaseStart {
        name: "Composition",
    });
    let composed = complex.compose(fragments)?;
    check_electron_bookkeeping(fragments, &composed)?;
    reporter.report(Progress::Message(format!(
        "Composed '{}' from {} fragment(s), {} atoms",
        composed.name(),
        fragments.len(),
        composed.atom_count()
    )));
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Estimation ===
    let records = tasks::estimation::run(
        fragments,
        &composed,
        EstimationClient::new(estimator),
        config,
        reporter,
    );

    // === Phase 3: Aggregation ===
    let binding = BindingEnergy::from_records(&records.complex, &records.fragments)?;

    info!(
        hartree = binding.hartree,
        kcal_per_mol = binding.kcal_per_mol,
        strength = %binding.strength,
        "Binding energy computed."
    );

    let fragment_energies = records
        .fragments
        .iter()
        .map(MoleculeEnergy::from_record)
        .collect::<Result<Vec<_>, _>>()?;
    let complex_energy = MoleculeEnergy::from_record(&records.complex)?;

    Ok(BindingReport {
        complex: composed,
        fragment_energies,
        complex_energy,
        binding,
    })
}

fn check_electron_bookkeeping(
    fragments: &[Molecule],
    complex: &Molecule,
) -> Result<(), EngineError> {
    let mut fragment_electrons: i64 = 0;
    let mut fragment_charge: i64 = 0;
    for fragment in fragments {
        fragment_electrons += fragment.count_electrons()?;
        fragment_charge += i64::from(fragment.charge());
        if !fragment.is_spin_consistent()? {
            warn!(
                fragment = fragment.name(),
                multiplicity = fragment.multiplicity(),
                "Fragment multiplicity does not match the parity of its electron count."
            );
        }
    }

    let complex_electrons = complex.count_electrons()?;
    if !complex.is_spin_consistent()? {
        warn!(
            multiplicity = complex.multiplicity(),
            electrons = complex_electrons,
            "Complex multiplicity does not match the parity of its electron count."
        );
    }
    if i64::from(complex.charge()) != fragment_charge {
        info!(
            complex_charge = complex.charge(),
            fragment_charge,
            electron_difference = complex_electrons - fragment_electrons,
            "Complex charge differs from the sum of fragment charges."
        );
    }
    Ok(())
}
