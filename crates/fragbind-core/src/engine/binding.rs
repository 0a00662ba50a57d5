//! Binding energy aggregation.
//!
//! The binding energy of a complex is its ground-state energy minus the sum of the energies
//! of its isolated fragments. All of these are large (tens to hundreds of Hartree) while the
//! difference of interest is small (milli-Hartree), so any imprecision of the estimator
//! carries straight into the result. No compensation is attempted here; the estimator must
//! be converged tightly enough for the difference to be meaningful.

use super::error::EngineError;
use super::estimator::EstimationRecord;
use std::fmt;
use tracing::warn;

/// Hartree to kcal/mol conversion factor.
pub const HARTREE_TO_KCAL_PER_MOL: f64 = 627.5;

const STRONG_THRESHOLD_KCAL_MOL: f64 = -4.0;
const MODERATE_THRESHOLD_KCAL_MOL: f64 = -2.0;
const WEAK_THRESHOLD_KCAL_MOL: f64 = 0.0;

/// `complex_energy - sum(fragment_energies)`, in the units of the inputs.
pub fn binding_energy(complex_energy: f64, fragment_energies: &[f64]) -> f64 {
    complex_energy - fragment_energies.iter().sum::<f64>()
}

pub fn to_kcal_per_mol(hartree: f64) -> f64 {
    hartree * HARTREE_TO_KCAL_PER_MOL
}

/// Qualitative strength of a fragment interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionStrength {
    Strong,
    Moderate,
    Weak,
    Unfavorable,
}

impl InteractionStrength {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Strong => "Strong",
            Self::Moderate => "Moderate",
            Self::Weak => "Weak",
            Self::Unfavorable => "Unfavorable",
        }
    }
}

impl fmt::Display for InteractionStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classifies a binding energy in kcal/mol.
///
/// Thresholds are checked from the most negative upward and are strict: a value exactly
/// on a boundary belongs to the weaker category (-4.0 is `Moderate`, -2.0 is `Weak`, 0.0 is
/// `Unfavorable`).
pub fn classify(binding_energy_kcal: f64) -> InteractionStrength {
    if binding_energy_kcal < STRONG_THRESHOLD_KCAL_MOL {
        InteractionStrength::Strong
    } else if binding_energy_kcal < MODERATE_THRESHOLD_KCAL_MOL {
        InteractionStrength::Moderate
    } else if binding_energy_kcal < WEAK_THRESHOLD_KCAL_MOL {
        InteractionStrength::Weak
    } else {
        InteractionStrength::Unfavorable
    }
}

/// A binding energy in both unit systems together with its classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BindingEnergy {
    pub hartree: f64,
    pub kcal_per_mol: f64,
    pub strength: InteractionStrength,
}

impl BindingEnergy {
    pub fn from_energies(complex_energy: f64, fragment_energies: &[f64]) -> Self {
        let hartree = binding_energy(complex_energy, fragment_energies);
        let kcal_per_mol = to_kcal_per_mol(hartree);
        Self {
            hartree,
            kcal_per_mol,
            strength: classify(kcal_per_mol),
        }
    }

    /// Aggregates estimation outcomes into a binding energy.
    ///
    /// Every outcome is checked before anything is combined. The first failure, in fragment
    /// order and then the complex, is returned as [`EngineError::EstimationFailure`]; a
    /// failed estimate is never replaced by a placeholder energy.
    pub fn from_records(
        complex: &EstimationRecord,
        fragments: &[EstimationRecord],
    ) -> Result<Self, EngineError> {
        let fragment_energies = fragments
            .iter()
            .map(EstimationRecord::energy)
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|e| warn!("Cannot aggregate binding energy: {}", e))?;
        let complex_energy = complex
            .energy()
            .inspect_err(|e| warn!("Cannot aggregate binding energy: {}", e))?;
        Ok(Self::from_energies(complex_energy, &fragment_energies))
    }
}
