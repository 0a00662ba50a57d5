use super::config::ConfigError;
use crate::core::composition::CompositionError;
use crate::core::models::molecule::MoleculeError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("Invalid molecule: {0}")]
    Molecule(#[from] MoleculeError),

    #[error("Composition failed: {0}")]
    Composition(#[from] CompositionError),

    #[error("Energy estimation failed for '{molecule}': {message}")]
    EstimationFailure { molecule: String, message: String },

    #[error("Invalid estimation configuration: {0}")]
    Config(#[from] ConfigError),
}
