use fragbind::core::catalog::CatalogError;
use fragbind::core::composition::CompositionError;
use fragbind::core::io::system::SystemFileError;
use fragbind::core::models::molecule::MoleculeError;
use fragbind::engine::error::EngineError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Molecule(#[from] MoleculeError),

    #[error(transparent)]
    Composition(#[from] CompositionError),

    #[error(transparent)]
    System(#[from] SystemFileError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
