use apr_restraints::core::io::restraints::RestraintLoadError;
use apr_restraints::core::models::structure::StructureError;
use apr_restraints::core::models::window::WindowError;
use apr_restraints::engine::error::{EngineError, PlumedError};
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Plumed(#[from] PlumedError),

    #[error(transparent)]
    Restraints(#[from] RestraintLoadError),

    #[error(transparent)]
    Window(#[from] WindowError),

    #[error("Structure error: {0}")]
    Structure(#[from] StructureError),

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

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
