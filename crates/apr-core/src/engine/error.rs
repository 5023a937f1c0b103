use super::plumed::units::UnitError;
use crate::core::models::structure::StructureError;
use crate::core::models::window::WindowError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Unsupported restraint shape: {geometry} restraints {reason}")]
    UnsupportedShape {
        geometry: &'static str,
        reason: &'static str,
    },

    #[error("Atom index {index} is out of range for a structure with {atoms} atoms")]
    AtomOutOfRange { index: usize, atoms: usize },

    #[error("Centroid force has no bond between two registered groups")]
    IncompleteCentroidForce,

    #[error("Structure error: {0}")]
    Structure(#[from] StructureError),
}

#[derive(Debug, Error)]
pub enum PlumedError {
    #[error("Configuration error: {0}")]
    Config(#[from] UnitError),

    #[error(transparent)]
    Window(#[from] WindowError),

    #[error("I/O error for '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Restraint file '{path}' does not exist", path = .0.display())]
    MissingRestraintFile(PathBuf),

    #[error("Structure error: {0}")]
    Structure(#[from] StructureError),
}

impl PlumedError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| PlumedError::Io { path, source }
    }
}
