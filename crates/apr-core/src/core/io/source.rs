use super::bgf::BgfFile;
use super::pdb::PdbFile;
use super::traits::StructureFile;
use crate::core::models::structure::{Structure, StructureError};
use std::borrow::Cow;
use std::path::Path;
use tracing::debug;

/// A structure given either as a file to load or as an already loaded [`Structure`].
#[derive(Debug, Clone, Copy)]
pub enum StructureSource<'a> {
    Path(&'a Path),
    Loaded(&'a Structure),
}

impl<'a> StructureSource<'a> {
    /// Returns the structure, loading it from disk when given a path.
    ///
    /// The reader is chosen by file extension (`pdb`/`ent` or `bgf`, case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::UnsupportedFormat`] for any other extension, or the reader's
    /// error if loading fails.
    pub fn resolve(self) -> Result<Cow<'a, Structure>, StructureError> {
        match self {
            StructureSource::Loaded(structure) => Ok(Cow::Borrowed(structure)),
            StructureSource::Path(path) => {
                let extension = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(str::to_ascii_lowercase);
                debug!("Loading structure from {:?}", path);
                let structure = match extension.as_deref() {
                    Some("pdb") | Some("ent") => PdbFile::read_from_path(path)?,
                    Some("bgf") => BgfFile::read_from_path(path)?,
                    _ => return Err(StructureError::UnsupportedFormat(path.display().to_string())),
                };
                Ok(Cow::Owned(structure))
            }
        }
    }
}

impl<'a> From<&'a Path> for StructureSource<'a> {
    fn from(path: &'a Path) -> Self {
        StructureSource::Path(path)
    }
}

impl<'a> From<&'a Structure> for StructureSource<'a> {
    fn from(structure: &'a Structure) -> Self {
        StructureSource::Loaded(structure)
    }
}
