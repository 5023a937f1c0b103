use nalgebra::Point3;
use thiserror::Error;

/// Atom name the structure builder gives every placeholder particle.
pub const PLACEHOLDER_ATOM_NAME: &str = "DUM";

/// Residue names of the three placeholder particles, in anchor-frame order.
pub const DUMMY_RESIDUE_NAMES: [&str; 3] = ["DM1", "DM2", "DM3"];

#[derive(Debug, Error)]
pub enum StructureError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: ParseErrorKind },

    #[error("Unsupported structure representation: '{0}' (expected a .pdb, .ent or .bgf file)")]
    UnsupportedFormat(String),

    #[error("Placeholder residue '{0}' not found in structure")]
    MissingDummyAtom(&'static str),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: &'static str, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: &'static str, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: &'static str },
    #[error("Line is too short for an atom record (must be at least {min} chars)")]
    LineTooShort { min: usize },
}

/// An atom of a loaded structure, identified by its position in [`Structure::atoms`].
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The atom name (e.g. "CA", "DUM").
    pub name: String,
    /// The name of the residue this atom belongs to.
    pub residue_name: String,
    /// The residue sequence number as written in the file.
    pub residue_number: isize,
    /// Cartesian coordinates in Angstroms.
    pub position: Point3<f64>,
}

impl Atom {
    pub fn new(
        name: &str,
        residue_name: &str,
        residue_number: isize,
        position: Point3<f64>,
    ) -> Self {
        Self {
            name: name.to_string(),
            residue_name: residue_name.to_string(),
            residue_number,
            position,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.name == PLACEHOLDER_ATOM_NAME
    }
}

/// A flat, ordered list of atoms; an atom's index in the list is its absolute index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure {
    pub atoms: Vec<Atom>,
}

/// A placeholder particle of the anchor frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DummyAtom {
    pub name: &'static str,
    pub index: usize,
    pub position: Point3<f64>,
}

/// The three placeholder particles (`DM1`, `DM2`, `DM3`) that define the anchor frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DummyAtoms(pub [DummyAtom; 3]);

impl DummyAtoms {
    pub fn iter(&self) -> impl Iterator<Item = &DummyAtom> {
        self.0.iter()
    }
}

impl Structure {
    pub fn new(atoms: Vec<Atom>) -> Self {
        Self { atoms }
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn positions(&self) -> impl Iterator<Item = &Point3<f64>> {
        self.atoms.iter().map(|a| &a.position)
    }

    pub fn position(&self, index: usize) -> Option<&Point3<f64>> {
        self.atoms.get(index).map(|a| &a.position)
    }

    /// Iterates over `(index, atom)` for every atom named as a placeholder particle.
    pub fn placeholder_atoms(&self) -> impl Iterator<Item = (usize, &Atom)> {
        self.atoms
            .iter()
            .enumerate()
            .filter(|(_, atom)| atom.is_placeholder())
    }

    /// Extracts the three anchor-frame placeholder particles by residue name.
    ///
    /// With `serial` set the reported indices are 1-based, matching the numbering PLUMED uses.
    /// If a residue holds several atoms, the first is taken.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::MissingDummyAtom`] if any of `DM1`, `DM2`, `DM3` is absent.
    pub fn dummy_atoms(&self, serial: bool) -> Result<DummyAtoms, StructureError> {
        let offset = usize::from(serial);
        let find = |name: &'static str| -> Result<DummyAtom, StructureError> {
            self.atoms
                .iter()
                .position(|atom| atom.residue_name == name)
                .map(|index| DummyAtom {
                    name,
                    index: index + offset,
                    position: self.atoms[index].position,
                })
                .ok_or(StructureError::MissingDummyAtom(name))
        };

        let [dm1, dm2, dm3] = DUMMY_RESIDUE_NAMES;
        Ok(DummyAtoms([find(dm1)?, find(dm2)?, find(dm3)?]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchored_structure() -> Structure {
        Structure::new(vec![
            Atom::new("C1", "HST", 1, Point3::new(0.0, 0.0, 0.0)),
            Atom::new("C2", "HST", 1, Point3::new(1.5, 0.0, 0.0)),
            Atom::new("DUM", "DM1", 2, Point3::new(18.6, 19.02, 27.95)),
            Atom::new("DUM", "DM2", 3, Point3::new(18.6, 19.02, 24.95)),
            Atom::new("DUM", "DM3", 4, Point3::new(18.6, 21.22, 22.75)),
        ])
    }

    #[test]
    fn dummy_atoms_are_found_by_residue_name() {
        let dummies = anchored_structure().dummy_atoms(false).unwrap();
        let indices: Vec<usize> = dummies.iter().map(|d| d.index).collect();
        assert_eq!(indices, [2, 3, 4]);
        assert_eq!(dummies.0[2].name, "DM3");
        assert_eq!(dummies.0[0].position, Point3::new(18.6, 19.02, 27.95));
    }

    #[test]
    fn serial_dummy_indices_are_one_based() {
        let dummies = anchored_structure().dummy_atoms(true).unwrap();
        let indices: Vec<usize> = dummies.iter().map(|d| d.index).collect();
        assert_eq!(indices, [3, 4, 5]);
    }

    #[test]
    fn missing_dummy_residue_is_an_error() {
        let mut structure = anchored_structure();
        structure.atoms.retain(|a| a.residue_name != "DM2");
        assert!(matches!(
            structure.dummy_atoms(true),
            Err(StructureError::MissingDummyAtom("DM2"))
        ));
    }

    #[test]
    fn placeholder_atoms_are_selected_by_atom_name() {
        let structure = anchored_structure();
        let indices: Vec<usize> = structure.placeholder_atoms().map(|(i, _)| i).collect();
        assert_eq!(indices, [2, 3, 4]);
        assert_eq!(structure.len(), 5);
        assert_eq!(structure.position(1), Some(&Point3::new(1.5, 0.0, 0.0)));
        assert_eq!(structure.position(9), None);
    }
}
