use super::traits::StructureFile;
use super::{parse_float, parse_int, required_field, slice_and_trim};
use crate::core::models::structure::{Atom, ParseErrorKind, Structure, StructureError};
use nalgebra::Point3;
use std::io::BufRead;

/// Atom records must reach the end of the z coordinate (column 60).
const MIN_ATOM_RECORD_LEN: usize = 60;

/// Reader for the atom records of BIOGRF (`.bgf`) files.
///
/// Only `ATOM`/`HETATM` lines are interpreted; headers, `FORMAT` and `CONECT` records are
/// skipped since restraints never depend on connectivity.
pub struct BgfFile;

impl StructureFile for BgfFile {
    type Error = StructureError;

    fn read_from(reader: &mut impl BufRead) -> Result<Structure, Self::Error> {
        let mut atoms = Vec::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            match slice_and_trim(&line, 0, 6) {
                "ATOM" | "HETATM" => {}
                "END" => break,
                _ => continue,
            }

            if line.len() < MIN_ATOM_RECORD_LEN {
                return Err(StructureError::Parse {
                    line: line_num,
                    kind: ParseErrorKind::LineTooShort {
                        min: MIN_ATOM_RECORD_LEN,
                    },
                });
            }

            let name = required_field(&line, line_num, (13, 18), "14-18")?;
            let residue_name = slice_and_trim(&line, 19, 22);
            let residue_number = parse_int(&line, line_num, (25, 30), "26-30")?;
            let x = parse_float(&line, line_num, (30, 40), "31-40")?;
            let y = parse_float(&line, line_num, (40, 50), "41-50")?;
            let z = parse_float(&line, line_num, (50, 60), "51-60")?;

            atoms.push(Atom::new(
                name,
                residue_name,
                residue_number,
                Point3::new(x, y, z),
            ));
        }

        Ok(Structure::new(atoms))
    }
}
