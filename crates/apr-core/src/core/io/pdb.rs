use super::traits::StructureFile;
use super::{parse_float, parse_int, required_field, slice_and_trim};
use crate::core::models::structure::{Atom, ParseErrorKind, Structure, StructureError};
use nalgebra::Point3;
use std::io::BufRead;

/// An atom record must reach the end of the z coordinate (column 54).
const MIN_ATOM_RECORD_LEN: usize = 54;

/// Reader for the atom records of Protein Data Bank files.
pub struct PdbFile;

impl StructureFile for PdbFile {
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

            let name = required_field(&line, line_num, (12, 16), "13-16")?;
            let residue_name = slice_and_trim(&line, 17, 20);
            let residue_number = parse_int(&line, line_num, (22, 26), "23-26")?;
            let x = parse_float(&line, line_num, (30, 38), "31-38")?;
            let y = parse_float(&line, line_num, (38, 46), "39-46")?;
            let z = parse_float(&line, line_num, (46, 54), "47-54")?;

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

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "\
REMARK   1 host-guest complex with anchor particles
ATOM      1  C1  HST A   1       1.000   2.000   3.000  1.00  0.00           C
HETATM    2  DUM DM1 A   2      18.600  19.020  27.950  1.00  0.00          Pb
HETATM    3  DUM DM2 A   3      18.600  19.020  24.950  1.00  0.00          Pb
HETATM    4  DUM DM3 A   4      18.600  21.220  22.750  1.00  0.00          Pb
TER
END
ATOM      5  C9  HST A   9       0.000   0.000   0.000  1.00  0.00           C
";

    #[test]
    fn reads_atom_and_hetatm_records_in_file_order() {
        let structure = PdbFile::read_from(&mut Cursor::new(SAMPLE)).unwrap();
        assert_eq!(structure.len(), 4);

        let first = &structure.atoms[0];
        assert_eq!(first.name, "C1");
        assert_eq!(first.residue_name, "HST");
        assert_eq!(first.residue_number, 1);
        assert_eq!(first.position, Point3::new(1.0, 2.0, 3.0));

        let last = &structure.atoms[3];
        assert_eq!(last.name, "DUM");
        assert_eq!(last.residue_name, "DM3");
        assert_eq!(last.position, Point3::new(18.6, 21.22, 22.75));
    }

    #[test]
    fn structure_read_from_pdb_exposes_dummy_atoms() {
        let structure = PdbFile::read_from(&mut Cursor::new(SAMPLE)).unwrap();
        let dummies = structure.dummy_atoms(true).unwrap();
        let indices: Vec<usize> = dummies.iter().map(|d| d.index).collect();
        assert_eq!(indices, [2, 3, 4]);
    }

    #[test]
    fn short_atom_record_is_rejected() {
        let data = "ATOM      1  C1  HST A   1       1.000   2.000\n";
        let err = PdbFile::read_from(&mut Cursor::new(data)).unwrap_err();
        assert!(matches!(
            err,
            StructureError::Parse {
                line: 1,
                kind: ParseErrorKind::LineTooShort { min: 54 }
            }
        ));
    }

    #[test]
    fn invalid_coordinate_reports_line_and_columns() {
        let data = "\
ATOM      1  C1  HST A   1       1.000   2.000   3.000
ATOM      2  C2  HST A   1       1.000   abcde   3.000
";
        let err = PdbFile::read_from(&mut Cursor::new(data)).unwrap_err();
        match err {
            StructureError::Parse { line, kind } => {
                assert_eq!(line, 2);
                assert_eq!(
                    kind,
                    ParseErrorKind::InvalidFloat {
                        columns: "39-46",
                        value: "abcde".to_string()
                    }
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_atom_name_is_rejected() {
        let data = "ATOM      1      HST A   1       1.000   2.000   3.000\n";
        let err = PdbFile::read_from(&mut Cursor::new(data)).unwrap_err();
        assert!(matches!(
            err,
            StructureError::Parse {
                kind: ParseErrorKind::MissingRequiredField { columns: "13-16" },
                ..
            }
        ));
    }
}
