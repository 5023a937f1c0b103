//! Provides input functionality for structures and restraint definitions.
//!
//! Structure readers share the [`traits::StructureFile`] interface and only extract what the
//! restraint emitters need: atom names, residue names and coordinates. Restraint lists are read
//! from TOML definition files by [`restraints`].

pub mod bgf;
pub mod pdb;
pub mod restraints;
pub mod source;
pub mod traits;

use crate::core::models::structure::{ParseErrorKind, StructureError};

/// Returns the trimmed column slice `[start, end)` of a fixed-width record, or `""` if the line
/// is shorter than `start`.
pub(crate) fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    line.get(start..end).unwrap_or("").trim()
}

pub(crate) fn parse_float(
    line: &str,
    line_num: usize,
    (start, end): (usize, usize),
    columns: &'static str,
) -> Result<f64, StructureError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| StructureError::Parse {
        line: line_num,
        kind: ParseErrorKind::InvalidFloat {
            columns,
            value: value.to_string(),
        },
    })
}

pub(crate) fn parse_int(
    line: &str,
    line_num: usize,
    (start, end): (usize, usize),
    columns: &'static str,
) -> Result<isize, StructureError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| StructureError::Parse {
        line: line_num,
        kind: ParseErrorKind::InvalidInt {
            columns,
            value: value.to_string(),
        },
    })
}

pub(crate) fn required_field<'a>(
    line: &'a str,
    line_num: usize,
    (start, end): (usize, usize),
    columns: &'static str,
) -> Result<&'a str, StructureError> {
    let value = slice_and_trim(line, start, end);
    if value.is_empty() {
        return Err(StructureError::Parse {
            line: line_num,
            kind: ParseErrorKind::MissingRequiredField { columns },
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD: &str = "ATOM      1  C1  HST     1       0.000   0.000   0.000";

    #[test]
    fn required_field_borrows_from_the_record() {
        let line = RECORD.to_string();
        let name = required_field(&line, 1, (12, 16), "13-16").unwrap();
        assert_eq!(name, "C1");
        assert_eq!(slice_and_trim(RECORD, 17, 20), "HST");
    }

    #[test]
    fn blank_required_field_reports_its_columns() {
        let err = required_field("ATOM      1      HST", 7, (12, 16), "13-16").unwrap_err();
        assert!(matches!(
            err,
            StructureError::Parse {
                line: 7,
                kind: ParseErrorKind::MissingRequiredField { columns: "13-16" }
            }
        ));
    }

    #[test]
    fn numeric_columns_are_parsed_or_reported() {
        assert_eq!(parse_int(RECORD, 1, (22, 26), "23-26").unwrap(), 1);
        assert_eq!(parse_float(RECORD, 1, (30, 38), "31-38").unwrap(), 0.0);
        assert!(matches!(
            parse_float("ATOM  x", 2, (0, 6), "1-6"),
            Err(StructureError::Parse { line: 2, .. })
        ));
    }
}
