use crate::core::models::restraint::{PhaseSchedule, Restraint, RestraintBuilder, RestraintError};
use crate::core::models::window::Phase;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Strings accepted in a schedule to mark a window as undefined.
const UNDEFINED_MARKERS: [&str; 3] = ["none", "null", "-"];

#[derive(Debug, Error)]
pub enum RestraintLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid restraint #{index}: {source}")]
    Invalid {
        index: usize,
        source: RestraintError,
    },
    #[error("Invalid schedule entry '{value}' in restraint #{index} ({phase}); expected a number or 'none'")]
    InvalidEntry {
        index: usize,
        phase: Phase,
        value: String,
    },
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
enum IndexList {
    One(usize),
    Many(Vec<usize>),
}

impl IndexList {
    fn into_vec(self) -> Vec<usize> {
        match self {
            IndexList::One(index) => vec![index],
            IndexList::Many(indices) => indices,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
enum ScheduleEntry {
    Defined(f64),
    Marker(String),
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct FileSchedule {
    targets: Vec<ScheduleEntry>,
    force_constants: Vec<ScheduleEntry>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct FileRestraint {
    index1: IndexList,
    index2: IndexList,
    index3: Option<IndexList>,
    index4: Option<IndexList>,
    group1: Option<bool>,
    group2: Option<bool>,
    group3: Option<bool>,
    group4: Option<bool>,
    #[serde(default)]
    amber_index: bool,
    #[serde(default)]
    flat_bottom: bool,
    attach: Option<FileSchedule>,
    pull: Option<FileSchedule>,
    release: Option<FileSchedule>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct RestraintDocument {
    #[serde(default, rename = "restraint")]
    restraints: Vec<FileRestraint>,
}

/// Loads restraint lists from TOML definition files.
///
/// Each `[[restraint]]` table names up to four index lists (`index1` … `index4`, a single index
/// or an array), optional `groupN` flags (inferred from the list length when omitted), the
/// `amber-index` and `flat-bottom` switches, and per-phase `targets`/`force-constants` arrays in
/// `[restraint.attach]`, `[restraint.pull]` and `[restraint.release]`. A schedule entry of
/// `"none"` leaves that window undefined.
pub struct RestraintFile;

impl RestraintFile {
    pub fn load(path: &Path) -> Result<Vec<Restraint>, RestraintLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| RestraintLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::parse(&content).map_err(|e| match e {
            RestraintLoadError::Toml { source, .. } => RestraintLoadError::Toml {
                path: path.to_string_lossy().to_string(),
                source,
            },
            other => other,
        })
    }

    pub fn parse(content: &str) -> Result<Vec<Restraint>, RestraintLoadError> {
        let document: RestraintDocument =
            toml::from_str(content).map_err(|e| RestraintLoadError::Toml {
                path: "<string>".to_string(),
                source: e,
            })?;

        document
            .restraints
            .into_iter()
            .enumerate()
            .map(|(index, raw)| Self::convert(index, raw))
            .collect()
    }

    fn convert(index: usize, raw: FileRestraint) -> Result<Restraint, RestraintLoadError> {
        let index1 = raw.index1.into_vec();
        let index2 = raw.index2.into_vec();
        let index3 = raw.index3.map(IndexList::into_vec);
        let index4 = raw.index4.map(IndexList::into_vec);

        let inferred = |flag: Option<bool>, list: Option<&Vec<usize>>| {
            flag.unwrap_or_else(|| list.is_some_and(|l| l.len() > 1))
        };

        let mut builder = RestraintBuilder::new()
            .group1(inferred(raw.group1, Some(&index1)))
            .group2(inferred(raw.group2, Some(&index2)))
            .group3(inferred(raw.group3, index3.as_ref()))
            .group4(inferred(raw.group4, index4.as_ref()))
            .index1(index1)
            .index2(index2)
            .amber_index(raw.amber_index)
            .flat_bottom(raw.flat_bottom);
        if let Some(index3) = index3 {
            builder = builder.index3(index3);
        }
        if let Some(index4) = index4 {
            builder = builder.index4(index4);
        }

        for (phase, schedule) in [
            (Phase::Attach, raw.attach),
            (Phase::Pull, raw.pull),
            (Phase::Release, raw.release),
        ] {
            if let Some(schedule) = schedule {
                builder = builder.schedule(phase, Self::convert_schedule(index, phase, schedule)?);
            }
        }

        builder
            .build()
            .map_err(|source| RestraintLoadError::Invalid { index, source })
    }

    fn convert_schedule(
        index: usize,
        phase: Phase,
        schedule: FileSchedule,
    ) -> Result<PhaseSchedule, RestraintLoadError> {
        type Entries = Result<Vec<Option<f64>>, RestraintLoadError>;
        let convert = |entries: Vec<ScheduleEntry>| -> Entries {
            entries
                .into_iter()
                .map(|entry| match entry {
                    ScheduleEntry::Defined(value) => Ok(Some(value)),
                    ScheduleEntry::Marker(marker)
                        if UNDEFINED_MARKERS.contains(&marker.to_ascii_lowercase().as_str()) =>
                    {
                        Ok(None)
                    }
                    ScheduleEntry::Marker(value) => Err(RestraintLoadError::InvalidEntry {
                        index,
                        phase,
                        value,
                    }),
                })
                .collect()
        };

        Ok(PhaseSchedule::new(
            convert(schedule.targets)?,
            convert(schedule.force_constants)?,
        ))
    }
}
