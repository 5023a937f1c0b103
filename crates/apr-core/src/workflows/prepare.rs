use crate::core::io::source::StructureSource;
use crate::core::models::restraint::Restraint;
use crate::core::models::window::{WindowId, check_window_counts, create_window_list};
use crate::engine::error::PlumedError;
use crate::engine::plumed::{PlumedConfig, PlumedWriter, WindowSummary};
use crate::engine::progress::{Progress, ProgressReporter};
use std::fs;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct PrepareResult {
    pub windows: Vec<WindowId>,
    pub summaries: Vec<WindowSummary>,
    pub dummy_atoms_added: bool,
}

/// Writes the PLUMED restraint file of every window derived from `restraints`.
///
/// Window counts are checked and the window list is built before anything is written. Missing
/// window directories under the configured base path are created. When `dummy_source` is given,
/// the placeholder-particle block is appended to every window file after all files are written.
#[instrument(skip_all, name = "prepare_workflow")]
pub fn run(
    restraints: &[Restraint],
    config: &PlumedConfig,
    dummy_source: Option<StructureSource<'_>>,
    reporter: &ProgressReporter,
) -> Result<PrepareResult, PlumedError> {
    check_window_counts(restraints)?;
    let windows = create_window_list(restraints)?;
    info!(
        "Preparing {} windows for {} restraints.",
        windows.len(),
        restraints.len()
    );

    let writer = PlumedWriter::new(config.clone());
    // Resolved once and checked for all three placeholder residues before any file is written.
    let dummy_structure = dummy_source.map(StructureSource::resolve).transpose()?;
    if let Some(structure) = dummy_structure.as_deref() {
        structure.dummy_atoms(true)?;
    }

    reporter.report(Progress::PhaseStart {
        name: "Writing restraint files",
    });
    reporter.report(Progress::TaskStart {
        total_steps: windows.len() as u64,
    });

    let mut summaries = Vec::with_capacity(windows.len());
    for window in &windows {
        let label = window.to_string();
        let directory = config.path.join(&label);
        fs::create_dir_all(&directory).map_err(PlumedError::io(&directory))?;

        summaries.push(writer.write_window(restraints, &label, *window)?);
        reporter.report(Progress::WindowWritten(label));
        reporter.report(Progress::TaskIncrement);
    }
    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    let skipped: usize = summaries.iter().map(|s| s.skipped).sum();
    if skipped > 0 {
        reporter.report(Progress::Message(format!(
            "Skipped {} restraint entries with undefined values",
            skipped
        )));
    }

    if let Some(structure) = dummy_structure.as_deref() {
        reporter.report(Progress::PhaseStart {
            name: "Adding dummy atom restraints",
        });
        for window in &windows {
            writer.add_dummy_atom_restraints(
                StructureSource::Loaded(structure),
                &window.to_string(),
                None,
            )?;
        }
        reporter.report(Progress::PhaseFinish);
    }

    info!("Wrote restraint files for {} windows.", summaries.len());

    Ok(PrepareResult {
        windows,
        summaries,
        dummy_atoms_added: dummy_structure.is_some(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::restraint::{PhaseSchedule, RestraintBuilder};
    use crate::core::models::structure::{Atom, Structure};
    use crate::core::models::window::{Phase, WindowError};
    use crate::engine::plumed::PlumedConfigBuilder;
    use nalgebra::Point3;
    use std::sync::Mutex;
    use tempfile::tempdir;

    fn restraints() -> Vec<Restraint> {
        vec![
            RestraintBuilder::new()
                .index1(vec![0])
                .index2(vec![1])
                .schedule(Phase::Attach, PhaseSchedule::constant(6.0, 5.0, 2))
                .schedule(Phase::Pull, PhaseSchedule::from_values(&[6.0, 7.0, 8.0], &[5.0; 3]))
                .build()
                .unwrap(),
            RestraintBuilder::new()
                .index1(vec![0])
                .index2(vec![1])
                .index3(vec![2])
                .schedule(Phase::Attach, PhaseSchedule::constant(90.0, 100.0, 2))
                .build()
                .unwrap(),
        ]
    }

    #[test]
    fn writes_every_window_and_reports_progress() {
        let dir = tempdir().unwrap();
        let config = PlumedConfigBuilder::new().path(dir.path()).build().unwrap();
        let written = Mutex::new(Vec::new());
        let messages = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| match event {
            Progress::WindowWritten(label) => written.lock().unwrap().push(label),
            Progress::Message(msg) => messages.lock().unwrap().push(msg),
            _ => {}
        }));

        let result = run(&restraints(), &config, None, &reporter).unwrap();
        drop(reporter);

        assert_eq!(result.windows.len(), 5);
        assert!(!result.dummy_atoms_added);
        assert_eq!(
            written.into_inner().unwrap(),
            ["a000", "a001", "p000", "p001", "p002"]
        );
        // The angle has no pull schedule.
        assert_eq!(
            messages.into_inner().unwrap(),
            ["Skipped 3 restraint entries with undefined values"]
        );
        assert_eq!(result.summaries[0].colvars, 2);
        assert_eq!(result.summaries[2].colvars, 1);
        for label in ["a000", "a001", "p000", "p001", "p002"] {
            assert!(dir.path().join(label).join("plumed.dat").is_file());
        }
    }

    #[test]
    fn appends_dummy_atoms_to_every_window() {
        let dir = tempdir().unwrap();
        let config = PlumedConfigBuilder::new().path(dir.path()).build().unwrap();
        let structure = Structure::new(vec![
            Atom::new("DUM", "DM1", 1, Point3::new(0.0, 0.0, 10.0)),
            Atom::new("DUM", "DM2", 2, Point3::new(0.0, 0.0, 7.0)),
            Atom::new("DUM", "DM3", 3, Point3::new(0.0, 2.2, 5.2)),
        ]);

        let result = run(
            &restraints(),
            &config,
            Some(StructureSource::Loaded(&structure)),
            &ProgressReporter::new(),
        )
        .unwrap();

        assert!(result.dummy_atoms_added);
        for window in &result.windows {
            let content =
                std::fs::read_to_string(dir.path().join(window.to_string()).join("plumed.dat"))
                    .unwrap();
            assert!(content.contains("dm1: POSITION ATOM=1 NOPBC"));
        }
    }

    #[test]
    fn inconsistent_window_counts_fail_before_writing() {
        let dir = tempdir().unwrap();
        let config = PlumedConfigBuilder::new().path(dir.path()).build().unwrap();
        let mut restraints = restraints();
        restraints.push(
            RestraintBuilder::new()
                .index1(vec![3])
                .index2(vec![4])
                .schedule(Phase::Attach, PhaseSchedule::constant(6.0, 5.0, 3))
                .build()
                .unwrap(),
        );

        let err = run(&restraints, &config, None, &ProgressReporter::new()).unwrap_err();
        assert!(matches!(
            err,
            PlumedError::Window(WindowError::InconsistentWindowCount { restraint: 2, .. })
        ));
        assert!(!dir.path().join("a000").exists());
    }

    #[test]
    fn missing_dummy_residue_fails_before_writing() {
        let dir = tempdir().unwrap();
        let config = PlumedConfigBuilder::new().path(dir.path()).build().unwrap();
        let structure = Structure::new(vec![Atom::new("C1", "HST", 1, Point3::origin())]);

        let err = run(
            &restraints(),
            &config,
            Some(StructureSource::Loaded(&structure)),
            &ProgressReporter::new(),
        );
        assert!(matches!(err, Err(PlumedError::Structure(_))));
        assert!(!dir.path().join("a000").exists());
    }
}
