use super::config::PlumedConfig;
use super::tables::{ColvarTable, GroupTable};
use crate::core::io::source::StructureSource;
use crate::core::models::restraint::{Operand, Restraint};
use crate::core::models::structure::DummyAtoms;
use crate::core::models::window::{Phase, WindowId};
use crate::engine::classify::bias_kind;
use crate::engine::error::PlumedError;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Counts of what was written for one window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSummary {
    pub window: String,
    pub path: PathBuf,
    pub groups: usize,
    pub colvars: usize,
    pub biases: usize,
    pub skipped: usize,
}

/// The three output blocks of one window, accumulated before anything is appended.
#[derive(Debug, Default)]
pub struct WindowBlocks {
    pub groups: GroupTable,
    pub colvars: ColvarTable,
    pub biases: Vec<String>,
    pub skipped: usize,
}

impl WindowBlocks {
    fn write_to(&self, out: &mut impl Write) -> std::io::Result<()> {
        if !self.groups.is_empty() {
            writeln!(out, "# Centroid groups")?;
            for line in self.groups.lines() {
                writeln!(out, "{line}")?;
            }
        }
        writeln!(out, "# Collective variables")?;
        for line in self.colvars.lines() {
            writeln!(out, "{line}")?;
        }
        writeln!(out, "# Bias potentials")?;
        for line in &self.biases {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}

/// Writes restraints as PLUMED input files, one per window.
#[derive(Debug, Clone)]
pub struct PlumedWriter {
    config: PlumedConfig,
}

impl PlumedWriter {
    pub fn new(config: PlumedConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlumedConfig {
        &self.config
    }

    /// Path of the restraint file for `window` under the configured base path.
    pub fn window_file(&self, window: &str) -> PathBuf {
        self.config.window_file(None, window)
    }

    /// Writes one restraint file per window.
    ///
    /// All window labels are parsed before any file is touched. Each file is truncated and given
    /// the `UNITS` header, then the centroid groups, collective variables and bias potentials of
    /// the window are appended. Window directories must already exist.
    ///
    /// # Errors
    ///
    /// Returns [`PlumedError::Window`] for a malformed label and [`PlumedError::Io`] if a file
    /// cannot be written.
    pub fn dump_to_file<S: AsRef<str>>(
        &self,
        restraints: &[Restraint],
        windows: &[S],
    ) -> Result<Vec<WindowSummary>, PlumedError> {
        let mut parsed = Vec::with_capacity(windows.len());
        for label in windows {
            let label = label.as_ref();
            parsed.push((label, label.parse::<WindowId>()?));
        }

        parsed
            .into_iter()
            .map(|(label, window)| self.write_window(restraints, label, window))
            .collect()
    }

    /// Writes the file of a single window labelled `label`.
    pub fn write_window(
        &self,
        restraints: &[Restraint],
        label: &str,
        window: WindowId,
    ) -> Result<WindowSummary, PlumedError> {
        let path = self.window_file(label);

        let mut file = File::create(&path).map_err(PlumedError::io(&path))?;
        writeln!(file, "{}", self.config.units.header_line()).map_err(PlumedError::io(&path))?;
        drop(file);

        let blocks = self.render_window(restraints, window.phase, window.index);

        let file = OpenOptions::new()
            .append(true)
            .open(&path)
            .map_err(PlumedError::io(&path))?;
        let mut out = BufWriter::new(file);
        blocks
            .write_to(&mut out)
            .and_then(|()| out.flush())
            .map_err(PlumedError::io(&path))?;

        info!(
            "Wrote {} bias potentials for window {} to {:?}",
            blocks.biases.len(),
            label,
            path
        );

        Ok(WindowSummary {
            window: label.to_string(),
            path,
            groups: blocks.groups.len(),
            colvars: blocks.colvars.len(),
            biases: blocks.biases.len(),
            skipped: blocks.skipped,
        })
    }

    /// Accumulates the output blocks of one window from fresh tables.
    ///
    /// Restraints with an undefined target or force constant for the window are skipped. Every
    /// other restraint is written, flat-bottom walls included, whatever the phase.
    pub fn render_window(
        &self,
        restraints: &[Restraint],
        phase: Phase,
        window: usize,
    ) -> WindowBlocks {
        let mut blocks = WindowBlocks::default();

        for restraint in restraints {
            let Some((target, force_constant)) = restraint.values(phase, window) else {
                debug!("Restraint undefined for {} window {}; skipping", phase, window);
                blocks.skipped += 1;
                continue;
            };

            let shift = if restraint.amber_index() {
                0
            } else {
                debug!("Atom indices start from 0; shifting by 1");
                1
            };
            let atoms = restraint
                .geometry()
                .operands()
                .iter()
                .map(|operand| atom_reference(operand, shift, &mut blocks.groups))
                .collect::<Vec<_>>()
                .join(",");

            let geometry = restraint.geometry();
            let at = if geometry.is_angular() {
                target.to_radians()
            } else {
                target
            };
            let kappa = force_constant * self.config.k_factor();

            let (label, _) = blocks
                .colvars
                .declare(&geometry.kind().to_ascii_uppercase(), &atoms);
            let bias = format!(
                "{} ARG={} AT={:.4} KAPPA={:.2}",
                bias_kind(restraint).keyword(),
                label,
                at,
                kappa
            );
            blocks.biases.push(bias);
        }

        blocks
    }

    /// Appends position restraints on the three placeholder particles to an existing window file.
    ///
    /// The file is `<path>/<window>/<file_name>`, with `path` defaulting to the configured base
    /// path. Particle indices are 1-based.
    ///
    /// # Errors
    ///
    /// Returns [`PlumedError::MissingRestraintFile`] before anything is written if the file does
    /// not exist, and [`PlumedError::Structure`] if the structure cannot be loaded or lacks a
    /// placeholder residue.
    pub fn add_dummy_atom_restraints(
        &self,
        source: StructureSource<'_>,
        window: &str,
        path: Option<&Path>,
    ) -> Result<(), PlumedError> {
        let restraint_file = self.config.window_file(path, window);
        if !restraint_file.is_file() {
            return Err(PlumedError::MissingRestraintFile(restraint_file));
        }

        let structure = source.resolve()?;
        let dummies = structure.dummy_atoms(true)?;

        let file = OpenOptions::new()
            .append(true)
            .open(&restraint_file)
            .map_err(PlumedError::io(&restraint_file))?;
        let mut out = BufWriter::new(file);
        write_dummy_block(&mut out, &dummies, self.config.dummy_force_constant)
            .and_then(|()| out.flush())
            .map_err(PlumedError::io(&restraint_file))?;

        debug!("Appended dummy atom restraints to {:?}", restraint_file);
        Ok(())
    }
}

fn atom_reference(operand: &Operand, shift: usize, groups: &mut GroupTable) -> String {
    match operand {
        Operand::Atom(index) => (index + shift).to_string(),
        Operand::Group(indices) => {
            let members: String = indices.iter().map(|i| format!("{},", i + shift)).collect();
            groups.label_for(&members).to_string()
        }
    }
}

fn write_dummy_block(out: &mut impl Write, dummies: &DummyAtoms, k: f64) -> std::io::Result<()> {
    writeln!(out, "# Dummy Atoms")?;
    for (n, dummy) in dummies.iter().enumerate() {
        writeln!(out, "dm{}: POSITION ATOM={} NOPBC", n + 1, dummy.index)?;
    }

    let mut arg = String::new();
    let mut at = String::new();
    let mut kappa = String::new();
    for (n, dummy) in dummies.iter().enumerate() {
        for (axis, value) in ["x", "y", "z"].into_iter().zip(dummy.position.iter()) {
            arg.push_str(&format!("dm{}.{},", n + 1, axis));
            at.push_str(&format!("{value:.3},"));
            kappa.push_str(&format!("{k:.1},"));
        }
    }

    writeln!(out, "RESTRAINT ...")?;
    writeln!(out, "ARG={arg}")?;
    writeln!(out, "AT={at}")?;
    writeln!(out, "KAPPA={kappa}")?;
    writeln!(out, "LABEL=dummy")?;
    writeln!(out, "... RESTRAINT")
}
