use crate::cli::EnergyArgs;
use crate::config::PartialAprConfig;
use crate::error::Result;
use apr_restraints::core::forcefield::units::KCAL_TO_KJ;
use apr_restraints::core::io::source::StructureSource;
use apr_restraints::core::models::window::WindowId;
use apr_restraints::engine::native::{
    DEFAULT_POSITIONAL_FORCE_GROUP, ForceSystem, apply_positional_restraints, apply_restraints,
};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq)]
struct EnergyReport {
    forces: usize,
    tethers: usize,
    /// kJ/mol
    energy: f64,
    /// kJ/mol, the share of `energy` from dummy atom tethers
    tether_energy: f64,
}

pub fn run(args: EnergyArgs) -> Result<()> {
    let report = evaluate(&args)?;

    println!("Window {}: {} restraint forces", args.window, report.forces);
    if args.with_dummy_tethers {
        println!(
            "Dummy atom tethers: {} ({:.4} kJ/mol)",
            report.tethers, report.tether_energy
        );
    }
    println!(
        "Restraint energy: {:.4} kJ/mol ({:.4} kcal/mol)",
        report.energy,
        report.energy / KCAL_TO_KJ
    );
    Ok(())
}

fn evaluate(args: &EnergyArgs) -> Result<EnergyReport> {
    let config = PartialAprConfig::from_file(&args.config)?;
    let restraints = config.load_restraints()?;
    let window: WindowId = args.window.parse()?;

    let structure = StructureSource::Path(&args.structure).resolve()?;
    info!(
        "Evaluating {} restraints on {} atoms in window {}",
        restraints.len(),
        structure.len(),
        window
    );

    let mut system = ForceSystem::new();
    let forces = apply_restraints(&mut system, &restraints, window, None)?.len();
    let tethers = if args.with_dummy_tethers {
        apply_positional_restraints(
            &mut system,
            StructureSource::Loaded(&structure),
            DEFAULT_POSITIONAL_FORCE_GROUP,
        )?
        .len()
    } else {
        0
    };
    for (id, force) in system.forces() {
        debug!("Force {:?}: {}", id, force.energy_expression());
    }
    let tether_energy = if tethers > 0 {
        system.group_energy(&structure, DEFAULT_POSITIONAL_FORCE_GROUP)?
    } else {
        0.0
    };
    Ok(EnergyReport {
        forces,
        tethers,
        energy: system.potential_energy(&structure)?,
        tether_energy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    const TOLERANCE: f64 = 1e-9;

    const STRUCTURE_PDB: &str = "\
ATOM      1  C1  HST     1       0.000   0.000   0.000  1.00  0.00           C
ATOM      2  C2  HST     1       7.000   0.000   0.000  1.00  0.00           C
HETATM    3  DUM DM1     2       0.000   5.000   0.000  1.00  0.00          PB
END
";

    fn setup(dir: &Path) -> (std::path::PathBuf, std::path::PathBuf) {
        fs::write(
            dir.join("restraints.toml"),
            r#"
            [[restraint]]
            index1 = 0
            index2 = 1
            [restraint.attach]
            targets = [6.0, 6.0]
            force-constants = [0.0, 5.0]
            "#,
        )
        .unwrap();
        let config = dir.join("apr.toml");
        fs::write(&config, "restraints = \"restraints.toml\"\n").unwrap();
        let structure = dir.join("host.pdb");
        fs::write(&structure, STRUCTURE_PDB).unwrap();
        (config, structure)
    }

    fn args(config: std::path::PathBuf, structure: std::path::PathBuf, window: &str) -> EnergyArgs {
        EnergyArgs {
            config,
            structure,
            window: window.to_string(),
            with_dummy_tethers: false,
        }
    }

    #[test]
    fn evaluates_distance_restraint_energy_in_kilojoules() {
        let dir = tempdir().unwrap();
        let (config, structure) = setup(dir.path());

        let report = evaluate(&args(config, structure, "a001")).unwrap();
        assert_eq!(report.forces, 1);
        assert!((report.energy - 5.0 * KCAL_TO_KJ).abs() < TOLERANCE);
    }

    #[test]
    fn dummy_tethers_add_forces_but_no_energy_at_rest() {
        let dir = tempdir().unwrap();
        let (config, structure) = setup(dir.path());
        let mut args = args(config, structure, "a000");
        args.with_dummy_tethers = true;

        let report = evaluate(&args).unwrap();
        assert_eq!(report.tethers, 1);
        assert!(report.energy.abs() < TOLERANCE);
        assert!(report.tether_energy.abs() < TOLERANCE);
    }

    #[test]
    fn tether_energy_is_reported_apart_from_restraint_energy() {
        let dir = tempdir().unwrap();
        let (config, structure) = setup(dir.path());
        let mut args = args(config, structure, "a001");
        args.with_dummy_tethers = true;

        let report = evaluate(&args).unwrap();
        assert_eq!((report.forces, report.tethers), (1, 1));
        assert!(report.tether_energy.abs() < TOLERANCE);
        assert!((report.energy - 5.0 * KCAL_TO_KJ).abs() < TOLERANCE);
    }

    #[test]
    fn malformed_window_label_is_rejected() {
        let dir = tempdir().unwrap();
        let (config, structure) = setup(dir.path());
        assert!(matches!(
            evaluate(&args(config, structure, "x12")),
            Err(CliError::Window(_))
        ));
    }
}
