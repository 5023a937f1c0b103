use crate::cli::PlumedArgs;
use crate::config::{PartialAprConfig, PlumedOverrides};
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use apr_restraints::core::io::source::StructureSource;
use apr_restraints::engine::progress::ProgressReporter;
use apr_restraints::workflows::prepare::{self, PrepareResult};
use tracing::info;

pub fn run(args: PlumedArgs) -> Result<()> {
    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Writing PLUMED restraint files...");
    let result = execute(&args, &reporter)?;

    let biases: usize = result.summaries.iter().map(|s| s.biases).sum();
    println!(
        "✓ Wrote {} bias potentials across {} windows.",
        biases,
        result.windows.len()
    );
    if result.dummy_atoms_added {
        println!("✓ Dummy atom restraints appended to every window.");
    }
    Ok(())
}

fn execute(args: &PlumedArgs, reporter: &ProgressReporter) -> Result<PrepareResult> {
    let partial_config = PartialAprConfig::from_file(&args.config)?;
    let overrides = PlumedOverrides::from(args);
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&overrides)?;
    let restraints = partial_config.load_restraints()?;
    let dummy_structure = partial_config.dummy_structure(&overrides);

    info!(
        "Invoking the prepare workflow for {} restraints...",
        restraints.len()
    );
    Ok(prepare::run(
        &restraints,
        &config,
        dummy_structure.as_deref().map(StructureSource::Path),
        reporter,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use crate::error::CliError;
    use clap::Parser;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    const RESTRAINTS: &str = r#"
        [[restraint]]
        index1 = 10
        index2 = 20
        [restraint.attach]
        targets = [6.0, 6.0]
        force-constants = [0.0, 5.0]
    "#;

    fn plumed_args(config_path: &Path, extra: &[&str]) -> PlumedArgs {
        let mut argv = vec!["apr", "plumed", "-c", config_path.to_str().unwrap()];
        argv.extend_from_slice(extra);
        let Commands::Plumed(args) = Cli::parse_from(argv).command else {
            panic!("Expected 'plumed' subcommand");
        };
        args
    }

    fn write_inputs(dir: &Path, units: &str) -> PathBuf {
        fs::write(dir.join("restraints.toml"), RESTRAINTS).unwrap();
        let config_path = dir.join("apr.toml");
        fs::write(
            &config_path,
            format!(
                "restraints = \"restraints.toml\"\n[plumed]\npath = \"windows\"\n{units}"
            ),
        )
        .unwrap();
        config_path
    }

    #[test]
    fn writes_window_files_under_the_configured_path() {
        let dir = tempdir().unwrap();
        let config_path = write_inputs(dir.path(), "");
        let args = plumed_args(&config_path, &["--no-legacy-k"]);

        let result = execute(&args, &ProgressReporter::new()).unwrap();
        assert_eq!(result.windows.len(), 2);

        let content =
            fs::read_to_string(dir.path().join("windows/a001/plumed.dat")).unwrap();
        assert!(content.contains("RESTRAINT ARG=c1 AT=6.0000 KAPPA=5.00"));
    }

    #[test]
    fn configured_units_are_written_to_every_header() {
        let dir = tempdir().unwrap();
        let units = "[plumed.units]\nenergy = \"kcal/mol\"\nlength = \"A\"\ntime = \"ns\"\n";
        let config_path = write_inputs(dir.path(), units);

        execute(&plumed_args(&config_path, &[]), &ProgressReporter::new()).unwrap();

        for window in ["a000", "a001"] {
            let file = dir.path().join("windows").join(window).join("plumed.dat");
            let content = fs::read_to_string(file).unwrap();
            assert!(content.starts_with("UNITS LENGTH=A ENERGY=kcal/mol TIME=ns\n"));
        }
    }

    #[test]
    fn unsupported_length_unit_fails_before_any_window_is_written() {
        let dir = tempdir().unwrap();
        let config_path = write_inputs(dir.path(), "[plumed.units]\nlength = \"m\"\n");

        let result = execute(&plumed_args(&config_path, &[]), &ProgressReporter::new());

        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("length")));
        assert!(!dir.path().join("windows").exists());
    }
}
