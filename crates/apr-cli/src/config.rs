use crate::cli::PlumedArgs;
use crate::error::{CliError, Result};
use apr_restraints::core::io::restraints::RestraintFile;
use apr_restraints::core::models::restraint::Restraint;
use apr_restraints::engine::plumed::{PlumedConfig, PlumedConfigBuilder};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct PartialUnitsConfig {
    energy: Option<String>,
    length: Option<String>,
    time: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct PartialPlumedConfig {
    path: Option<PathBuf>,
    #[serde(rename = "file-name")]
    file_name: Option<String>,
    #[serde(rename = "uses-legacy-k")]
    uses_legacy_k: Option<bool>,
    #[serde(rename = "dummy-force-constant")]
    dummy_force_constant: Option<f64>,
    #[serde(rename = "dummy-structure")]
    dummy_structure: Option<PathBuf>,
    units: Option<PartialUnitsConfig>,
}

/// Options from the command line that take precedence over the configuration file.
#[derive(Debug, Default, Clone)]
pub struct PlumedOverrides {
    pub path: Option<PathBuf>,
    pub file_name: Option<String>,
    pub no_legacy_k: bool,
    pub dummy_structure: Option<PathBuf>,
}

impl From<&PlumedArgs> for PlumedOverrides {
    fn from(args: &PlumedArgs) -> Self {
        Self {
            path: args.path.clone(),
            file_name: args.file_name.clone(),
            no_legacy_k: args.no_legacy_k,
            dummy_structure: args.structure.clone(),
        }
    }
}

/// The `apr.toml` configuration file as written, before defaults are applied.
///
/// Relative paths in the file are resolved against the directory holding it.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialAprConfig {
    restraints: Option<PathBuf>,
    plumed: Option<PartialPlumedConfig>,
    #[serde(skip)]
    base_dir: PathBuf,
}

impl PartialAprConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(config)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    pub fn restraints_path(&self) -> Result<PathBuf> {
        self.restraints
            .as_deref()
            .map(|path| self.resolve(path))
            .ok_or_else(|| CliError::Config("`restraints` is required.".to_string()))
    }

    pub fn load_restraints(&self) -> Result<Vec<Restraint>> {
        let path = self.restraints_path()?;
        debug!("Loading restraint definitions from {:?}", path);
        Ok(RestraintFile::load(&path)?)
    }

    /// The structure to take dummy atom positions from, if any.
    pub fn dummy_structure(&self, overrides: &PlumedOverrides) -> Option<PathBuf> {
        overrides.dummy_structure.clone().or_else(|| {
            self.plumed
                .as_ref()
                .and_then(|p| p.dummy_structure.as_deref())
                .map(|path| self.resolve(path))
        })
    }

    pub fn merge_with_cli(&self, overrides: &PlumedOverrides) -> Result<PlumedConfig> {
        let plumed = self.plumed.clone().unwrap_or_default();
        let units = plumed.units.unwrap_or_default();

        let mut builder = PlumedConfigBuilder::new();

        if let Some(path) = overrides.path.clone() {
            builder = builder.path(path);
        } else if let Some(path) = plumed.path.as_deref() {
            builder = builder.path(self.resolve(path));
        }
        if let Some(name) = overrides.file_name.clone().or(plumed.file_name) {
            builder = builder.file_name(name);
        }
        if overrides.no_legacy_k {
            builder = builder.uses_legacy_k(false);
        } else if let Some(legacy) = plumed.uses_legacy_k {
            builder = builder.uses_legacy_k(legacy);
        }
        if let Some(k) = plumed.dummy_force_constant {
            builder = builder.dummy_force_constant(k);
        }
        if let Some(energy) = units.energy {
            builder = builder.energy_unit(energy);
        }
        if let Some(length) = units.length {
            builder = builder.length_unit(length);
        }
        if let Some(time) = units.time {
            builder = builder.time_unit(time);
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }
}
