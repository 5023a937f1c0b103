use super::units::{EnergyUnit, LengthUnit, PlumedUnits, TimeUnit, UnitError};
use std::path::{Path, PathBuf};

pub const DEFAULT_FILE_NAME: &str = "plumed.dat";
pub const DEFAULT_BASE_PATH: &str = "./";
/// Per-component spring constant of the placeholder-particle restraint, in file units.
pub const DEFAULT_DUMMY_FORCE_CONSTANT: f64 = 100.0;

#[derive(Debug, Clone, PartialEq)]
pub struct PlumedConfig {
    pub path: PathBuf,
    pub file_name: String,
    pub units: PlumedUnits,
    /// Whether input force constants follow the `k (x - x0)²` convention and must be doubled
    /// for PLUMED's `½ k (x - x0)²`.
    pub uses_legacy_k: bool,
    pub dummy_force_constant: f64,
}

impl Default for PlumedConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_BASE_PATH),
            file_name: DEFAULT_FILE_NAME.to_string(),
            units: PlumedUnits::default(),
            uses_legacy_k: true,
            dummy_force_constant: DEFAULT_DUMMY_FORCE_CONSTANT,
        }
    }
}

impl PlumedConfig {
    /// Factor applied to every force constant before it is written.
    pub fn k_factor(&self) -> f64 {
        if self.uses_legacy_k { 2.0 } else { 1.0 }
    }

    /// `<path>/<window>/<file_name>`
    pub fn window_file(&self, base: Option<&Path>, window: &str) -> PathBuf {
        base.unwrap_or(self.path.as_path()).join(window).join(&self.file_name)
    }
}

#[derive(Default)]
pub struct PlumedConfigBuilder {
    path: Option<PathBuf>,
    file_name: Option<String>,
    energy_unit: Option<String>,
    length_unit: Option<String>,
    time_unit: Option<String>,
    uses_legacy_k: Option<bool>,
    dummy_force_constant: Option<f64>,
}

impl PlumedConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }
    pub fn energy_unit(mut self, unit: impl Into<String>) -> Self {
        self.energy_unit = Some(unit.into());
        self
    }
    pub fn length_unit(mut self, unit: impl Into<String>) -> Self {
        self.length_unit = Some(unit.into());
        self
    }
    pub fn time_unit(mut self, unit: impl Into<String>) -> Self {
        self.time_unit = Some(unit.into());
        self
    }
    pub fn uses_legacy_k(mut self, legacy: bool) -> Self {
        self.uses_legacy_k = Some(legacy);
        self
    }
    pub fn dummy_force_constant(mut self, k: f64) -> Self {
        self.dummy_force_constant = Some(k);
        self
    }

    /// Validates the unit strings and fills every unset option with its default.
    pub fn build(self) -> Result<PlumedConfig, UnitError> {
        let defaults = PlumedConfig::default();

        let units = PlumedUnits {
            energy: self
                .energy_unit
                .as_deref()
                .map(EnergyUnit::parse)
                .transpose()?
                .unwrap_or(defaults.units.energy),
            length: self
                .length_unit
                .as_deref()
                .map(LengthUnit::parse)
                .transpose()?
                .unwrap_or(defaults.units.length),
            time: self
                .time_unit
                .as_deref()
                .map(TimeUnit::parse)
                .transpose()?
                .unwrap_or(defaults.units.time),
        };

        Ok(PlumedConfig {
            path: self.path.unwrap_or(defaults.path),
            file_name: self.file_name.unwrap_or(defaults.file_name),
            units,
            uses_legacy_k: self.uses_legacy_k.unwrap_or(defaults.uses_legacy_k),
            dummy_force_constant: self
                .dummy_force_constant
                .unwrap_or(defaults.dummy_force_constant),
        })
    }
}
